//! Errors that can occur when opening, writing to, or closing an output.

mod output;
pub use output::OutputError;

mod write;
pub use write::WriteError;
