//! The buffered stream writer.

mod writer;
pub use writer::Writer;

mod cancel;
pub use cancel::Cancel;
