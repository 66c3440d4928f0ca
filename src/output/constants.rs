//! Shared constants used for audio output.

//----------------------------------------------------------------------------------------------- Constants
/// The smallest chunk an output's internal buffer is divided into, in bytes.
pub const LOWER_BUFFER_UNIT_SIZE: usize = 1024;

/// The least amount of [`LOWER_BUFFER_UNIT_SIZE`] chunks an output's buffer is divided into.
pub const LOWER_BUFFER_UNIT_MIN: usize = 8;

