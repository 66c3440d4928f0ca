//! Output buffer sizing.

//----------------------------------------------------------------------------------------------- use
use crate::output::constants::{LOWER_BUFFER_UNIT_SIZE,LOWER_BUFFER_UNIT_MIN};

//----------------------------------------------------------------------------------------------- BufferSizes
/// The internal buffer layout an output should allocate.
///
/// Returned by [`buffer_sizes`].
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub struct BufferSizes {
	/// Total buffer capacity in bytes, never less than [`LOWER_BUFFER_UNIT_SIZE`].
	pub upper: usize,
	/// How many [`LOWER_BUFFER_UNIT_SIZE`] chunks the buffer
	/// is divided into, never less than [`LOWER_BUFFER_UNIT_MIN`].
	pub units: usize,
}

/// Compute the internal buffer layout for a requested buffer size in bytes.
///
/// Zero, negative or tiny requests are clamped up, never rejected.
///
/// ```rust
/// # use ringout::output::*;
/// assert_eq!(buffer_sizes(0),      BufferSizes { upper: 1024,  units: 8 });
/// assert_eq!(buffer_sizes(-5),     BufferSizes { upper: 1024,  units: 8 });
/// assert_eq!(buffer_sizes(16_384), BufferSizes { upper: 16_384, units: 16 });
/// ```
#[must_use]
pub fn buffer_sizes(requested: isize) -> BufferSizes {
	// Anything below the floor (including negatives) becomes the floor.
	let upper = usize::try_from(requested)
		.unwrap_or(0)
		.max(LOWER_BUFFER_UNIT_SIZE);

	let units = upper
		.div_ceil(LOWER_BUFFER_UNIT_SIZE)
		.max(LOWER_BUFFER_UNIT_MIN);

	BufferSizes { upper, units }
}
