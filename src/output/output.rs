//! Audio hardware output
//!
//! This file defines the capability an audio backend must provide
//! for a [`Writer`](crate::Writer) to feed it raw PCM bytes.
//!
//! The trait `AudioOutput` is the ideal abstract
//! simplification of what this part of the system should do:
//! open, accept as many bytes as fit, close.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::{OutputError,WriteError},
	spec::StreamSpec,
};

//----------------------------------------------------------------------------------------------- AudioOutput Trait
/// A live audio hardware/server stream with a bounded internal buffer.
///
/// # Invariants
/// Implementors are expected to implement these functions
/// correctly according to the documentation invariants.
pub trait AudioOutput: Sized {
	/// Initialize a connection with the audio hardware/server.
	///
	/// The `spec`'s sample rate, channel count and sample width
	/// must be followed. `spec.buffer_size` is a request, the output
	/// may round it (see [`crate::output::buffer_sizes`]).
	///
	/// # Errors
	/// Any reason the stream could not be created, e.g.
	/// no device or an unsupported format.
	fn try_open(spec: StreamSpec) -> Result<Self, OutputError>;

	/// Accept as many leading bytes of `data` as currently fit.
	///
	/// Invariants:
	/// 1. This must _not_ block waiting for room, return what fit instead
	/// 2. `Ok(n)` must satisfy `n <= data.len()`, `n` may be `0` when full
	/// 3. Bytes are consumed in order, `data[..n]` are the bytes taken
	///
	/// # Errors
	/// [`WriteError::written`] must be how many bytes
	/// of `data` were consumed before the failure.
	fn write(&mut self, data: &[u8]) -> Result<usize, WriteError>;

	/// Close the stream.
	///
	/// What a second call does is up to the implementor.
	///
	/// # Errors
	/// The stream failed to close cleanly.
	fn close(&mut self) -> Result<(), OutputError>;
}
