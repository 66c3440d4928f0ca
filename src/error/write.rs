//---------------------------------------------------------------------------------------------------- use
use crate::error::OutputError;

//---------------------------------------------------------------------------------------------------- WriteError
#[derive(thiserror::Error, Debug)]
#[error("wrote {written} bytes before failing: {source}")]
/// A write that failed part-way through.
///
/// `written` is exactly how many bytes were handed to the
/// output before `source` occurred. The caller still owns
/// `data[written..]` and may retry or discard it.
pub struct WriteError {
	/// Bytes accepted by the output before the failure.
	pub written: usize,
	/// What went wrong.
	#[source]
	pub source: OutputError,
}

impl WriteError {
	#[inline]
	#[must_use]
	/// Create a [`WriteError`] from a byte count and the underlying error.
	pub const fn new(written: usize, source: OutputError) -> Self {
		Self { written, source }
	}

	#[inline]
	#[must_use]
	/// Shift `written` forward by `previous` bytes.
	///
	/// Used to turn a per-call count into a running total.
	pub(crate) fn offset(self, previous: usize) -> Self {
		Self {
			written: previous + self.written,
			source: self.source,
		}
	}
}

impl From<OutputError> for WriteError {
	/// Failure before any byte was accepted.
	fn from(source: OutputError) -> Self {
		Self::new(0, source)
	}
}

impl From<WriteError> for std::io::Error {
	fn from(error: WriteError) -> Self {
		use std::io::ErrorKind as K;
		let kind = match error.source {
			OutputError::StreamClosed => K::BrokenPipe,
			OutputError::DeviceUnavailable => K::NotConnected,
			OutputError::InvalidFormat
			| OutputError::InvalidChannels
			| OutputError::InvalidSampleRate
			| OutputError::InvalidSpec => K::InvalidInput,
			OutputError::Write
			| OutputError::Cancelled
			| OutputError::Unknown(_) => K::Other,
		};
		Self::new(kind, error)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn offset_adds_running_total() {
		let e = WriteError::new(7, OutputError::Write).offset(100);
		assert_eq!(e.written, 107);
		assert!(matches!(e.source, OutputError::Write));
	}

	#[test]
	fn display() {
		let e = WriteError::new(3, OutputError::StreamClosed);
		assert_eq!(e.to_string(), "wrote 3 bytes before failing: audio stream was closed");

		let e: WriteError = OutputError::DeviceUnavailable.into();
		assert_eq!(e.written, 0);
	}

	#[test]
	fn into_io_error() {
		let e: std::io::Error = WriteError::new(1, OutputError::StreamClosed).into();
		assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe);

		let e: std::io::Error = WriteError::new(0, OutputError::Cancelled).into();
		assert_eq!(e.kind(), std::io::ErrorKind::Other);
	}
}
