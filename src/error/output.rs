//! Errors reported by an [`AudioOutput`](crate::AudioOutput).

//----------------------------------------------------------------------------------------------- AudioOutput Errors
/// Error that occurs when attempting to open, write
/// bytes to, or close an audio hardware/server stream.
///
/// This can be due to many reasons, e.g:
/// - Audio device was unplugged
/// - Audio server disconnected/killed
/// - Stream parameters are not supported by the audio hardware/server
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
	#[error("audio stream was closed")]
	/// The audio stream was closed.
	///
	/// Bundled outputs also return this on a second `close()`.
	StreamClosed,

	#[error("audio hardware/server is unavailable")]
	/// The audio hardware/server is unavailable.
	DeviceUnavailable,

	#[error("audio format is invalid or unsupported")]
	/// The audio format is invalid or unsupported,
	/// e.g. a `bytes_per_sample` the output cannot play.
	InvalidFormat,

	#[error("failed to write bytes to the audio stream")]
	/// Failed to write bytes to the audio stream.
	Write,

	#[error("audio stream contains an invalid/unsupported channel count")]
	/// The channel count was `0` or unsupported.
	InvalidChannels,

	#[error("audio sample rate is invalid")]
	/// The audio's sample rate was invalid.
	///
	/// This either means a `0` sample rate or one
	/// the audio hardware/server cannot open.
	InvalidSampleRate,

	#[error("audio specification is invalid")]
	/// The stream specification was invalid.
	///
	/// This means something other than the `channel` count,
	/// `sample_rate` or sample format was invalid, e.g. a buffer size of `0`.
	InvalidSpec,

	#[error("write was cancelled")]
	/// A cancellable write observed its [`Cancel`](crate::Cancel) signal.
	Cancelled,

	#[error("unknown error: {0}")]
	/// An unknown or very specific error occurred.
	///
	/// The `str` will contain more information.
	Unknown(std::borrow::Cow<'static, str>),
}
