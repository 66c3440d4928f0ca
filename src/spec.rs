//! Stream parameters.

//---------------------------------------------------------------------------------------------------- use
use crate::error::OutputError;
use std::{
	num::{NonZeroU16,NonZeroU32,NonZeroUsize},
	time::Duration,
};

//---------------------------------------------------------------------------------------------------- StreamSpec
/// The four parameters a PCM stream is opened with.
///
/// All of them are non-zero, this is enforced by the field types.
///
/// A [`Writer`](crate::Writer) copies this on construction and never
/// changes it afterwards, playing another format means opening a new one.
///
/// ```rust
/// # use ringout::*;
/// let spec = StreamSpec::new(44_100, 2, 2, 4096).unwrap();
/// assert_eq!(spec.bytes_per_second(), 176_400);
/// assert_eq!(spec, StreamSpec::DEFAULT);
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamSpec {
	/// Samples per second, per channel.
	pub sample_rate: NonZeroU32,
	/// Amount of interleaved channels.
	pub channels: NonZeroU16,
	/// Width of a single sample in bytes.
	pub bytes_per_sample: NonZeroU16,
	/// Requested size of the output's internal buffer in bytes.
	///
	/// Outputs may round this up (see [`crate::output::buffer_sizes`]),
	/// the [`Writer`](crate::Writer)'s pacing always uses this value as-is.
	pub buffer_size: NonZeroUsize,
}

/// `NonZero*::new()` in `const` context.
macro_rules! non_zero {
	($ty:ident, $n:expr) => {
		match $ty::new($n) {
			Some(n) => n,
			None => panic!("zero constant"),
		}
	}
}

impl StreamSpec {
	/// 44.1kHz, stereo, 16-bit, 4096 byte buffer.
	pub const DEFAULT: Self = Self {
		sample_rate:      non_zero!(NonZeroU32, 44_100),
		channels:         non_zero!(NonZeroU16, 2),
		bytes_per_sample: non_zero!(NonZeroU16, 2),
		buffer_size:      non_zero!(NonZeroUsize, 4096),
	};

	/// Create a [`StreamSpec`] from plain integers.
	///
	/// # Errors
	/// A `0` in any position is rejected:
	/// - `sample_rate` -> [`OutputError::InvalidSampleRate`]
	/// - `channels` -> [`OutputError::InvalidChannels`]
	/// - `bytes_per_sample` -> [`OutputError::InvalidFormat`]
	/// - `buffer_size` -> [`OutputError::InvalidSpec`]
	pub fn new(
		sample_rate: u32,
		channels: u16,
		bytes_per_sample: u16,
		buffer_size: usize,
	) -> Result<Self, OutputError> {
		let Some(sample_rate) = NonZeroU32::new(sample_rate) else {
			return Err(OutputError::InvalidSampleRate);
		};
		let Some(channels) = NonZeroU16::new(channels) else {
			return Err(OutputError::InvalidChannels);
		};
		let Some(bytes_per_sample) = NonZeroU16::new(bytes_per_sample) else {
			return Err(OutputError::InvalidFormat);
		};
		let Some(buffer_size) = NonZeroUsize::new(buffer_size) else {
			return Err(OutputError::InvalidSpec);
		};

		Ok(Self { sample_rate, channels, bytes_per_sample, buffer_size })
	}

	#[must_use]
	/// Replace `buffer_size` with the amount of bytes
	/// that holds `latency` worth of audio.
	///
	/// This rounds down to whole frames, but is never less than 1 frame.
	///
	/// ```rust
	/// # use ringout::*;
	/// # use std::time::Duration;
	/// let spec = StreamSpec::DEFAULT.with_buffer_duration(Duration::from_millis(100));
	/// // 4410 frames * 4 bytes.
	/// assert_eq!(spec.buffer_size.get(), 17_640);
	///
	/// let spec = StreamSpec::DEFAULT.with_buffer_duration(Duration::ZERO);
	/// assert_eq!(spec.buffer_size.get(), 4);
	/// ```
	pub fn with_buffer_duration(mut self, latency: Duration) -> Self {
		let frames = latency.as_nanos() * u128::from(self.sample_rate.get()) / 1_000_000_000;
		let bytes  = frames.max(1) * self.frame_size().get() as u128;
		let bytes  = usize::try_from(bytes).unwrap_or(usize::MAX);

		// `frames >= 1` and `frame_size >= 1`.
		if let Some(bytes) = NonZeroUsize::new(bytes) {
			self.buffer_size = bytes;
		}
		self
	}

	#[inline]
	#[must_use]
	/// Bytes in one frame (one sample for every channel).
	pub fn frame_size(&self) -> NonZeroUsize {
		let size = usize::from(self.channels.get()) * usize::from(self.bytes_per_sample.get());
		NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN)
	}

	#[inline]
	#[must_use]
	/// `sample_rate * channels * bytes_per_sample`.
	///
	/// Always greater than `0`.
	pub fn bytes_per_second(&self) -> u64 {
		u64::from(self.sample_rate.get())
			* u64::from(self.channels.get())
			* u64::from(self.bytes_per_sample.get())
	}

	#[inline]
	#[must_use]
	/// The [`SampleFormat`] matching `bytes_per_sample`, if there is one.
	pub fn sample_format(&self) -> Option<SampleFormat> {
		SampleFormat::from_bytes_per_sample(self.bytes_per_sample.get())
	}
}

impl Default for StreamSpec {
	fn default() -> Self {
		Self::DEFAULT
	}
}

//---------------------------------------------------------------------------------------------------- SampleFormat
/// Sample encodings that outputs know how to play.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,strum::Display,strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SampleFormat {
	/// Unsigned 8-bit, silence is `128`.
	U8,
	/// Signed 16-bit, little endian.
	S16,
}

impl SampleFormat {
	#[must_use]
	/// `1` -> [`Self::U8`], `2` -> [`Self::S16`], anything else is unsupported.
	pub const fn from_bytes_per_sample(bytes: u16) -> Option<Self> {
		match bytes {
			1 => Some(Self::U8),
			2 => Some(Self::S16),
			_ => None,
		}
	}

	#[must_use]
	/// Bytes per sample.
	pub const fn bytes(self) -> usize {
		match self {
			Self::U8 => 1,
			Self::S16 => 2,
		}
	}

	#[must_use]
	/// Convert one sample's bytes into an `f32` in `-1.0..1.0`.
	///
	/// `bytes` must be exactly [`Self::bytes`] long.
	pub fn to_f32(self, bytes: &[u8]) -> f32 {
		debug_assert_eq!(bytes.len(), self.bytes());

		match self {
			Self::U8 => (f32::from(bytes[0]) - 128.0) / 128.0,
			Self::S16 => f32::from(i16::from_le_bytes([bytes[0], bytes[1]])) / 32768.0,
		}
	}
}
