//! Audio hardware output
//!
//! This file implements the abstract `AudioOutput`
//! trait using `cpal` as a backend.
//!
//! For documentation on `AudioOutput`, see `output.rs`.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::{OutputError,WriteError},
	spec::StreamSpec,
	output::{
		AudioOutput,
		frames::fill,
		sizing::{buffer_sizes,BufferSizes},
	},
	macros::{debug2,trace2,error2},
};
use crossbeam::channel::Receiver;
use ringbuf::{HeapRb,HeapProd,traits::{Producer,Split}};
use std::borrow::Cow;
use cpal::traits::{DeviceTrait,StreamTrait,HostTrait};

//----------------------------------------------------------------------------------------------- Cpal
/// An [`AudioOutput`] playing to the default `cpal` host's default device.
///
/// Bytes are buffered in a ring buffer of [`BufferSizes::upper`] bytes,
/// which `cpal`'s audio callback drains frame by frame and converts to `f32`.
pub struct Cpal {
	/// We write audio data into this ring buffer
	/// which the audio stream will read and play.
	///
	/// `None` after `close()`.
	producer: Option<HeapProd<u8>>,

	/// The actual audio stream.
	///
	/// `None` after `close()`.
	stream: Option<cpal::Stream>,

	/// `cpal` reports errors from its own thread,
	/// they get forwarded on the next `write()`.
	error: Receiver<cpal::StreamError>,

	/// Spec output was opened with.
	spec: StreamSpec,
	/// Actual buffer layout.
	sizes: BufferSizes,
}

impl Cpal {
	#[inline]
	#[must_use]
	/// The [`StreamSpec`] this output was opened with.
	pub const fn spec(&self) -> &StreamSpec {
		&self.spec
	}

	#[inline]
	#[must_use]
	/// The actual buffer layout, after rounding the requested size.
	pub const fn sizes(&self) -> BufferSizes {
		self.sizes
	}

	/// Find a device config that plays `f32` at our rate and channel count.
	///
	/// The most specific mismatch is reported.
	fn check_device(device: &cpal::Device, spec: &StreamSpec) -> Result<(), OutputError> {
		let sample_rate = cpal::SampleRate(spec.sample_rate.get());

		// SOMEDAY: support non-f32 devices.
		let configs: Vec<_> = device
			.supported_output_configs()?
			.filter(|c| c.sample_format() == cpal::SampleFormat::F32)
			.collect();
		debug2!("Cpal - f32 device configs:\n{configs:#?}");

		if configs.is_empty() {
			return Err(OutputError::InvalidFormat);
		}

		let configs: Vec<_> = configs
			.into_iter()
			.filter(|c| c.channels() == spec.channels.get())
			.collect();
		if configs.is_empty() {
			return Err(OutputError::InvalidChannels);
		}

		if configs
			.iter()
			.any(|c| c.min_sample_rate() <= sample_rate && c.max_sample_rate() >= sample_rate)
		{
			Ok(())
		} else {
			Err(OutputError::InvalidSampleRate)
		}
	}
}

//----------------------------------------------------------------------------------------------- `AudioOutput` Impl
impl AudioOutput for Cpal {
	#[cold]
	#[inline(never)]
	fn try_open(spec: StreamSpec) -> Result<Self, OutputError> {
		debug2!("Cpal - try_open(), spec: {spec:?}");

		let Some(format) = spec.sample_format() else {
			return Err(OutputError::InvalidFormat);
		};

		// Get default host.
		let host = cpal::default_host();

		// Get the default audio output device.
		let Some(device) = host.default_output_device() else {
			return Err(OutputError::DeviceUnavailable);
		};

		Self::check_device(&device, &spec)?;

		// Output audio stream config.
		let config = cpal::StreamConfig {
			channels: spec.channels.get(),
			sample_rate: cpal::SampleRate(spec.sample_rate.get()),
			buffer_size: cpal::BufferSize::Default,
		};
		debug2!("Cpal - config:\n{config:#?}");

		let requested = isize::try_from(spec.buffer_size.get()).unwrap_or(isize::MAX);
		let sizes = buffer_sizes(requested);
		debug2!("Cpal - format: {format}, sizes: {sizes:?}");

		let (producer, mut consumer) = HeapRb::<u8>::new(sizes.upper).split();
		let (error_send, error_recv) = crossbeam::channel::unbounded();

		// Scratch space for 1 frame, allocated here
		// so the audio callback never allocates.
		let mut frame = vec![0_u8; spec.frame_size().get()];

		// The actual callback `cpal` will call when polling for audio data.
		let data_callback = move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
			let frames = fill(&mut consumer, format, &mut frame, output);
			trace2!("Cpal - data callback, output.len(): {}, frames: {frames}", output.len());
		};

		// The callback `cpal` will call when errors occur.
		let error_callback = move |error: cpal::StreamError| {
			error2!("Cpal - stream error: {error}");
			drop(error_send.try_send(error));
		};

		// Build the audio stream.
		let stream = device.build_output_stream(&config, data_callback, error_callback, None)?;

		// Start the output stream.
		stream.play()?;

		Ok(Self {
			producer: Some(producer),
			stream: Some(stream),
			error: error_recv,
			spec,
			sizes,
		})
	}

	fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
		// If the backend errored, forward it.
		if let Ok(error) = self.error.try_recv() {
			return Err(OutputError::from(error).into());
		}

		let Some(producer) = self.producer.as_mut() else {
			return Err(OutputError::StreamClosed.into());
		};

		Ok(producer.push_slice(data))
	}

	fn close(&mut self) -> Result<(), OutputError> {
		debug2!("Cpal - close()");

		let Some(stream) = self.stream.take() else {
			return Err(OutputError::StreamClosed);
		};
		self.producer = None;

		stream.pause()?;
		Ok(())
	}
}

//----------------------------------------------------------------------------------------------- Error re-map
impl From<cpal::SupportedStreamConfigsError> for OutputError {
	fn from(error: cpal::SupportedStreamConfigsError) -> Self {
		use cpal::SupportedStreamConfigsError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::InvalidArgument => Self::InvalidFormat,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::StreamError> for OutputError {
	fn from(error: cpal::StreamError) -> Self {
		use cpal::StreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::BuildStreamError> for OutputError {
	fn from(error: cpal::BuildStreamError) -> Self {
		use cpal::BuildStreamError as E;
		match error {
			E::DeviceNotAvailable | E::StreamIdOverflow => Self::DeviceUnavailable,
			E::StreamConfigNotSupported | E::InvalidArgument => Self::InvalidFormat,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::PlayStreamError> for OutputError {
	fn from(error: cpal::PlayStreamError) -> Self {
		use cpal::PlayStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::PauseStreamError> for OutputError {
	fn from(error: cpal::PauseStreamError) -> Self {
		use cpal::PauseStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::StreamClosed,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}
