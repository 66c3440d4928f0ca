//! Dummy audio hardware output.
//!
//! This file implements the abstract `AudioOutput`
//! trait using a fake dummy backend.
//!
//! All bytes are read by a thread that
//! doesn't actually connect to anything.
//!
//! Functionally, it should behave the exact same
//! as other backends (bounded buffer, partial writes
//! when full, drained at the stream's real-time rate),
//! except it doesn't actually play any audio.
//!
//! This is used for testing purposes.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::{OutputError,WriteError},
	spec::StreamSpec,
	output::{
		AudioOutput,
		constants::LOWER_BUFFER_UNIT_SIZE,
		sizing::{buffer_sizes,BufferSizes},
	},
	macros::{debug2,trace2,error2},
};
use crossbeam::channel::{Sender,Receiver,RecvTimeoutError};
use ringbuf::{
	HeapRb,HeapProd,HeapCons,
	traits::{Consumer,Producer,Split},
};
use std::{
	borrow::Cow,
	time::Duration,
	thread::JoinHandle,
};

//----------------------------------------------------------------------------------------------- DummyAudioOutput
/// An [`AudioOutput`] that plays into nothing.
///
/// Bytes are buffered in a ring buffer of [`BufferSizes::upper`] bytes
/// and drained one [`LOWER_BUFFER_UNIT_SIZE`] chunk at a time, at
/// the speed real hardware would play them.
pub struct DummyOutput {
	/// We write audio data into this ring buffer
	/// which the dummy thread will read and discard.
	///
	/// `None` after `close()`.
	producer: Option<HeapProd<u8>>,

	/// Dropping this tells the dummy thread to exit.
	shutdown: Option<Sender<()>>,

	/// The dummy "audio" thread.
	thread: Option<JoinHandle<()>>,

	/// Spec output was opened with.
	spec: StreamSpec,
	/// Actual buffer layout.
	sizes: BufferSizes,
}

impl DummyOutput {
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

	/// The fake "playback" loop.
	///
	/// Consume 1 unit of bytes, then wait as long
	/// as that unit would take to play.
	///
	/// Exits as soon as `shutdown` is sent to or dropped.
	fn drain(mut consumer: HeapCons<u8>, shutdown: Receiver<()>, unit: Duration) {
		let mut scratch = [0_u8; LOWER_BUFFER_UNIT_SIZE];

		loop {
			let played = consumer.pop_slice(&mut scratch);
			trace2!("DummyOutput - played: {played}");

			match shutdown.recv_timeout(unit) {
				Err(RecvTimeoutError::Timeout) => continue,
				Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
			}
		}
	}
}

impl std::fmt::Debug for DummyOutput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DummyOutput")
			.field("closed", &self.producer.is_none())
			.field("spec", &self.spec)
			.field("sizes", &self.sizes)
			.finish_non_exhaustive()
	}
}

//----------------------------------------------------------------------------------------------- `AudioOutput` Impl
impl AudioOutput for DummyOutput {
	#[cold]
	#[inline(never)]
	fn try_open(spec: StreamSpec) -> Result<Self, OutputError> {
		debug2!("DummyOutput - try_open(), spec: {spec:?}");

		let requested = isize::try_from(spec.buffer_size.get()).unwrap_or(isize::MAX);
		let sizes = buffer_sizes(requested);

		// How long 1 unit of bytes takes to play.
		let unit = Duration::from_nanos(
			(1_000_000_000 * LOWER_BUFFER_UNIT_SIZE as u64) / spec.bytes_per_second()
		);
		debug2!("DummyOutput - sizes: {sizes:?}, unit: {unit:?}");

		let (producer, consumer) = HeapRb::<u8>::new(sizes.upper).split();
		let (shutdown, shutdown_recv) = crossbeam::channel::bounded(1);

		let thread = std::thread::Builder::new()
			.name("ringout-dummy".into())
			.spawn(move || Self::drain(consumer, shutdown_recv, unit))
			.map_err(|e| OutputError::Unknown(Cow::Owned(format!("dummy thread spawn error: {e}"))))?;

		Ok(Self {
			producer: Some(producer),
			shutdown: Some(shutdown),
			thread: Some(thread),
			spec,
			sizes,
		})
	}

	fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
		let Some(producer) = self.producer.as_mut() else {
			return Err(OutputError::StreamClosed.into());
		};

		Ok(producer.push_slice(data))
	}

	fn close(&mut self) -> Result<(), OutputError> {
		debug2!("DummyOutput - close()");

		if self.producer.take().is_none() {
			return Err(OutputError::StreamClosed);
		}

		// Disconnecting wakes the thread up immediately.
		drop(self.shutdown.take());

		match self.thread.take().map(JoinHandle::join) {
			Some(Err(_)) => {
				error2!("DummyOutput - thread panicked");
				Err(OutputError::Unknown(Cow::Borrowed("dummy thread panicked")))
			},
			_ => Ok(()),
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::thread::sleep;

	#[test]
	fn open_rounds_buffer() {
		let spec = StreamSpec::new(44_100, 2, 2, 100).unwrap();
		let mut output = DummyOutput::try_open(spec).unwrap();
		assert_eq!(output.sizes(), BufferSizes { upper: 1024, units: 8 });
		assert_eq!(output.spec(), &spec);
		output.close().unwrap();
	}

	#[test]
	fn partial_write_when_full() {
		let mut output = DummyOutput::try_open(StreamSpec::DEFAULT).unwrap();

		let data = vec![0; 64 * 1024];
		let n = output.write(&data).unwrap();
		// At least the buffer fits, nowhere near all of it.
		assert!(n >= 4096);
		assert!(n < data.len());

		output.close().unwrap();
	}

	#[test]
	fn empty_write() {
		let mut output = DummyOutput::try_open(StreamSpec::DEFAULT).unwrap();
		assert_eq!(output.write(&[]).unwrap(), 0);
		output.close().unwrap();
	}

	#[test]
	fn drains_over_time() {
		let mut output = DummyOutput::try_open(StreamSpec::DEFAULT).unwrap();

		let data = vec![0; 4096];
		let mut written = output.write(&data).unwrap();
		while written < data.len() {
			sleep(Duration::from_millis(5));
			written += output.write(&data[written..]).unwrap();
		}

		// Buffer should be draining, so more fits eventually.
		let mut more = 0;
		while more == 0 {
			sleep(Duration::from_millis(5));
			more = output.write(&data).unwrap();
		}
		assert!(more > 0);

		output.close().unwrap();
	}

	#[test]
	fn close_does_not_wait_for_playback() {
		// 1 byte per second, 1 unit takes 1024 seconds to play.
		let spec = StreamSpec::new(1, 1, 1, 1).unwrap();
		let mut output = DummyOutput::try_open(spec).unwrap();
		assert_eq!(output.write(&[0; 16]).unwrap(), 16);

		let now = std::time::Instant::now();
		output.close().unwrap();
		assert!(now.elapsed() < Duration::from_secs(5));
	}

	#[test]
	fn write_and_close_after_close() {
		let mut output = DummyOutput::try_open(StreamSpec::DEFAULT).unwrap();
		output.close().unwrap();

		let err = output.write(&[1, 2, 3]).unwrap_err();
		assert_eq!(err.written, 0);
		assert!(matches!(err.source, OutputError::StreamClosed));

		assert!(matches!(output.close(), Err(OutputError::StreamClosed)));
	}
}
