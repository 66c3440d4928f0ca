//! Blocking "write everything" on top of an output that only takes what fits.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::{OutputError,WriteError},
	output::{AudioOutput,DefaultOutput},
	spec::StreamSpec,
	writer::Cancel,
	macros::{debug2,trace2},
};
use std::{
	io,
	thread::sleep,
	time::Duration,
};

//---------------------------------------------------------------------------------------------------- Writer
/// Writes PCM bytes into an [`AudioOutput`], waiting out backpressure.
///
/// The output only accepts as many bytes as fit in its
/// internal buffer. [`Writer::write`] keeps re-offering the rest,
/// sleeping [`Writer::pacing`] between attempts, until
/// everything was accepted or the output errors.
///
/// The [`StreamSpec`] is fixed at construction,
/// playing another format means opening a new [`Writer`].
///
/// `write()` takes `&mut self`, a [`Writer`] shared
/// across threads must be wrapped in a lock by the caller.
#[derive(Debug)]
pub struct Writer<O: AudioOutput = DefaultOutput> {
	/// The output, exclusively ours.
	output: O,
	/// Spec the output was opened with.
	spec: StreamSpec,
	/// An error hit after part of an `io::Write::write()`
	/// was delivered, returned on the next call.
	pending: Option<OutputError>,
}

impl<O: AudioOutput> Writer<O> {
	#[cold]
	#[inline(never)]
	/// Open an `O` with `spec` and wrap it.
	///
	/// # Errors
	/// Whatever [`AudioOutput::try_open`] returned, as-is.
	pub fn try_open(spec: StreamSpec) -> Result<Self, OutputError> {
		debug2!("Writer - try_open(), spec: {spec:?}");
		let output = O::try_open(spec)?;
		Ok(Self::from_output(output, spec))
	}

	#[must_use]
	/// Wrap an already opened output.
	///
	/// `spec` must be what `output` was opened with,
	/// it is what [`Self::pacing`] is computed from.
	pub const fn from_output(output: O, spec: StreamSpec) -> Self {
		Self {
			output,
			spec,
			pending: None,
		}
	}

	#[inline]
	#[must_use]
	/// The [`StreamSpec`] this writer was created with.
	pub const fn spec(&self) -> &StreamSpec {
		&self.spec
	}

	#[inline]
	#[must_use]
	/// Access the underlying output.
	pub const fn output(&self) -> &O {
		&self.output
	}

	#[inline]
	#[must_use]
	/// `sample_rate * channels * bytes_per_sample`.
	pub fn bytes_per_second(&self) -> u64 {
		self.spec.bytes_per_second()
	}

	#[must_use]
	/// How long to sleep when the output did not take everything.
	///
	/// A quarter of the time the *requested* buffer size plays
	/// for, i.e. `buffer_size / bytes_per_second / 4` seconds.
	///
	/// ```rust
	/// # use ringout::*;
	/// # use std::time::Duration;
	/// let writer = Writer::<DummyOutput>::try_open(StreamSpec::DEFAULT).unwrap();
	/// // 4096 / 176400 / 4 seconds.
	/// assert_eq!(writer.pacing(), Duration::from_nanos(5_804_988));
	/// # writer.close().unwrap();
	/// ```
	pub fn pacing(&self) -> Duration {
		let buffer_size = self.spec.buffer_size.get() as u128;
		let bytes_per_second = u128::from(self.bytes_per_second());

		let nanos = 1_000_000_000 * buffer_size / bytes_per_second / 4;
		Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
	}

	/// Hand all of `data` to the output.
	///
	/// This blocks for as long as the output stays full,
	/// there is no timeout, see [`Self::write_cancellable`]
	/// for a write that can be stopped.
	///
	/// Returns `data.len()` on success, an empty `data`
	/// returns `0` without touching the output.
	///
	/// # Errors
	/// The first error the output returns, without retrying.
	///
	/// [`WriteError::written`] is how many bytes of `data`
	/// the output accepted in total, `data[written..]`
	/// was not delivered.
	pub fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
		self.write_inner(data, None)
	}

	/// [`Self::write`], but checks `cancel` before every output write.
	///
	/// # Errors
	/// Same as [`Self::write`], plus [`OutputError::Cancelled`] once
	/// `cancel` is observed, with the exact amount written so far.
	pub fn write_cancellable(&mut self, data: &[u8], cancel: &Cancel) -> Result<usize, WriteError> {
		self.write_inner(data, Some(cancel))
	}

	fn write_inner(&mut self, data: &[u8], cancel: Option<&Cancel>) -> Result<usize, WriteError> {
		let mut remaining = data;
		let mut written = 0;

		while !remaining.is_empty() {
			if cancel.is_some_and(Cancel::is_cancelled) {
				debug2!("Writer - cancelled, written: {written}");
				return Err(WriteError::new(written, OutputError::Cancelled));
			}

			let n = self
				.output
				.write(remaining)
				.map_err(|e| e.offset(written))?;

			debug_assert!(n <= remaining.len());
			let n = n.min(remaining.len());

			written += n;
			remaining = &remaining[n..];
			trace2!("Writer - output took {n} bytes, {} remaining", remaining.len());

			// The output's buffer is full,
			// wait for it to drain instead of spinning.
			if !remaining.is_empty() {
				let pacing = self.pacing();
				trace2!("Writer - sleeping {pacing:?}");
				sleep(pacing);
			}
		}

		Ok(written)
	}

	/// Close the underlying output.
	///
	/// This consumes the [`Writer`] so the output is closed exactly once.
	///
	/// # Errors
	/// Whatever [`AudioOutput::close`] returned, as-is.
	pub fn close(mut self) -> Result<(), OutputError> {
		debug2!("Writer - close()");
		self.output.close()
	}
}

//---------------------------------------------------------------------------------------------------- io::Write
impl<O: AudioOutput> io::Write for Writer<O> {
	/// Blocks until all of `buf` is delivered.
	///
	/// If the output fails after accepting part of `buf`,
	/// that part is reported as a short write and the
	/// error is returned by the next call.
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		if let Some(error) = self.pending.take() {
			return Err(WriteError::from(error).into());
		}

		match self.write_inner(buf, None) {
			Ok(n) => Ok(n),
			Err(e) if e.written > 0 => {
				self.pending = Some(e.source);
				Ok(e.written)
			},
			Err(e) => Err(e.into()),
		}
	}

	/// No-op, `write()` already handed everything to the output.
	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		output::DummyOutput,
		tests::{MockOutput,Reply,bytes,fast_spec,lock},
	};
	use pretty_assertions::assert_eq;
	use std::io::Write as _;

	fn writer(output: MockOutput) -> Writer<MockOutput> {
		Writer::from_output(output, fast_spec())
	}

	#[test]
	fn full_delivery() {
		let output = MockOutput::new([
			Reply::Accept(3),
			Reply::Accept(0),
			Reply::Accept(10),
			Reply::Accept(1),
		]);
		let log = output.log();
		let mut writer = writer(output);

		let data = bytes(100);
		assert_eq!(writer.write(&data).unwrap(), 100);

		let log = lock(&log);
		assert_eq!(log.accepted, data);
		// The whole remainder is offered every time.
		let offered: Vec<usize> = log.offered.iter().map(Vec::len).collect();
		assert_eq!(offered, [100, 97, 97, 87, 86]);
		assert_eq!(log.offered[1], data[3..]);
	}

	#[test]
	fn full_delivery_across_writes() {
		let output = MockOutput::new([]).with_tail(7);
		let log = output.log();
		let mut writer = writer(output);

		let data = bytes(1000);
		for chunk in data.chunks(33) {
			assert_eq!(writer.write(chunk).unwrap(), chunk.len());
		}

		assert_eq!(lock(&log).accepted, data);
	}

	#[test]
	fn partial_then_complete() {
		let spec = StreamSpec::new(44_100, 2, 2, 4096).unwrap();
		let output = MockOutput::new([Reply::Accept(2048)]);
		let log = output.log();
		let mut writer = Writer::from_output(output, spec);

		assert_eq!(writer.bytes_per_second(), 176_400);
		let pacing = writer.pacing();
		assert_eq!(pacing, Duration::from_nanos(5_804_988));

		let data = bytes(5000);
		assert_eq!(writer.write(&data).unwrap(), 5000);

		let log = lock(&log);
		assert_eq!(log.offered.len(), 2);
		assert_eq!(log.offered[1].len(), 5000 - 2048);
		assert_eq!(log.accepted, data);
		// One pacing sleep between the 2 calls.
		assert!(log.times[1].duration_since(log.times[0]) >= pacing);
	}

	#[test]
	fn no_sleep_when_everything_fits() {
		// 92 bytes at 1 byte/sec, 23 seconds of pacing if it ever slept.
		let spec = StreamSpec::new(1, 1, 1, 92).unwrap();
		let mut writer = Writer::from_output(MockOutput::new([]), spec);
		assert_eq!(writer.pacing(), Duration::from_secs(23));
		let now = std::time::Instant::now();
		assert_eq!(writer.write(&bytes(10_000)).unwrap(), 10_000);
		assert!(now.elapsed() < Duration::from_secs(1));
	}

	#[test]
	fn error_short_circuit() {
		let output = MockOutput::new([
			Reply::Accept(5),
			Reply::Fail(3, OutputError::DeviceUnavailable),
		]);
		let log = output.log();
		let mut writer = writer(output);

		let data = bytes(20);
		let err = writer.write(&data).unwrap_err();
		assert_eq!(err.written, 8);
		assert!(matches!(err.source, OutputError::DeviceUnavailable));

		let log = lock(&log);
		assert_eq!(log.offered.len(), 2);
		assert_eq!(log.accepted, data[..8]);
	}

	#[test]
	fn error_on_first_call() {
		let output = MockOutput::new([Reply::Fail(0, OutputError::StreamClosed)]);
		let log = output.log();
		let mut writer = writer(output);

		let err = writer.write(&bytes(20)).unwrap_err();
		assert_eq!(err.written, 0);
		assert!(matches!(err.source, OutputError::StreamClosed));
		assert_eq!(lock(&log).offered.len(), 1);
	}

	#[test]
	fn empty_input() {
		let output = MockOutput::new([Reply::Fail(0, OutputError::Write)]);
		let log = output.log();
		let mut writer = writer(output);

		assert_eq!(writer.write(&[]).unwrap(), 0);
		assert_eq!(lock(&log).offered.len(), 0);
	}

	#[test]
	fn pacing_uses_requested_size() {
		// Outputs round 100 up to 1024, pacing does not.
		let spec = StreamSpec::new(44_100, 2, 2, 100).unwrap();
		let writer = Writer::from_output(MockOutput::new([]), spec);
		assert_eq!(writer.pacing(), Duration::from_nanos(141_723));
	}

	#[test]
	fn cancel_before_write() {
		let output = MockOutput::new([]);
		let log = output.log();
		let mut writer = writer(output);

		let cancel = Cancel::new();
		cancel.cancel();

		let err = writer.write_cancellable(&bytes(10), &cancel).unwrap_err();
		assert_eq!(err.written, 0);
		assert!(matches!(err.source, OutputError::Cancelled));
		assert_eq!(lock(&log).offered.len(), 0);

		// Empty input never checks.
		assert_eq!(writer.write_cancellable(&[], &cancel).unwrap(), 0);

		cancel.reset();
		assert_eq!(writer.write_cancellable(&bytes(10), &cancel).unwrap(), 10);
	}

	#[test]
	fn cancel_while_stalled() {
		// Takes 10 bytes, then never drains.
		let output = MockOutput::new([Reply::Accept(10)]).with_tail(0);
		let log = output.log();
		let mut writer = writer(output);

		let cancel = Cancel::new();
		let other = cancel.clone();
		let thread = std::thread::spawn(move || {
			sleep(Duration::from_millis(50));
			other.cancel();
		});

		let err = writer.write_cancellable(&bytes(100), &cancel).unwrap_err();
		thread.join().unwrap();

		assert_eq!(err.written, 10);
		assert!(matches!(err.source, OutputError::Cancelled));
		assert!(lock(&log).offered.len() > 1);
	}

	#[test]
	fn close_once() {
		let output = MockOutput::new([]);
		let log = output.log();
		let writer = writer(output);

		writer.close().unwrap();
		assert_eq!(lock(&log).closes, 1);
	}

	#[test]
	fn close_error_propagates() {
		let output = MockOutput::new([]).with_close_error(OutputError::DeviceUnavailable);
		let writer = writer(output);
		assert!(matches!(writer.close(), Err(OutputError::DeviceUnavailable)));
	}

	#[test]
	fn try_open() {
		let writer = Writer::<MockOutput>::try_open(fast_spec()).unwrap();
		assert_eq!(writer.spec(), &fast_spec());

		// Construction errors come back as-is.
		let spec = StreamSpec::new(44_100, 2, 3, 4096).unwrap();
		assert!(matches!(Writer::<MockOutput>::try_open(spec), Err(OutputError::InvalidFormat)));
	}

	#[test]
	fn io_write() {
		let output = MockOutput::new([
			Reply::Accept(2),
			Reply::Fail(4, OutputError::Write),
		]);
		let log = output.log();
		let mut writer = writer(output);

		// Short write, error held back.
		let data = bytes(10);
		assert_eq!(io::Write::write(&mut writer, &data).unwrap(), 6);

		// Held back error.
		let err = io::Write::write(&mut writer, &data[6..]).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::Other);

		// Output recovered.
		writer.write_all(&data[6..]).unwrap();
		writer.flush().unwrap();
		assert_eq!(lock(&log).accepted, data);
	}

	#[test]
	fn dummy_output() {
		let spec = StreamSpec::new(48_000, 2, 2, 4096).unwrap();
		let mut writer = Writer::<DummyOutput>::try_open(spec).unwrap();

		// 4x the buffer, has to wait on backpressure.
		let data = bytes(16 * 1024);
		assert_eq!(writer.write(&data).unwrap(), data.len());
		writer.close().unwrap();
	}
}
