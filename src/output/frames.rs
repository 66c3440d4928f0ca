//! Turning buffered PCM bytes into an audio callback's `f32` samples.

//----------------------------------------------------------------------------------------------- use
use crate::spec::SampleFormat;
use ringbuf::{HeapCons,traits::{Consumer,Observer}};

//----------------------------------------------------------------------------------------------- fill
/// Fill `output` with whole frames of decoded samples from `consumer`.
///
/// `frame` is scratch space exactly one frame long
/// (`channels * format.bytes()`), allocated ahead
/// of time so this never allocates.
///
/// Only complete frames are taken: if less than a frame is
/// buffered the bytes stay in `consumer` for the next call, so
/// an underrun never shifts samples onto the wrong channel.
///
/// Whatever part of `output` is not filled is muted.
///
/// Returns the amount of frames written.
pub(super) fn fill(
	consumer: &mut HeapCons<u8>,
	format: SampleFormat,
	frame: &mut [u8],
	output: &mut [f32],
) -> usize {
	let width = format.bytes();
	let channels = frame.len() / width;
	debug_assert!(channels > 0);
	debug_assert_eq!(frame.len() % width, 0);

	let mut frames = 0;
	for out in output.chunks_exact_mut(channels) {
		if consumer.occupied_len() < frame.len() {
			break;
		}

		// INVARIANT: we are the only consumer,
		// `occupied_len()` can only grow under us.
		let popped = consumer.pop_slice(frame);
		debug_assert_eq!(popped, frame.len());

		for (o, sample) in out.iter_mut().zip(frame.chunks_exact(width)) {
			*o = format.to_f32(sample);
		}
		frames += 1;
	}

	// Underrun, mute any remaining samples.
	output[frames * channels..].fill(0.0);
	frames
}
