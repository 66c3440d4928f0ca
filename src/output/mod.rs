//! Audio output backends.
//!
//! Everything a [`Writer`](crate::Writer) can write into implements [`AudioOutput`].

mod constants;
pub use constants::{LOWER_BUFFER_UNIT_SIZE,LOWER_BUFFER_UNIT_MIN};

mod sizing;
pub use sizing::{buffer_sizes,BufferSizes};

mod output;
pub use output::AudioOutput;

mod dummy;
pub use dummy::DummyOutput;

#[cfg(any(feature = "cpal", test))]
mod frames;

#[cfg(feature = "cpal")]
mod cpal;
#[cfg(feature = "cpal")]
pub use self::cpal::Cpal;

// Use cpal if:
// - it is enabled
// - we're not testing
// - dummy is not forced
cfg_if::cfg_if! {
	if #[cfg(all(feature = "cpal", not(test), not(feature = "dummy")))] {
		/// The audio output backend [`Writer`](crate::Writer) uses by default.
		pub type DefaultOutput = self::cpal::Cpal;
		/// The audio output backend used.
		///
		/// With default features this is real hardware:
		/// ```rust
		/// if cfg!(all(feature = "cpal", not(feature = "dummy"))) {
		///     assert_eq!(ringout::AUDIO_OUTPUT_BACKEND, "cpal");
		/// }
		/// ```
		pub const AUDIO_OUTPUT_BACKEND: &str = "cpal";
	} else {
		/// The audio output backend [`Writer`](crate::Writer) uses by default.
		pub type DefaultOutput = DummyOutput;
		/// The audio output backend used.
		pub const AUDIO_OUTPUT_BACKEND: &str = "dummy";
	}
}
