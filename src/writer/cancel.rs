//---------------------------------------------------------------------------------------------------- use
use std::sync::{
	Arc,
	atomic::{AtomicBool,Ordering},
};

//---------------------------------------------------------------------------------------------------- Cancel
/// A signal to stop a [`Writer::write_cancellable`](crate::Writer::write_cancellable).
///
/// Cloning shares the same signal, so one clone can
/// be handed to another thread and cancel from there.
///
/// The signal is checked before every output write, a
/// pacing sleep already in progress is not interrupted.
///
/// ```rust
/// # use ringout::*;
/// let cancel = Cancel::new();
/// let other = cancel.clone();
///
/// other.cancel();
/// assert!(cancel.is_cancelled());
///
/// cancel.reset();
/// assert!(!other.is_cancelled());
/// ```
#[derive(Clone,Debug,Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
	#[must_use]
	/// Create a new, not yet cancelled, signal.
	pub fn new() -> Self {
		Self::default()
	}

	#[inline]
	/// Cancel every write observing this signal.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Release);
	}

	#[inline]
	#[must_use]
	/// Has [`Self::cancel`] been called (since the last [`Self::reset`])?
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	#[inline]
	/// Clear the signal so it can be used for another write.
	pub fn reset(&self) {
		self.0.store(false, Ordering::Release);
	}
}
