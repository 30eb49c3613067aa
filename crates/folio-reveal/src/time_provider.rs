use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current instant for deferred reveals.
/// This allows for time mocking in tests.
pub trait TimeProvider {
	fn now(&self) -> Instant;
}

/// System time provider that uses the actual monotonic clock.
#[derive(Debug, Clone, Default)]
pub struct SystemTimeProvider;

impl SystemTimeProvider {
	pub fn new() -> Self {
		Self
	}
}

impl TimeProvider for SystemTimeProvider {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// Mock time provider for testing that allows manual time control.
///
/// Clones share the same clock, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
	current_time: Arc<RwLock<Instant>>,
}

impl MockTimeProvider {
	pub fn new(start_time: Instant) -> Self {
		Self {
			current_time: Arc::new(RwLock::new(start_time)),
		}
	}

	pub fn advance(&self, duration: Duration) {
		let mut time = self.current_time.write();
		*time += duration;
	}

	pub fn set_time(&self, time: Instant) {
		let mut current = self.current_time.write();
		*current = time;
	}
}

impl Default for MockTimeProvider {
	fn default() -> Self {
		Self::new(Instant::now())
	}
}

impl TimeProvider for MockTimeProvider {
	fn now(&self) -> Instant {
		*self.current_time.read()
	}
}

impl<T: TimeProvider + ?Sized> TimeProvider for Arc<T> {
	fn now(&self) -> Instant {
		(**self).now()
	}
}
