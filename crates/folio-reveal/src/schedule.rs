//! Cancellable deferred tasks.
//!
//! The engine never arms platform timers itself. It records deadlines here
//! and the host drives [`DeferredQueue::pop_due`] (through the engine) from
//! whatever timer facility it has. Cancelling a handle removes the task, so a
//! cancelled reveal can never run.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Handle returned by [`DeferredQueue::schedule`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Deadline-ordered queue of pending tasks.
///
/// Tasks with equal deadlines run in the order they were scheduled.
#[derive(Debug)]
pub struct DeferredQueue<P> {
	next_seq: u64,
	pending: BTreeMap<(Instant, u64), P>,
	deadlines: HashMap<u64, Instant>,
}

impl<P> DeferredQueue<P> {
	pub fn new() -> Self {
		Self {
			next_seq: 0,
			pending: BTreeMap::new(),
			deadlines: HashMap::new(),
		}
	}

	pub fn schedule(&mut self, deadline: Instant, payload: P) -> TaskHandle {
		let seq = self.next_seq;
		self.next_seq += 1;
		self.pending.insert((deadline, seq), payload);
		self.deadlines.insert(seq, deadline);
		TaskHandle(seq)
	}

	/// Removes a pending task, returning its payload if it had not run yet.
	pub fn cancel(&mut self, handle: TaskHandle) -> Option<P> {
		let deadline = self.deadlines.remove(&handle.0)?;
		self.pending.remove(&(deadline, handle.0))
	}

	pub fn is_pending(&self, handle: TaskHandle) -> bool {
		self.deadlines.contains_key(&handle.0)
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.keys().next().map(|(deadline, _)| *deadline)
	}

	/// Takes the earliest task whose deadline is at or before `now`.
	pub fn pop_due(&mut self, now: Instant) -> Option<(TaskHandle, P)> {
		let entry = self.pending.first_entry()?;
		let (deadline, seq) = *entry.key();
		if deadline > now {
			return None;
		}
		let payload = entry.remove();
		self.deadlines.remove(&seq);
		Some((TaskHandle(seq), payload))
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}
}

impl<P> Default for DeferredQueue<P> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::time::Duration;

	#[rstest]
	fn test_pop_due_respects_deadlines() {
		// Arrange
		let start = Instant::now();
		let mut queue = DeferredQueue::new();
		queue.schedule(start + Duration::from_millis(200), "late");
		queue.schedule(start + Duration::from_millis(100), "early");

		// Act & Assert
		assert!(queue.pop_due(start).is_none());
		assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(100)));

		let (_, first) = queue.pop_due(start + Duration::from_millis(150)).unwrap();
		assert_eq!(first, "early");
		assert!(queue.pop_due(start + Duration::from_millis(150)).is_none());

		let (_, second) = queue.pop_due(start + Duration::from_millis(200)).unwrap();
		assert_eq!(second, "late");
		assert!(queue.is_empty());
	}

	#[rstest]
	fn test_equal_deadlines_run_in_schedule_order() {
		// Arrange
		let now = Instant::now();
		let mut queue = DeferredQueue::new();
		for label in ["a", "b", "c"] {
			queue.schedule(now, label);
		}

		// Act
		let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(now).map(|(_, p)| p)).collect();

		// Assert
		assert_eq!(order, vec!["a", "b", "c"]);
	}

	#[rstest]
	fn test_cancelled_task_never_runs() {
		// Arrange
		let now = Instant::now();
		let mut queue = DeferredQueue::new();
		let handle = queue.schedule(now, 1);

		// Act
		let cancelled = queue.cancel(handle);

		// Assert
		assert_eq!(cancelled, Some(1));
		assert!(!queue.is_pending(handle));
		assert!(queue.pop_due(now + Duration::from_secs(1)).is_none());
	}

	#[rstest]
	fn test_cancel_is_idempotent() {
		// Arrange
		let now = Instant::now();
		let mut queue = DeferredQueue::new();
		let handle = queue.schedule(now, ());

		// Act
		queue.cancel(handle);
		let second = queue.cancel(handle);

		// Assert
		assert!(second.is_none());
		assert_eq!(queue.len(), 0);
	}
}
