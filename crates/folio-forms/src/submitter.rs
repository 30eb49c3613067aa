//! Submission collaborator seam.

use crate::draft::FormDraft;
use async_trait::async_trait;
use std::time::Duration;

/// Default latency of [`SimulatedSubmitter`].
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// The collaborator did not accept the submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission failed: {reason}")]
pub struct SubmitFailure {
	pub reason: String,
}

impl SubmitFailure {
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}
}

/// Delivers a validated draft somewhere.
#[async_trait]
pub trait Submitter: Send + Sync {
	async fn submit(&self, draft: &FormDraft) -> Result<(), SubmitFailure>;
}

/// Transport-free submitter that waits a fixed delay.
///
/// Succeeds unless built with [`SimulatedSubmitter::failing`].
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
	delay: Duration,
	failure: Option<String>,
}

impl SimulatedSubmitter {
	pub fn new() -> Self {
		Self {
			delay: DEFAULT_SUBMIT_DELAY,
			failure: None,
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Every submission fails with `reason` after the delay.
	pub fn failing(mut self, reason: impl Into<String>) -> Self {
		self.failure = Some(reason.into());
		self
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}
}

impl Default for SimulatedSubmitter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
	async fn submit(&self, draft: &FormDraft) -> Result<(), SubmitFailure> {
		tracing::debug!(
			fields = draft.len(),
			delay_ms = self.delay.as_millis() as u64,
			"simulating submission"
		);
		tokio::time::sleep(self.delay).await;

		match &self.failure {
			Some(reason) => {
				tracing::warn!(%reason, "simulated submission failed");
				Err(SubmitFailure::new(reason.clone()))
			}
			None => {
				tracing::info!("simulated submission delivered");
				Ok(())
			}
		}
	}
}
