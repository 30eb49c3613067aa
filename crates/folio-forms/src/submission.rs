//! Submission shell: owns the draft and drives the submit state machine.
//!
//! ```text
//! Idle ──submit──▶ Validating ──errors──▶ Idle
//!                      │
//!                      └──valid──▶ Pending ──ok──▶ Succeeded ──dismiss──▶ Idle
//!                                     │
//!                                     └──err/abandon──▶ Failed ──dismiss/submit──▶ Idle
//! ```

use crate::captcha::CaptchaChallenge;
use crate::contact::{ContactValidator, FormVariant, MessageCounter};
use crate::draft::{FormDraft, FormErrors};
use crate::fields;
use crate::submitter::{SubmitFailure, Submitter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Validating,
	Pending,
	Succeeded,
	Failed,
}

impl fmt::Display for SubmissionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			SubmissionState::Idle => "idle",
			SubmissionState::Validating => "validating",
			SubmissionState::Pending => "pending",
			SubmissionState::Succeeded => "succeeded",
			SubmissionState::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Misuse of the submission shell.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
	#[error("a submission is already in flight")]
	AlreadyPending,
	#[error("cannot {action} while {state}")]
	InvalidTransition {
		action: &'static str,
		state: SubmissionState,
	},
	#[error("submission ticket {0} is not the one in flight")]
	StaleTicket(u64),
}

/// Identifies one in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
	pub fn id(&self) -> u64 {
		self.0
	}
}

/// A submission handed to the caller to deliver.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
	pub ticket: SubmissionTicket,
	/// Snapshot of the draft at submit time.
	pub draft: FormDraft,
}

/// Result of [`ContactForm::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
	/// Validation failed; the form is back in `Idle`.
	Rejected(FormErrors),
	/// Validation passed; the form is `Pending` until completed.
	Pending(PendingSubmission),
}

/// How a submit intent ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
	Succeeded,
	Failed(SubmitFailure),
	Rejected(FormErrors),
}

type TransitionListener = Box<dyn FnMut(SubmissionState, SubmissionState) + Send>;

/// A contact form and its submission lifecycle.
///
/// Hosts with their own event loop use [`begin_submit`](Self::begin_submit)
/// and [`complete`](Self::complete); async callers use
/// [`submit`](Self::submit), which awaits the submitter in between.
pub struct ContactForm<S: Submitter> {
	variant: FormVariant,
	submitter: S,
	draft: FormDraft,
	errors: FormErrors,
	state: SubmissionState,
	captcha: Option<CaptchaChallenge>,
	rng: StdRng,
	in_flight: Option<SubmissionTicket>,
	next_ticket: u64,
	listeners: Vec<TransitionListener>,
}

impl<S: Submitter> ContactForm<S> {
	pub fn new(variant: FormVariant, submitter: S) -> Self {
		Self::with_rng(variant, submitter, StdRng::from_entropy())
	}

	/// Uses `rng` for CAPTCHA operands, for reproducible challenges.
	pub fn with_rng(variant: FormVariant, submitter: S, mut rng: StdRng) -> Self {
		let captcha = match variant {
			FormVariant::Extended => Some(CaptchaChallenge::generate(&mut rng)),
			FormVariant::Minimal => None,
		};
		Self {
			variant,
			submitter,
			draft: variant.empty_draft(),
			errors: FormErrors::new(),
			state: SubmissionState::Idle,
			captcha,
			rng,
			in_flight: None,
			next_ticket: 1,
			listeners: Vec::new(),
		}
	}

	/// Replaces the current challenge (extended form only).
	pub fn with_captcha(mut self, captcha: CaptchaChallenge) -> Self {
		if self.variant == FormVariant::Extended {
			self.captcha = Some(captcha);
		}
		self
	}

	/// Registers a callback invoked with `(from, to)` on every state change.
	pub fn on_transition<F>(mut self, listener: F) -> Self
	where
		F: FnMut(SubmissionState, SubmissionState) + Send + 'static,
	{
		self.listeners.push(Box::new(listener));
		self
	}

	/// Sets a draft value and clears any error shown for that field.
	pub fn update_field(&mut self, field: &str, value: impl Into<String>) {
		self.draft.set(field, value);
		self.errors.remove(field);
	}

	/// Validates the draft and, if it is submittable, moves to `Pending`.
	///
	/// From `Failed` the form first returns to `Idle` with the draft kept.
	pub fn begin_submit(&mut self) -> Result<SubmitAttempt, SubmissionError> {
		match self.state {
			SubmissionState::Pending | SubmissionState::Validating => {
				return Err(SubmissionError::AlreadyPending);
			}
			SubmissionState::Succeeded => {
				return Err(SubmissionError::InvalidTransition {
					action: "submit",
					state: self.state,
				});
			}
			SubmissionState::Failed => self.transition(SubmissionState::Idle),
			SubmissionState::Idle => {}
		}

		self.transition(SubmissionState::Validating);
		let errors = self.validator().validate(&self.draft);

		if !errors.is_empty() {
			tracing::debug!(
				invalid_fields = errors.len(),
				variant = %self.variant,
				"contact form rejected by validation"
			);
			self.errors = errors.clone();
			self.transition(SubmissionState::Idle);
			return Ok(SubmitAttempt::Rejected(errors));
		}

		self.errors.clear();
		let ticket = SubmissionTicket(self.next_ticket);
		self.next_ticket += 1;
		self.in_flight = Some(ticket);
		self.transition(SubmissionState::Pending);

		Ok(SubmitAttempt::Pending(PendingSubmission {
			ticket,
			draft: self.draft.clone(),
		}))
	}

	/// Resolves the in-flight submission with the submitter's result.
	pub fn complete(
		&mut self,
		ticket: SubmissionTicket,
		result: Result<(), SubmitFailure>,
	) -> Result<SubmissionOutcome, SubmissionError> {
		if self.state != SubmissionState::Pending {
			return Err(SubmissionError::InvalidTransition {
				action: "complete",
				state: self.state,
			});
		}
		if self.in_flight != Some(ticket) {
			return Err(SubmissionError::StaleTicket(ticket.0));
		}
		self.in_flight = None;

		match result {
			Ok(()) => {
				self.draft = self.variant.empty_draft();
				self.refresh_captcha();
				self.transition(SubmissionState::Succeeded);
				tracing::info!(ticket = ticket.0, "contact form submitted");
				Ok(SubmissionOutcome::Succeeded)
			}
			Err(failure) => {
				self.transition(SubmissionState::Failed);
				tracing::warn!(ticket = ticket.0, error = %failure, "contact form submission failed");
				Ok(SubmissionOutcome::Failed(failure))
			}
		}
	}

	/// Gives up on the in-flight submission, moving to `Failed` with the
	/// draft kept.
	///
	/// For hosts whose delivery was cancelled before it could report back.
	pub fn abandon(&mut self, ticket: SubmissionTicket) -> Result<(), SubmissionError> {
		if self.state != SubmissionState::Pending {
			return Err(SubmissionError::InvalidTransition {
				action: "abandon",
				state: self.state,
			});
		}
		if self.in_flight != Some(ticket) {
			return Err(SubmissionError::StaleTicket(ticket.0));
		}
		self.in_flight = None;
		self.transition(SubmissionState::Failed);
		tracing::warn!(ticket = ticket.0, "contact form submission abandoned");
		Ok(())
	}

	/// Validates, then awaits the submitter if the draft is submittable.
	///
	/// Dropping the returned future while the submitter is still running
	/// abandons the submission, leaving the form `Failed` with its draft.
	pub async fn submit(&mut self) -> Result<SubmissionOutcome, SubmissionError> {
		let pending = match self.begin_submit()? {
			SubmitAttempt::Rejected(errors) => return Ok(SubmissionOutcome::Rejected(errors)),
			SubmitAttempt::Pending(pending) => pending,
		};
		let guard = InFlightGuard {
			form: self,
			ticket: pending.ticket,
			done: false,
		};
		let result = guard.form.submitter.submit(&pending.draft).await;
		guard.finish(result)
	}

	/// Leaves `Succeeded` or `Failed` for `Idle` with a fresh draft.
	pub fn dismiss(&mut self) -> Result<(), SubmissionError> {
		match self.state {
			SubmissionState::Succeeded | SubmissionState::Failed => {
				self.draft = self.variant.empty_draft();
				self.errors.clear();
				self.transition(SubmissionState::Idle);
				Ok(())
			}
			state => Err(SubmissionError::InvalidTransition {
				action: "dismiss",
				state,
			}),
		}
	}

	/// Draws a new CAPTCHA, never the one just shown, and clears the typed
	/// answer.
	pub fn refresh_captcha(&mut self) {
		if self.variant == FormVariant::Extended {
			let next = match self.captcha {
				Some(current) => current.regenerate(&mut self.rng),
				None => CaptchaChallenge::generate(&mut self.rng),
			};
			self.captcha = Some(next);
			self.draft.set(fields::CAPTCHA, "");
		}
	}

	pub fn state(&self) -> SubmissionState {
		self.state
	}

	pub fn is_pending(&self) -> bool {
		self.state == SubmissionState::Pending
	}

	pub fn variant(&self) -> FormVariant {
		self.variant
	}

	pub fn draft(&self) -> &FormDraft {
		&self.draft
	}

	pub fn errors(&self) -> &FormErrors {
		&self.errors
	}

	pub fn captcha(&self) -> Option<&CaptchaChallenge> {
		self.captcha.as_ref()
	}

	pub fn submitter(&self) -> &S {
		&self.submitter
	}

	pub fn message_counter(&self) -> MessageCounter {
		MessageCounter::for_message(self.draft.value(fields::MESSAGE))
	}

	fn validator(&self) -> ContactValidator {
		match (self.variant, &self.captcha) {
			(FormVariant::Extended, Some(captcha)) => ContactValidator::extended(captcha),
			_ => ContactValidator::minimal(),
		}
	}

	fn transition(&mut self, to: SubmissionState) {
		let from = self.state;
		self.state = to;
		tracing::debug!(%from, %to, "submission state changed");
		for listener in &mut self.listeners {
			listener(from, to);
		}
	}
}

/// Abandons the in-flight ticket unless [`finish`](Self::finish) ran.
struct InFlightGuard<'a, S: Submitter> {
	form: &'a mut ContactForm<S>,
	ticket: SubmissionTicket,
	done: bool,
}

impl<S: Submitter> InFlightGuard<'_, S> {
	fn finish(
		mut self,
		result: Result<(), SubmitFailure>,
	) -> Result<SubmissionOutcome, SubmissionError> {
		self.done = true;
		self.form.complete(self.ticket, result)
	}
}

impl<S: Submitter> Drop for InFlightGuard<'_, S> {
	fn drop(&mut self) {
		if !self.done {
			let _ = self.form.abandon(self.ticket);
		}
	}
}

impl<S: Submitter> fmt::Debug for ContactForm<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContactForm")
			.field("variant", &self.variant)
			.field("state", &self.state)
			.field("draft", &self.draft)
			.field("errors", &self.errors)
			.field("captcha", &self.captcha)
			.finish_non_exhaustive()
	}
}
