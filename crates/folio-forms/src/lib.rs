//! Contact form validation and submission for folio.
//!
//! Validation is a pure function from a [`FormDraft`] to [`FormErrors`]; an
//! empty error map means the draft can be submitted. [`ContactForm`] owns the
//! draft, runs the validator on submit and hands valid drafts to a
//! [`Submitter`].
//!
//! ## Example
//!
//! ```
//! use folio_forms::{ContactForm, FormVariant, SimulatedSubmitter, SubmissionOutcome};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let submitter = SimulatedSubmitter::new().with_delay(Duration::from_millis(1));
//! let mut form = ContactForm::new(FormVariant::Minimal, submitter);
//! form.update_field("name", "Jo");
//! form.update_field("email", "jo@x.co");
//! form.update_field("message", "hi");
//!
//! assert_eq!(form.submit().await, Ok(SubmissionOutcome::Succeeded));
//! assert!(form.draft().is_blank());
//! # }
//! ```

pub mod captcha;
pub mod contact;
pub mod draft;
pub mod fields;
pub mod submission;
pub mod submitter;
pub mod validators;

pub use captcha::CaptchaChallenge;
pub use contact::{
	ContactValidator, FormVariant, MIN_MESSAGE_LENGTH, MessageCounter, validate, validate_extended,
};
pub use draft::{FormDraft, FormErrors};
pub use submission::{
	ContactForm, PendingSubmission, SubmissionError, SubmissionOutcome, SubmissionState,
	SubmissionTicket, SubmitAttempt,
};
pub use submitter::{DEFAULT_SUBMIT_DELAY, SimulatedSubmitter, SubmitFailure, Submitter};
pub use validators::{FieldError, FieldResult, FieldValidator};
