//! Contact form rules for the minimal and extended layouts.

use crate::captcha::CaptchaChallenge;
use crate::draft::{FormDraft, FormErrors};
use crate::fields::{self, BEST_TIMES, CONTACT_METHODS, DEFAULT_BEST_TIME, DEFAULT_CONTACT_METHOD};
use crate::validators::{
	AnswerValidator, ChoiceValidator, EmailValidator, FieldValidator, MinLengthValidator,
	RequiredValidator,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum trimmed message length on the extended form.
pub const MIN_MESSAGE_LENGTH: usize = 50;

/// Which contact form layout is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
	/// Name, email and message.
	Minimal,
	/// Full contact details, message minimum and CAPTCHA.
	#[default]
	Extended,
}

impl FormVariant {
	pub fn fields(&self) -> &'static [&'static str] {
		match self {
			FormVariant::Minimal => &fields::MINIMAL_FIELDS,
			FormVariant::Extended => &fields::EXTENDED_FIELDS,
		}
	}

	/// A fresh draft: every field empty except the choice defaults.
	pub fn empty_draft(&self) -> FormDraft {
		self.fields()
			.iter()
			.map(|&field| {
				let value = match field {
					fields::CONTACT_METHOD => DEFAULT_CONTACT_METHOD,
					fields::BEST_TIME => DEFAULT_BEST_TIME,
					_ => "",
				};
				(field, value)
			})
			.collect()
	}
}

impl fmt::Display for FormVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormVariant::Minimal => f.write_str("minimal"),
			FormVariant::Extended => f.write_str("extended"),
		}
	}
}

struct FieldRules {
	field: &'static str,
	validators: Vec<Box<dyn FieldValidator>>,
}

/// Ordered per-field validator chains.
///
/// Every field is checked independently; within a field the first failing
/// validator supplies the message.
pub struct ContactValidator {
	rules: Vec<FieldRules>,
}

impl ContactValidator {
	pub fn new() -> Self {
		Self { rules: Vec::new() }
	}

	/// Appends a validator to `field`'s chain.
	pub fn rule(mut self, field: &'static str, validator: impl FieldValidator + 'static) -> Self {
		let validator: Box<dyn FieldValidator> = Box::new(validator);
		match self.rules.iter_mut().find(|r| r.field == field) {
			Some(rules) => rules.validators.push(validator),
			None => self.rules.push(FieldRules {
				field,
				validators: vec![validator],
			}),
		}
		self
	}

	/// Rules of the minimal form.
	pub fn minimal() -> Self {
		Self::new()
			.rule(
				fields::NAME,
				RequiredValidator::new().with_message("Name is required"),
			)
			.rule(
				fields::EMAIL,
				RequiredValidator::new().with_message("Email is required"),
			)
			.rule(
				fields::EMAIL,
				EmailValidator::new().with_message("Please enter a valid email"),
			)
			.rule(
				fields::MESSAGE,
				RequiredValidator::new().with_message("Message is required"),
			)
	}

	/// Rules of the extended form, checking the CAPTCHA against `captcha`.
	pub fn extended(captcha: &CaptchaChallenge) -> Self {
		Self::new()
			.rule(
				fields::FULL_NAME,
				RequiredValidator::new().with_message("Full name is required"),
			)
			.rule(
				fields::EMAIL,
				RequiredValidator::new().with_message("Email address is required"),
			)
			.rule(
				fields::EMAIL,
				EmailValidator::new().with_message("Please enter a valid email address"),
			)
			.rule(
				fields::SUBJECT,
				RequiredValidator::new().with_message("Subject line is required"),
			)
			.rule(
				fields::MESSAGE,
				RequiredValidator::new().with_message("Message is required"),
			)
			.rule(
				fields::MESSAGE,
				MinLengthValidator::new(MIN_MESSAGE_LENGTH).with_message(format!(
					"Message must be at least {} characters long",
					MIN_MESSAGE_LENGTH
				)),
			)
			.rule(
				fields::CONTACT_METHOD,
				ChoiceValidator::new(CONTACT_METHODS).with_message("Select a valid contact method"),
			)
			.rule(
				fields::BEST_TIME,
				ChoiceValidator::new(BEST_TIMES).with_message("Select a valid time"),
			)
			.rule(
				fields::CAPTCHA,
				RequiredValidator::new().with_message("Please solve the math problem"),
			)
			.rule(
				fields::CAPTCHA,
				AnswerValidator::new(captcha.answer())
					.with_message("Incorrect answer. Please try again."),
			)
	}

	/// Checks every field of `draft` in one pass.
	pub fn validate(&self, draft: &FormDraft) -> FormErrors {
		let mut errors = FormErrors::new();
		for rules in &self.rules {
			let value = draft.value(rules.field);
			if let Some(err) = rules
				.validators
				.iter()
				.find_map(|v| v.validate(value).err())
			{
				errors.insert(rules.field, err.message());
			}
		}
		errors
	}

	/// Fields this validator checks, in rule order.
	pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.rules.iter().map(|r| r.field)
	}
}

impl Default for ContactValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates a minimal-form draft.
///
/// # Examples
///
/// ```
/// use folio_forms::{FormDraft, validate};
///
/// let draft = FormDraft::new().with("name", "Jo").with("email", "jo@x.co").with("message", "hi");
/// assert!(validate(&draft).is_empty());
///
/// let errors = validate(&FormDraft::new());
/// assert_eq!(errors.get("name"), Some("Name is required"));
/// ```
pub fn validate(draft: &FormDraft) -> FormErrors {
	ContactValidator::minimal().validate(draft)
}

/// Validates an extended-form draft against the CAPTCHA currently shown.
pub fn validate_extended(draft: &FormDraft, captcha: &CaptchaChallenge) -> FormErrors {
	ContactValidator::extended(captcha).validate(draft)
}

/// Live character counter shown under the message field.
///
/// Counts the raw input, whitespace included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCounter {
	pub length: usize,
	pub minimum: usize,
}

impl MessageCounter {
	pub fn for_message(message: &str) -> Self {
		Self {
			length: message.chars().count(),
			minimum: MIN_MESSAGE_LENGTH,
		}
	}

	pub fn is_satisfied(&self) -> bool {
		self.length >= self.minimum
	}
}

impl fmt::Display for MessageCounter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{} characters", self.length, self.minimum)
	}
}
