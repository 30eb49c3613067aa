//! Single-value validators used by the contact forms.
//!
//! Each validator checks one string and reports the first problem as a
//! [`FieldError`] carrying the message shown next to the field.

use folio_reveal::parse_leading_int;
use regex::Regex;
use std::sync::LazyLock;

// Anything-at-anything-dot-anything, with no whitespace or extra `@`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// A failed field check.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	/// The field was left blank.
	#[error("{0}")]
	Required(String),
	/// The field holds a value that is not acceptable.
	#[error("{0}")]
	Validation(String),
}

impl FieldError {
	/// The user-facing message.
	pub fn message(&self) -> &str {
		match self {
			FieldError::Required(message) | FieldError::Validation(message) => message,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A check applied to one field value.
pub trait FieldValidator: Send + Sync {
	fn validate(&self, value: &str) -> FieldResult<()>;
}

/// Rejects values that are empty after trimming whitespace.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
	message: Option<String>,
}

impl RequiredValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Default for RequiredValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldValidator for RequiredValidator {
	fn validate(&self, value: &str) -> FieldResult<()> {
		if value.trim().is_empty() {
			let msg = self.message.as_deref().unwrap_or("This field is required");
			return Err(FieldError::Required(msg.to_string()));
		}
		Ok(())
	}
}

/// Validates the `local@domain.tld` shape of an email address.
///
/// # Examples
///
/// ```
/// use folio_forms::validators::{EmailValidator, FieldValidator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("a@b.co").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("a@b@c.co").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator {
	message: Option<String>,
}

impl EmailValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldValidator for EmailValidator {
	fn validate(&self, value: &str) -> FieldResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			let msg = self
				.message
				.as_deref()
				.unwrap_or("Enter a valid email address");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

/// Requires at least `min` characters once surrounding whitespace is
/// trimmed. Length is counted in `char`s, not bytes.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
	message: Option<String>,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min, message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn min(&self) -> usize {
		self.min
	}
}

impl FieldValidator for MinLengthValidator {
	fn validate(&self, value: &str) -> FieldResult<()> {
		if value.trim().chars().count() >= self.min {
			return Ok(());
		}
		let msg = match &self.message {
			Some(message) => message.clone(),
			None => format!("Ensure this value has at least {} characters", self.min),
		};
		Err(FieldError::Validation(msg))
	}
}

/// Accepts blank values or one of a fixed set of options.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
	choices: Vec<String>,
	message: Option<String>,
}

impl ChoiceValidator {
	pub fn new<I, S>(choices: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			choices: choices.into_iter().map(Into::into).collect(),
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl FieldValidator for ChoiceValidator {
	fn validate(&self, value: &str) -> FieldResult<()> {
		if value.is_empty() || self.choices.iter().any(|c| c == value) {
			return Ok(());
		}
		let msg = match &self.message {
			Some(message) => message.clone(),
			None => format!("Select a valid choice. {} is not one of the available choices", value),
		};
		Err(FieldError::Validation(msg))
	}
}

/// Compares a typed integer answer against the expected value.
///
/// The answer is read the way a browser `parseInt` reads it, so `" 7"` and
/// `"7 apples"` both count as 7.
#[derive(Debug, Clone)]
pub struct AnswerValidator {
	expected: i64,
	message: Option<String>,
}

impl AnswerValidator {
	pub fn new(expected: i64) -> Self {
		Self {
			expected,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl FieldValidator for AnswerValidator {
	fn validate(&self, value: &str) -> FieldResult<()> {
		if parse_leading_int(value) == Some(self.expected) {
			return Ok(());
		}
		let msg = self.message.as_deref().unwrap_or("Incorrect answer");
		Err(FieldError::Validation(msg.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("", false)]
	#[case("   ", false)]
	#[case("\t\n", false)]
	#[case("Jo", true)]
	#[case("  Jo  ", true)]
	fn test_required_validator(#[case] value: &str, #[case] valid: bool) {
		// Arrange
		let validator = RequiredValidator::new().with_message("Name is required");

		// Act
		let result = validator.validate(value);

		// Assert
		assert_eq!(result.is_ok(), valid);
		if let Err(err) = result {
			assert_eq!(err, FieldError::Required("Name is required".to_string()));
		}
	}

	#[rstest]
	#[case("a@b.co", true)]
	#[case("jo.smith+tag@mail.example.org", true)]
	#[case("not-an-email", false)]
	#[case("missing@tld", false)]
	#[case("two@@at.com", false)]
	#[case("sp ace@x.co", false)]
	#[case(" a@b.co", false)]
	#[case("@b.co", false)]
	fn test_email_validator(#[case] value: &str, #[case] valid: bool) {
		assert_eq!(EmailValidator::new().validate(value).is_ok(), valid);
	}

	#[rstest]
	fn test_email_validator_custom_message() {
		// Arrange
		let validator = EmailValidator::new().with_message("Please enter a valid email");

		// Act
		let err = validator.validate("nope").unwrap_err();

		// Assert
		assert_eq!(err.message(), "Please enter a valid email");
	}

	#[rstest]
	#[case(49, false)]
	#[case(50, true)]
	#[case(51, true)]
	fn test_min_length_counts_trimmed_chars(#[case] len: usize, #[case] valid: bool) {
		// Arrange
		let validator = MinLengthValidator::new(50);
		let value = format!("   {}   ", "é".repeat(len));

		// Act
		let result = validator.validate(&value);

		// Assert
		assert_eq!(result.is_ok(), valid);
	}

	#[rstest]
	#[case("email", true)]
	#[case("phone", true)]
	#[case("", true)]
	#[case("fax", false)]
	#[case("Email", false)]
	fn test_choice_validator(#[case] value: &str, #[case] valid: bool) {
		// Arrange
		let validator = ChoiceValidator::new(["email", "phone"]);

		// Act & Assert
		assert_eq!(validator.validate(value).is_ok(), valid);
	}

	#[rstest]
	#[case("7", true)]
	#[case(" 7 ", true)]
	#[case("6", false)]
	#[case("abc", false)]
	fn test_answer_validator(#[case] value: &str, #[case] valid: bool) {
		assert_eq!(AnswerValidator::new(7).validate(value).is_ok(), valid);
	}

	proptest! {
		#[test]
		fn prop_well_formed_addresses_pass(
			local in "[a-z0-9._%+-]{1,16}",
			domain in "[a-z0-9-]{1,16}",
			tld in "[a-z]{2,6}",
		) {
			let address = format!("{}@{}.{}", local, domain, tld);
			prop_assert!(EmailValidator::new().validate(&address).is_ok());
		}

		#[test]
		fn prop_addresses_without_at_fail(value in "[^@]*") {
			prop_assert!(EmailValidator::new().validate(&value).is_err());
		}

		#[test]
		fn prop_required_accepts_any_non_whitespace(value in "\\s*[a-zA-Z0-9]+\\s*") {
			prop_assert!(RequiredValidator::new().validate(&value).is_ok());
		}
	}
}
