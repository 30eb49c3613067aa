//! Settings validation
//!
//! Checks run over the whole settings document and collect every problem
//! instead of stopping at the first one.

use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("HEX_COLOR_REGEX: invalid regex pattern")
});

// Absolute http(s) URLs and mailto links; anything else is rejected.
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:https?://[^\s/?#]+[^\s]*|mailto:[^\s@]+@[^\s@]+)$")
		.expect("LINK_REGEX: invalid regex pattern")
});

/// Validation error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Missing required field: {0}")]
	MissingRequired(String),

	#[error("Constraint violation: {0}")]
	Constraint(String),

	#[error("Multiple validation errors: {0:?}")]
	Multiple(Vec<ValidationError>),
}

impl ValidationError {
	/// Folds collected errors into a single result.
	pub fn collect(mut errors: Vec<ValidationError>) -> ValidationResult {
		match errors.len() {
			0 => Ok(()),
			1 => Err(errors.remove(0)),
			_ => Err(ValidationError::Multiple(errors)),
		}
	}

	/// Flattened list of the individual errors.
	pub fn errors(&self) -> Vec<&ValidationError> {
		match self {
			ValidationError::Multiple(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
			other => vec![other],
		}
	}
}

pub type ValidationResult = Result<(), ValidationError>;

/// `#RRGGBB` hex color.
pub fn validate_hex_color(key: &str, value: &str) -> ValidationResult {
	if HEX_COLOR_REGEX.is_match(value) {
		Ok(())
	} else {
		Err(ValidationError::InvalidValue {
			key: key.to_string(),
			message: format!("'{}' is not a #RRGGBB color", value),
		})
	}
}

/// `http://`, `https://` or `mailto:` link target.
pub fn validate_link(key: &str, value: &str) -> ValidationResult {
	if LINK_REGEX.is_match(value) {
		Ok(())
	} else {
		Err(ValidationError::InvalidValue {
			key: key.to_string(),
			message: format!("'{}' is not an http(s) or mailto link", value),
		})
	}
}

/// Inclusive `0.0..=1.0` fraction.
pub fn validate_fraction(key: &str, value: f64) -> ValidationResult {
	if (0.0..=1.0).contains(&value) {
		Ok(())
	} else {
		Err(ValidationError::InvalidValue {
			key: key.to_string(),
			message: format!("{} is outside 0.0..=1.0", value),
		})
	}
}

pub fn validate_required(key: &str, value: &str) -> ValidationResult {
	if value.trim().is_empty() {
		Err(ValidationError::MissingRequired(key.to_string()))
	} else {
		Ok(())
	}
}
