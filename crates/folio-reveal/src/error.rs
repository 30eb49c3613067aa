use crate::element::ElementId;

/// Configuration errors surfaced at registration time.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RevealError {
	#[error("threshold must be within 0.0..=1.0, got {0}")]
	InvalidThreshold(f64),

	#[error("invalid root margin '{input}': {reason}")]
	InvalidRootMargin { input: String, reason: String },

	#[error("{0} is already registered with a live subscription")]
	AlreadyRegistered(ElementId),
}

pub type RevealResult<T> = Result<T, RevealError>;
