//! Reveal configuration and animation presets.

use crate::error::{RevealError, RevealResult};
use crate::geometry::RootMargin;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default fraction of an element that must be visible before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Animation class applied when no preset is chosen.
pub const DEFAULT_ANIMATION_CLASS: &str = "animate-fade-in-up";

/// Per-index delay increment used to cascade group reveals.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Animation presets available to section wrappers.
///
/// Each preset maps to the utility class `animate-<preset>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
	#[default]
	FadeUp,
	FadeDown,
	FadeLeft,
	FadeRight,
	FadeIn,
	ScaleUp,
}

impl AnimationKind {
	pub const ALL: [AnimationKind; 6] = [
		AnimationKind::FadeUp,
		AnimationKind::FadeDown,
		AnimationKind::FadeLeft,
		AnimationKind::FadeRight,
		AnimationKind::FadeIn,
		AnimationKind::ScaleUp,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			AnimationKind::FadeUp => "fade-up",
			AnimationKind::FadeDown => "fade-down",
			AnimationKind::FadeLeft => "fade-left",
			AnimationKind::FadeRight => "fade-right",
			AnimationKind::FadeIn => "fade-in",
			AnimationKind::ScaleUp => "scale-up",
		}
	}

	pub fn class_name(&self) -> String {
		format!("animate-{}", self.as_str())
	}
}

impl fmt::Display for AnimationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for AnimationKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		AnimationKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| format!("unknown animation '{}'", s))
	}
}

/// Options shared by every element of one registration.
///
/// A config is validated and frozen when it is attached to a registration;
/// the engine keeps it behind an `Arc` and never mutates it.
///
/// # Examples
///
/// ```
/// use folio_reveal::{AnimationKind, RevealConfig};
/// use std::time::Duration;
///
/// let config = RevealConfig::section(AnimationKind::ScaleUp)
///     .with_delay(Duration::from_millis(200));
/// assert!(config.trigger_once);
/// assert_eq!(config.animation_class, "animate-scale-up");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
	/// Fraction of the element (0.0..=1.0) that must be visible.
	pub threshold: f64,
	pub root_margin: RootMargin,
	/// Reveal at most once and stop observing afterwards.
	pub trigger_once: bool,
	pub animation_class: String,
	/// Base delay between entering the viewport and revealing.
	pub delay: Duration,
	/// Per-index increment for group members. `None` disables staggering.
	pub stagger: Option<Duration>,
}

impl RevealConfig {
	/// Defaults for a single repeatable element.
	pub fn new() -> Self {
		Self {
			threshold: DEFAULT_THRESHOLD,
			root_margin: RootMargin::default(),
			trigger_once: false,
			animation_class: DEFAULT_ANIMATION_CLASS.to_string(),
			delay: Duration::ZERO,
			stagger: Some(DEFAULT_STAGGER),
		}
	}

	/// Defaults for a staggered group: revealed once.
	pub fn group() -> Self {
		Self::new().with_trigger_once(true)
	}

	/// Defaults for an animated page section using a preset.
	pub fn section(kind: AnimationKind) -> Self {
		Self::new()
			.with_trigger_once(true)
			.with_animation(kind)
	}

	pub fn with_threshold(mut self, threshold: f64) -> Self {
		self.threshold = threshold;
		self
	}

	pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
		self.root_margin = root_margin;
		self
	}

	pub fn with_trigger_once(mut self, trigger_once: bool) -> Self {
		self.trigger_once = trigger_once;
		self
	}

	pub fn with_animation_class(mut self, class: impl Into<String>) -> Self {
		self.animation_class = class.into();
		self
	}

	pub fn with_animation(self, kind: AnimationKind) -> Self {
		self.with_animation_class(kind.class_name())
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn with_stagger(mut self, stagger: Option<Duration>) -> Self {
		self.stagger = stagger;
		self
	}

	/// Rejects thresholds outside `0.0..=1.0` (including NaN).
	pub fn validate(&self) -> RevealResult<()> {
		if !(0.0..=1.0).contains(&self.threshold) {
			return Err(RevealError::InvalidThreshold(self.threshold));
		}
		Ok(())
	}
}

impl Default for RevealConfig {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_single_defaults() {
		// Act
		let config = RevealConfig::new();

		// Assert
		assert_eq!(config.threshold, 0.1);
		assert_eq!(config.root_margin.to_string(), "0px 0px -50px 0px");
		assert!(!config.trigger_once);
		assert_eq!(config.animation_class, "animate-fade-in-up");
		assert_eq!(config.delay, Duration::ZERO);
		assert_eq!(config.stagger, Some(Duration::from_millis(100)));
	}

	#[rstest]
	fn test_group_defaults_trigger_once() {
		assert!(RevealConfig::group().trigger_once);
	}

	#[rstest]
	#[case(AnimationKind::FadeUp, "animate-fade-up")]
	#[case(AnimationKind::FadeDown, "animate-fade-down")]
	#[case(AnimationKind::FadeLeft, "animate-fade-left")]
	#[case(AnimationKind::FadeRight, "animate-fade-right")]
	#[case(AnimationKind::FadeIn, "animate-fade-in")]
	#[case(AnimationKind::ScaleUp, "animate-scale-up")]
	fn test_section_uses_preset_class(#[case] kind: AnimationKind, #[case] class: &str) {
		// Act
		let config = RevealConfig::section(kind);

		// Assert
		assert_eq!(config.animation_class, class);
		assert!(config.trigger_once);
		assert_eq!(kind.as_str().parse::<AnimationKind>(), Ok(kind));
	}

	#[rstest]
	#[case(0.0)]
	#[case(0.5)]
	#[case(1.0)]
	fn test_validate_accepts_threshold_in_range(#[case] threshold: f64) {
		assert!(RevealConfig::new().with_threshold(threshold).validate().is_ok());
	}

	#[rstest]
	#[case(-0.01)]
	#[case(1.01)]
	#[case(f64::NAN)]
	#[case(f64::INFINITY)]
	fn test_validate_rejects_threshold_out_of_range(#[case] threshold: f64) {
		// Act
		let result = RevealConfig::new().with_threshold(threshold).validate();

		// Assert
		assert!(matches!(result, Err(RevealError::InvalidThreshold(_))));
	}

	#[rstest]
	fn test_unknown_animation_is_rejected() {
		assert!("spin".parse::<AnimationKind>().is_err());
	}
}
