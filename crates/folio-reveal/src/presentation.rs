//! Presentation attributes the engine hands to the rendering layer.

use std::collections::BTreeSet;

/// Vertical offset of a hidden element, in pixels.
pub const HIDDEN_OFFSET_PX: f32 = 30.0;

/// Duration of the opacity/transform transition, in seconds.
pub const TRANSITION_SECONDS: f32 = 0.6;

/// Presentation state of one element: opacity, vertical offset, transition
/// declaration and class list.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
	pub opacity: f32,
	pub translate_y: f32,
	pub transition: Option<String>,
	pub classes: BTreeSet<String>,
}

impl Presentation {
	/// Hidden starting state with the fade transition installed.
	///
	/// The transition carries no delay of its own; group members cascade
	/// through their reveal timers alone.
	pub fn hidden() -> Self {
		let mut presentation = Self {
			opacity: 1.0,
			translate_y: 0.0,
			transition: Some(transition_declaration()),
			classes: BTreeSet::new(),
		};
		presentation.conceal(None);
		presentation
	}

	/// Revealed state without any transition, used when the host cannot
	/// observe intersections.
	pub fn revealed_immediately(animation_class: &str) -> Self {
		let mut presentation = Self::default();
		presentation.reveal(animation_class);
		presentation
	}

	pub fn reveal(&mut self, animation_class: &str) {
		self.opacity = 1.0;
		self.translate_y = 0.0;
		self.classes.insert(animation_class.to_string());
	}

	pub fn conceal(&mut self, animation_class: Option<&str>) {
		self.opacity = 0.0;
		self.translate_y = HIDDEN_OFFSET_PX;
		if let Some(class) = animation_class {
			self.classes.remove(class);
		}
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.classes.contains(class)
	}

	/// CSS `transform` value for the current offset.
	pub fn transform(&self) -> String {
		if self.translate_y == 0.0 {
			"translateY(0)".to_string()
		} else {
			format!("translateY({}px)", self.translate_y)
		}
	}

	/// Space-separated class attribute value.
	pub fn class_list(&self) -> String {
		self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
	}
}

impl Default for Presentation {
	/// An untouched element: fully visible, no offset, no classes.
	fn default() -> Self {
		Self {
			opacity: 1.0,
			translate_y: 0.0,
			transition: None,
			classes: BTreeSet::new(),
		}
	}
}

fn transition_declaration() -> String {
	format!("opacity {TRANSITION_SECONDS}s ease-out, transform {TRANSITION_SECONDS}s ease-out")
}
