//! Element handles and per-element reveal state.

use std::fmt;

/// Opaque handle to a renderable region owned by the host.
///
/// The engine never dereferences a handle; it only uses it to key tracking
/// state and to address observation requests and presentation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
	/// Creates a handle from a host-assigned identifier.
	pub const fn new(id: u64) -> Self {
		Self(id)
	}

	/// Returns the host-assigned identifier.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "element#{}", self.0)
	}
}

impl From<u64> for ElementId {
	fn from(id: u64) -> Self {
		Self(id)
	}
}

/// Visibility state of a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
	/// Not revealed; hidden presentation applied.
	Hidden,
	/// Entered the viewport; a deferred reveal is scheduled.
	Revealing,
	/// Revealed presentation applied.
	Revealed,
}

impl fmt::Display for Visibility {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Visibility::Hidden => "hidden",
			Visibility::Revealing => "revealing",
			Visibility::Revealed => "revealed",
		};
		f.write_str(name)
	}
}

/// One entry of a group registration.
///
/// `delay_attribute` is the raw, unparsed per-element delay as the markup
/// carries it (for example `data-delay="150"`). It is coerced when the group
/// is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTarget {
	pub element: ElementId,
	pub delay_attribute: Option<String>,
}

impl RevealTarget {
	pub fn new(element: ElementId) -> Self {
		Self {
			element,
			delay_attribute: None,
		}
	}

	pub fn with_delay_attribute(mut self, raw: impl Into<String>) -> Self {
		self.delay_attribute = Some(raw.into());
		self
	}
}

impl From<ElementId> for RevealTarget {
	fn from(element: ElementId) -> Self {
		Self::new(element)
	}
}
