//! Host platform seam: viewport observation and intersection entries.

use crate::element::ElementId;
use crate::geometry::{Rect, RootMargin, intersection_ratio};

/// Observation parameters forwarded to the host for each element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
	pub threshold: f64,
	pub root_margin: RootMargin,
}

/// Intersection report for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
	pub target: ElementId,
	pub is_intersecting: bool,
	pub intersection_ratio: f64,
}

impl IntersectionEntry {
	pub fn new(target: ElementId, is_intersecting: bool, intersection_ratio: f64) -> Self {
		Self {
			target,
			is_intersecting,
			intersection_ratio,
		}
	}

	/// Element fully inside the viewport.
	pub fn entering(target: ElementId) -> Self {
		Self::new(target, true, 1.0)
	}

	/// Element fully outside the viewport.
	pub fn leaving(target: ElementId) -> Self {
		Self::new(target, false, 0.0)
	}
}

/// Viewport-intersection capability of the host platform.
///
/// Hosts report changes back through
/// [`RevealEngine::handle_intersections`](crate::RevealEngine::handle_intersections).
pub trait ViewportHost {
	/// Whether the platform can observe intersections at all. When it cannot,
	/// the engine reveals everything immediately.
	fn supports_intersection(&self) -> bool;

	fn observe(&mut self, target: ElementId, options: &ObserveOptions);

	fn unobserve(&mut self, target: ElementId);
}

#[derive(Debug)]
struct Observation {
	target: ElementId,
	options: ObserveOptions,
	// (is_intersecting, at_or_above_threshold) from the last emitted entry
	last: Option<(bool, bool)>,
}

/// In-process viewport host for native renderers and tests.
///
/// Keeps element rectangles and the viewport rectangle and emits entries the
/// way browsers do: once when observation starts, then whenever an element
/// starts or stops intersecting or crosses its threshold.
#[derive(Debug)]
pub struct HeadlessHost {
	supports_intersection: bool,
	viewport: Rect,
	layout: Vec<(ElementId, Rect)>,
	observations: Vec<Observation>,
}

impl HeadlessHost {
	pub fn new(viewport: Rect) -> Self {
		Self {
			supports_intersection: true,
			viewport,
			layout: Vec::new(),
			observations: Vec::new(),
		}
	}

	/// A host without intersection observation, exercising the fallback.
	pub fn without_intersection(viewport: Rect) -> Self {
		Self {
			supports_intersection: false,
			..Self::new(viewport)
		}
	}

	/// Sets (or moves) an element's layout rectangle in document coordinates.
	pub fn place(&mut self, element: ElementId, rect: Rect) {
		match self.layout.iter_mut().find(|(id, _)| *id == element) {
			Some((_, existing)) => *existing = rect,
			None => self.layout.push((element, rect)),
		}
	}

	/// Scrolls the viewport so its top edge sits at `y`.
	pub fn scroll_to(&mut self, y: f64) {
		self.viewport.y = y;
	}

	pub fn set_viewport(&mut self, viewport: Rect) {
		self.viewport = viewport;
	}

	pub fn viewport(&self) -> Rect {
		self.viewport
	}

	pub fn is_observing(&self, element: ElementId) -> bool {
		self.observations.iter().any(|o| o.target == element)
	}

	pub fn observed_count(&self) -> usize {
		self.observations.len()
	}

	/// Computes entries for every observed, placed element whose state changed
	/// since the last call, in observation order.
	pub fn take_entries(&mut self) -> Vec<IntersectionEntry> {
		let viewport = self.viewport;
		let mut entries = Vec::new();

		for observation in &mut self.observations {
			let Some((_, rect)) = self.layout.iter().find(|(id, _)| *id == observation.target)
			else {
				continue;
			};

			let ratio = intersection_ratio(rect, &viewport, &observation.options.root_margin);
			let is_intersecting = ratio.is_some();
			let ratio = ratio.unwrap_or(0.0);
			let state = (is_intersecting, ratio >= observation.options.threshold);

			if observation.last != Some(state) {
				observation.last = Some(state);
				entries.push(IntersectionEntry::new(
					observation.target,
					is_intersecting,
					ratio,
				));
			}
		}

		entries
	}
}

impl ViewportHost for HeadlessHost {
	fn supports_intersection(&self) -> bool {
		self.supports_intersection
	}

	fn observe(&mut self, target: ElementId, options: &ObserveOptions) {
		self.unobserve(target);
		self.observations.push(Observation {
			target,
			options: *options,
			last: None,
		});
	}

	fn unobserve(&mut self, target: ElementId) {
		self.observations.retain(|o| o.target != target);
	}
}
