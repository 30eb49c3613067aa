//! Reveal engine behaviour tests
//!
//! Drives the engine through intersection sequences with a mock clock.

use folio_reveal::{
	ElementId, HeadlessHost, IntersectionEntry, MockTimeProvider, Rect, RevealConfig,
	RevealEngine, RevealTarget, Visibility,
};
use rstest::{fixture, rstest};
use std::time::Duration;

type Engine = RevealEngine<HeadlessHost, MockTimeProvider>;

struct Harness {
	clock: MockTimeProvider,
	engine: Engine,
}

impl Harness {
	fn enter(&mut self, id: ElementId) {
		self.engine
			.handle_intersections(&[IntersectionEntry::entering(id)]);
	}

	fn leave(&mut self, id: ElementId) {
		self.engine.handle_intersections(&[IntersectionEntry::leaving(id)]);
	}

	fn elapse(&mut self, ms: u64) -> usize {
		self.clock.advance(Duration::from_millis(ms));
		self.engine.poll_timers()
	}
}

#[fixture]
fn harness() -> Harness {
	let clock = MockTimeProvider::default();
	let host = HeadlessHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
	Harness {
		engine: RevealEngine::with_time_provider(host, clock.clone()),
		clock,
	}
}

#[rstest]
fn test_trigger_once_reveals_exactly_once(mut harness: Harness) {
	// Arrange
	let id = ElementId::new(1);
	harness
		.engine
		.register_single(id, RevealConfig::new().with_trigger_once(true))
		.unwrap();
	harness.engine.drain_changes();

	// Act
	harness.enter(id);
	harness.elapse(0);
	harness.leave(id);
	harness.enter(id);
	harness.elapse(1000);

	// Assert
	assert_eq!(harness.engine.visibility(id), Some(Visibility::Revealed));
	assert!(!harness.engine.is_observed(id));
	assert!(!harness.engine.host().is_observing(id));
	let revealed = harness
		.engine
		.drain_changes()
		.into_iter()
		.filter(|c| c.visibility == Visibility::Revealed)
		.count();
	assert_eq!(revealed, 1);
}

#[rstest]
fn test_repeatable_reveal_toggles_indefinitely(mut harness: Harness) {
	// Arrange
	let id = ElementId::new(1);
	harness.engine.register_single(id, RevealConfig::new()).unwrap();

	for _ in 0..5 {
		// Act
		harness.enter(id);
		harness.elapse(0);

		// Assert
		assert_eq!(harness.engine.visibility(id), Some(Visibility::Revealed));
		let shown = harness.engine.presentation(id).unwrap();
		assert_eq!(shown.opacity, 1.0);
		assert_eq!(shown.translate_y, 0.0);
		assert!(shown.has_class("animate-fade-in-up"));

		// Act
		harness.leave(id);

		// Assert
		assert_eq!(harness.engine.visibility(id), Some(Visibility::Hidden));
		let hidden = harness.engine.presentation(id).unwrap();
		assert_eq!(hidden.opacity, 0.0);
		assert_eq!(hidden.translate_y, 30.0);
		assert!(!hidden.has_class("animate-fade-in-up"));
	}
	assert!(harness.engine.is_observed(id));
}

#[rstest]
fn test_group_default_stagger_delays(mut harness: Harness) {
	// Arrange
	let ids = [ElementId::new(10), ElementId::new(11), ElementId::new(12)];

	// Act
	harness
		.engine
		.register_group(ids, RevealConfig::group())
		.unwrap();

	// Assert
	let delays: Vec<_> = ids
		.iter()
		.map(|id| harness.engine.delay_of(*id).unwrap())
		.collect();
	assert_eq!(
		delays,
		vec![
			Duration::ZERO,
			Duration::from_millis(100),
			Duration::from_millis(200)
		]
	);
	assert_eq!(harness.engine.index_of(ids[2]), Some(2));
}

#[rstest]
fn test_group_reveals_cascade_in_discovery_order(mut harness: Harness) {
	// Arrange
	let ids = [ElementId::new(10), ElementId::new(11), ElementId::new(12)];
	harness
		.engine
		.register_group(ids, RevealConfig::group())
		.unwrap();
	harness.engine.drain_changes();

	// Act: all three cross in the same frame, reported in reverse order
	let entries: Vec<_> = ids.iter().rev().copied().map(IntersectionEntry::entering).collect();
	harness.engine.handle_intersections(&entries);
	let first = harness.elapse(0);
	let second = harness.elapse(100);
	let third = harness.elapse(100);

	// Assert
	assert_eq!((first, second, third), (1, 1, 1));
	let order: Vec<_> = harness
		.engine
		.drain_changes()
		.into_iter()
		.filter(|c| c.visibility == Visibility::Revealed)
		.map(|c| c.element)
		.collect();
	assert_eq!(order, ids.to_vec());
}

#[rstest]
fn test_group_delay_attribute_overrides_stagger(mut harness: Harness) {
	// Arrange
	let targets = vec![
		RevealTarget::new(ElementId::new(1)),
		RevealTarget::new(ElementId::new(2)).with_delay_attribute("450"),
		RevealTarget::new(ElementId::new(3)).with_delay_attribute("not-a-number"),
	];

	// Act
	harness
		.engine
		.register_group(targets, RevealConfig::group())
		.unwrap();

	// Assert
	assert_eq!(harness.engine.delay_of(ElementId::new(1)), Some(Duration::ZERO));
	assert_eq!(
		harness.engine.delay_of(ElementId::new(2)),
		Some(Duration::from_millis(450))
	);
	assert_eq!(harness.engine.delay_of(ElementId::new(3)), Some(Duration::ZERO));
}

#[rstest]
#[case::staggered(RevealTarget::new(ElementId::new(3)), 200)]
#[case::zero_attribute(RevealTarget::new(ElementId::new(3)).with_delay_attribute("0"), 0)]
fn test_group_stagger_lives_in_timer_only(
	mut harness: Harness,
	#[case] third: RevealTarget,
	#[case] expected_ms: u64,
) {
	// Arrange
	let targets = vec![
		RevealTarget::new(ElementId::new(1)),
		RevealTarget::new(ElementId::new(2)),
		third,
	];
	let id = ElementId::new(3);

	// Act
	harness
		.engine
		.register_group(targets, RevealConfig::group())
		.unwrap();
	harness.enter(id);
	let revealed = harness.elapse(expected_ms);

	// Assert
	assert_eq!(harness.engine.delay_of(id), Some(Duration::from_millis(expected_ms)));
	assert_eq!(
		harness.engine.presentation(id).unwrap().transition.as_deref(),
		Some("opacity 0.6s ease-out, transform 0.6s ease-out")
	);
	assert_eq!(revealed, 1);
	assert_eq!(harness.engine.visibility(id), Some(Visibility::Revealed));
}

#[rstest]
fn test_dispose_before_deadline_prevents_reveal(mut harness: Harness) {
	// Arrange
	let id = ElementId::new(1);
	let subscription = harness
		.engine
		.register_single(id, RevealConfig::new().with_delay(Duration::from_millis(400)))
		.unwrap();
	harness.enter(id);
	harness.elapse(200);
	harness.engine.drain_changes();

	// Act
	let disposed = harness.engine.dispose(&subscription);
	let revealed = harness.elapse(1000);

	// Assert
	assert!(disposed);
	assert_eq!(revealed, 0);
	assert_eq!(harness.engine.pending_reveals(), 0);
	assert_ne!(harness.engine.visibility(id), Some(Visibility::Revealed));
	assert!(
		harness
			.engine
			.drain_changes()
			.iter()
			.all(|c| c.visibility != Visibility::Revealed)
	);
	assert!(!harness.engine.host().is_observing(id));
}

#[rstest]
fn test_dispose_is_idempotent_after_trigger_once(mut harness: Harness) {
	// Arrange
	let ids = [ElementId::new(1), ElementId::new(2)];
	let subscription = harness
		.engine
		.register_group(ids, RevealConfig::group())
		.unwrap();
	harness.enter(ids[0]);
	harness.elapse(0);

	// Act
	let first = harness.engine.dispose(&subscription);
	let second = harness.engine.dispose(&subscription);

	// Assert
	assert!(first);
	assert!(!second);
	assert!(!harness.engine.is_registered(&subscription));
	assert_eq!(harness.engine.host().observed_count(), 0);
}

#[rstest]
fn test_entries_after_dispose_are_ignored(mut harness: Harness) {
	// Arrange
	let id = ElementId::new(1);
	let subscription = harness.engine.register_single(id, RevealConfig::new()).unwrap();
	harness.engine.dispose(&subscription);

	// Act
	harness.enter(id);
	let revealed = harness.elapse(100);

	// Assert
	assert_eq!(revealed, 0);
	assert_eq!(harness.engine.visibility(id), None);
}

#[rstest]
fn test_fallback_reveals_everything_without_observation() {
	// Arrange
	let host = HeadlessHost::without_intersection(Rect::new(0.0, 0.0, 800.0, 600.0));
	let mut engine = RevealEngine::with_time_provider(host, MockTimeProvider::default());
	let ids = [ElementId::new(1), ElementId::new(2)];

	// Act
	engine
		.register_group(ids, RevealConfig::group().with_animation_class("animate-fade-up"))
		.unwrap();

	// Assert
	for id in ids {
		assert_eq!(engine.visibility(id), Some(Visibility::Revealed));
		let presentation = engine.presentation(id).unwrap();
		assert!(presentation.has_class("animate-fade-up"));
		assert!(presentation.transition.is_none());
		assert!(!engine.is_observed(id));
	}
	assert_eq!(engine.host().observed_count(), 0);
	assert!(engine.next_deadline().is_none());
}

#[rstest]
fn test_headless_scroll_drives_reveal(mut harness: Harness) {
	// Arrange
	let hero = ElementId::new(1);
	let footer = ElementId::new(2);
	harness
		.engine
		.host_mut()
		.place(hero, Rect::new(0.0, 100.0, 1280.0, 400.0));
	harness
		.engine
		.host_mut()
		.place(footer, Rect::new(0.0, 2000.0, 1280.0, 300.0));
	harness
		.engine
		.register_single(hero, RevealConfig::new())
		.unwrap();
	harness
		.engine
		.register_single(footer, RevealConfig::new())
		.unwrap();

	// Act: initial layout
	let entries = harness.engine.host_mut().take_entries();
	harness.engine.handle_intersections(&entries);
	harness.elapse(0);

	// Assert
	assert_eq!(harness.engine.visibility(hero), Some(Visibility::Revealed));
	assert_eq!(harness.engine.visibility(footer), Some(Visibility::Hidden));

	// Act: scroll the footer into view and the hero out
	harness.engine.host_mut().scroll_to(1800.0);
	let entries = harness.engine.host_mut().take_entries();
	harness.engine.handle_intersections(&entries);
	harness.elapse(0);

	// Assert
	assert_eq!(harness.engine.visibility(hero), Some(Visibility::Hidden));
	assert_eq!(harness.engine.visibility(footer), Some(Visibility::Revealed));
}
