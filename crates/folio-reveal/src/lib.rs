//! Scroll-triggered reveal engine for folio.
//!
//! Elements are registered singly or as ordered groups. The host reports
//! viewport intersections, the engine schedules delayed reveals and hands
//! presentation changes back to the renderer. Hosts without intersection
//! observation get every element revealed immediately.
//!
//! ## Example
//!
//! ```
//! use folio_reveal::{
//!     ElementId, IntersectionEntry, MockTimeProvider, Rect, HeadlessHost, RevealConfig,
//!     RevealEngine, Visibility,
//! };
//! use std::time::Duration;
//!
//! let clock = MockTimeProvider::default();
//! let host = HeadlessHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! let mut engine = RevealEngine::with_time_provider(host, clock.clone());
//!
//! let cards = [ElementId::new(1), ElementId::new(2), ElementId::new(3)];
//! let group = engine.register_group(cards, RevealConfig::group()).unwrap();
//!
//! let entries: Vec<_> = cards.iter().copied().map(IntersectionEntry::entering).collect();
//! engine.handle_intersections(&entries);
//! clock.advance(Duration::from_millis(200));
//! assert_eq!(engine.poll_timers(), 3);
//! assert_eq!(engine.visibility(cards[2]), Some(Visibility::Revealed));
//!
//! engine.dispose(&group);
//! ```

pub mod config;
pub mod delay;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod presentation;
pub mod schedule;
pub mod time_provider;

pub use config::{
	AnimationKind, DEFAULT_ANIMATION_CLASS, DEFAULT_STAGGER, DEFAULT_THRESHOLD, RevealConfig,
};
pub use delay::{parse_delay_attribute, parse_leading_int, resolve_group_delay, stagger_delay};
pub use element::{ElementId, RevealTarget, Visibility};
pub use engine::{RevealChange, RevealEngine, Subscription};
pub use error::{RevealError, RevealResult};
pub use geometry::{Length, Rect, RootMargin, intersection_ratio};
pub use host::{HeadlessHost, IntersectionEntry, ObserveOptions, ViewportHost};
pub use presentation::Presentation;
pub use schedule::{DeferredQueue, TaskHandle};
pub use time_provider::{MockTimeProvider, SystemTimeProvider, TimeProvider};
