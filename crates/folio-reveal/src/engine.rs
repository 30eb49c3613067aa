//! The reveal engine.
//!
//! ## Lifecycle of an element
//!
//! ```text
//!            enter (ratio >= threshold)          timer fires
//! Hidden ──────────────────────────────▶ Revealing ───────────▶ Revealed
//!   ▲                                        │                     │
//!   │        exit (trigger_once = false)     │                     │
//!   └────────────────────────────────────────┴─────────────────────┘
//! ```
//!
//! With `trigger_once`, the element is unobserved as soon as it enters, so
//! the exit edge never fires and later entries are ignored.
//!
//! The engine is sans-I/O: the host feeds it intersection entries and calls
//! [`RevealEngine::poll_timers`] when [`RevealEngine::next_deadline`] passes.
//! Presentation changes are queued for the renderer and read with
//! [`RevealEngine::drain_changes`].

use crate::config::RevealConfig;
use crate::delay::resolve_group_delay;
use crate::element::{ElementId, RevealTarget, Visibility};
use crate::error::{RevealError, RevealResult};
use crate::host::{IntersectionEntry, ObserveOptions, ViewportHost};
use crate::presentation::Presentation;
use crate::schedule::{DeferredQueue, TaskHandle};
use crate::time_provider::{SystemTimeProvider, TimeProvider};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Handle to one registration (a single element or a group).
///
/// Pass it to [`RevealEngine::dispose`] when the owning section unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
	pub fn id(&self) -> u64 {
		self.0
	}
}

/// A presentation update for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealChange {
	pub element: ElementId,
	pub visibility: Visibility,
	pub presentation: Presentation,
}

#[derive(Debug, Clone, Copy)]
enum Layout {
	Single,
	Group,
}

#[derive(Debug)]
struct TrackedElement {
	subscription: u64,
	index: usize,
	delay: Duration,
	visibility: Visibility,
	presentation: Presentation,
	observed: bool,
	pending: Option<TaskHandle>,
}

#[derive(Debug)]
struct Registration {
	config: Arc<RevealConfig>,
	elements: Vec<ElementId>,
}

/// Decides when registered elements reveal as they cross into the viewport.
pub struct RevealEngine<H: ViewportHost, T: TimeProvider = SystemTimeProvider> {
	host: H,
	time: T,
	elements: HashMap<ElementId, TrackedElement>,
	registrations: HashMap<u64, Registration>,
	timers: DeferredQueue<ElementId>,
	changes: Vec<RevealChange>,
	next_subscription: u64,
}

impl<H: ViewportHost> RevealEngine<H, SystemTimeProvider> {
	pub fn new(host: H) -> Self {
		Self::with_time_provider(host, SystemTimeProvider::new())
	}
}

impl<H: ViewportHost, T: TimeProvider> RevealEngine<H, T> {
	pub fn with_time_provider(host: H, time: T) -> Self {
		Self {
			host,
			time,
			elements: HashMap::new(),
			registrations: HashMap::new(),
			timers: DeferredQueue::new(),
			changes: Vec::new(),
			next_subscription: 1,
		}
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	/// Observes one element and reveals it `config.delay` after it enters.
	pub fn register_single(
		&mut self,
		element: ElementId,
		config: RevealConfig,
	) -> RevealResult<Subscription> {
		self.register(vec![RevealTarget::new(element)], config, Layout::Single)
	}

	/// Observes an ordered snapshot of targets, cascading their reveals.
	///
	/// The `i`-th target waits `config.delay + i * stagger` after entering,
	/// unless it carries a delay attribute, which replaces the stagger part.
	pub fn register_group<I>(&mut self, targets: I, config: RevealConfig) -> RevealResult<Subscription>
	where
		I: IntoIterator,
		I::Item: Into<RevealTarget>,
	{
		let targets = targets.into_iter().map(Into::into).collect();
		self.register(targets, config, Layout::Group)
	}

	fn register(
		&mut self,
		targets: Vec<RevealTarget>,
		config: RevealConfig,
		layout: Layout,
	) -> RevealResult<Subscription> {
		config.validate()?;

		let mut seen = HashSet::with_capacity(targets.len());
		for target in &targets {
			if !seen.insert(target.element) || self.elements.contains_key(&target.element) {
				return Err(RevealError::AlreadyRegistered(target.element));
			}
		}

		let subscription = self.next_subscription;
		self.next_subscription += 1;
		let config = Arc::new(config);
		let observe_supported = self.host.supports_intersection();
		let options = ObserveOptions {
			threshold: config.threshold,
			root_margin: config.root_margin,
		};

		if !observe_supported {
			tracing::info!(
				subscription,
				elements = targets.len(),
				"viewport intersection unavailable, revealing immediately"
			);
		}

		for (index, target) in targets.iter().enumerate() {
			let delay = match layout {
				Layout::Single => config.delay,
				Layout::Group => {
					resolve_group_delay(index, target.delay_attribute.as_deref(), &config)
				}
			};

			let (visibility, presentation) = if observe_supported {
				self.host.observe(target.element, &options);
				(Visibility::Hidden, Presentation::hidden())
			} else {
				(
					Visibility::Revealed,
					Presentation::revealed_immediately(&config.animation_class),
				)
			};

			self.changes.push(RevealChange {
				element: target.element,
				visibility,
				presentation: presentation.clone(),
			});
			self.elements.insert(
				target.element,
				TrackedElement {
					subscription,
					index,
					delay,
					visibility,
					presentation,
					observed: observe_supported,
					pending: None,
				},
			);
		}

		tracing::debug!(
			subscription,
			elements = targets.len(),
			trigger_once = config.trigger_once,
			"registered reveal targets"
		);

		self.registrations.insert(
			subscription,
			Registration {
				config,
				elements: targets.into_iter().map(|t| t.element).collect(),
			},
		);
		Ok(Subscription(subscription))
	}

	/// Applies intersection entries reported by the host.
	///
	/// Entries for unknown or no longer observed elements are ignored.
	pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) {
		let now = self.time.now();

		for entry in entries {
			let Some(element) = self.elements.get_mut(&entry.target) else {
				continue;
			};
			if !element.observed {
				continue;
			}
			let Some(registration) = self.registrations.get(&element.subscription) else {
				continue;
			};
			let config = &registration.config;
			let entering = entry.is_intersecting && entry.intersection_ratio >= config.threshold;

			if entering {
				if element.pending.is_none() && element.visibility != Visibility::Revealed {
					// Delays too large for the clock fire at once, as browser timers do.
					let deadline = now.checked_add(element.delay).unwrap_or(now);
					let handle = self.timers.schedule(deadline, entry.target);
					element.pending = Some(handle);
					element.visibility = Visibility::Revealing;
					self.changes.push(RevealChange {
						element: entry.target,
						visibility: Visibility::Revealing,
						presentation: element.presentation.clone(),
					});
				}
				if config.trigger_once {
					element.observed = false;
					self.host.unobserve(entry.target);
					tracing::debug!(element = %entry.target, "trigger-once element unobserved");
				}
			} else if !config.trigger_once {
				if let Some(handle) = element.pending.take() {
					self.timers.cancel(handle);
				}
				if element.visibility != Visibility::Hidden {
					element.visibility = Visibility::Hidden;
					element
						.presentation
						.conceal(Some(&config.animation_class));
					self.changes.push(RevealChange {
						element: entry.target,
						visibility: Visibility::Hidden,
						presentation: element.presentation.clone(),
					});
				}
			}
		}
	}

	/// Runs every deferred reveal whose deadline has passed. Returns how many
	/// elements were revealed.
	pub fn poll_timers(&mut self) -> usize {
		let now = self.time.now();
		let mut revealed = 0;

		while let Some((handle, target)) = self.timers.pop_due(now) {
			let Some(element) = self.elements.get_mut(&target) else {
				continue;
			};
			if element.pending != Some(handle) {
				continue;
			}
			let Some(registration) = self.registrations.get(&element.subscription) else {
				continue;
			};

			element.pending = None;
			element.visibility = Visibility::Revealed;
			element
				.presentation
				.reveal(&registration.config.animation_class);
			self.changes.push(RevealChange {
				element: target,
				visibility: Visibility::Revealed,
				presentation: element.presentation.clone(),
			});
			revealed += 1;
		}

		if revealed > 0 {
			tracing::debug!(revealed, "applied deferred reveals");
		}
		revealed
	}

	/// Earliest pending reveal, for hosts that arm a single platform timer.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.timers.next_deadline()
	}

	/// Stops observing every element of a registration and cancels its
	/// pending reveals. Returns `false` if it was already disposed.
	pub fn dispose(&mut self, subscription: &Subscription) -> bool {
		let Some(registration) = self.registrations.remove(&subscription.0) else {
			return false;
		};

		let mut cancelled = 0usize;
		for target in &registration.elements {
			let Some(element) = self.elements.remove(target) else {
				continue;
			};
			if element.pending.is_some_and(|handle| self.timers.cancel(handle).is_some()) {
				cancelled += 1;
			}
			if element.observed {
				self.host.unobserve(*target);
			}
		}

		tracing::info!(
			subscription = subscription.0,
			elements = registration.elements.len(),
			cancelled,
			"disposed reveal subscription"
		);
		true
	}

	/// Takes the presentation changes queued since the last call.
	pub fn drain_changes(&mut self) -> Vec<RevealChange> {
		std::mem::take(&mut self.changes)
	}

	pub fn visibility(&self, element: ElementId) -> Option<Visibility> {
		self.elements.get(&element).map(|e| e.visibility)
	}

	pub fn presentation(&self, element: ElementId) -> Option<&Presentation> {
		self.elements.get(&element).map(|e| &e.presentation)
	}

	/// Delay between entering the viewport and revealing.
	pub fn delay_of(&self, element: ElementId) -> Option<Duration> {
		self.elements.get(&element).map(|e| e.delay)
	}

	/// Position of the element within its registration.
	pub fn index_of(&self, element: ElementId) -> Option<usize> {
		self.elements.get(&element).map(|e| e.index)
	}

	pub fn is_observed(&self, element: ElementId) -> bool {
		self.elements.get(&element).is_some_and(|e| e.observed)
	}

	pub fn is_registered(&self, subscription: &Subscription) -> bool {
		self.registrations.contains_key(&subscription.0)
	}

	pub fn pending_reveals(&self) -> usize {
		self.timers.len()
	}
}
