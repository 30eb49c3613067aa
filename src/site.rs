//! Portfolio assembly: wires page sections to reveal registrations and
//! builds the contact form from settings.

use folio_conf::{Settings, SettingsError};
use folio_forms::{ContactForm, SimulatedSubmitter};
use folio_reveal::{
	ElementId, IntersectionEntry, RevealChange, RevealEngine, RevealError, RevealTarget,
	Subscription, SystemTimeProvider, TimeProvider, ViewportHost,
};
use std::fmt;
use std::path::Path;
use std::time::Instant;

/// Error type for building a portfolio
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
	#[error("Settings error: {0}")]
	Settings(#[from] SettingsError),

	#[error("Reveal registration failed: {0}")]
	Reveal(#[from] RevealError),
}

/// Top-level page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
	Hero,
	Skills,
	Projects,
	Contact,
}

impl Section {
	pub const ALL: [Section; 4] = [
		Section::Hero,
		Section::Skills,
		Section::Projects,
		Section::Contact,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Section::Hero => "hero",
			Section::Skills => "skills",
			Section::Projects => "projects",
			Section::Contact => "contact",
		}
	}

	/// Whether the section's items cascade as a staggered group.
	pub fn is_group(&self) -> bool {
		matches!(self, Section::Skills | Section::Projects)
	}
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug)]
struct MountedSection {
	section: Section,
	elements: Vec<ElementId>,
	subscription: Subscription,
}

/// A mounted portfolio page.
///
/// The hero and contact sections reveal as single elements; skills and
/// projects reveal item by item with the configured stagger.
pub struct Portfolio<H: ViewportHost, T: TimeProvider = SystemTimeProvider> {
	settings: Settings,
	engine: RevealEngine<H, T>,
	sections: Vec<MountedSection>,
	mounted: bool,
}

impl<H: ViewportHost> Portfolio<H, SystemTimeProvider> {
	pub fn new(settings: Settings, host: H) -> Result<Self, SiteError> {
		Self::with_time_provider(settings, host, SystemTimeProvider::new())
	}

	/// Loads settings from a TOML file and mounts the page.
	pub fn load(path: impl AsRef<Path>, host: H) -> Result<Self, SiteError> {
		let settings = Settings::from_file(path)?;
		Self::new(settings, host)
	}
}

impl<H: ViewportHost, T: TimeProvider> Portfolio<H, T> {
	pub fn with_time_provider(settings: Settings, host: H, time: T) -> Result<Self, SiteError> {
		let mut engine = RevealEngine::with_time_provider(host, time);
		let config = settings.reveal.section_config();
		let mut sections = Vec::with_capacity(Section::ALL.len());
		let mut next_id = 1u64;
		let mut allocate = |count: usize| -> Vec<ElementId> {
			let ids = (next_id..next_id + count as u64).map(ElementId::new).collect();
			next_id += count as u64;
			ids
		};

		for section in Section::ALL {
			let count = match section {
				Section::Hero | Section::Contact => 1,
				Section::Skills => settings.profile.tech_stack.len(),
				Section::Projects => settings.profile.projects.len(),
			};
			let elements = allocate(count);

			let subscription = if section.is_group() {
				let targets = elements.iter().copied().map(RevealTarget::new);
				engine.register_group(targets, config.clone())?
			} else {
				engine.register_single(elements[0], config.clone())?
			};

			tracing::debug!(%section, elements = elements.len(), "mounted section");
			sections.push(MountedSection {
				section,
				elements,
				subscription,
			});
		}

		tracing::info!(
			profile = %settings.profile.name,
			sections = sections.len(),
			"portfolio mounted"
		);

		Ok(Self {
			settings,
			engine,
			sections,
			mounted: true,
		})
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Element handles of `section`, in registration order.
	pub fn elements(&self, section: Section) -> &[ElementId] {
		self.sections
			.iter()
			.find(|s| s.section == section)
			.map(|s| s.elements.as_slice())
			.unwrap_or(&[])
	}

	/// Section owning `element`.
	pub fn section_of(&self, element: ElementId) -> Option<Section> {
		self.sections
			.iter()
			.find(|s| s.elements.contains(&element))
			.map(|s| s.section)
	}

	pub fn engine(&self) -> &RevealEngine<H, T> {
		&self.engine
	}

	pub fn engine_mut(&mut self) -> &mut RevealEngine<H, T> {
		&mut self.engine
	}

	pub fn host_mut(&mut self) -> &mut H {
		self.engine.host_mut()
	}

	pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) {
		self.engine.handle_intersections(entries);
	}

	/// Runs due reveals; returns how many elements were revealed.
	pub fn tick(&mut self) -> usize {
		self.engine.poll_timers()
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		self.engine.next_deadline()
	}

	pub fn drain_changes(&mut self) -> Vec<RevealChange> {
		self.engine.drain_changes()
	}

	pub fn is_mounted(&self) -> bool {
		self.mounted
	}

	/// Disposes every section's reveal subscription. Safe to call twice.
	pub fn unmount(&mut self) {
		if !self.mounted {
			return;
		}
		for section in &self.sections {
			self.engine.dispose(&section.subscription);
		}
		self.mounted = false;
		tracing::info!("portfolio unmounted");
	}

	/// A contact form for the configured variant, delivering through a
	/// simulated submitter with the configured delay.
	pub fn contact_form(&self) -> ContactForm<SimulatedSubmitter> {
		let submitter = SimulatedSubmitter::new().with_delay(self.settings.contact.submit_delay());
		ContactForm::new(self.settings.contact.variant, submitter)
	}
}
