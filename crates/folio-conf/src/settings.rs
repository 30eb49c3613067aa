//! The settings document.

use crate::validation::{
	ValidationError, ValidationResult, validate_fraction, validate_hex_color, validate_link,
	validate_required,
};
use folio_forms::FormVariant;
use folio_reveal::{AnimationKind, DEFAULT_THRESHOLD, RevealConfig, RootMargin};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound for the simulated submission delay.
pub const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid settings: {0}")]
	Invalid(#[from] ValidationError),
}

/// Site settings: profile content, palette, reveal defaults and contact form
/// options.
///
/// Every section falls back to its defaults, so an empty document is valid.
///
/// # Examples
///
/// ```
/// use folio_conf::Settings;
///
/// let settings = Settings::from_toml_str(r#"
/// [profile]
/// name = "Ada"
///
/// [reveal]
/// animation = "scale-up"
/// "#).unwrap();
///
/// assert_eq!(settings.profile.name, "Ada");
/// assert_eq!(settings.reveal.section_config().animation_class, "animate-scale-up");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	pub profile: ProfileSettings,
	pub theme: ThemeSettings,
	pub reveal: RevealSettings,
	pub contact: ContactSettings,
}

impl Settings {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Settings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads, parses and validates a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&source)?;
		tracing::info!(path = %path.display(), "loaded site settings");
		Ok(settings)
	}

	/// Checks every section, reporting all problems at once.
	pub fn validate(&self) -> ValidationResult {
		let mut errors = Vec::new();
		let mut check = |result: ValidationResult| {
			if let Err(err) = result {
				errors.push(err);
			}
		};

		check(validate_required("profile.name", &self.profile.name));
		for (i, link) in self.profile.links.iter().enumerate() {
			check(validate_required(&format!("profile.links[{}].label", i), &link.label));
			check(validate_link(&format!("profile.links[{}].url", i), &link.url));
		}
		for (i, project) in self.profile.projects.iter().enumerate() {
			check(validate_required(&format!("profile.projects[{}].title", i), &project.title));
			if let Some(url) = &project.url {
				check(validate_link(&format!("profile.projects[{}].url", i), url));
			}
		}
		if let Some(avatar) = &self.profile.avatar_url {
			check(validate_link("profile.avatar_url", avatar));
		}

		check(validate_hex_color("theme.navy", &self.theme.navy));
		check(validate_hex_color("theme.light_gray", &self.theme.light_gray));
		check(validate_hex_color("theme.teal", &self.theme.teal));

		check(validate_fraction("reveal.threshold", self.reveal.threshold));
		if self.contact.submit_delay_ms > MAX_SUBMIT_DELAY_MS {
			check(Err(ValidationError::Constraint(format!(
				"contact.submit_delay_ms must not exceed {}",
				MAX_SUBMIT_DELAY_MS
			))));
		}

		if !errors.is_empty() {
			tracing::warn!(count = errors.len(), "site settings failed validation");
		}
		ValidationError::collect(errors)
	}
}

/// A labelled external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
	pub label: String,
	pub url: String,
}

impl Link {
	pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			url: url.into(),
		}
	}
}

/// A project card in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub url: Option<String>,
}

/// Hero and showcase content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSettings {
	pub name: String,
	pub title: String,
	pub tagline: String,
	pub avatar_url: Option<String>,
	pub tech_stack: Vec<String>,
	pub links: Vec<Link>,
	pub projects: Vec<Project>,
}

impl Default for ProfileSettings {
	fn default() -> Self {
		Self {
			name: "Omar Rharbi".to_string(),
			title: "Full Stack Developer".to_string(),
			tagline: "Building digital experiences with modern web technologies and innovative solutions."
				.to_string(),
			avatar_url: None,
			tech_stack: ["HTML5", "CSS3", "JavaScript", "React", "Node.js", "TypeScript"]
				.into_iter()
				.map(String::from)
				.collect(),
			links: vec![
				Link::new("Email", "mailto:omar@example.com"),
				Link::new("GitHub", "https://github.com"),
				Link::new("LinkedIn", "https://linkedin.com"),
			],
			projects: Vec::new(),
		}
	}
}

/// Site palette as `#RRGGBB` colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSettings {
	pub navy: String,
	pub light_gray: String,
	pub teal: String,
}

impl Default for ThemeSettings {
	fn default() -> Self {
		Self {
			navy: "#0A192F".to_string(),
			light_gray: "#8892B0".to_string(),
			teal: "#64FFDA".to_string(),
		}
	}
}

/// Reveal defaults applied to every section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealSettings {
	pub threshold: f64,
	pub root_margin: RootMargin,
	pub animation: AnimationKind,
	pub delay_ms: u64,
	/// Per-item stagger for grouped sections; `0` disables staggering.
	pub stagger_ms: u64,
}

impl RevealSettings {
	/// Config for a one-shot section wrapper. Grouped sections use the same
	/// config; the stagger only applies to group registrations.
	pub fn section_config(&self) -> RevealConfig {
		RevealConfig::section(self.animation)
			.with_threshold(self.threshold)
			.with_root_margin(self.root_margin)
			.with_delay(Duration::from_millis(self.delay_ms))
			.with_stagger(
				(self.stagger_ms > 0).then(|| Duration::from_millis(self.stagger_ms)),
			)
	}
}

impl Default for RevealSettings {
	fn default() -> Self {
		Self {
			threshold: DEFAULT_THRESHOLD,
			root_margin: RootMargin::default(),
			animation: AnimationKind::default(),
			delay_ms: 0,
			stagger_ms: 100,
		}
	}
}

/// Contact form options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactSettings {
	pub variant: FormVariant,
	pub submit_delay_ms: u64,
}

impl ContactSettings {
	pub fn submit_delay(&self) -> Duration {
		Duration::from_millis(self.submit_delay_ms)
	}
}

impl Default for ContactSettings {
	fn default() -> Self {
		Self {
			variant: FormVariant::Extended,
			submit_delay_ms: 2000,
		}
	}
}
