//! Typed site settings for folio, loaded from TOML.

pub mod settings;
pub mod validation;

pub use settings::{
	ContactSettings, Link, ProfileSettings, Project, RevealSettings, Settings, SettingsError,
	ThemeSettings,
};
pub use validation::{ValidationError, ValidationResult};
