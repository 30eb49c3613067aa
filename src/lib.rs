//! # folio
//!
//! Core of a single-page portfolio site: scroll-triggered reveal animations,
//! contact form validation with a simulated submission, and typed site
//! settings.
//!
//! ## Feature Flags
//!
//! - `reveal` - Reveal engine ([`reveal`])
//! - `forms` - Contact form validation and submission ([`forms`])
//! - `conf` - TOML site settings ([`conf`])
//! - `site` - Portfolio assembly ([`Portfolio`])
//! - `full` (default) - Everything above
//!
//! ## Quick Example
//!
//! ```
//! use folio::{HeadlessHost, Portfolio, Rect, Section, Settings};
//!
//! let host = HeadlessHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! let mut portfolio = Portfolio::new(Settings::default(), host).unwrap();
//!
//! let skills = portfolio.elements(Section::Skills).to_vec();
//! assert_eq!(skills.len(), 6);
//!
//! portfolio.unmount();
//! ```

pub mod logging;
#[cfg(feature = "site")]
pub mod site;

#[cfg(feature = "conf")]
pub use folio_conf as conf;
#[cfg(feature = "forms")]
pub use folio_forms as forms;
#[cfg(feature = "reveal")]
pub use folio_reveal as reveal;

pub use logging::init_logging;

#[cfg(feature = "conf")]
pub use folio_conf::{Settings, SettingsError, ValidationError};
#[cfg(feature = "forms")]
pub use folio_forms::{
	ContactForm, FormDraft, FormErrors, FormVariant, SimulatedSubmitter, SubmissionOutcome,
	SubmissionState, Submitter,
};
#[cfg(feature = "reveal")]
pub use folio_reveal::{
	ElementId, HeadlessHost, IntersectionEntry, Rect, RevealConfig, RevealEngine, Visibility,
};
#[cfg(feature = "site")]
pub use site::{Portfolio, Section, SiteError};
