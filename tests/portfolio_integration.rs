//! Full page flow: settings file, scrolling through sections, contact form.

use folio::forms::fields;
use folio::reveal::{MockTimeProvider, RevealChange};
use folio::{
	HeadlessHost, Portfolio, Rect, Section, Settings, SubmissionOutcome, SubmissionState,
	Visibility,
};
use rstest::{fixture, rstest};
use std::time::Duration;

const SETTINGS: &str = include_str!("../config/folio.toml");

struct Page {
	clock: MockTimeProvider,
	portfolio: Portfolio<HeadlessHost, MockTimeProvider>,
}

impl Page {
	fn sync(&mut self) -> usize {
		let entries = self.portfolio.host_mut().take_entries();
		self.portfolio.handle_intersections(&entries);
		self.portfolio.tick()
	}

	fn elapse(&mut self, ms: u64) -> usize {
		self.clock.advance(Duration::from_millis(ms));
		self.portfolio.tick()
	}

	fn revealed(&self, section: Section) -> usize {
		self.portfolio
			.elements(section)
			.iter()
			.filter(|id| self.portfolio.engine().visibility(**id) == Some(Visibility::Revealed))
			.count()
	}
}

/// Lays sections out top to bottom, each 600px tall, items in a row.
#[fixture]
fn page() -> Page {
	let settings = Settings::from_toml_str(SETTINGS).unwrap();
	let clock = MockTimeProvider::default();
	let host = HeadlessHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
	let mut portfolio = Portfolio::with_time_provider(settings, host, clock.clone()).unwrap();

	for (row, section) in Section::ALL.into_iter().enumerate() {
		let top = row as f64 * 800.0;
		let elements = portfolio.elements(section).to_vec();
		for (col, id) in elements.into_iter().enumerate() {
			let rect = Rect::new(col as f64 * 200.0, top + 100.0, 180.0, 400.0);
			portfolio.host_mut().place(id, rect);
		}
	}

	Page { clock, portfolio }
}

#[rstest]
fn test_scrolling_reveals_sections_in_turn(mut page: Page) {
	// Act: initial paint shows only the hero
	page.sync();

	// Assert
	assert_eq!(page.revealed(Section::Hero), 1);
	assert_eq!(page.revealed(Section::Skills), 0);

	// Act: scroll to the skills row
	page.portfolio.host_mut().scroll_to(800.0);
	let immediate = page.sync();
	let after_250 = page.elapse(250);
	let after_600 = page.elapse(350);

	// Assert: 6 items at 0, 100, ..., 500ms
	assert_eq!(immediate, 1);
	assert_eq!(after_250, 2);
	assert_eq!(after_600, 3);
	assert_eq!(page.revealed(Section::Skills), 6);
	assert_eq!(page.revealed(Section::Projects), 0);

	// Act: scroll back up; the hero stays revealed
	page.portfolio.host_mut().scroll_to(0.0);
	page.sync();

	// Assert
	assert_eq!(page.revealed(Section::Hero), 1);
}

#[rstest]
fn test_unmount_mid_cascade_cancels_remaining_reveals(mut page: Page) {
	// Arrange
	page.portfolio.host_mut().scroll_to(800.0);
	page.sync();
	page.elapse(150);
	page.portfolio.drain_changes();

	// Act
	page.portfolio.unmount();
	let later = page.elapse(1000);

	// Assert
	assert_eq!(later, 0);
	assert!(page.portfolio.next_deadline().is_none());
	let changes: Vec<RevealChange> = page.portfolio.drain_changes();
	assert!(changes.is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_contact_form_from_settings() {
	// Arrange
	let settings = Settings::from_toml_str(SETTINGS).unwrap();
	let host = HeadlessHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
	let portfolio = Portfolio::new(settings, host).unwrap();
	let mut form = portfolio.contact_form();
	let answer = form.captcha().unwrap().answer();
	form.update_field(fields::FULL_NAME, "Jo Park");
	form.update_field(fields::EMAIL, "jo@x.co");
	form.update_field(fields::SUBJECT, "Hello");
	form.update_field(
		fields::MESSAGE,
		"Loved the project gallery, would you be open to a short call next week?",
	);
	form.update_field(fields::CAPTCHA, answer.to_string());

	// Act
	let outcome = form.submit().await.unwrap();

	// Assert
	assert_eq!(outcome, SubmissionOutcome::Succeeded);
	assert_eq!(form.state(), SubmissionState::Succeeded);
	assert_eq!(form.draft().value(fields::FULL_NAME), "");
}
