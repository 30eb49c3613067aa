//! Field names and choice lists of the contact forms.

pub const NAME: &str = "name";
pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const COMPANY: &str = "company";
pub const SUBJECT: &str = "subject";
pub const MESSAGE: &str = "message";
pub const CONTACT_METHOD: &str = "contact_method";
pub const BEST_TIME: &str = "best_time";
pub const CAPTCHA: &str = "captcha";

/// Fields of the minimal form, in display order.
pub const MINIMAL_FIELDS: [&str; 3] = [NAME, EMAIL, MESSAGE];

/// Fields of the extended form, in display order.
pub const EXTENDED_FIELDS: [&str; 9] = [
	FULL_NAME,
	EMAIL,
	PHONE,
	COMPANY,
	SUBJECT,
	MESSAGE,
	CONTACT_METHOD,
	BEST_TIME,
	CAPTCHA,
];

pub const CONTACT_METHODS: [&str; 2] = ["email", "phone"];
pub const DEFAULT_CONTACT_METHOD: &str = "email";

pub const BEST_TIMES: [&str; 3] = ["morning", "afternoon", "evening"];
pub const DEFAULT_BEST_TIME: &str = "morning";
