//! Per-element delay resolution for group registrations.

use crate::config::RevealConfig;
use std::time::Duration;

/// Largest delay a timer accepts (`2^31 - 1` ms, about 24.8 days).
pub const MAX_DELAY_MS: u64 = i32::MAX as u64;

/// Reads a leading integer the way a radix-less `parseInt` does.
///
/// Leading whitespace and an optional sign are skipped; a `0x`/`0X` prefix
/// switches to hexadecimal. The longest run of digits is read and trailing
/// text is ignored. Returns `None` when no digit follows. Magnitudes beyond
/// `i64` saturate.
///
/// ```
/// use folio_reveal::parse_leading_int;
///
/// assert_eq!(parse_leading_int(" 7 apples"), Some(7));
/// assert_eq!(parse_leading_int("0x10"), Some(16));
/// assert_eq!(parse_leading_int("seven"), None);
/// ```
pub fn parse_leading_int(raw: &str) -> Option<i64> {
	let trimmed = raw.trim_start();
	let (negative, rest) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};
	let (radix, rest) = match rest.get(..2) {
		Some("0x" | "0X") => (16, &rest[2..]),
		_ => (10, rest),
	};

	let digits_end = rest
		.find(|c: char| !c.is_digit(radix))
		.unwrap_or(rest.len());
	let digits = &rest[..digits_end];
	if digits.is_empty() {
		return None;
	}

	// Only digits remain, so the sole parse failure is overflow.
	let magnitude = i64::from_str_radix(digits, radix).unwrap_or(i64::MAX);
	Some(if negative { -magnitude } else { magnitude })
}

/// Coerces a raw delay attribute to milliseconds the way `parseInt` followed
/// by a timer would.
///
/// Parsing follows [`parse_leading_int`], so `"150ms"` is 150 and `"0x10"` is
/// 16. Input without leading digits and negative values coerce to zero;
/// values are capped at [`MAX_DELAY_MS`].
///
/// ```
/// use folio_reveal::parse_delay_attribute;
/// use std::time::Duration;
///
/// assert_eq!(parse_delay_attribute(" 250"), Duration::from_millis(250));
/// assert_eq!(parse_delay_attribute("soon"), Duration::ZERO);
/// ```
pub fn parse_delay_attribute(raw: &str) -> Duration {
	let millis = parse_leading_int(raw)
		.and_then(|n| u64::try_from(n).ok())
		.unwrap_or(0);
	Duration::from_millis(millis.min(MAX_DELAY_MS))
}

/// Delay contributed by an element's position in its group.
pub fn stagger_delay(index: usize, step: Option<Duration>) -> Duration {
	match step {
		Some(step) => step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
		None => Duration::ZERO,
	}
}

/// Total delay for the `index`-th member of a group.
///
/// A present delay attribute replaces the stagger delay; the config's base
/// delay is added either way.
pub fn resolve_group_delay(
	index: usize,
	delay_attribute: Option<&str>,
	config: &RevealConfig,
) -> Duration {
	let own = match delay_attribute {
		Some(raw) => parse_delay_attribute(raw),
		None => stagger_delay(index, config.stagger),
	};
	config.delay.saturating_add(own)
}
