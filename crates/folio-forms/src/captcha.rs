//! Arithmetic CAPTCHA for the extended contact form.

use folio_reveal::parse_leading_int;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Range both operands are drawn from.
pub const OPERAND_RANGE: RangeInclusive<u8> = 1..=10;

/// An addition problem `left + right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptchaChallenge {
	left: u8,
	right: u8,
}

impl CaptchaChallenge {
	pub fn new(left: u8, right: u8) -> Self {
		Self { left, right }
	}

	/// Draws both operands uniformly from [`OPERAND_RANGE`].
	pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self {
			left: rng.gen_range(OPERAND_RANGE),
			right: rng.gen_range(OPERAND_RANGE),
		}
	}

	/// Draws a replacement that differs from `self`, so a refreshed form
	/// never shows the same problem twice in a row.
	pub fn regenerate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
		loop {
			let next = Self::generate(rng);
			if next != *self {
				return next;
			}
		}
	}

	pub fn operands(&self) -> (u8, u8) {
		(self.left, self.right)
	}

	/// Question text shown above the answer input.
	///
	/// ```
	/// use folio_forms::CaptchaChallenge;
	///
	/// let challenge = CaptchaChallenge::new(3, 4);
	/// assert_eq!(challenge.question(), "3 + 4 = ?");
	/// assert!(challenge.is_correct("7"));
	/// ```
	pub fn question(&self) -> String {
		format!("{} + {} = ?", self.left, self.right)
	}

	pub fn answer(&self) -> i64 {
		i64::from(self.left) + i64::from(self.right)
	}

	pub fn is_correct(&self, input: &str) -> bool {
		parse_leading_int(input) == Some(self.answer())
	}
}

impl fmt::Display for CaptchaChallenge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} + {}", self.left, self.right)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rstest::rstest;

	#[rstest]
	#[case("7", true)]
	#[case("6", false)]
	#[case("", false)]
	#[case("07", true)]
	fn test_is_correct(#[case] input: &str, #[case] expected: bool) {
		// Arrange
		let challenge = CaptchaChallenge::new(3, 4);

		// Act & Assert
		assert_eq!(challenge.is_correct(input), expected);
	}

	#[rstest]
	fn test_generate_is_reproducible_with_seed() {
		// Arrange
		let mut a = StdRng::seed_from_u64(42);
		let mut b = StdRng::seed_from_u64(42);

		// Act & Assert
		assert_eq!(CaptchaChallenge::generate(&mut a), CaptchaChallenge::generate(&mut b));
	}

	proptest! {
		#[test]
		fn prop_generated_operands_in_range(seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let (left, right) = CaptchaChallenge::generate(&mut rng).operands();
			prop_assert!(OPERAND_RANGE.contains(&left));
			prop_assert!(OPERAND_RANGE.contains(&right));
		}

		#[test]
		fn prop_regenerate_never_repeats(seed in any::<u64>(), left in 1u8..=10, right in 1u8..=10) {
			let mut rng = StdRng::seed_from_u64(seed);
			let current = CaptchaChallenge::new(left, right);
			let next = current.regenerate(&mut rng);
			prop_assert_ne!(next, current);
			prop_assert!(OPERAND_RANGE.contains(&next.operands().0));
		}

		#[test]
		fn prop_answer_is_sum(left in 1u8..=10, right in 1u8..=10) {
			let challenge = CaptchaChallenge::new(left, right);
			prop_assert_eq!(challenge.answer(), i64::from(left + right));
			prop_assert!(challenge.is_correct(&challenge.answer().to_string()));
		}
	}
}
