//! Viewport geometry: rectangles, CSS-style root margins and intersection
//! ratios.

use crate::error::{RevealError, RevealResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// A single margin length: a number followed by `px` or `%`. A bare number is
// only accepted when it is zero.
static LENGTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+))(px|%)?$")
		.expect("LENGTH_REGEX: invalid regex pattern")
});

/// Axis-aligned rectangle in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn area(&self) -> f64 {
		self.width.max(0.0) * self.height.max(0.0)
	}

	/// Returns the overlapping region, if any.
	///
	/// Edge-adjacent rectangles intersect with a zero-area region, matching
	/// how browsers report `isIntersecting` for boxes touching the root.
	pub fn intersection(&self, other: &Rect) -> Option<Rect> {
		let left = self.x.max(other.x);
		let top = self.y.max(other.y);
		let right = self.right().min(other.right());
		let bottom = self.bottom().min(other.bottom());

		if right < left || bottom < top {
			return None;
		}
		Some(Rect::new(left, top, right - left, bottom - top))
	}

	/// Returns a copy moved vertically by `dy`.
	pub fn translated(&self, dy: f64) -> Rect {
		Rect::new(self.x, self.y + dy, self.width, self.height)
	}
}

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
	Px(f64),
	/// Percentage of the root's width (left/right) or height (top/bottom).
	Percent(f64),
}

impl Length {
	/// Resolves the length to pixels against the given basis.
	pub fn resolve(&self, basis: f64) -> f64 {
		match self {
			Length::Px(px) => *px,
			Length::Percent(pct) => basis * pct / 100.0,
		}
	}
}

impl fmt::Display for Length {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Length::Px(px) => write!(f, "{}px", px),
			Length::Percent(pct) => write!(f, "{}%", pct),
		}
	}
}

/// Offset applied to each edge of the root before intersections are
/// computed. Positive values grow the root, negative values shrink it.
///
/// Parsed from the CSS margin shorthand: one to four lengths, expanded as
/// `top`, `top right`, `top right bottom` or `top right bottom left`.
///
/// ```
/// use folio_reveal::{Length, RootMargin};
///
/// let margin: RootMargin = "0px 0px -50px 0px".parse().unwrap();
/// assert_eq!(margin.bottom, Length::Px(-50.0));
/// assert_eq!(margin, RootMargin::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
	pub top: Length,
	pub right: Length,
	pub bottom: Length,
	pub left: Length,
}

impl RootMargin {
	/// A margin that leaves the root unchanged.
	pub const ZERO: RootMargin = RootMargin {
		top: Length::Px(0.0),
		right: Length::Px(0.0),
		bottom: Length::Px(0.0),
		left: Length::Px(0.0),
	};

	/// Returns the root rectangle grown (or shrunk) by this margin.
	pub fn apply(&self, root: &Rect) -> Rect {
		let top = self.top.resolve(root.height);
		let bottom = self.bottom.resolve(root.height);
		let left = self.left.resolve(root.width);
		let right = self.right.resolve(root.width);

		Rect::new(
			root.x - left,
			root.y - top,
			(root.width + left + right).max(0.0),
			(root.height + top + bottom).max(0.0),
		)
	}

	fn parse_length(token: &str, input: &str) -> RevealResult<Length> {
		let invalid = |reason: String| RevealError::InvalidRootMargin {
			input: input.to_string(),
			reason,
		};

		let caps = LENGTH_REGEX
			.captures(token)
			.ok_or_else(|| invalid(format!("'{}' is not a pixel or percent length", token)))?;
		let value: f64 = caps[1]
			.parse()
			.map_err(|_| invalid(format!("'{}' is not a number", &caps[1])))?;

		match caps.get(2).map(|m| m.as_str()) {
			Some("px") => Ok(Length::Px(value)),
			Some(_) => Ok(Length::Percent(value)),
			None if value == 0.0 => Ok(Length::Px(0.0)),
			None => Err(invalid(format!("'{}' is missing a unit (px or %)", token))),
		}
	}
}

impl Default for RootMargin {
	/// Shrinks the bottom edge by 50px so elements reveal slightly after they
	/// scroll into view.
	fn default() -> Self {
		Self {
			top: Length::Px(0.0),
			right: Length::Px(0.0),
			bottom: Length::Px(-50.0),
			left: Length::Px(0.0),
		}
	}
}

impl FromStr for RootMargin {
	type Err = RevealError;

	fn from_str(input: &str) -> RevealResult<Self> {
		let lengths = input
			.split_whitespace()
			.map(|token| Self::parse_length(token, input))
			.collect::<RevealResult<Vec<_>>>()?;

		let (top, right, bottom, left) = match lengths.as_slice() {
			[all] => (*all, *all, *all, *all),
			[vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
			[top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
			[top, right, bottom, left] => (*top, *right, *bottom, *left),
			_ => {
				return Err(RevealError::InvalidRootMargin {
					input: input.to_string(),
					reason: format!("expected 1 to 4 lengths, found {}", lengths.len()),
				});
			}
		};

		Ok(Self {
			top,
			right,
			bottom,
			left,
		})
	}
}

impl fmt::Display for RootMargin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
	}
}

impl TryFrom<String> for RootMargin {
	type Error = RevealError;

	fn try_from(value: String) -> RevealResult<Self> {
		value.parse()
	}
}

impl From<RootMargin> for String {
	fn from(margin: RootMargin) -> Self {
		margin.to_string()
	}
}

/// Fraction of `target` visible inside `root` after applying `margin`.
///
/// Returns `None` when the target does not intersect the margin-adjusted
/// root at all. A zero-area target that touches the root counts as fully
/// visible.
pub fn intersection_ratio(target: &Rect, root: &Rect, margin: &RootMargin) -> Option<f64> {
	let root = margin.apply(root);
	let overlap = target.intersection(&root)?;
	let area = target.area();
	if area == 0.0 {
		return Some(1.0);
	}
	Some((overlap.area() / area).clamp(0.0, 1.0))
}
