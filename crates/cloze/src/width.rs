// ABOUTME: Proportional glyph-width estimator measuring text in full-width units.
// ABOUTME: Exact fixed-point Width type, per-character width classes, and string width summation.

//! Glyph width estimation.
//!
//! One full-width reference glyph (e.g. `M`, `　`, `東`) is one unit. Every
//! width class used below has a denominator dividing [`WIDTH_DENOMINATOR`],
//! so widths are stored as an integer count of `1/32760` units and sums are
//! exact. Conversion to floating point happens only via [`Width::to_f64`].
//!
//! Lookup order for a character:
//! 1. the fixed class table ([`WIDTH_CLASSES`]), first matching class wins;
//! 2. ASCII digits, lowercase Latin and half-width katakana (`ｱ`..`ﾝ`) are 1/2,
//!    uppercase Latin is 3/5;
//! 3. East Asian Width: Fullwidth/Wide are 1, Halfwidth/Narrow/Ambiguous 1/2,
//!    everything else 3/4.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::eaw::{east_asian_width, EastAsianWidth};

/// Least common multiple of every width-class denominator (9, 13, 7, 8, 5).
pub const WIDTH_DENOMINATOR: u64 = 32_760;

/// An exact, non-negative visual width in full-width units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(into = "f64")]
pub struct Width(u64);

impl Width {
    pub const ZERO: Width = Width(0);
    pub const FULL: Width = Width(WIDTH_DENOMINATOR);

    /// Builds `num/den` units. `den` must divide [`WIDTH_DENOMINATOR`].
    pub const fn ratio(num: u64, den: u64) -> Width {
        assert!(den != 0 && WIDTH_DENOMINATOR % den == 0);
        Width(num * (WIDTH_DENOMINATOR / den))
    }

    /// Whole number of units.
    pub const fn units(n: u64) -> Width {
        Width(n * WIDTH_DENOMINATOR)
    }

    /// Largest whole unit count not exceeding this width.
    pub fn floor(self) -> u64 {
        self.0 / WIDTH_DENOMINATOR
    }

    /// Reduced `(numerator, denominator)` pair.
    pub fn as_fraction(self) -> (u64, u64) {
        let g = gcd(self.0, WIDTH_DENOMINATOR);
        (self.0 / g, WIDTH_DENOMINATOR / g)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / WIDTH_DENOMINATOR as f64
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Add for Width {
    type Output = Width;

    fn add(self, rhs: Width) -> Width {
        Width(self.0 + rhs.0)
    }
}

impl AddAssign for Width {
    fn add_assign(&mut self, rhs: Width) {
        self.0 += rhs.0;
    }
}

impl Sum for Width {
    fn sum<I: Iterator<Item = Width>>(iter: I) -> Width {
        iter.fold(Width::ZERO, Add::add)
    }
}

impl From<Width> for f64 {
    fn from(w: Width) -> f64 {
        w.to_f64()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (num, den) = self.as_fraction();
        if den == 1 {
            write!(f, "{}", num)
        } else {
            write!(f, "{}/{}", num, den)
        }
    }
}

/// Fixed width classes for common Latin punctuation and letters.
pub const WIDTH_CLASSES: &[(&str, Width)] = &[
    (",:;", Width::ratio(2, 9)),
    ("'\u{2018}`", Width::ratio(3, 13)),
    ("I!", Width::ratio(2, 7)),
    ("ijl.|", Width::ratio(1, 4)),
    ("_/\\", Width::ratio(2, 5)),
    ("frtJ \"()[]{}", Width::ratio(1, 3)),
    ("*-", Width::ratio(3, 7)),
    ("?", Width::ratio(4, 9)),
    ("EFLSTY$", Width::ratio(1, 2)),
    ("#", Width::ratio(3, 5)),
    ("~<=>^", Width::ratio(2, 3)),
    ("DGHNOQ+", Width::ratio(3, 4)),
    ("%&", Width::ratio(7, 8)),
    ("mw", Width::ratio(5, 6)),
    ("MW@", Width::units(1)),
];

const HALF: Width = Width::ratio(1, 2);
const UPPER_LATIN: Width = Width::ratio(3, 5);
const NEUTRAL: Width = Width::ratio(3, 4);

/// Visual width of a single character.
pub fn char_width(c: char) -> Width {
    if let Some(&(_, w)) = WIDTH_CLASSES.iter().find(|(class, _)| class.contains(c)) {
        return w;
    }

    match c {
        '0'..='9' | 'a'..='z' | '\u{FF71}'..='\u{FF9D}' => HALF,
        'A'..='Z' => UPPER_LATIN,
        _ => match east_asian_width(c) {
            EastAsianWidth::Fullwidth | EastAsianWidth::Wide => Width::FULL,
            EastAsianWidth::Halfwidth | EastAsianWidth::Narrow | EastAsianWidth::Ambiguous => HALF,
            EastAsianWidth::Neutral => NEUTRAL,
        },
    }
}

/// Visual width of a string: the exact sum of its characters' widths.
pub fn str_width(s: &str) -> Width {
    s.chars().map(char_width).sum()
}
