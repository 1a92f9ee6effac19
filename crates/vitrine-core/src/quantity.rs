//! Quantity values bound to `.quantidade-input` fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line-item quantity. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

/// Direction of a stepper click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decrement,
    Increment,
}

impl Quantity {
    /// The floor every stepper and mutation respects.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, rejecting zero.
    pub fn new(value: u64) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Read an input's text, clamping anything below one up to one.
    pub fn from_input(raw: &str) -> Self {
        Self::clamp(parse_lenient(raw))
    }

    /// The numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Apply one stepper click to the raw text of an input.
    ///
    /// Decrement only moves values above one. Increment always adds one, up
    /// to `i64::MAX`, the largest value an input parses to.
    pub fn step(raw: &str, step: Step) -> Self {
        let current = parse_lenient(raw);
        match step {
            Step::Decrement if current > 1 => Self::clamp(current - 1),
            Step::Decrement => Self::ONE,
            Step::Increment => Self::clamp(current.max(0).saturating_add(1)),
        }
    }

    fn clamp(value: i64) -> Self {
        Self(value.max(1).unsigned_abs())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Quantity {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("quantity must be at least 1, got {}", value))
    }
}

impl From<Quantity> for u64 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

/// Integer parsing with the leniency of form inputs.
///
/// Leading whitespace and an optional sign are accepted, then as many digits
/// as follow; trailing garbage is ignored (`"12abc"` is 12, `"3.7"` is 3).
/// Input with no leading digits reads as 0. Overflow saturates.
pub fn parse_lenient(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("3"), 3);
        assert_eq!(parse_lenient("  12abc"), 12);
        assert_eq!(parse_lenient("3.7"), 3);
        assert_eq!(parse_lenient("+5"), 5);
        assert_eq!(parse_lenient("-2"), -2);
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("abc"), 0);
        assert_eq!(parse_lenient("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_decrement_above_one() {
        for v in 2..200u64 {
            let q = Quantity::step(&v.to_string(), Step::Decrement);
            assert_eq!(q.get(), v - 1);
        }
    }

    #[test]
    fn test_decrement_at_one_is_noop() {
        assert_eq!(Quantity::step("1", Step::Decrement), Quantity::ONE);
    }

    #[test]
    fn test_increment_has_no_ceiling() {
        assert_eq!(Quantity::step("1", Step::Increment).get(), 2);
        assert_eq!(Quantity::step("9999", Step::Increment).get(), 10000);
        assert_eq!(Quantity::step("4294967295", Step::Increment).get(), 4_294_967_296);
        assert_eq!(Quantity::step("5000000000", Step::Increment).get(), 5_000_000_001);
    }

    #[test]
    fn test_increment_saturates_at_parse_limit() {
        let max = i64::MAX.to_string();
        assert_eq!(Quantity::step(&max, Step::Increment).get(), i64::MAX as u64);
    }

    #[test]
    fn test_three_decrements_from_three() {
        let mut raw = "3".to_string();
        for _ in 0..2 {
            raw = Quantity::step(&raw, Step::Decrement).to_string();
        }
        assert_eq!(raw, "1");
        raw = Quantity::step(&raw, Step::Decrement).to_string();
        assert_eq!(raw, "1");
    }

    #[test]
    fn test_step_from_garbage_lands_on_one() {
        assert_eq!(Quantity::step("", Step::Decrement), Quantity::ONE);
        assert_eq!(Quantity::step("", Step::Increment), Quantity::ONE);
        assert_eq!(Quantity::step("-4", Step::Increment), Quantity::ONE);
    }

    #[test]
    fn test_from_input_clamps() {
        assert_eq!(Quantity::from_input("0").get(), 1);
        assert_eq!(Quantity::from_input("5").get(), 5);
        assert_eq!(Quantity::from_input("nope").get(), 1);
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
        assert_eq!(serde_json::to_string(&Quantity::ONE).unwrap(), "1");
    }
}
