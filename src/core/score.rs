//! Integer score scale for opportunity and profitability scoring.
//!
//! Every score the engine emits lives on a 0-100 integer scale. The
//! [`Score`] newtype enforces that bound at construction time, so a value
//! that made it into a report is in range by type, not by convention.

use serde::{Deserialize, Serialize};

/// Score on the 0-100 integer scale.
///
/// Raw rule formulas work in `f64`; [`Score::from_raw`] rounds
/// half-away-from-zero and clamps into `[0, 100]` at the point a value is
/// placed into a result.
///
/// # Examples
///
/// ```
/// use marketlens::core::score::Score;
///
/// let score = Score::from_raw(72.4);
/// assert_eq!(score.value(), 72);
///
/// // Out-of-range raw values are clamped, not rejected.
/// assert_eq!(Score::from_raw(160.0).value(), 100);
/// assert_eq!(Score::from_raw(-12.0).value(), 0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Score(u8);

impl Score {
    /// Round a raw floating-point score and clamp it into `[0, 100]`.
    pub fn from_raw(value: f64) -> Self {
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Get the score value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_upper_bound() {
        assert_eq!(Score::from_raw(150.0).value(), 100);
    }

    #[test]
    fn clamps_lower_bound() {
        assert_eq!(Score::from_raw(-10.0).value(), 0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Score::from_raw(69.5).value(), 70);
        assert_eq!(Score::from_raw(69.4).value(), 69);
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Score::from_raw(80.0) > Score::from_raw(40.0));
        assert_eq!(Score::from_raw(50.0), Score::from_raw(50.2));
    }
}
