//! Shared error types for the scoring engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Derived quantities the profitability estimator may fail to compute.
///
/// Carried inside [`MarketlensError::DegenerateInput`] so callers can tell
/// exactly which part of the forecast was unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedQuantity {
    /// Units per month needed to cover fixed costs.
    BreakEvenUnits,
    /// Months until cumulative profit covers the entry investment.
    MonthsToBreakEven,
}

impl std::fmt::Display for DerivedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DerivedQuantity::BreakEvenUnits => "break-even units",
            DerivedQuantity::MonthsToBreakEven => "months to break even",
        };
        write!(f, "{label}")
    }
}

/// Main error type for marketlens operations.
#[derive(Debug, Error)]
pub enum MarketlensError {
    /// A degenerate numeric input made a derived quantity incomputable.
    /// The estimator refuses to emit non-finite values into a report.
    #[error("cannot compute {quantity}: {reason}")]
    DegenerateInput {
        quantity: DerivedQuantity,
        reason: &'static str,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed analysis input
    #[error("invalid input: {0}")]
    Input(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MarketlensError {
    /// Create a degenerate-input fault for a derived quantity.
    pub fn degenerate(quantity: DerivedQuantity, reason: &'static str) -> Self {
        Self::DegenerateInput { quantity, reason }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, MarketlensError>;
