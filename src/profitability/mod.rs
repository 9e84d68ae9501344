//! Profitability forecasting: unit economics, break-even, revenue scenarios.

pub mod estimator;

pub use estimator::calculate_profitability;

use serde::{Deserialize, Serialize};

use crate::core::score::Score;
use crate::locale::Language;

/// Normalized price deviation above which sensitivity reads High.
pub const HIGH_SENSITIVITY_DEVIATION: f64 = 0.15;
/// Normalized price deviation below which sensitivity reads Low.
pub const LOW_SENSITIVITY_DEVIATION: f64 = 0.05;

/// How strongly the market reacts to price differences, from the spread of
/// observed competitor prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSensitivity {
    High,
    Medium,
    Low,
}

impl PriceSensitivity {
    /// Classify a normalized price deviation. `None` means fewer than two
    /// competitors had a usable price, which reads as Medium.
    pub fn from_normalized_deviation(deviation: Option<f64>) -> Self {
        match deviation {
            Some(d) if d > HIGH_SENSITIVITY_DEVIATION => PriceSensitivity::High,
            Some(d) if d < LOW_SENSITIVITY_DEVIATION => PriceSensitivity::Low,
            _ => PriceSensitivity::Medium,
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (PriceSensitivity::High, Language::En) => "High - consider competitive pricing",
            (PriceSensitivity::High, Language::Ar) => "عالية - يفضل اعتماد تسعير تنافسي",
            (PriceSensitivity::Medium, Language::En) => "Medium",
            (PriceSensitivity::Medium, Language::Ar) => "متوسطة",
            (PriceSensitivity::Low, Language::En) => "Low - standardized pricing",
            (PriceSensitivity::Low, Language::Ar) => "منخفضة - الأسعار شبه موحدة",
        }
    }
}

/// Demand tier backing the revenue estimate's transparency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn from_score(demand_score: f64) -> Self {
        if demand_score >= 80.0 {
            DemandLevel::VeryHigh
        } else if demand_score >= 60.0 {
            DemandLevel::High
        } else if demand_score < 40.0 {
            DemandLevel::Low
        } else {
            DemandLevel::Medium
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (DemandLevel::VeryHigh, Language::En) => "Very high demand",
            (DemandLevel::VeryHigh, Language::Ar) => "طلب مرتفع جدًا",
            (DemandLevel::High, Language::En) => "High demand",
            (DemandLevel::High, Language::Ar) => "طلب مرتفع",
            (DemandLevel::Medium, Language::En) => "Medium demand",
            (DemandLevel::Medium, Language::Ar) => "طلب متوسط",
            (DemandLevel::Low, Language::En) => "Low demand",
            (DemandLevel::Low, Language::Ar) => "طلب منخفض",
        }
    }
}

/// Per-unit cost split, rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub product_cost: i64,
    pub shipping: i64,
    pub platform_fees: i64,
}

/// Sales volume and time needed to cover the fixed overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEven {
    pub units: u64,
    pub months: u64,
    /// Stock to reach break-even volume plus one month of overhead.
    pub capital_required: i64,
}

/// Why the revenue estimate says what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueBasis {
    pub demand_level: String,
    pub estimated_monthly_units: u64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub estimated_monthly_units: u64,
    /// Rendered with the currency prefix and thousands separators.
    pub estimated_monthly_revenue: String,
    pub basis: RevenueBasis,
}

/// One sales-volume scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub units: u64,
    pub monthly_profit: i64,
}

/// Three volume levels around the monthly estimate.
///
/// Only the conservative profit is floored at zero; the other two may go
/// negative when unit profit is thin against the break-even volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenarios {
    pub conservative: Scenario,
    pub moderate: Scenario,
    pub optimistic: Scenario,
}

/// Full profitability forecast for one category.
///
/// Monetary and percentage fields are rounded to whole units at output;
/// the estimator computes in full precision until then. Label fields carry
/// the language selected at the call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub average_sale_price: i64,
    pub cost_breakdown: CostBreakdown,
    pub profit_per_unit: i64,
    pub margin_percentage: i64,
    pub price_sensitivity: String,
    pub break_even: BreakEven,
    pub revenue: RevenueProjection,
    pub profitability_score: Score,
    pub scenarios: Scenarios,
}
