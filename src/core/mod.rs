//! Core data model: analysis inputs and the assembled category report.

pub mod score;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::locale::Language;
use crate::opportunity::OpportunityReport;
use crate::profitability::ProfitabilityReport;

/// One observed competitor in the category under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Competitor {
    /// Listed price in the report currency. A missing price contributes
    /// nothing to price aggregates; it is not treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Customer rating, conventionally 0-5. An absent rating is an explicit
    /// zero in the data model, so rating averages see 0 rather than a hole.
    #[serde(default)]
    pub rating: f64,
}

impl Competitor {
    /// Competitor known only by price.
    pub fn priced(price: f64) -> Self {
        Self {
            price: Some(price),
            rating: 0.0,
        }
    }

    /// Competitor known only by rating.
    pub fn rated(rating: f64) -> Self {
        Self {
            price: None,
            rating,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// Category-level aggregates the caller may already have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarketStats {
    /// Overrides the competitor-derived average sale price when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
}

/// Summary signals for one product category, as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display name for the category, if the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Relative market demand strength, conventionally 0-100.
    pub demand_score: f64,
    /// Aggregate competitive intensity, conventionally 0-100.
    pub competitor_strength: f64,
    /// Expected profit margin percentage (pre cost model).
    pub profit_margin: f64,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_stats: Option<MarketStats>,
}

/// The assembled report for one category: both engines' output merged.
///
/// The two engine calls are pure; assembly only adds the timestamp and
/// carries the language the profitability labels were rendered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub lang: Language,
    pub generated_at: DateTime<Utc>,
    pub opportunities: OpportunityReport,
    pub profitability: ProfitabilityReport,
}

impl MarketReport {
    /// Run both engines over one category and merge the results.
    pub fn assemble(input: &CategoryInput, lang: Language) -> Result<Self> {
        let opportunities = crate::opportunity::find_opportunities(
            input.demand_score,
            input.competitor_strength,
            input.profit_margin,
            &input.competitors,
        );
        let profitability = crate::profitability::calculate_profitability(
            input.market_stats.as_ref(),
            &input.competitors,
            input.demand_score,
            lang,
        )?;

        Ok(Self {
            category: input.name.clone(),
            lang,
            generated_at: Utc::now(),
            opportunities,
            profitability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competitor_rating_defaults_to_zero_on_deserialize() {
        let competitor: Competitor = serde_json::from_str(r#"{"price": 99.0}"#).unwrap();
        assert_eq!(competitor.price, Some(99.0));
        assert_eq!(competitor.rating, 0.0);
    }

    #[test]
    fn category_input_tolerates_missing_competitors() {
        let input: CategoryInput = serde_json::from_str(
            r#"{"demand_score": 55.0, "competitor_strength": 30.0, "profit_margin": 25.0}"#,
        )
        .unwrap();
        assert!(input.competitors.is_empty());
        assert!(input.market_stats.is_none());
    }
}
