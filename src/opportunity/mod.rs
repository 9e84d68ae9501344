//! Opportunity detection: classification types and the rule-based finder.

pub mod finder;
pub mod rules;

pub use finder::find_opportunities;

use serde::{Deserialize, Serialize};

use crate::core::score::Score;
use crate::locale::Bilingual;

/// Classification tag for a detected market condition.
///
/// The serialized tag set (`green`, `priceGap`, `contentQuality`,
/// `emerging`, `niche`) is fixed; report consumers key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpportunityType {
    Green,
    PriceGap,
    ContentQuality,
    Emerging,
    Niche,
}

impl std::fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(OpportunityType, &str)] = &[
            (OpportunityType::Green, "Green Zone"),
            (OpportunityType::PriceGap, "Price Gap"),
            (OpportunityType::ContentQuality, "Content Quality Gap"),
            (OpportunityType::Emerging, "Emerging Category"),
            (OpportunityType::Niche, "Niche Specialization"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

/// Per-type metrics attached to an opportunity.
///
/// Each variant carries only what its rule produces. Price fields are
/// display-formatted ("123.45 SAR"); the content rule reports its rating
/// raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OpportunityMetrics {
    PriceGap {
        average_price: String,
        suggested_price: String,
        price_gap: String,
        competitor_count: usize,
    },
    ContentQuality {
        average_rating: f64,
        competitor_count: usize,
    },
    Emerging {
        estimated_monthly_sales: u64,
        competitor_count: usize,
    },
}

/// One detected opportunity, fully bilingual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub title: Bilingual,
    pub description: Bilingual,
    /// Always within 0-100; [`Score`] clamps at construction.
    pub potential_score: Score,
    pub action_items: Vec<Bilingual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<OpportunityMetrics>,
}

/// Counts of detected opportunities per type.
///
/// Only the four types above track counts here; niche detections are
/// reported in the list but never tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OpportunityTally {
    pub green: usize,
    pub price_gap: usize,
    pub content_quality: usize,
    pub emerging: usize,
}

impl OpportunityTally {
    pub fn record(&mut self, opportunity_type: OpportunityType) {
        match opportunity_type {
            OpportunityType::Green => self.green += 1,
            OpportunityType::PriceGap => self.price_gap += 1,
            OpportunityType::ContentQuality => self.content_quality += 1,
            OpportunityType::Emerging => self.emerging += 1,
            // niche stays out of the tally
            OpportunityType::Niche => {}
        }
    }
}

/// Result of one finder invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityReport {
    /// Sorted by descending potential score; ties keep rule order.
    pub opportunities: Vec<Opportunity>,
    pub total_found: usize,
    /// Head of the sorted list, absent when nothing fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_opportunity: Option<Opportunity>,
    pub by_type: OpportunityTally,
}
