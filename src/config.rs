//! Engine configuration.
//!
//! Every tunable ships with a default equal to the documented engine
//! constant, so running without a config file reproduces stock behavior
//! exactly. A `marketlens.toml` can override rule thresholds, the cost
//! model, and the profitability score weights.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::errors::{MarketlensError, Result};

/// Weights for the profitability score blend.
///
/// The three components must sum to 1.0; [`ScoreWeights::normalize`]
/// rescales them when they drift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the margin component (0.0-1.0)
    #[serde(default = "default_margin_weight")]
    pub margin: f64,

    /// Weight of the raw demand component (0.0-1.0)
    #[serde(default = "default_demand_weight")]
    pub demand: f64,

    /// Weight of the competition-pressure component (0.0-1.0)
    #[serde(default = "default_competition_weight")]
    pub competition: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            margin: default_margin_weight(),
            demand: default_demand_weight(),
            competition: default_competition_weight(),
        }
    }
}

impl ScoreWeights {
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    /// Validate that each weight is in range and the sum is 1.0
    /// (small tolerance for floating point).
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (weight, name) in [
            (self.margin, "margin"),
            (self.demand, "demand"),
            (self.competition, "competition"),
        ] {
            if !Self::is_valid_weight(weight) {
                return Err(format!("{name} weight must be between 0.0 and 1.0"));
            }
        }

        let sum = self.margin + self.demand + self.competition;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "score weights must sum to 1.0, but sum to {sum:.3}"
            ));
        }
        Ok(())
    }

    /// Rescale the weights so they sum to exactly 1.0.
    pub fn normalize(&mut self) {
        let sum = self.margin + self.demand + self.competition;
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.margin /= sum;
            self.demand /= sum;
            self.competition /= sum;
        }
    }
}

fn default_margin_weight() -> f64 {
    0.4
}

fn default_demand_weight() -> f64 {
    0.35
}

fn default_competition_weight() -> f64 {
    0.25
}

/// Unit-economics cost model, as percentages of the sale price plus the
/// fixed monthly overhead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostModel {
    /// Product cost as a percentage of sale price
    #[serde(default = "default_product_cost_pct")]
    pub product_cost_pct: f64,

    /// Shipping cost as a percentage of sale price
    #[serde(default = "default_shipping_pct")]
    pub shipping_pct: f64,

    /// Platform fee as a percentage of sale price
    #[serde(default = "default_platform_fee_pct")]
    pub platform_fee_pct: f64,

    /// Fixed monthly overhead in currency units
    #[serde(default = "default_monthly_fixed_costs")]
    pub monthly_fixed_costs: f64,

    /// Sale price assumed when no market stats or competitor prices exist
    #[serde(default = "default_fallback_sale_price")]
    pub fallback_sale_price: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            product_cost_pct: default_product_cost_pct(),
            shipping_pct: default_shipping_pct(),
            platform_fee_pct: default_platform_fee_pct(),
            monthly_fixed_costs: default_monthly_fixed_costs(),
            fallback_sale_price: default_fallback_sale_price(),
        }
    }
}

impl CostModel {
    /// Combined per-unit cost percentage.
    pub fn total_cost_pct(&self) -> f64 {
        self.product_cost_pct + self.shipping_pct + self.platform_fee_pct
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        for (pct, name) in [
            (self.product_cost_pct, "product_cost_pct"),
            (self.shipping_pct, "shipping_pct"),
            (self.platform_fee_pct, "platform_fee_pct"),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(format!("{name} must be between 0 and 100"));
            }
        }
        if self.monthly_fixed_costs < 0.0 {
            return Err("monthly_fixed_costs must not be negative".to_string());
        }
        if self.fallback_sale_price <= 0.0 {
            return Err("fallback_sale_price must be positive".to_string());
        }
        Ok(())
    }
}

fn default_product_cost_pct() -> f64 {
    40.0
}

fn default_shipping_pct() -> f64 {
    5.0
}

fn default_platform_fee_pct() -> f64 {
    5.0
}

fn default_monthly_fixed_costs() -> f64 {
    2000.0
}

fn default_fallback_sale_price() -> f64 {
    100.0
}

/// Guard thresholds for the five opportunity rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Green Zone: minimum demand score (exclusive)
    #[serde(default = "default_green_min_demand")]
    pub green_min_demand: f64,
    /// Green Zone: maximum competitor strength (exclusive)
    #[serde(default = "default_green_max_competition")]
    pub green_max_competition: f64,

    /// Price Gap: minimum profit margin percentage (exclusive)
    #[serde(default = "default_price_gap_min_margin")]
    pub price_gap_min_margin: f64,
    /// Price Gap: minimum number of observed competitors
    #[serde(default = "default_price_gap_min_competitors")]
    pub price_gap_min_competitors: usize,

    /// Content Quality: minimum demand score (exclusive)
    #[serde(default = "default_content_min_demand")]
    pub content_min_demand: f64,
    /// Content Quality: average rating below which the rule fires
    #[serde(default = "default_content_max_avg_rating")]
    pub content_max_avg_rating: f64,

    /// Emerging: demand band lower bound (exclusive)
    #[serde(default = "default_emerging_demand_low")]
    pub emerging_demand_low: f64,
    /// Emerging: demand band upper bound (exclusive)
    #[serde(default = "default_emerging_demand_high")]
    pub emerging_demand_high: f64,
    /// Emerging: maximum competitor strength (exclusive)
    #[serde(default = "default_emerging_max_competition")]
    pub emerging_max_competition: f64,

    /// Niche: maximum demand score (exclusive)
    #[serde(default = "default_niche_max_demand")]
    pub niche_max_demand: f64,
    /// Niche: minimum profit margin percentage (exclusive)
    #[serde(default = "default_niche_min_margin")]
    pub niche_min_margin: f64,
    /// Niche: maximum competitor strength (exclusive)
    #[serde(default = "default_niche_max_competition")]
    pub niche_max_competition: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            green_min_demand: default_green_min_demand(),
            green_max_competition: default_green_max_competition(),
            price_gap_min_margin: default_price_gap_min_margin(),
            price_gap_min_competitors: default_price_gap_min_competitors(),
            content_min_demand: default_content_min_demand(),
            content_max_avg_rating: default_content_max_avg_rating(),
            emerging_demand_low: default_emerging_demand_low(),
            emerging_demand_high: default_emerging_demand_high(),
            emerging_max_competition: default_emerging_max_competition(),
            niche_max_demand: default_niche_max_demand(),
            niche_min_margin: default_niche_min_margin(),
            niche_max_competition: default_niche_max_competition(),
        }
    }
}

fn default_green_min_demand() -> f64 {
    60.0
}

fn default_green_max_competition() -> f64 {
    50.0
}

fn default_price_gap_min_margin() -> f64 {
    30.0
}

fn default_price_gap_min_competitors() -> usize {
    3
}

fn default_content_min_demand() -> f64 {
    50.0
}

fn default_content_max_avg_rating() -> f64 {
    3.5
}

fn default_emerging_demand_low() -> f64 {
    40.0
}

fn default_emerging_demand_high() -> f64 {
    70.0
}

fn default_emerging_max_competition() -> f64 {
    60.0
}

fn default_niche_max_demand() -> f64 {
    40.0
}

fn default_niche_min_margin() -> f64 {
    35.0
}

fn default_niche_max_competition() -> f64 {
    40.0
}

/// Top-level configuration, mirroring the `marketlens.toml` layout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarketlensConfig {
    #[serde(default)]
    pub scoring: Option<ScoreWeights>,
    #[serde(default)]
    pub costs: Option<CostModel>,
    #[serde(default)]
    pub thresholds: Option<RuleThresholds>,
}

/// Cache the configuration
static CONFIG: OnceLock<MarketlensConfig> = OnceLock::new();

/// Parse and validate config from a TOML string.
///
/// Invalid sections are replaced with defaults after a warning rather than
/// failing the whole run, so a stale config file cannot take the tool down.
pub fn parse_config(contents: &str) -> Result<MarketlensConfig> {
    let mut config: MarketlensConfig = toml::from_str(contents)
        .map_err(|e| MarketlensError::configuration(format!("failed to parse config: {e}")))?;

    if let Some(ref mut scoring) = config.scoring {
        if let Err(e) = scoring.validate() {
            eprintln!("Warning: invalid score weights: {e}. Using defaults.");
            config.scoring = Some(ScoreWeights::default());
        } else {
            scoring.normalize();
        }
    }

    if let Some(ref costs) = config.costs {
        if let Err(e) = costs.validate() {
            eprintln!("Warning: invalid cost model: {e}. Using defaults.");
            config.costs = Some(CostModel::default());
        }
    }

    Ok(config)
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MarketlensConfig> {
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Install a configuration for this process. May be called at most once,
/// before any accessor; later calls fail.
pub fn init_config(config: MarketlensConfig) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| MarketlensError::configuration("configuration already initialized"))
}

/// Get the process-wide configuration (defaults when never initialized).
pub fn get_config() -> &'static MarketlensConfig {
    CONFIG.get_or_init(MarketlensConfig::default)
}

/// Score weights in effect (defaults if not configured).
pub fn get_score_weights() -> ScoreWeights {
    get_config().scoring.unwrap_or_default()
}

/// Cost model in effect (defaults if not configured).
pub fn get_cost_model() -> CostModel {
    get_config().costs.unwrap_or_default()
}

/// Rule thresholds in effect (defaults if not configured).
pub fn get_rule_thresholds() -> RuleThresholds {
    get_config().thresholds.unwrap_or_default()
}
