//! The profitability estimator: sale price through scenarios, in order.

use log::debug;

use crate::config::{self, CostModel};
use crate::core::score::Score;
use crate::core::{Competitor, MarketStats};
use crate::errors::{DerivedQuantity, MarketlensError, Result};
use crate::formatting::{format_revenue, round_to_unit};
use crate::locale::Language;

use super::{
    BreakEven, CostBreakdown, DemandLevel, PriceSensitivity, ProfitabilityReport, RevenueBasis,
    RevenueProjection, Scenario, Scenarios,
};

/// Monthly unit volume assumed at a demand score of 100.
const REVENUE_UNITS_BASIS: f64 = 75.0;
/// Floor for the monthly unit estimate.
const MIN_MONTHLY_UNITS: f64 = 5.0;
/// Months of demand runway the break-even horizon is measured against.
const BREAK_EVEN_RUNWAY: f64 = 2.0;
/// Margin percentage that earns the full margin component of the score.
const FULL_MARGIN_PCT: f64 = 40.0;
/// Score pressure added per competitor, and its cap.
const COMPETITION_PRESSURE_STEP: f64 = 5.0;
const COMPETITION_PRESSURE_CAP: f64 = 50.0;

/// Derive the full profitability forecast for one category.
///
/// Pure and deterministic. Degenerate inputs (no per-unit profit, zero
/// demand) surface as [`MarketlensError::DegenerateInput`] before any
/// dependent division runs, so the report can never carry a non-finite
/// number. An empty competitor list is not an error; the configured
/// fallback sale price takes over.
pub fn calculate_profitability(
    market_stats: Option<&MarketStats>,
    competitors: &[Competitor],
    demand_score: f64,
    lang: Language,
) -> Result<ProfitabilityReport> {
    let costs = config::get_cost_model();

    let sale_price = average_sale_price(market_stats, competitors, &costs);

    let product_cost = sale_price * costs.product_cost_pct / 100.0;
    let shipping = sale_price * costs.shipping_pct / 100.0;
    let platform_fees = sale_price * costs.platform_fee_pct / 100.0;
    let unit_cost = product_cost + shipping + platform_fees;
    let profit_per_unit = sale_price - unit_cost;

    if profit_per_unit <= 0.0 {
        return Err(MarketlensError::degenerate(
            DerivedQuantity::BreakEvenUnits,
            "profit per unit is zero or negative",
        ));
    }
    if demand_score == 0.0 {
        return Err(MarketlensError::degenerate(
            DerivedQuantity::MonthsToBreakEven,
            "demand score is zero",
        ));
    }

    let margin_percentage = profit_per_unit / sale_price * 100.0;

    let sensitivity = PriceSensitivity::from_normalized_deviation(normalized_price_deviation(
        competitors,
        sale_price,
    ));

    let break_even_units = (costs.monthly_fixed_costs / profit_per_unit).ceil();
    let months_to_break_even = (BREAK_EVEN_RUNWAY / (demand_score / 100.0)).ceil().max(1.0);
    let capital_required = break_even_units * unit_cost + costs.monthly_fixed_costs;

    let estimated_units = (demand_score / 100.0 * REVENUE_UNITS_BASIS)
        .round()
        .max(MIN_MONTHLY_UNITS);
    let estimated_revenue = estimated_units * sale_price;

    debug!(
        "profitability: sale={sale_price:.2}, profit={profit_per_unit:.2}, \
         margin={margin_percentage:.1}%, break_even_units={break_even_units}"
    );

    Ok(ProfitabilityReport {
        average_sale_price: round_to_unit(sale_price),
        cost_breakdown: CostBreakdown {
            product_cost: round_to_unit(product_cost),
            shipping: round_to_unit(shipping),
            platform_fees: round_to_unit(platform_fees),
        },
        profit_per_unit: round_to_unit(profit_per_unit),
        margin_percentage: round_to_unit(margin_percentage),
        price_sensitivity: sensitivity.label(lang).to_string(),
        break_even: BreakEven {
            units: break_even_units as u64,
            months: months_to_break_even as u64,
            capital_required: round_to_unit(capital_required),
        },
        revenue: RevenueProjection {
            estimated_monthly_units: estimated_units as u64,
            estimated_monthly_revenue: format_revenue(estimated_revenue),
            basis: RevenueBasis {
                demand_level: DemandLevel::from_score(demand_score).label(lang).to_string(),
                estimated_monthly_units: estimated_units as u64,
                note: basis_note(demand_score, lang),
            },
        },
        profitability_score: profitability_score(margin_percentage, demand_score, competitors.len()),
        scenarios: build_scenarios(estimated_units, break_even_units, profit_per_unit),
    })
}

/// Explicit override, else the competitor mean with missing prices counted
/// as zero in the sum, else the configured fallback.
fn average_sale_price(
    market_stats: Option<&MarketStats>,
    competitors: &[Competitor],
    costs: &CostModel,
) -> f64 {
    if let Some(price) = market_stats.and_then(|stats| stats.average_price) {
        return price;
    }
    if competitors.is_empty() {
        return costs.fallback_sale_price;
    }
    let total: f64 = competitors.iter().map(|c| c.price.unwrap_or(0.0)).sum();
    total / competitors.len() as f64
}

/// Population standard deviation of positive competitor prices, normalized
/// by the average sale price. `None` when fewer than two prices qualify.
fn normalized_price_deviation(competitors: &[Competitor], sale_price: f64) -> Option<f64> {
    let prices: Vec<f64> = competitors
        .iter()
        .filter_map(|c| c.price)
        .filter(|p| *p > 0.0)
        .collect();

    if prices.len() < 2 {
        return None;
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / prices.len() as f64;
    Some(variance.sqrt() / sale_price)
}

/// Weighted blend of margin, raw demand and competitor pressure.
fn profitability_score(margin_percentage: f64, demand_score: f64, competitor_count: usize) -> Score {
    let weights = config::get_score_weights();
    let margin_component = (margin_percentage / FULL_MARGIN_PCT * 100.0).min(100.0);
    let competition_component = 100.0
        - (competitor_count as f64 * COMPETITION_PRESSURE_STEP).min(COMPETITION_PRESSURE_CAP);

    Score::from_raw(
        margin_component * weights.margin
            + demand_score * weights.demand
            + competition_component * weights.competition,
    )
}

/// Profit at half, full and one-and-a-half times the estimated volume.
/// Profits are computed in full precision and rounded at output; only the
/// conservative level is floored at zero.
fn build_scenarios(estimated_units: f64, break_even_units: f64, profit_per_unit: f64) -> Scenarios {
    let conservative_units = estimated_units * 0.5;
    let optimistic_units = estimated_units * 1.5;

    Scenarios {
        conservative: Scenario {
            units: conservative_units.round() as u64,
            monthly_profit: round_to_unit(
                ((conservative_units - break_even_units) * profit_per_unit).max(0.0),
            ),
        },
        moderate: Scenario {
            units: estimated_units as u64,
            monthly_profit: round_to_unit(estimated_units * profit_per_unit),
        },
        optimistic: Scenario {
            units: optimistic_units.round() as u64,
            monthly_profit: round_to_unit((optimistic_units - break_even_units) * profit_per_unit),
        },
    }
}

fn basis_note(demand_score: f64, lang: Language) -> String {
    match lang {
        Language::En => format!(
            "Estimated from a demand score of {demand_score:.0} out of 100, \
             at 75 monthly sales per 100 points with a floor of 5."
        ),
        Language::Ar => format!(
            "تقدير مبني على مؤشر طلب {demand_score:.0} من 100، بواقع 75 عملية بيع شهرية لكل 100 نقطة وبحد أدنى 5 مبيعات.",
        ),
    }
}
