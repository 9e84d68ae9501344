//! Runs the rule set against one category and assembles the ranked report.

use log::debug;

use crate::core::Competitor;

use super::rules;
use super::{Opportunity, OpportunityReport, OpportunityTally};

/// Evaluates all five rules against a category's signals.
///
/// Rules run in a fixed order (green zone, price gap, content quality,
/// emerging, niche), then the detections are sorted by descending
/// potential score. The sort is stable, so equal scores keep rule
/// order. Inputs are read as-is; out-of-range signals flow through the
/// guards unchanged.
pub fn find_opportunities(
    demand_score: f64,
    competitor_strength: f64,
    profit_margin: f64,
    competitors: &[Competitor],
) -> OpportunityReport {
    let detected: Vec<Opportunity> = [
        rules::evaluate_green_zone(demand_score, competitor_strength),
        rules::evaluate_price_gap(profit_margin, competitors),
        rules::evaluate_content_quality(demand_score, competitors),
        rules::evaluate_emerging(demand_score, competitor_strength, competitors),
        rules::evaluate_niche(demand_score, competitor_strength, profit_margin),
    ]
    .into_iter()
    .flatten()
    .collect();

    let opportunities = sort_by_score(detected);
    let by_type = tally(&opportunities);
    let best_opportunity = opportunities.first().cloned();
    let total_found = opportunities.len();

    debug!("{total_found} opportunities detected");

    OpportunityReport {
        opportunities,
        total_found,
        best_opportunity,
        by_type,
    }
}

/// Stable sort, highest potential first.
fn sort_by_score(mut opportunities: Vec<Opportunity>) -> Vec<Opportunity> {
    opportunities.sort_by(|a, b| b.potential_score.cmp(&a.potential_score));
    opportunities
}

fn tally(opportunities: &[Opportunity]) -> OpportunityTally {
    let mut by_type = OpportunityTally::default();
    for opportunity in opportunities {
        by_type.record(opportunity.opportunity_type);
    }
    by_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opportunity::OpportunityType;

    fn priced(price: f64) -> Competitor {
        Competitor::priced(price)
    }

    #[test]
    fn quiet_market_yields_empty_report() {
        let report = find_opportunities(50.0, 80.0, 10.0, &[]);
        assert!(report.opportunities.is_empty());
        assert_eq!(report.total_found, 0);
        assert!(report.best_opportunity.is_none());
        assert_eq!(report.by_type, OpportunityTally::default());
    }

    #[test]
    fn hot_category_fires_multiple_rules() {
        // demand 65, competition 30, margin 45: green zone, price gap,
        // content quality and emerging all fire
        let competitors = vec![
            priced(100.0).with_rating(2.0),
            priced(120.0).with_rating(3.0),
            priced(140.0).with_rating(2.5),
        ];
        let report = find_opportunities(65.0, 30.0, 45.0, &competitors);

        assert_eq!(report.total_found, 4);
        assert_eq!(report.by_type.green, 1);
        assert_eq!(report.by_type.price_gap, 1);
        assert_eq!(report.by_type.content_quality, 1);
        assert_eq!(report.by_type.emerging, 1);
    }

    #[test]
    fn opportunities_are_ranked_descending() {
        let competitors = vec![
            priced(100.0).with_rating(2.0),
            priced(120.0).with_rating(3.0),
            priced(140.0).with_rating(2.5),
        ];
        let report = find_opportunities(65.0, 30.0, 45.0, &competitors);

        let scores: Vec<u8> = report
            .opportunities
            .iter()
            .map(|o| o.potential_score.value())
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn best_opportunity_matches_the_head() {
        let report = find_opportunities(80.0, 20.0, 10.0, &[]);
        let best = report.best_opportunity.as_ref().unwrap();
        assert_eq!(best, &report.opportunities[0]);
        assert_eq!(best.opportunity_type, OpportunityType::Green);
    }

    #[test]
    fn ties_keep_rule_order() {
        // green zone: 75*0.6 + 75*0.4 = 75; price gap: min(50*1.5, 100) = 75
        // ratings of 4.0 keep the content rule quiet
        let competitors = vec![
            priced(100.0).with_rating(4.0),
            priced(120.0).with_rating(4.0),
            priced(140.0).with_rating(4.0),
        ];
        let report = find_opportunities(75.0, 25.0, 50.0, &competitors);

        assert_eq!(report.total_found, 2);
        assert_eq!(
            report.opportunities[0].potential_score,
            report.opportunities[1].potential_score
        );
        assert_eq!(report.opportunities[0].opportunity_type, OpportunityType::Green);
        assert_eq!(
            report.opportunities[1].opportunity_type,
            OpportunityType::PriceGap
        );
    }

    #[test]
    fn niche_appears_in_list_but_not_tally() {
        let report = find_opportunities(30.0, 30.0, 40.0, &[]);
        assert_eq!(report.total_found, 1);
        assert_eq!(
            report.opportunities[0].opportunity_type,
            OpportunityType::Niche
        );
        assert_eq!(report.by_type, OpportunityTally::default());
    }

    #[test]
    fn finder_is_deterministic() {
        let competitors = vec![priced(90.0), priced(110.0), priced(130.0)];
        let first = find_opportunities(65.0, 30.0, 45.0, &competitors);
        let second = find_opportunities(65.0, 30.0, 45.0, &competitors);
        assert_eq!(first, second);
    }
}
