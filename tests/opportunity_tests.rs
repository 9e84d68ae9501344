use marketlens::core::Competitor;
use marketlens::opportunity::{find_opportunities, OpportunityMetrics, OpportunityType};

fn priced(price: f64) -> Competitor {
    Competitor::priced(price)
}

fn rated(rating: f64) -> Competitor {
    Competitor::rated(rating)
}

#[test]
fn test_green_zone_guard_boundaries() {
    // both guards are exclusive
    assert!(find_opportunities(60.0, 49.0, 0.0, &[])
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::Green));
    assert!(find_opportunities(61.0, 50.0, 0.0, &[])
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::Green));

    let report = find_opportunities(61.0, 49.0, 0.0, &[]);
    assert!(report
        .opportunities
        .iter()
        .any(|o| o.opportunity_type == OpportunityType::Green));
}

#[test]
fn test_price_gap_fires_with_wide_margin() {
    let competitors = vec![priced(100.0), priced(120.0), priced(140.0)];
    let report = find_opportunities(0.0, 100.0, 40.0, &competitors);

    let gap = report
        .opportunities
        .iter()
        .find(|o| o.opportunity_type == OpportunityType::PriceGap)
        .expect("price gap should fire at margin 40");
    // round(min(40 * 1.5, 100))
    assert_eq!(gap.potential_score.value(), 60);
}

#[test]
fn test_price_gap_quiet_when_gap_too_small() {
    // margin 20 puts the projected gap exactly at the 20% bar
    let competitors = vec![priced(100.0), priced(120.0), priced(140.0)];
    let report = find_opportunities(0.0, 100.0, 20.0, &competitors);

    assert!(report
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::PriceGap));
}

#[test]
fn test_price_gap_needs_three_competitors() {
    let competitors = vec![priced(100.0), priced(120.0)];
    let report = find_opportunities(0.0, 100.0, 40.0, &competitors);

    assert!(report
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::PriceGap));
}

#[test]
fn test_price_gap_needs_a_positive_price() {
    let competitors = vec![rated(4.0), rated(3.0), Competitor::default()];
    let report = find_opportunities(0.0, 100.0, 40.0, &competitors);

    assert!(report
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::PriceGap));
}

#[test]
fn test_price_gap_metrics_are_display_formatted() {
    let competitors = vec![priced(100.0), priced(120.0), priced(140.0)];
    let report = find_opportunities(0.0, 100.0, 40.0, &competitors);

    let gap = report
        .opportunities
        .iter()
        .find(|o| o.opportunity_type == OpportunityType::PriceGap)
        .unwrap();
    match gap.metrics.as_ref().unwrap() {
        OpportunityMetrics::PriceGap {
            average_price,
            suggested_price,
            price_gap,
            competitor_count,
        } => {
            assert_eq!(average_price, "120.00 SAR");
            assert_eq!(suggested_price, "96.00 SAR");
            assert_eq!(price_gap, "24.00 SAR");
            assert_eq!(*competitor_count, 3);
        }
        other => panic!("unexpected metrics: {other:?}"),
    }
    // the description embeds the same numbers for the reader
    assert!(gap.description.en.contains("120.00 SAR"));
    assert!(gap.description.ar.contains("96.00"));
}

#[test]
fn test_content_quality_reference_score() {
    // demand 70, ratings [2, 3]: average 2.5 < 3.5, score round(50 + 20) = 70
    let competitors = vec![rated(2.0), rated(3.0)];
    let report = find_opportunities(70.0, 100.0, 0.0, &competitors);

    let content = report
        .opportunities
        .iter()
        .find(|o| o.opportunity_type == OpportunityType::ContentQuality)
        .expect("content quality should fire");
    assert_eq!(content.potential_score.value(), 70);
    match content.metrics.as_ref().unwrap() {
        OpportunityMetrics::ContentQuality {
            average_rating,
            competitor_count,
        } => {
            assert_eq!(*average_rating, 2.5);
            assert_eq!(*competitor_count, 2);
        }
        other => panic!("unexpected metrics: {other:?}"),
    }
}

#[test]
fn test_content_quality_needs_competitors() {
    let report = find_opportunities(70.0, 100.0, 0.0, &[]);
    assert!(report
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::ContentQuality));
}

#[test]
fn test_content_quality_quiet_when_ratings_are_good() {
    let competitors = vec![rated(4.0), rated(4.5)];
    let report = find_opportunities(70.0, 100.0, 0.0, &competitors);
    assert!(report
        .opportunities
        .iter()
        .all(|o| o.opportunity_type != OpportunityType::ContentQuality));
}

#[test]
fn test_emerging_band_and_volume() {
    let report = find_opportunities(55.0, 30.0, 0.0, &[]);

    let emerging = report
        .opportunities
        .iter()
        .find(|o| o.opportunity_type == OpportunityType::Emerging)
        .expect("emerging should fire inside the band");
    match emerging.metrics.as_ref().unwrap() {
        OpportunityMetrics::Emerging {
            estimated_monthly_sales,
            competitor_count,
        } => {
            // round(55/100 * 2000)
            assert_eq!(*estimated_monthly_sales, 1100);
            assert_eq!(*competitor_count, 0);
        }
        other => panic!("unexpected metrics: {other:?}"),
    }

    // band edges are exclusive
    for demand in [40.0, 70.0] {
        let report = find_opportunities(demand, 30.0, 0.0, &[]);
        assert!(report
            .opportunities
            .iter()
            .all(|o| o.opportunity_type != OpportunityType::Emerging));
    }
}

#[test]
fn test_niche_guards_and_score() {
    let report = find_opportunities(30.0, 20.0, 50.0, &[]);
    let niche = report
        .opportunities
        .iter()
        .find(|o| o.opportunity_type == OpportunityType::Niche)
        .expect("niche should fire");
    // round(50*0.7 + 80*0.3) = round(59)
    assert_eq!(niche.potential_score.value(), 59);
    assert!(niche.metrics.is_none());

    // each guard alone disables the rule
    assert_eq!(find_opportunities(40.0, 20.0, 50.0, &[]).total_found, 0);
    assert_eq!(find_opportunities(30.0, 40.0, 50.0, &[]).total_found, 0);
    assert_eq!(find_opportunities(30.0, 20.0, 35.0, &[]).total_found, 0);
}

#[test]
fn test_scores_stay_in_bounds_for_extreme_inputs() {
    let competitors = vec![priced(1.0).with_rating(0.1), priced(1e6), priced(3.0)];
    let extremes = [
        (1000.0, -500.0, 10_000.0),
        (69.9, -100.0, 500.0),
        (39.9, -100.0, 10_000.0),
        (100.0, 0.0, 1e9),
    ];

    for (demand, strength, margin) in extremes {
        let report = find_opportunities(demand, strength, margin, &competitors);
        for opportunity in &report.opportunities {
            assert!(
                opportunity.potential_score.value() <= 100,
                "{:?} emitted {} for demand={demand}, strength={strength}, margin={margin}",
                opportunity.opportunity_type,
                opportunity.potential_score
            );
        }
    }
}

#[test]
fn test_result_sorted_descending_with_best_at_head() {
    let competitors = vec![
        priced(100.0).with_rating(2.0),
        priced(120.0).with_rating(3.0),
        priced(140.0).with_rating(2.5),
    ];
    let report = find_opportunities(65.0, 30.0, 45.0, &competitors);

    assert!(report.total_found >= 2);
    for pair in report.opportunities.windows(2) {
        assert!(pair[0].potential_score >= pair[1].potential_score);
    }
    assert_eq!(
        report.best_opportunity.as_ref().unwrap(),
        &report.opportunities[0]
    );
}

#[test]
fn test_best_opportunity_absent_for_empty_result() {
    let report = find_opportunities(50.0, 90.0, 10.0, &[]);
    assert_eq!(report.total_found, 0);
    assert!(report.best_opportunity.is_none());
}

#[test]
fn test_tally_never_counts_niche() {
    // only niche fires here
    let report = find_opportunities(30.0, 20.0, 50.0, &[]);
    assert_eq!(report.total_found, 1);
    assert_eq!(report.by_type.green, 0);
    assert_eq!(report.by_type.price_gap, 0);
    assert_eq!(report.by_type.content_quality, 0);
    assert_eq!(report.by_type.emerging, 0);
}

#[test]
fn test_empty_competitor_list_never_panics() {
    for demand in [0.0, 30.0, 55.0, 65.0, 100.0] {
        for strength in [0.0, 45.0, 80.0] {
            for margin in [0.0, 36.0, 80.0] {
                let report = find_opportunities(demand, strength, margin, &[]);
                assert_eq!(report.total_found, report.opportunities.len());
            }
        }
    }
}

#[test]
fn test_identical_inputs_serialize_identically() {
    let competitors = vec![priced(90.0).with_rating(2.0), priced(110.0), priced(130.0)];

    let first = find_opportunities(65.0, 30.0, 45.0, &competitors);
    let second = find_opportunities(65.0, 30.0, 45.0, &competitors);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn emitted_scores_always_in_bounds(
            demand in -200.0..300.0f64,
            strength in -200.0..300.0f64,
            margin in -100.0..1000.0f64,
            prices in proptest::collection::vec(0.01..10_000.0f64, 0..6),
        ) {
            let competitors: Vec<Competitor> =
                prices.into_iter().map(Competitor::priced).collect();
            let report = find_opportunities(demand, strength, margin, &competitors);
            for opportunity in &report.opportunities {
                prop_assert!(opportunity.potential_score.value() <= 100);
            }
        }

        #[test]
        fn result_always_sorted_and_consistent(
            demand in 0.0..100.0f64,
            strength in 0.0..100.0f64,
            margin in 0.0..100.0f64,
        ) {
            let report = find_opportunities(demand, strength, margin, &[]);
            prop_assert_eq!(report.total_found, report.opportunities.len());
            for pair in report.opportunities.windows(2) {
                prop_assert!(pair[0].potential_score >= pair[1].potential_score);
            }
            match report.best_opportunity {
                Some(ref best) => prop_assert_eq!(best, &report.opportunities[0]),
                None => prop_assert!(report.opportunities.is_empty()),
            }
        }
    }
}
