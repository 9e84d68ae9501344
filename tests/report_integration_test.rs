use marketlens::batch;
use marketlens::core::{CategoryInput, Competitor, MarketReport, MarketStats};
use marketlens::io::output::{JsonWriter, MarkdownWriter, OutputWriter, TerminalWriter};
use marketlens::locale::Language;

fn electronics() -> CategoryInput {
    CategoryInput {
        name: Some("electronics".to_string()),
        demand_score: 65.0,
        competitor_strength: 30.0,
        profit_margin: 45.0,
        competitors: vec![
            Competitor {
                price: Some(100.0),
                rating: 2.0,
            },
            Competitor {
                price: Some(120.0),
                rating: 3.0,
            },
            Competitor {
                price: Some(140.0),
                rating: 2.5,
            },
        ],
        market_stats: Some(MarketStats {
            average_price: Some(110.0),
        }),
    }
}

#[test]
fn test_assemble_merges_both_engines() {
    let report = MarketReport::assemble(&electronics(), Language::En).unwrap();

    assert_eq!(report.category.as_deref(), Some("electronics"));
    assert_eq!(report.lang, Language::En);
    assert!(report.opportunities.total_found >= 3);
    assert_eq!(report.profitability.average_sale_price, 110);
}

#[test]
fn test_assemble_surfaces_estimator_faults() {
    let mut input = electronics();
    input.demand_score = 0.0;

    assert!(MarketReport::assemble(&input, Language::En).is_err());
}

#[test]
fn test_report_serializes_with_stable_shape() {
    let report = MarketReport::assemble(&electronics(), Language::Ar).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["lang"], "ar");
    assert_eq!(value["category"], "electronics");

    let opportunities = value["opportunities"]["opportunities"]
        .as_array()
        .unwrap();
    assert!(!opportunities.is_empty());
    for opportunity in opportunities {
        let tag = opportunity["type"].as_str().unwrap();
        assert!(
            ["green", "priceGap", "contentQuality", "emerging", "niche"].contains(&tag),
            "unexpected type tag {tag}"
        );
        let score = opportunity["potential_score"].as_u64().unwrap();
        assert!(score <= 100);
        assert!(opportunity["title"]["en"].is_string());
        assert!(opportunity["title"]["ar"].is_string());
    }

    let by_type = &value["opportunities"]["by_type"];
    for key in ["green", "price_gap", "content_quality", "emerging"] {
        assert!(by_type[key].is_u64(), "missing tally key {key}");
    }
    assert!(by_type.get("niche").is_none());

    let price_gap = opportunities
        .iter()
        .find(|o| o["type"] == "priceGap")
        .expect("price gap fires for this category");
    assert_eq!(price_gap["metrics"]["kind"], "priceGap");
    assert!(price_gap["metrics"]["average_price"]
        .as_str()
        .unwrap()
        .ends_with("SAR"));

    assert!(value["profitability"]["revenue"]["estimated_monthly_revenue"]
        .as_str()
        .unwrap()
        .starts_with("SAR "));
}

#[test]
fn test_json_writer_round_trips() {
    let report = MarketReport::assemble(&electronics(), Language::En).unwrap();

    let mut buffer = Vec::new();
    JsonWriter::new(&mut buffer).write_report(&report).unwrap();

    let parsed: MarketReport = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed.opportunities, report.opportunities);
    assert_eq!(parsed.profitability, report.profitability);
}

#[test]
fn test_markdown_writer_emits_sections() {
    let report = MarketReport::assemble(&electronics(), Language::En).unwrap();

    let mut buffer = Vec::new();
    MarkdownWriter::new(&mut buffer)
        .write_report(&report)
        .unwrap();
    let markdown = String::from_utf8(buffer).unwrap();

    assert!(markdown.contains("# Market Analysis Report"));
    assert!(markdown.contains("Category: electronics"));
    assert!(markdown.contains("## Summary"));
    assert!(markdown.contains("## Opportunities"));
    assert!(markdown.contains("### Best Opportunity"));
    assert!(markdown.contains("## Profitability"));
    assert!(markdown.contains("### Scenarios"));
    assert!(markdown.contains("SAR"));
}

#[test]
fn test_markdown_writer_selects_language() {
    let report = MarketReport::assemble(&electronics(), Language::Ar).unwrap();

    let mut buffer = Vec::new();
    MarkdownWriter::new(&mut buffer)
        .write_report(&report)
        .unwrap();
    let markdown = String::from_utf8(buffer).unwrap();

    // opportunity titles come out in the report language
    assert!(markdown.contains("فرصة ذهبية"));
}

#[test]
fn test_terminal_writer_smoke() {
    let report = MarketReport::assemble(&electronics(), Language::En).unwrap();
    TerminalWriter::new().write_report(&report).unwrap();
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let mut degenerate = electronics();
    degenerate.name = Some("dead".to_string());
    degenerate.demand_score = 0.0;

    let mut third = electronics();
    third.name = Some("books".to_string());

    let inputs = vec![electronics(), degenerate, third];
    let results = batch::analyze_categories(&inputs, Language::En);

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().category.as_deref(),
        Some("electronics")
    );
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap().category.as_deref(),
        Some("books")
    );
}

#[test]
fn test_category_input_accepts_sparse_json() {
    let input: CategoryInput = serde_json::from_str(
        r#"{
            "name": "sparse",
            "demand_score": 72,
            "competitor_strength": 35,
            "profit_margin": 40,
            "competitors": [{"price": 50}, {"rating": 4.2}, {}]
        }"#,
    )
    .unwrap();

    let report = MarketReport::assemble(&input, Language::En).unwrap();
    assert!(report.opportunities.total_found >= 1);
    // (50 + 0 + 0) / 3 rounds to 17
    assert_eq!(report.profitability.average_sale_price, 17);
}
