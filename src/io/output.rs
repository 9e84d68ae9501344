use crate::core::MarketReport;
use crate::formatting::group_thousands;
use crate::opportunity::Opportunity;
use colored::*;
use serde_json;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &MarketReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_opportunities(report)?;
        self.write_profitability(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Market Analysis Report")?;
        writeln!(self.writer)?;
        if let Some(category) = &report.category {
            writeln!(self.writer, "Category: {category}")?;
        }
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Language: {}", report.lang)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        let profitability = &report.profitability;

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value | Status |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;

        self.write_summary_row(
            "Opportunities Found",
            &report.opportunities.total_found.to_string(),
            "-",
        )?;
        if let Some(best) = &report.opportunities.best_opportunity {
            self.write_summary_row(
                "Best Opportunity Score",
                &best.potential_score.to_string(),
                score_status(best.potential_score.value()),
            )?;
        }
        self.write_summary_row(
            "Profitability Score",
            &profitability.profitability_score.to_string(),
            score_status(profitability.profitability_score.value()),
        )?;
        self.write_summary_row(
            "Profit Margin",
            &format!("{}%", profitability.margin_percentage),
            margin_status(profitability.margin_percentage),
        )?;
        self.write_summary_row(
            "Break-even Units",
            &profitability.break_even.units.to_string(),
            "-",
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_row(&mut self, metric: &str, value: &str, status: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} | {status} |")?;
        Ok(())
    }

    fn write_opportunities(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        let opportunities = &report.opportunities.opportunities;
        if opportunities.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Opportunities")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Type | Score | Title |")?;
        writeln!(self.writer, "|---|------|-------|-------|")?;
        for (i, opportunity) in opportunities.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                i + 1,
                opportunity.opportunity_type,
                opportunity.potential_score,
                opportunity.title.get(report.lang)
            )?;
        }
        writeln!(self.writer)?;

        if let Some(best) = &report.opportunities.best_opportunity {
            writeln!(self.writer, "### Best Opportunity")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", best.description.get(report.lang))?;
            writeln!(self.writer)?;
            for item in &best.action_items {
                writeln!(self.writer, "- [ ] {}", item.get(report.lang))?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_profitability(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        let profitability = &report.profitability;

        writeln!(self.writer, "## Profitability")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Average Sale Price | {} SAR |",
            group_thousands(profitability.average_sale_price)
        )?;
        writeln!(
            self.writer,
            "| Product Cost | {} SAR |",
            group_thousands(profitability.cost_breakdown.product_cost)
        )?;
        writeln!(
            self.writer,
            "| Shipping | {} SAR |",
            group_thousands(profitability.cost_breakdown.shipping)
        )?;
        writeln!(
            self.writer,
            "| Platform Fees | {} SAR |",
            group_thousands(profitability.cost_breakdown.platform_fees)
        )?;
        writeln!(
            self.writer,
            "| Profit per Unit | {} SAR |",
            group_thousands(profitability.profit_per_unit)
        )?;
        writeln!(
            self.writer,
            "| Margin | {}% |",
            profitability.margin_percentage
        )?;
        writeln!(
            self.writer,
            "| Price Sensitivity | {} |",
            profitability.price_sensitivity
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "### Break-even")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} units over {} months, requiring {} SAR of capital.",
            profitability.break_even.units,
            profitability.break_even.months,
            group_thousands(profitability.break_even.capital_required)
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "### Revenue Projection")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} units per month, {} ({})",
            profitability.revenue.estimated_monthly_units,
            profitability.revenue.estimated_monthly_revenue,
            profitability.revenue.basis.demand_level
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "> {}", profitability.revenue.basis.note)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "### Scenarios")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Scenario | Units | Monthly Profit |")?;
        writeln!(self.writer, "|----------|-------|----------------|")?;
        for (name, scenario) in [
            ("Conservative", &profitability.scenarios.conservative),
            ("Moderate", &profitability.scenarios.moderate),
            ("Optimistic", &profitability.scenarios.optimistic),
        ] {
            writeln!(
                self.writer,
                "| {} | {} | {} SAR |",
                name,
                scenario.units,
                group_thousands(scenario.monthly_profit)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &MarketReport) -> anyhow::Result<()> {
        print_header(report);
        print_opportunities(report);
        print_profitability(report);
        print_scenarios(report);
        print_outlook(report);
        Ok(())
    }
}

fn print_header(report: &MarketReport) {
    match &report.category {
        Some(category) => {
            println!("{} {}", "Market Analysis:".bold().blue(), category.bold())
        }
        None => println!("{}", "Market Analysis Report".bold().blue()),
    }
    println!("{}", "======================".blue());
    println!();
}

fn print_opportunities(report: &MarketReport) {
    let opportunities = &report.opportunities.opportunities;
    if opportunities.is_empty() {
        println!("{} No opportunities detected", "📈".bold());
        println!();
        return;
    }

    println!(
        "{} Opportunities ({}):",
        "📈".bold(),
        report.opportunities.total_found
    );
    opportunities.iter().enumerate().for_each(|(i, opportunity)| {
        println!(
            "  {}. [{}] {} - {}",
            i + 1,
            score_display(opportunity.potential_score.value()),
            opportunity.opportunity_type,
            opportunity.title.get(report.lang)
        );
    });

    if let Some(best) = &report.opportunities.best_opportunity {
        print_best_opportunity(report, best);
    }
    println!();
}

fn print_best_opportunity(report: &MarketReport, best: &Opportunity) {
    println!();
    println!("  {} {}", "Best:".green().bold(), best.description.get(report.lang));
    for item in &best.action_items {
        println!("    - {}", item.get(report.lang));
    }
}

fn print_profitability(report: &MarketReport) {
    let profitability = &report.profitability;

    println!("{} Profitability:", "💰".bold());
    println!(
        "  Average sale price: {} SAR",
        group_thousands(profitability.average_sale_price)
    );
    println!(
        "  Profit per unit: {} SAR ({}% margin)",
        group_thousands(profitability.profit_per_unit),
        margin_display(profitability.margin_percentage)
    );
    println!("  Price sensitivity: {}", profitability.price_sensitivity);
    println!(
        "  Break-even: {} units in {} months ({} SAR capital)",
        profitability.break_even.units,
        profitability.break_even.months,
        group_thousands(profitability.break_even.capital_required)
    );
    println!(
        "  Revenue estimate: {} units/month, {}",
        profitability.revenue.estimated_monthly_units,
        profitability.revenue.estimated_monthly_revenue
    );
    println!(
        "  Profitability score: {}",
        score_display(profitability.profitability_score.value())
    );
    println!();
}

fn print_scenarios(report: &MarketReport) {
    let scenarios = &report.profitability.scenarios;

    println!("{} Scenarios:", "📊".bold());
    for (name, scenario) in [
        ("Conservative", &scenarios.conservative),
        ("Moderate", &scenarios.moderate),
        ("Optimistic", &scenarios.optimistic),
    ] {
        let profit = if scenario.monthly_profit < 0 {
            group_thousands(scenario.monthly_profit).red().to_string()
        } else {
            group_thousands(scenario.monthly_profit)
        };
        println!("  {}: {} units, {} SAR/month", name, scenario.units, profit);
    }
    println!();
}

fn print_outlook(report: &MarketReport) {
    let promising = is_promising(report);
    let (symbol, status, message) = if promising {
        (
            "✓".green(),
            "PROMISING".green().bold(),
            "strong opportunity or profitability signals",
        )
    } else {
        (
            "✗".red(),
            "WEAK".red().bold(),
            "no strong signal in this category",
        )
    };

    println!("{symbol} Outlook: {status} ({message})");
}

fn is_promising(report: &MarketReport) -> bool {
    let strong_opportunity = report
        .opportunities
        .best_opportunity
        .as_ref()
        .map(|best| best.potential_score.value() >= 70)
        .unwrap_or(false);

    strong_opportunity || report.profitability.profitability_score.value() >= 50
}

fn score_display(score: u8) -> String {
    match score {
        s if s >= 70 => s.to_string().green().to_string(),
        s if s >= 40 => s.to_string().yellow().to_string(),
        s => s.to_string().red().to_string(),
    }
}

fn margin_display(margin: i64) -> String {
    match margin {
        m if m >= 30 => m.to_string().green().to_string(),
        m if m >= 15 => m.to_string().yellow().to_string(),
        m => m.to_string().red().to_string(),
    }
}

fn score_status(score: u8) -> &'static str {
    match score {
        s if s >= 70 => "✅ Strong",
        s if s >= 40 => "⚠️ Moderate",
        _ => "❌ Weak",
    }
}

fn margin_status(margin: i64) -> &'static str {
    match margin {
        m if m >= 30 => "✅ Healthy",
        m if m >= 15 => "⚠️ Thin",
        _ => "❌ Critical",
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}
