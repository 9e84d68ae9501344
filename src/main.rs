use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use marketlens::cli::{Cli, Commands};
use marketlens::core::{CategoryInput, MarketReport};
use marketlens::io::output::{MarkdownWriter, OutputFormat, OutputWriter};
use marketlens::locale::Language;
use marketlens::{batch, config, io};

const DEFAULT_CONFIG_FILE: &str = "marketlens.toml";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            output,
            lang,
            top,
            config,
        } => handle_analyze(AnalyzeOptions {
            input,
            format: format.into(),
            output,
            lang: lang.into(),
            top,
            config,
        }),
        Commands::Init { force } => handle_init(force),
    }
}

struct AnalyzeOptions {
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    lang: Language,
    top: Option<usize>,
    config: Option<PathBuf>,
}

fn handle_analyze(options: AnalyzeOptions) -> Result<()> {
    load_configuration(options.config.as_deref())?;

    let contents = io::read_file(&options.input)
        .with_context(|| format!("failed to read {}", options.input.display()))?;
    let inputs = parse_inputs(&contents)?;
    info!("analyzing {} categories", inputs.len());

    let results = batch::analyze_categories(&inputs, options.lang);

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(mut report) => {
                if let Some(n) = options.top {
                    report.opportunities.opportunities.truncate(n);
                }
                reports.push(report);
            }
            Err(e) => {
                failures += 1;
                let name = input.name.as_deref().unwrap_or("unnamed category");
                eprintln!("Warning: skipping {name}: {e}");
            }
        }
    }

    if reports.is_empty() {
        anyhow::bail!("all {failures} categories failed to analyze");
    }

    write_reports(&reports, options.format, options.output.as_deref())
}

/// A single category object and an array of them are both accepted.
fn parse_inputs(contents: &str) -> Result<Vec<CategoryInput>> {
    if let Ok(single) = serde_json::from_str::<CategoryInput>(contents) {
        return Ok(vec![single]);
    }
    let many: Vec<CategoryInput> = serde_json::from_str(contents)
        .context("input must be a category object or an array of them")?;
    Ok(many)
}

fn load_configuration(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => config::load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if !io::file_exists(default_path) {
                return Ok(());
            }
            config::load_config(default_path)?
        }
    };
    config::init_config(config)?;
    Ok(())
}

fn write_reports(reports: &[MarketReport], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let content = render_to_string(reports, format)?;
            io::write_file(path, &content)?;
            info!("report written to {}", path.display());
        }
        None => match format {
            OutputFormat::Json => println!("{}", render_json(reports)?),
            _ => {
                let mut writer = io::create_writer(format);
                for report in reports {
                    writer.write_report(report)?;
                }
            }
        },
    }
    Ok(())
}

fn render_to_string(reports: &[MarketReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(reports),
        OutputFormat::Markdown => {
            let mut buffer = Vec::new();
            {
                let mut writer = MarkdownWriter::new(&mut buffer);
                for report in reports {
                    writer.write_report(report)?;
                }
            }
            Ok(String::from_utf8(buffer)?)
        }
        OutputFormat::Terminal => {
            anyhow::bail!("terminal format cannot be written to a file; use json or markdown")
        }
    }
}

/// One category stays a single JSON object; a batch serializes as an array.
fn render_json(reports: &[MarketReport]) -> Result<String> {
    let json = match reports {
        [only] => serde_json::to_string_pretty(only)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}

fn handle_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Marketlens Configuration
# Every value below matches the built-in default; remove anything you do
# not override.

[scoring]
# Profitability score blend; the three weights must sum to 1.0
margin = 0.4
demand = 0.35
competition = 0.25

[costs]
# Percentages of the sale price
product_cost_pct = 40.0
shipping_pct = 5.0
platform_fee_pct = 5.0
# Fixed monthly overhead and the sale price assumed for empty markets (SAR)
monthly_fixed_costs = 2000.0
fallback_sale_price = 100.0

[thresholds]
green_min_demand = 60.0
green_max_competition = 50.0
price_gap_min_margin = 30.0
price_gap_min_competitors = 3
content_min_demand = 50.0
content_max_avg_rating = 3.5
emerging_demand_low = 40.0
emerging_demand_high = 70.0
emerging_max_competition = 60.0
niche_max_demand = 40.0
niche_min_margin = 35.0
niche_max_competition = 40.0
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created marketlens.toml configuration file");

    Ok(())
}
