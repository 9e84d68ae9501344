use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "marketlens")]
#[command(about = "Market opportunity and profitability analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze categories from a JSON input file
    Analyze {
        /// Input JSON: one category object or an array of them
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language for profitability labels
        #[arg(short, long, value_enum, default_value = "en")]
        lang: Lang,

        /// Show only the top N opportunities per category
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Configuration file (defaults to marketlens.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    En,
    Ar,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<Lang> for crate::locale::Language {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::En => crate::locale::Language::En,
            Lang::Ar => crate::locale::Language::Ar,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
