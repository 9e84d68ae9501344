// Export modules for library usage
pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod locale;
pub mod opportunity;
pub mod profitability;

// Re-export commonly used types
pub use crate::core::{
    score::Score, CategoryInput, Competitor, MarketReport, MarketStats,
};

pub use crate::errors::{DerivedQuantity, MarketlensError, Result};

pub use crate::locale::{Bilingual, Language};

pub use crate::opportunity::{
    find_opportunities, Opportunity, OpportunityMetrics, OpportunityReport, OpportunityTally,
    OpportunityType,
};

pub use crate::profitability::{
    calculate_profitability, BreakEven, CostBreakdown, DemandLevel, PriceSensitivity,
    ProfitabilityReport, RevenueBasis, RevenueProjection, Scenario, Scenarios,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
