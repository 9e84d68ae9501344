//! Parallel scoring of many categories.
//!
//! Both engines are pure, so a batch is embarrassingly parallel; rayon
//! splits the work and the collected output keeps input order.

use rayon::prelude::*;

use crate::core::{CategoryInput, MarketReport};
use crate::errors::Result;
use crate::locale::Language;

/// Score every category in the batch, in parallel.
///
/// Each category yields its own result, so one degenerate input does not
/// take down the rest of the batch. The output vector is index-aligned
/// with the input slice.
pub fn analyze_categories(inputs: &[CategoryInput], lang: Language) -> Vec<Result<MarketReport>> {
    inputs
        .par_iter()
        .map(|input| MarketReport::assemble(input, lang))
        .collect()
}
