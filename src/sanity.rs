//! Compare the cost model against the parameter count published for GPT-3.

use crate::config::ModelConfig;
use crate::model::model_cost;
use crate::ops::CostResult;
use serde::Serialize;
use std::fmt;

/// Parameter count reported in the GPT-3 paper.
pub const GPT3_REFERENCE_PARAMS: f64 = 175e9;

/// Context length used for the comparison.
pub const GPT3_SEQ_LEN: u64 = 2048;

/// Accepted relative deviation from the reference.
pub const SANITY_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SanityReport {
    pub cost: CostResult,
    pub reference_params: f64,
    pub relative_error: f64,
    pub tolerance: f64,
    pub within_tolerance: bool,
}

/// Run the model at GPT-3's context length and check its parameter count.
pub fn check_against_gpt3(config: &ModelConfig) -> SanityReport {
    let cost = model_cost(&config.with_seq_len(GPT3_SEQ_LEN));
    let relative_error = (cost.params - GPT3_REFERENCE_PARAMS).abs() / GPT3_REFERENCE_PARAMS;
    SanityReport {
        cost,
        reference_params: GPT3_REFERENCE_PARAMS,
        relative_error,
        tolerance: SANITY_TOLERANCE,
        within_tolerance: relative_error <= SANITY_TOLERANCE,
    }
}

impl fmt::Display for SanityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (reference params: {:e}, relative error: {:.2}%, {})",
            self.cost,
            self.reference_params,
            self.relative_error * 100.0,
            if self.within_tolerance { "ok" } else { "OUT OF TOLERANCE" }
        )
    }
}
