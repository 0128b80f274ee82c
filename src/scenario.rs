//! Usage scenarios built on top of the forward-pass cost.

use crate::config::ModelConfig;
use crate::model::model_cost;
use crate::ops::CostResult;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Running cost of the autocomplete scenario. Params are not meaningful here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AutocompleteCost {
    pub macs: f64,
}

impl fmt::Display for AutocompleteCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "macs: {:e}", self.macs)
    }
}

/// One forward pass per message, as a BERT-style classifier would do.
pub fn classification_cost(config: &ModelConfig) -> CostResult {
    model_cost(config)
}

/// Cost of suggesting the next words while a user types a message.
///
/// The user types `seq_len` words one at a time without edits. After every
/// word except the last, the model rolls out `autocomplete_len` predictions,
/// each one a full forward pass over the text so far plus the words already
/// predicted.
pub fn autocomplete_cost(config: &ModelConfig) -> AutocompleteCost {
    let mut total = AutocompleteCost::default();
    for user_seq_len in 1..config.seq_len {
        for rollout in 0..config.autocomplete_len {
            let step = config.with_seq_len(user_seq_len + rollout);
            let cost = model_cost(&step);
            trace!(user_seq_len, rollout, macs = cost.macs, "rollout");
            total.macs += cost.macs;
        }
    }

    debug!(
        passes = config.seq_len.saturating_sub(1) * config.autocomplete_len,
        macs = total.macs,
        "autocomplete cost"
    );
    total
}

/// Which usage pattern to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Classification,
    Autocomplete,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Classification, Scenario::Autocomplete];

    /// Macs spent on a single message.
    pub fn macs_per_message(self, config: &ModelConfig) -> f64 {
        match self {
            Scenario::Classification => classification_cost(config).macs,
            Scenario::Autocomplete => autocomplete_cost(config).macs,
        }
    }

}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

/// Scale a per-message mac count to one day of worldwide messages.
#[inline]
pub fn daily_macs(macs_per_message: f64, config: &ModelConfig) -> f64 {
    macs_per_message * config.messages_per_day
}
