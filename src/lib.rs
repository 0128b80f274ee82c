//! Back-of-the-envelope compute and carbon estimates for transformer LMs
//!
//! Counts multiply-accumulates and parameters of a GPT/BERT-style model,
//! prices one-shot classification and typing autocomplete over a day of
//! worldwide messages, and turns the result into accelerators, energy and
//! CO2e.

pub mod config;
pub mod error;
pub mod impact;
pub mod model;
pub mod ops;
pub mod sanity;
pub mod scenario;

pub use config::{ModelConfig, ModelConfigBuilder, default_intermediate_size};
pub use error::{FootprintError, Result};
pub use impact::{FuelSource, ImpactResult, estimate_impact, worldwide_kwh_per_day};
pub use model::{block_cost, model_cost};
pub use ops::{CostResult, embeddings_cost, positionwise_fc_cost, qk_cost, qkv_cost};
pub use sanity::{SanityReport, check_against_gpt3};
pub use scenario::{
    AutocompleteCost, Scenario, autocomplete_cost, classification_cost, daily_macs,
};
