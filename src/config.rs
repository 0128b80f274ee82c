//! Model and workload configuration.

use crate::error::{FootprintError, Result};
use serde::Serialize;

/// Transformer shape plus the usage numbers the scenarios need.
///
/// Attention head count is not a field: it changes
/// activation counts and arithmetic intensity, but not params or macs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelConfig {
    /// Number of transformer blocks
    pub num_modules: u64,
    /// Model width, also the embedding width
    pub hidden_size: u64,
    /// FFN intermediate width
    pub intermediate_size: u64,
    /// Vocabulary size of the input embedding table
    pub vocab_size: u64,
    /// Batch size, kept as a float so products stay in f64
    pub batch: f64,
    /// Words per message
    pub seq_len: u64,
    /// Words predicted after each typed word in the autocomplete scenario
    pub autocomplete_len: u64,
    /// Messages written worldwide per day
    pub messages_per_day: f64,
}

impl ModelConfig {
    /// Start a builder with every field unset.
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// GPT-3 175B shape applied to every message written in a day.
    pub fn gpt3() -> Self {
        let hidden_size = 12288;
        ModelConfig {
            num_modules: 96,
            hidden_size,
            intermediate_size: hidden_size * 4,
            vocab_size: 30000,
            batch: 1.0,
            // Typical social media post is around 50-70 words.
            seq_len: 50,
            autocomplete_len: 5,
            messages_per_day: 3e11,
        }
    }

    /// Returns a copy with `seq_len` overridden.
    #[inline]
    pub fn with_seq_len(&self, seq_len: u64) -> Self {
        ModelConfig { seq_len, ..*self }
    }
}

/// FFN width used when only the hidden size is given: four times wider.
pub fn default_intermediate_size(hidden_size: u64) -> Result<u64> {
    hidden_size
        .checked_mul(4)
        .ok_or_else(|| FootprintError::UnsupportedParameter {
            name: "hidden_size",
            value: hidden_size.to_string(),
            reason: "4 * hidden_size does not fit in u64",
        })
}

/// Collects fields one by one; `build` refuses to fill in anything left unset.
#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    num_modules: Option<u64>,
    hidden_size: Option<u64>,
    intermediate_size: Option<u64>,
    vocab_size: Option<u64>,
    batch: Option<f64>,
    seq_len: Option<u64>,
    autocomplete_len: Option<u64>,
    messages_per_day: Option<f64>,
}

impl ModelConfigBuilder {
    /// Number of transformer blocks.
    pub fn num_modules(mut self, v: u64) -> Self {
        self.num_modules = Some(v);
        self
    }

    /// Model width.
    pub fn hidden_size(mut self, v: u64) -> Self {
        self.hidden_size = Some(v);
        self
    }

    /// FFN intermediate width.
    pub fn intermediate_size(mut self, v: u64) -> Self {
        self.intermediate_size = Some(v);
        self
    }

    /// Vocabulary size.
    pub fn vocab_size(mut self, v: u64) -> Self {
        self.vocab_size = Some(v);
        self
    }

    /// Batch size.
    pub fn batch(mut self, v: f64) -> Self {
        self.batch = Some(v);
        self
    }

    /// Words per message.
    pub fn seq_len(mut self, v: u64) -> Self {
        self.seq_len = Some(v);
        self
    }

    /// Words predicted after each typed word.
    pub fn autocomplete_len(mut self, v: u64) -> Self {
        self.autocomplete_len = Some(v);
        self
    }

    /// Messages written worldwide per day.
    pub fn messages_per_day(mut self, v: f64) -> Self {
        self.messages_per_day = Some(v);
        self
    }

    /// Fails with the name of the first field that was never set.
    pub fn build(self) -> Result<ModelConfig> {
        Ok(ModelConfig {
            num_modules: require(self.num_modules, "num_modules")?,
            hidden_size: require(self.hidden_size, "hidden_size")?,
            intermediate_size: require(self.intermediate_size, "intermediate_size")?,
            vocab_size: require(self.vocab_size, "vocab_size")?,
            batch: require(self.batch, "batch")?,
            seq_len: require(self.seq_len, "seq_len")?,
            autocomplete_len: require(self.autocomplete_len, "autocomplete_len")?,
            messages_per_day: require(self.messages_per_day, "messages_per_day")?,
        })
    }
}

#[inline]
fn require<T>(field: Option<T>, name: &'static str) -> Result<T> {
    field.ok_or(FootprintError::MissingConfiguration(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_builder() -> ModelConfigBuilder {
        ModelConfig::builder()
            .num_modules(2)
            .hidden_size(8)
            .intermediate_size(32)
            .vocab_size(100)
            .batch(1.0)
            .seq_len(4)
            .autocomplete_len(2)
            .messages_per_day(10.0)
    }

    #[test]
    fn builds_when_every_field_is_set() {
        let config = full_builder().build().unwrap();
        assert_eq!(config.num_modules, 2);
        assert_eq!(config.intermediate_size, 32);
        assert_eq!(config.messages_per_day, 10.0);
    }

    #[test]
    fn missing_field_is_named() {
        let err = ModelConfig::builder()
            .num_modules(2)
            .hidden_size(8)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FootprintError::MissingConfiguration("intermediate_size")
        ));
        assert_eq!(
            err.to_string(),
            "Missing configuration field: intermediate_size"
        );
    }

    #[test]
    fn gpt3_preset_derives_intermediate_from_hidden() {
        let config = ModelConfig::gpt3();
        assert_eq!(config.intermediate_size, 4 * config.hidden_size);
        assert_eq!(config.seq_len, 50);
    }

    #[test]
    fn default_intermediate_is_four_times_hidden() {
        assert_eq!(default_intermediate_size(12288).unwrap(), 49152);
        assert_eq!(default_intermediate_size(0).unwrap(), 0);
    }

    #[test]
    fn default_intermediate_rejects_overflow() {
        let err = default_intermediate_size(u64::MAX / 2).unwrap_err();
        assert!(matches!(
            err,
            FootprintError::UnsupportedParameter { name: "hidden_size", .. }
        ));
        assert!(default_intermediate_size(u64::MAX / 4).is_ok());
    }

    #[test]
    fn with_seq_len_returns_a_copy() {
        let config = ModelConfig::gpt3();
        let long = config.with_seq_len(2048);
        assert_eq!(long.seq_len, 2048);
        assert_eq!(config.seq_len, 50);
        assert_eq!(long.hidden_size, config.hidden_size);
    }
}
