//! Whole-model cost of one forward pass.

use crate::config::ModelConfig;
use crate::ops::{CostResult, embeddings_cost, positionwise_fc_cost, qk_cost, qkv_cost};
use tracing::debug;

/// Cost of one forward pass over `config.seq_len` tokens.
///
/// The final classifier / LM head is not counted; it is small next to the
/// transformer blocks.
pub fn model_cost(config: &ModelConfig) -> CostResult {
    let embeddings = embeddings_cost(config.hidden_size as f64, config.vocab_size as f64);
    let block = block_cost(config);
    let total = embeddings + block * config.num_modules as f64;

    debug!(
        seq_len = config.seq_len,
        num_modules = config.num_modules,
        macs = total.macs,
        params = total.params,
        "model cost"
    );
    total
}

/// Cost of a single transformer block.
pub fn block_cost(config: &ModelConfig) -> CostResult {
    attention_cost(config) + mlp_cost(config)
}

/// Q, K, V projections plus the two attention matrix products.
fn attention_cost(config: &ModelConfig) -> CostResult {
    let hidden = config.hidden_size as f64;
    let seq_len = config.seq_len as f64;
    let batch = config.batch;

    let q = positionwise_fc_cost(hidden, hidden, seq_len, batch);
    let k = q;
    let v = q;
    let qk = qk_cost(hidden, seq_len, batch);
    let qkv = qkv_cost(hidden, seq_len, batch);

    [q, k, v, qk, qkv].into_iter().sum()
}

/// Feed-forward part: a hidden->hidden projection, expansion and contraction.
fn mlp_cost(config: &ModelConfig) -> CostResult {
    let hidden = config.hidden_size as f64;
    let inter = config.intermediate_size as f64;
    let seq_len = config.seq_len as f64;
    let batch = config.batch;

    // ffn1 is charged at the same shape as the Q projection.
    let ffn1 = positionwise_fc_cost(hidden, hidden, seq_len, batch);
    let ffn2 = positionwise_fc_cost(hidden, inter, seq_len, batch);
    let ffn3 = positionwise_fc_cost(inter, hidden, seq_len, batch);

    [ffn1, ffn2, ffn3].into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> ModelConfig {
        ModelConfig::builder()
            .num_modules(2)
            .hidden_size(4)
            .intermediate_size(16)
            .vocab_size(10)
            .batch(1.0)
            .seq_len(3)
            .autocomplete_len(2)
            .messages_per_day(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn tiny_model_by_hand() {
        // per block: 4 * (4*4*3) + 2 * (4*3*3) + 2 * (4*16*3) = 192 + 72 + 384
        // params: 4 * 16 + 2 * 64 = 192
        let block = block_cost(&tiny());
        assert_eq!(block.macs, 648.0);
        assert_eq!(block.params, 192.0);

        let total = model_cost(&tiny());
        assert_eq!(total.macs, 2.0 * 648.0);
        assert_eq!(total.params, 40.0 + 2.0 * 192.0);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let config = ModelConfig::gpt3();
        let a = model_cost(&config);
        let b = model_cost(&config);
        assert_eq!(a.macs.to_bits(), b.macs.to_bits());
        assert_eq!(a.params.to_bits(), b.params.to_bits());
    }

    #[test]
    fn params_do_not_depend_on_seq_len() {
        let config = ModelConfig::gpt3();
        assert_eq!(
            model_cost(&config).params,
            model_cost(&config.with_seq_len(2048)).params
        );
    }

    #[test]
    fn zero_blocks_leaves_only_embeddings() {
        let config = ModelConfig {
            num_modules: 0,
            ..tiny()
        };
        assert_eq!(model_cost(&config), CostResult::new(0.0, 40.0));
    }
}
