//! Per-layer cost formulas for transformer inference.

use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Multiply-accumulate count and learnable parameter count of a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostResult {
    pub macs: f64,
    pub params: f64,
}

impl CostResult {
    #[inline]
    pub const fn new(macs: f64, params: f64) -> Self {
        CostResult { macs, params }
    }
}

impl Add for CostResult {
    type Output = CostResult;

    #[inline]
    fn add(self, rhs: CostResult) -> CostResult {
        CostResult::new(self.macs + rhs.macs, self.params + rhs.params)
    }
}

impl AddAssign for CostResult {
    #[inline]
    fn add_assign(&mut self, rhs: CostResult) {
        self.macs += rhs.macs;
        self.params += rhs.params;
    }
}

/// Scale by a repeat count, e.g. the number of identical blocks.
impl Mul<f64> for CostResult {
    type Output = CostResult;

    #[inline]
    fn mul(self, rhs: f64) -> CostResult {
        CostResult::new(self.macs * rhs, self.params * rhs)
    }
}

impl Sum for CostResult {
    fn sum<I: Iterator<Item = CostResult>>(iter: I) -> Self {
        iter.fold(CostResult::default(), |acc, c| acc + c)
    }
}

impl fmt::Display for CostResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "macs: {:e}, params: {:e}", self.macs, self.params)
    }
}

/// Vocabulary embedding table at the model input.
///
/// The sinusoidal position embedding only adds one channel and is ignored.
#[inline]
pub fn embeddings_cost(in_c: f64, vocab_size: f64) -> CostResult {
    CostResult::new(0.0, in_c * vocab_size)
}

/// Position-wise fully connected layer, applied to every token independently.
#[inline]
pub fn positionwise_fc_cost(in_c: f64, out_c: f64, seq_len: f64, batch: f64) -> CostResult {
    CostResult::new(in_c * out_c * seq_len * batch, in_c * out_c)
}

/// Q * K^T, the attention score matrix.
#[inline]
pub fn qk_cost(in_c: f64, seq_len: f64, batch: f64) -> CostResult {
    CostResult::new(in_c * seq_len * seq_len * batch, 0.0)
}

/// (Q * K^T) * V, applying the attention weights to the values.
#[inline]
pub fn qkv_cost(in_c: f64, seq_len: f64, batch: f64) -> CostResult {
    CostResult::new(in_c * seq_len * seq_len * batch, 0.0)
}
