// ============================================================
// Layer 4 — Translation Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// TranslationSamples into tensors.
//
// How batching works here:
//   Input:  Vec of N samples, each with S source ids and S labels
//   Output: TranslationBatch with two Int tensors of shape [N, S]
//
//   We flatten all ids into one long Vec, then reshape:
//   [s1_t1, s1_t2, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// This stays simple because every row was padded to the same
// width during preprocessing.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TranslationSample;

// ─── TranslationBatch ─────────────────────────────────────────────────────────
/// A batch of aligned pairs ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct TranslationBatch<B: Backend> {
    /// Source ids, padded to the target width - shape: [batch_size, seq_len]
    pub source_ids: Tensor<B, 2, Int>,

    /// One class id per position - shape: [batch_size, seq_len]
    /// Pad positions hold class 0.
    pub target_ids: Tensor<B, 2, Int>,
}

// ─── TranslationBatcher ───────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right GPU/CPU.
#[derive(Clone, Debug)]
pub struct TranslationBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TranslationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// Stack id rows into a `[rows, seq_len]` Int tensor
pub fn ids_to_tensor<B: Backend>(
    rows:    impl Iterator<Item = i32>,
    shape:   [usize; 2],
    device:  &B::Device,
) -> Tensor<B, 2, Int> {
    let flat: Vec<i32> = rows.collect();
    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape(shape)
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
impl<B: Backend> Batcher<TranslationSample, TranslationBatch<B>> for TranslationBatcher<B> {
    fn batch(&self, items: Vec<TranslationSample>) -> TranslationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, TranslationSample::seq_len);

        let source_ids = ids_to_tensor::<B>(
            items.iter().flat_map(|s| s.source_ids.iter().map(|&x| x as i32)),
            [batch_size, seq_len],
            &self.device,
        );

        let target_ids = ids_to_tensor::<B>(
            items.iter().flat_map(|s| s.target_ids.iter().map(|&x| x as i32)),
            [batch_size, seq_len],
            &self.device,
        );

        TranslationBatch { source_ids, target_ids }
    }
}
