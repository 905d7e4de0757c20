use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::padder::PaddedBatch;

/// One aligned training pair, both sides padded to the same
/// number of time steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSample {
    pub source_ids: Vec<u32>,
    pub target_ids: Vec<u32>,
}

impl TranslationSample {
    pub fn seq_len(&self) -> usize {
        self.target_ids.len()
    }
}

/// Pair up model-input rows with label rows, in corpus order.
pub fn samples_from(input: &PaddedBatch, labels: &PaddedBatch) -> Vec<TranslationSample> {
    input
        .iter_rows()
        .zip(labels.iter_rows())
        .map(|(s, t)| TranslationSample { source_ids: s.to_vec(), target_ids: t.to_vec() })
        .collect()
}

pub struct TranslationDataset {
    samples: Vec<TranslationSample>,
}

impl TranslationDataset {
    pub fn new(samples: Vec<TranslationSample>) -> Self { Self { samples } }
}

impl Dataset<TranslationSample> for TranslationDataset {
    fn get(&self, index: usize) -> Option<TranslationSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padder::pad;

    #[test]
    fn test_samples_follow_row_order() {
        let input  = pad(&[vec![1, 2], vec![3]], Some(3)).unwrap();
        let labels = pad(&[vec![4], vec![5, 6, 7]], None).unwrap();
        let ds = TranslationDataset::new(samples_from(&input, &labels));

        assert_eq!(ds.len(), 2);
        let second = ds.get(1).unwrap();
        assert_eq!(second.source_ids, vec![3, 0, 0]);
        assert_eq!(second.target_ids, vec![5, 6, 7]);
        assert!(ds.get(2).is_none());
    }
}
