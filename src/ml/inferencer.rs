// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::{prelude::*, tensor::activation::softmax};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ids_to_tensor, padder::PaddedBatch};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::Seq2SeqModel;

/// Per example, per position, a probability vector over the target classes
pub type Predictions = Vec<Vec<Vec<f32>>>;

pub struct Inferencer<B: Backend> {
    model:  Seq2SeqModel<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: Seq2SeqModel<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Rebuild the architecture from the saved config, then load the weights.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        input_vocab:  usize,
        num_classes:  usize,
        device:       B::Device,
    ) -> Result<Self> {
        let cfg: TrainConfig = ckpt_manager.load_config()?;
        let model: Seq2SeqModel<B> = cfg
            .model_config(input_vocab, num_classes)
            .with_dropout(0.0)
            .init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint ({:?})", cfg.variant);
        Ok(Self { model, device })
    }

    /// Class probabilities for every row of `input`.
    pub fn predict(&self, input: &PaddedBatch) -> Result<Predictions> {
        let [rows, seq_len] = input.shape();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let ids = ids_to_tensor::<B>(
            input.as_slice().iter().map(|&x| x as i32),
            [rows, seq_len],
            &self.device,
        );

        let logits = self.model.forward(ids);
        let [_, _, num_classes] = logits.dims();

        let flat: Vec<f32> = softmax(logits, 2)
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;

        let predictions: Predictions = flat
            .chunks(seq_len * num_classes)
            .map(|example| example.chunks(num_classes).map(<[f32]>::to_vec).collect())
            .collect();

        tracing::debug!("Predicted {} rows x {} steps", rows, seq_len);
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padder::pad;
    use crate::ml::model::{ModelVariant, Seq2SeqConfig};

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_predict_returns_distributions() {
        let device = Default::default();
        let model: Seq2SeqModel<TestBackend> = Seq2SeqConfig::new(ModelVariant::Bidirectional, 5, 4)
            .with_hidden_size(6)
            .with_dense_size(8)
            .init(&device);
        let inferencer = Inferencer::new(model, device);

        let input = pad(&[vec![1, 2], vec![3, 4, 1]], None).unwrap();
        let preds = inferencer.predict(&input).unwrap();

        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].len(), 3);
        for position in preds.iter().flatten() {
            assert_eq!(position.len(), 4);
            let total: f32 = position.iter().sum();
            assert!((total - 1.0).abs() < 1e-4);
        }
    }
}
