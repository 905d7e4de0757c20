// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved:
//   1. Model weights (model.mpk) - all learned parameters
//   2. train_config.json         - variant and layer sizes
//
// Why save the config separately?
//   To load the weights for inference, the exact architecture
//   (variant, hidden size, dense size, ...) must be rebuilt
//   first. The vocabulary sizes come from the tokenizer files.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Stores floats at half precision for a smaller file
//   - Type-safe: loading fails if the architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::fs;
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::infra::artifacts::{write_atomic, ArtifactDir};
use crate::ml::model::Seq2SeqModel;

pub const MODEL_FILE:        &str = "model.mpk";
pub const TRAIN_CONFIG_FILE: &str = "train_config.json";

/// Recorder path without extension; CompactRecorder appends ".mpk"
const MODEL_STEM: &str = "model";

pub struct CheckpointManager<'a> {
    dir: &'a ArtifactDir,
}

impl<'a> CheckpointManager<'a> {
    pub fn new(dir: &'a ArtifactDir) -> Self {
        Self { dir }
    }

    /// Save the trained weights. Call `commit` once everything
    /// belonging to the run is on disk.
    pub fn save_model<B: Backend>(&self, model: &Seq2SeqModel<B>) -> Result<()> {
        let path = self.dir.file(MODEL_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save model to '{}'", path.display())
            })?;

        tracing::debug!("Saved model weights to '{}'", self.dir.file(MODEL_FILE).display());
        Ok(())
    }

    /// Load weights into a model built with the saved architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  Seq2SeqModel<B>,
        device: &B::Device,
    ) -> Result<Seq2SeqModel<B>> {
        self.dir.require(&[MODEL_FILE, TRAIN_CONFIG_FILE])?;
        let path = self.dir.file(MODEL_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.file(TRAIN_CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.file(TRAIN_CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'translate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Mark the model and its config as a complete pair.
    pub fn commit(&self) -> Result<()> {
        self.dir.commit(&[MODEL_FILE, TRAIN_CONFIG_FILE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::ModelVariant;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_model_round_trip() {
        let tmp  = tempfile::tempdir().unwrap();
        let dir  = ArtifactDir::create(tmp.path()).unwrap();
        let ckpt = CheckpointManager::new(&dir);

        let cfg = TrainConfig {
            variant: ModelVariant::EmbedBidirectional,
            hidden_size: 4,
            dense_size: 6,
            embedding_dim: 3,
            ..TrainConfig::default()
        };
        let device = Default::default();
        let model: Seq2SeqModel<TestBackend> = cfg.model_config(5, 7).init(&device);

        ckpt.save_config(&cfg).unwrap();
        ckpt.save_model(&model).unwrap();
        ckpt.commit().unwrap();
        assert!(dir.file(MODEL_FILE).exists());
        assert!(dir.require(&[MODEL_FILE, TRAIN_CONFIG_FILE]).is_ok());

        let loaded_cfg = ckpt.load_config().unwrap();
        assert_eq!(loaded_cfg.variant, ModelVariant::EmbedBidirectional);

        let fresh: Seq2SeqModel<TestBackend> = loaded_cfg.model_config(5, 7).init(&device);
        let restored = ckpt.load_model(fresh, &device).unwrap();

        // CompactRecorder stores half precision, so compare loosely
        let before: Vec<f32> = model.classifier.weight.val().into_data().to_vec().unwrap();
        let after:  Vec<f32> = restored.classifier.weight.val().into_data().to_vec().unwrap();
        assert_eq!(before.len(), after.len());
        assert!(before.iter().zip(&after).all(|(a, b)| (a - b).abs() < 1e-2));
    }

    #[test]
    fn test_model_file_matches_recorder_extension() {
        use burn::record::FileRecorder;
        let ext = <CompactRecorder as FileRecorder<TestBackend>>::file_extension();
        assert_eq!(MODEL_FILE, format!("{MODEL_STEM}.{ext}"));
    }

    #[test]
    fn test_load_before_commit_fails() {
        let tmp  = tempfile::tempdir().unwrap();
        let dir  = ArtifactDir::create(tmp.path()).unwrap();
        let ckpt = CheckpointManager::new(&dir);
        let device = Default::default();
        let model: Seq2SeqModel<TestBackend> = TrainConfig::default().model_config(3, 3).init(&device);
        assert!(ckpt.load_model(model, &device).is_err());
    }
}
