// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run over a preprocessed artifact set:
//
//   Step 0: Reject unusable hyperparameters        (Layer 2)
//   Step 1: Check the preprocess stage completed   (Layer 6 - infra)
//   Step 2: Load matrices, vocabularies, length    (Layer 6 - infra)
//   Step 3: Uncommit the previous run's files      (Layer 6 - infra)
//   Step 4: Re-pad the source, split off the tail  (Layer 4 - data)
//   Step 5: Save config                            (Layer 6 - infra)
//   Step 6: Run the training loop                  (Layer 5 - ml)
//   Step 7: Save + commit the model                (Layer 6 - infra)
//   Step 8: Log a sample translation               (Layer 5 - ml)
//
// From Step 3 on, the old model no longer counts as part of the
// set: a run that fails halfway leaves nothing `translate` would
// accept, instead of new config next to old weights.
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{samples_from, TranslationDataset},
    padder::pad,
    splitter::split_validation_tail,
};
use crate::domain::{error::PipelineError, history::TrainingHistory};
use crate::infra::{
    artifacts::{ArtifactDir, CORPUS_FILE},
    checkpoint::{CheckpointManager, MODEL_FILE, TRAIN_CONFIG_FILE},
    metrics::{MetricsLogger, HISTORY_FILE},
    tokenizer_store::TokenizerStore,
};
use crate::ml::{
    decoder::decode_sequence,
    inferencer::Inferencer,
    model::{ModelVariant, Seq2SeqConfig},
    trainer::fit,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Saved next to the
// weights so inference can rebuild the same architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub artifacts_dir:       String,
    pub variant:             ModelVariant,
    pub epochs:              usize,
    pub batch_size:          usize,
    pub lr:                  f64,
    pub validation_fraction: f64,
    pub hidden_size:         usize,
    pub dense_size:          usize,
    pub embedding_dim:       usize,
    pub dropout:             f64,
    /// Leave pad positions out of the loss
    pub mask_padding:        bool,
    pub seed:                u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            artifacts_dir:       "artifacts".to_string(),
            variant:             ModelVariant::EmbedBidirectional,
            epochs:              10,
            batch_size:          1024,
            lr:                  5e-3,
            validation_fraction: 0.2,
            hidden_size:         256,
            dense_size:          1024,
            embedding_dim:       256,
            dropout:             0.5,
            mask_padding:        false,
            seed:                42,
        }
    }
}

impl TrainConfig {
    /// Architecture for the given vocabulary sizes (pad class included).
    pub fn model_config(&self, input_vocab: usize, num_classes: usize) -> Seq2SeqConfig {
        Seq2SeqConfig::new(self.variant, input_vocab, num_classes)
            .with_hidden_size(self.hidden_size)
            .with_dense_size(self.dense_size)
            .with_embedding_dim(self.embedding_dim)
            .with_dropout(self.dropout)
    }

    /// Settings the data loader or the layers would panic on.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |name: &'static str, value: String, reason: &'static str| -> Result<(), PipelineError> {
            Err(PipelineError::InvalidConfig { name, value, reason })
        };

        if self.batch_size == 0 {
            return invalid("batch_size", self.batch_size.to_string(), "must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.dropout) {
            return invalid("dropout", self.dropout.to_string(), "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.validation_fraction) {
            return invalid("validation_fraction", self.validation_fraction.to_string(), "must be within [0, 1]");
        }
        if !(self.lr.is_finite() && self.lr > 0.0) {
            return invalid("lr", self.lr.to_string(), "must be a positive number");
        }
        for (name, size) in [
            ("hidden_size", self.hidden_size),
            ("dense_size", self.dense_size),
            ("embedding_dim", self.embedding_dim),
        ] {
            if size == 0 {
                return invalid(name, size.to_string(), "must be at least 1");
            }
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase<B: AutodiffBackend> {
    config: TrainConfig,
    device: B::Device,
}

impl<B: AutodiffBackend> TrainUseCase<B> {
    pub fn new(config: TrainConfig, device: B::Device) -> Self {
        Self { config, device }
    }

    pub fn execute(&self) -> Result<TrainingHistory> {
        let cfg = &self.config;

        // ── Step 0: Hyperparameters ───────────────────────────────────────────
        cfg.validate()?;
        let dir = ArtifactDir::open(&cfg.artifacts_dir);

        // ── Steps 1-2: Load the preprocessed set ──────────────────────────────
        dir.require(&[CORPUS_FILE])?;
        let corpus = dir.load_corpus()?;
        let (source_vocab, target_vocab, seq_len) = TokenizerStore::new(&dir).load()?;
        if corpus.target.width() != seq_len {
            anyhow::bail!(
                "corpus.json has target width {} but sequence_length.json says {}; rerun 'preprocess'",
                corpus.target.width(),
                seq_len
            );
        }

        // ── Step 3: A new run replaces the old model ──────────────────────────
        dir.uncommit(&[MODEL_FILE, TRAIN_CONFIG_FILE, HISTORY_FILE])?;

        // ── Step 4: Source ids on the target's time axis, tail held out ───────
        let input = corpus.source.repad(seq_len)?;
        let samples = samples_from(&input, &corpus.target);
        let (train_samples, val_samples) = split_validation_tail(samples, cfg.validation_fraction);
        if train_samples.is_empty() {
            return Err(PipelineError::EmptyTrainingSet {
                validation_fraction: cfg.validation_fraction,
            }
            .into());
        }
        tracing::info!(
            "Training {:?} on {} pairs, validating on {}",
            cfg.variant,
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 5: Save config for inference ─────────────────────────────────
        let model_cfg = cfg.model_config(source_vocab.num_classes(), target_vocab.num_classes());
        let ckpt = CheckpointManager::new(&dir);
        ckpt.save_config(cfg)?;

        // ── Step 6: Training loop ─────────────────────────────────────────────
        let metrics = MetricsLogger::new(dir.path())?;
        let (model, history) = fit::<B>(
            cfg,
            &model_cfg,
            TranslationDataset::new(train_samples),
            TranslationDataset::new(val_samples),
            &metrics,
            self.device.clone(),
        )?;

        // ── Step 7: Persist the trained model ─────────────────────────────────
        ckpt.save_model(&model)?;
        ckpt.commit()?;
        dir.commit(&[HISTORY_FILE])?;

        // ── Step 8: Sample translation of the first pair ──────────────────────
        let inferencer = Inferencer::<B::InnerBackend>::new(model.valid(), self.device.clone());
        let first      = pad(&[input.row(0)], None)?;
        let prediction = inferencer.predict(&first)?;
        if let Some(probs) = prediction.first() {
            tracing::info!("Source:     {}", source_vocab.decode_ids(corpus.source.unpadded_row(0))?);
            tracing::info!("Expected:   {}", target_vocab.decode_ids(corpus.target.unpadded_row(0))?);
            tracing::info!("Prediction: {}", decode_sequence(probs, &target_vocab)?);
        }

        Ok(history)
    }
}
