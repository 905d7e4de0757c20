// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on an AutodiffBackend for gradients
//   - model.valid() returns the model on the inner backend, with
//     dropout disabled, for the validation pass
//   - argmax(2) returns [batch, seq, 1], flattened before .equal()
//   - a NaN/inf batch loss stops the run; the epochs completed so
//     far are returned inside the error and are already in the CSV
//   - generic over the backend; the CLI picks Wgpu, tests NdArray
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::TranslationBatcher, dataset::TranslationDataset};
use crate::domain::error::PipelineError;
use crate::domain::history::{EpochMetrics, TrainingHistory};
use crate::infra::metrics::MetricsLogger;
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};

/// Running sums for one pass over a loader
#[derive(Default)]
struct PassTotals {
    loss_sum:  f64,
    batches:   usize,
    correct:   usize,
    positions: usize,
}

impl PassTotals {
    fn mean_loss(&self) -> f64 {
        if self.batches > 0 { self.loss_sum / self.batches as f64 } else { f64::NAN }
    }

    fn accuracy(&self) -> f64 {
        if self.positions > 0 { self.correct as f64 / self.positions as f64 } else { 0.0 }
    }
}

/// Count positions whose arg-max class equals the label
fn count_correct<B: Backend>(logits: Tensor<B, 3>, targets: Tensor<B, 2, Int>) -> (usize, usize) {
    let [batch_size, seq_len, _] = logits.dims();
    let predicted = logits.argmax(2).reshape([batch_size * seq_len]);
    let correct: i64 = predicted
        .equal(targets.reshape([batch_size * seq_len]))
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    (correct as usize, batch_size * seq_len)
}

/// Train a fresh model on `device`, one CSV row per finished epoch.
pub fn fit<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    model_cfg:     &Seq2SeqConfig,
    train_dataset: TranslationDataset,
    val_dataset:   TranslationDataset,
    metrics:       &MetricsLogger,
    device:        B::Device,
) -> Result<(Seq2SeqModel<B>, TrainingHistory)> {
    B::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: Seq2SeqModel<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {:?}, hidden={}, classes={}",
        model_cfg.variant, model_cfg.hidden_size, model_cfg.num_classes
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(TranslationBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend, no autodiff) ───────────────────
    let val_loader = DataLoaderBuilder::new(TranslationBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut history = TrainingHistory::new();

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train = PassTotals::default();

        for batch in train_loader.iter() {
            let (loss, logits) = model.forward_loss(
                batch.source_ids,
                batch.target_ids.clone(),
                cfg.mask_padding,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            if !loss_val.is_finite() {
                tracing::warn!("Non-finite loss in epoch {} after {} batches", epoch, train.batches);
                return Err(PipelineError::NonFiniteLoss { epoch, history }.into());
            }

            let (correct, positions) = count_correct(logits.detach(), batch.target_ids);
            train.loss_sum  += loss_val;
            train.batches   += 1;
            train.correct   += correct;
            train.positions += positions;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let mut val = PassTotals::default();

        for batch in val_loader.iter() {
            let (loss, logits) = model_valid.forward_loss(
                batch.source_ids,
                batch.target_ids.clone(),
                cfg.mask_padding,
            );
            let (correct, positions) = count_correct(logits, batch.target_ids);
            val.loss_sum  += loss.into_scalar().elem::<f64>();
            val.batches   += 1;
            val.correct   += correct;
            val.positions += positions;
        }

        let m = EpochMetrics::new(
            epoch,
            train.mean_loss(),
            train.accuracy(),
            val.mean_loss(),
            val.accuracy(),
        );

        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            epoch, cfg.epochs, m.loss, m.accuracy, m.val_loss, m.val_accuracy,
        );

        metrics.log(&m)?;
        history.push(m);
    }

    tracing::info!("Training complete after {} epochs", history.len());
    Ok((model, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::TranslationSample;
    use crate::ml::model::ModelVariant;

    type TestBackend = burn::backend::Autodiff<burn::backend::NdArray>;

    fn samples() -> Vec<TranslationSample> {
        (0..6)
            .map(|i| TranslationSample {
                source_ids: vec![1 + i % 3, 2, 0],
                target_ids: vec![1, 1 + i % 2, 0],
            })
            .collect()
    }

    fn tiny_config() -> TrainConfig {
        TrainConfig {
            epochs: 2,
            batch_size: 4,
            lr: 1e-2,
            hidden_size: 8,
            dense_size: 16,
            embedding_dim: 4,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_fit_records_one_row_per_epoch() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let cfg     = TrainConfig { variant: ModelVariant::EmbedBidirectional, ..tiny_config() };
        let model_cfg = cfg.model_config(4, 3);

        let (train, val) = (samples()[..4].to_vec(), samples()[4..].to_vec());
        let (_, history) = fit::<TestBackend>(
            &cfg,
            &model_cfg,
            TranslationDataset::new(train),
            TranslationDataset::new(val),
            &metrics,
            Default::default(),
        )
        .unwrap();

        assert_eq!(history.len(), 2);
        let last = history.last().unwrap();
        assert!(last.loss.is_finite());
        assert!(last.val_loss.is_finite());
        assert!((0.0..=1.0).contains(&last.accuracy));

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_fit_without_validation_reports_nan_val_loss() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let cfg     = TrainConfig { epochs: 1, variant: ModelVariant::Simple, ..tiny_config() };
        let model_cfg = cfg.model_config(4, 3);

        let (_, history) = fit::<TestBackend>(
            &cfg,
            &model_cfg,
            TranslationDataset::new(samples()),
            TranslationDataset::new(Vec::new()),
            &metrics,
            Default::default(),
        )
        .unwrap();

        assert!(history.last().unwrap().val_loss.is_nan());
    }

    #[test]
    fn test_divergence_keeps_completed_epochs() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        // one batch per epoch; the first Adam step blows every weight up
        let cfg = TrainConfig {
            epochs: 5,
            batch_size: 8,
            lr: 1e38,
            dropout: 0.0,
            variant: ModelVariant::EmbedBidirectional,
            ..tiny_config()
        };
        let model_cfg = cfg.model_config(4, 3);

        let err = fit::<TestBackend>(
            &cfg,
            &model_cfg,
            TranslationDataset::new(samples()[..4].to_vec()),
            TranslationDataset::new(samples()[4..].to_vec()),
            &metrics,
            Default::default(),
        )
        .map(|_| ())
        .unwrap_err();

        let Some(PipelineError::NonFiniteLoss { epoch, history }) = err.downcast_ref::<PipelineError>()
        else {
            panic!("expected NonFiniteLoss, got {err:?}");
        };
        assert!(*epoch >= 2, "the first batch runs on the initial weights");
        assert_eq!(history.len(), epoch - 1);
        assert!(history.last().unwrap().loss.is_finite());

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), history.len() + 1);
    }
}
