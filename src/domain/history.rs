// ============================================================
// Layer 3 — Training History
// ============================================================
// Per-epoch figures produced by a training run. Plain data so
// that both the trainer (which fills it) and the metrics logger
// (which writes it to CSV) can share it without depending on
// each other.

use serde::{Deserialize, Serialize};

/// One row of metrics for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean per-position cross entropy over the training batches
    pub loss: f64,

    /// Fraction of training positions whose arg-max class was correct,
    /// pad positions included
    pub accuracy: f64,

    /// Same as `loss` on the held-out tail. NaN when nothing was held out.
    pub val_loss: f64,

    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss: f64, accuracy: f64, val_loss: f64, val_accuracy: f64) -> Self {
        Self { epoch, loss, accuracy, val_loss, val_accuracy }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Ordered record of completed epochs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// Epoch with the lowest validation loss, if any epoch had one
    pub fn best_epoch(&self) -> Option<&EpochMetrics> {
        let mut best: Option<&EpochMetrics> = None;
        for m in self.epochs.iter().filter(|m| m.val_loss.is_finite()) {
            match best {
                Some(b) if !m.is_improvement(b.val_loss) => {}
                _ => best = Some(m),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.5, 0.4, 2.3, 0.45);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_best_epoch_skips_nan() {
        let mut h = TrainingHistory::new();
        h.push(EpochMetrics::new(1, 3.0, 0.1, f64::NAN, 0.0));
        h.push(EpochMetrics::new(2, 2.0, 0.3, 2.1, 0.3));
        h.push(EpochMetrics::new(3, 1.5, 0.5, 2.4, 0.28));
        assert_eq!(h.best_epoch().map(|m| m.epoch), Some(2));
        assert_eq!(h.len(), 3);
    }
}
