// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Holds out the LAST `validation_fraction` of the samples for
// validation, without shuffling first:
//
//   samples:  [ s0 s1 s2 s3 s4 s5 s6 s7 s8 s9 ]
//   fraction: 0.2
//   train:    [ s0 .. s7 ]     validation: [ s8 s9 ]
//
// The split is therefore reproducible run to run and the
// validation set never changes between model variants, so their
// validation figures are comparable. Shuffling happens later,
// inside the training data loader, and only touches the
// training part.
//
// Reference: Rust Book §8 (Vectors)

/// Split `samples` into (train, validation) keeping corpus order.
///
/// `validation_fraction` is clamped to [0, 1].
pub fn split_validation_tail<T>(mut samples: Vec<T>, validation_fraction: f64) -> (Vec<T>, Vec<T>) {
    let fraction = validation_fraction.clamp(0.0, 1.0);
    let total    = samples.len();

    // Small epsilon so that e.g. 50 * 0.7 lands on 35 and not 34
    let train_len = ((total as f64) * (1.0 - fraction) + 1e-9).floor() as usize;
    let train_len = train_len.min(total);

    // split_off(n) removes elements [n..] and returns them
    let val = samples.split_off(train_len);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_validation_tail(items, 0.2);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_validation_is_the_tail() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_validation_tail(items, 0.3);
        assert_eq!(train, (0..7).collect::<Vec<_>>());
        assert_eq!(val, vec![7, 8, 9]);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val)      = split_validation_tail(items, 0.3);
        assert_eq!(train.len(), 35);
        assert_eq!(train.len() + val.len(), 50);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_validation_tail(items, 0.2);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything_for_training() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_validation_tail(items, 0.0);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
