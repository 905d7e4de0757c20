// ============================================================
// Layer 5 — Greedy Decoder
// ============================================================
// Turns the model's per-position class distributions back into
// text: take the most likely class at every position, look it
// up in the target vocabulary, join with spaces.
//
//   position:   0      1      2      3
//   arg-max:    1      2      0      0
//   text:     "bonjour monde <PAD> <PAD>"
//
// Pad positions are kept in the output as the literal "<PAD>"
// marker; nothing is trimmed.

use crate::data::vocabulary::{Vocabulary, PAD_ID};
use crate::domain::error::PipelineError;

/// Index of the largest probability. Ties go to the lowest index;
/// NaN never wins. An empty vector selects the pad class.
pub fn argmax(probabilities: &[f32]) -> u32 {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, b)) if !(p > b) => {}
            _ if p.is_nan() => {}
            _ => best = Some((i, p)),
        }
    }
    best.map_or(PAD_ID, |(i, _)| i as u32)
}

/// Greedy decode of one sequence of class distributions.
pub fn decode_sequence(
    probabilities: &[Vec<f32>],
    vocab:         &Vocabulary,
) -> Result<String, PipelineError> {
    let ids: Vec<u32> = probabilities.iter().map(|p| argmax(p)).collect();
    vocab.decode_ids(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(class: usize, n: usize) -> Vec<f32> {
        let mut v = vec![0.01; n];
        v[class] = 0.9;
        v
    }

    #[test]
    fn test_decode_keeps_pad_markers() {
        let vocab = Vocabulary::build(&["bonjour monde"]);
        let probs = vec![one_hot(1, 3), one_hot(2, 3), one_hot(0, 3), one_hot(0, 3)];
        assert_eq!(
            decode_sequence(&probs, &vocab).unwrap(),
            "bonjour monde <PAD> <PAD>"
        );
    }

    #[test]
    fn test_argmax_ties_pick_lowest_index() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }

    #[test]
    fn test_argmax_ignores_nan() {
        assert_eq!(argmax(&[f32::NAN, 0.1, 0.3]), 2);
        assert_eq!(argmax(&[]), PAD_ID);
    }

    #[test]
    fn test_class_outside_vocabulary_is_an_error() {
        let vocab = Vocabulary::build(&["oui"]);
        let probs = vec![one_hot(4, 5)];
        assert!(matches!(
            decode_sequence(&probs, &vocab),
            Err(PipelineError::UnknownId(4))
        ));
    }
}
