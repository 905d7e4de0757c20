// ============================================================
// Layer 4 — Preprocessing Pipeline
// ============================================================
// Loader output → Vocabulary → encode → pad, once per language.
//
//   ParallelCorpus
//       │
//       ├── source sentences ──► Vocabulary::build ──► encode ──► pad ──► source matrix
//       │
//       └── target sentences ──► Vocabulary::build ──► encode ──► pad ──► target matrix
//
// The two languages share nothing: each has its own id space
// and its own padded width. Both matrices have one row per
// corpus line, in corpus order.
//
// Everything returned here is immutable. Model-specific views
// (the source re-padded to the target width) are computed from
// it on demand instead of reshaping shared state in place.

use crate::data::padder::{pad, PaddedBatch};
use crate::data::vocabulary::Vocabulary;
use crate::domain::corpus::ParallelCorpus;
use crate::domain::error::PipelineError;

/// One language after preprocessing
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSide {
    pub vocab:  Vocabulary,
    pub matrix: PaddedBatch,
}

impl EncodedSide {
    fn from_sentences(sentences: &[String]) -> Result<Self, PipelineError> {
        let vocab = Vocabulary::build(sentences);
        // blank lines keep alignment, but a side with no tokens at all is empty
        if vocab.size() == 0 {
            return Err(PipelineError::EmptyCorpus);
        }
        let encoded = sentences
            .iter()
            .map(|s| vocab.encode(s))
            .collect::<Result<Vec<_>, _>>()?;
        let matrix = pad(&encoded, None)?;
        Ok(Self { vocab, matrix })
    }

    /// Padded width, i.e. the longest encoded sentence
    pub fn max_len(&self) -> usize {
        self.matrix.width()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    pub source: EncodedSide,
    pub target: EncodedSide,
}

impl Preprocessed {
    pub fn source_max_len(&self) -> usize {
        self.source.max_len()
    }

    pub fn target_max_len(&self) -> usize {
        self.target.max_len()
    }

    pub fn rows(&self) -> usize {
        self.source.matrix.rows()
    }

    /// Shape the per-token classifier sees for the labels:
    /// one class id per position, `[rows, target_max_len, 1]`.
    pub fn target_label_shape(&self) -> [usize; 3] {
        [self.target.matrix.rows(), self.target.matrix.width(), 1]
    }

    /// Source matrix re-padded to the target width. The recurrent
    /// models emit one prediction per input step, so input and
    /// output must have the same number of steps.
    pub fn model_input(&self) -> Result<PaddedBatch, PipelineError> {
        self.source.matrix.repad(self.target_max_len())
    }
}

/// Build both vocabularies and both padded matrices.
pub fn preprocess(corpus: &ParallelCorpus) -> Result<Preprocessed, PipelineError> {
    let source = EncodedSide::from_sentences(corpus.source())?;
    let target = EncodedSide::from_sentences(corpus.target())?;

    tracing::info!(
        "Preprocessed {} pairs: source vocab={} max_len={}, target vocab={} max_len={}",
        corpus.len(),
        source.vocab.size(),
        source.max_len(),
        target.vocab.size(),
        target.max_len(),
    );

    Ok(Preprocessed { source, target })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> ParallelCorpus {
        ParallelCorpus::new(
            vec![
                "new jersey is sometimes quiet .".to_string(),
                "paris is never cold".to_string(),
                "it is quiet".to_string(),
            ],
            vec![
                "new jersey est parfois calme .".to_string(),
                "paris n'est jamais froid".to_string(),
                "il est calme en hiver".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_row_counts_match_corpus() {
        let p = preprocess(&corpus()).unwrap();
        assert_eq!(p.rows(), 3);
        assert_eq!(p.target.matrix.rows(), 3);
    }

    #[test]
    fn test_languages_have_independent_widths_and_ids() {
        let p = preprocess(&corpus()).unwrap();
        assert_eq!(p.source_max_len(), 6);
        assert_eq!(p.target_max_len(), 6);
        // "is" is id 3 in English, "est" is id 3 in French: separate id spaces
        assert_eq!(p.source.vocab.id("is"), Some(3));
        assert_eq!(p.target.vocab.id("est"), Some(3));
        assert_eq!(p.source.vocab.id("est"), None);
    }

    #[test]
    fn test_rows_are_post_padded() {
        let p = preprocess(&corpus()).unwrap();
        let v = &p.source.vocab;
        let expected: Vec<u32> = v
            .encode("it is quiet")
            .unwrap()
            .into_iter()
            .chain([0, 0, 0])
            .collect();
        assert_eq!(p.source.matrix.row(2), expected.as_slice());
    }

    #[test]
    fn test_target_label_shape_has_trailing_unit_dim() {
        let p = preprocess(&corpus()).unwrap();
        assert_eq!(p.target_label_shape(), [3, 6, 1]);
    }

    #[test]
    fn test_blank_only_side_is_an_empty_corpus() {
        let blank = ParallelCorpus::new(
            vec!["".to_string(), "".to_string()],
            vec!["".to_string(), "".to_string()],
        )
        .unwrap();
        assert!(matches!(preprocess(&blank), Err(PipelineError::EmptyCorpus)));

        let one_sided = ParallelCorpus::new(
            vec!["go".to_string()],
            vec!["".to_string()],
        )
        .unwrap();
        assert!(matches!(preprocess(&one_sided), Err(PipelineError::EmptyCorpus)));
    }

    #[test]
    fn test_model_input_uses_target_width() {
        let c = ParallelCorpus::new(
            vec!["go".to_string()],
            vec!["va vite".to_string()],
        )
        .unwrap();
        let p = preprocess(&c).unwrap();
        let input = p.model_input().unwrap();
        assert_eq!(input.shape(), [1, 2]);
        assert_eq!(input.row(0), &[1, 0]);
    }

    #[test]
    fn test_model_input_rejects_longer_source() {
        let c = ParallelCorpus::new(
            vec!["a b c".to_string()],
            vec!["x".to_string()],
        )
        .unwrap();
        let p = preprocess(&c).unwrap();
        assert!(matches!(
            p.model_input(),
            Err(PipelineError::SequenceTooLong { len: 3, max: 1, .. })
        ));
    }
}
