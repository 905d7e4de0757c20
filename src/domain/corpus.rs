// ============================================================
// Layer 3 — Parallel Corpus Domain Type
// ============================================================
// Two index-aligned sequences of sentences: source[i] is the
// sentence whose translation is target[i]. The constructor is
// the only way in, so an existing ParallelCorpus is always
// non-empty and aligned.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelCorpus {
    source: Vec<String>,
    target: Vec<String>,
}

impl ParallelCorpus {
    /// Pair up two sentence lists.
    ///
    /// Fails with `CorpusMismatch` when the line counts differ and
    /// with `EmptyCorpus` when there is nothing to pair.
    pub fn new(source: Vec<String>, target: Vec<String>) -> Result<Self, PipelineError> {
        if source.len() != target.len() {
            return Err(PipelineError::CorpusMismatch {
                source_lines: source.len(),
                target_lines: target.len(),
            });
        }
        if source.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }
        Ok(Self { source, target })
    }

    pub fn source(&self) -> &[String] {
        &self.source
    }

    pub fn target(&self) -> &[String] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_aligned_corpus_is_accepted() {
        let c = ParallelCorpus::new(lines(&["new jersey"]), lines(&["new jersey est"])).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.source()[0], "new jersey");
        assert_eq!(c.target()[0], "new jersey est");
    }

    #[test]
    fn test_mismatched_line_counts_are_rejected() {
        let err = ParallelCorpus::new(lines(&["a", "b"]), lines(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::CorpusMismatch { source_lines: 2, target_lines: 1 }
        ));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = ParallelCorpus::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCorpus));
    }
}
