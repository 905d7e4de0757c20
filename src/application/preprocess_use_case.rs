// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Turns the two raw corpus files into a fresh artifact set:
//
//   Step 1: Load and align both files           (Layer 4 - data)
//   Step 2: Report corpus statistics            (Layer 4 - data)
//   Step 3: Vocabularies + padded matrices      (Layer 4 - data)
//   Step 4: Start a new set, save the matrices  (Layer 6 - infra)
//   Step 5: Save tokenizers + sequence length   (Layer 6 - infra)
//
// Input errors (unreadable file, empty corpus, mismatched line
// counts) surface in Step 1, before anything is written.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{
    loader::PlainTextCorpus,
    pipeline::{preprocess, Preprocessed},
    stats::CorpusStats,
};
use crate::domain::{corpus::ParallelCorpus, traits::CorpusSource};
use crate::infra::{
    artifacts::{ArtifactDir, CorpusMatrices, CORPUS_FILE},
    tokenizer_store::TokenizerStore,
};

/// How many of the most frequent words the stats report lists
pub const DEFAULT_TOP_WORDS: usize = 10;

pub struct PreprocessUseCase {
    source_path:   PathBuf,
    target_path:   PathBuf,
    artifacts_dir: PathBuf,
}

impl PreprocessUseCase {
    pub fn new(
        source_path:   impl Into<PathBuf>,
        target_path:   impl Into<PathBuf>,
        artifacts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_path:   source_path.into(),
            target_path:   target_path.into(),
            artifacts_dir: artifacts_dir.into(),
        }
    }

    pub fn execute(&self) -> Result<Preprocessed> {
        // ── Step 1: Load ──────────────────────────────────────────────────────
        let corpus = PlainTextCorpus::new(&self.source_path, &self.target_path).load()?;

        // ── Step 2: Statistics ────────────────────────────────────────────────
        let (source_stats, target_stats) = corpus_stats(&corpus, DEFAULT_TOP_WORDS);
        log_stats("source", &source_stats);
        log_stats("target", &target_stats);

        // ── Step 3: Tokenize + pad ────────────────────────────────────────────
        let prep = preprocess(&corpus)?;

        // ── Step 4: Fresh artifact set ────────────────────────────────────────
        let dir = ArtifactDir::create(&self.artifacts_dir)?;
        dir.reset()?;
        dir.save_corpus(&CorpusMatrices {
            source: prep.source.matrix.clone(),
            target: prep.target.matrix.clone(),
        })?;
        dir.commit(&[CORPUS_FILE])?;

        // ── Step 5: Tokenizers ────────────────────────────────────────────────
        TokenizerStore::new(&dir).save(&prep.source.vocab, &prep.target.vocab, prep.target_max_len())?;

        Ok(prep)
    }
}

/// Statistics for the source and target side of a corpus.
pub fn corpus_stats(corpus: &ParallelCorpus, top_n: usize) -> (CorpusStats, CorpusStats) {
    (
        CorpusStats::from_sentences(corpus.source(), top_n),
        CorpusStats::from_sentences(corpus.target(), top_n),
    )
}

fn log_stats(side: &str, stats: &CorpusStats) {
    let words: Vec<&str> = stats.most_common.iter().map(|(w, _)| w.as_str()).collect();
    tracing::info!(
        "{} corpus: {} words, {} unique, most common: {}",
        side,
        stats.total_words,
        stats.unique_words,
        words.join(" ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::infra::tokenizer_store::SEQUENCE_LENGTH_FILE;

    #[test]
    fn test_execute_writes_a_committed_set() {
        let tmp = tempfile::tempdir().unwrap();
        let en  = tmp.path().join("en");
        let fr  = tmp.path().join("fr");
        fs::write(&en, "he saw a truck .\nshe is here\n").unwrap();
        fs::write(&fr, "il a vu un camion .\nelle est ici\n").unwrap();
        let out = tmp.path().join("artifacts");

        let prep = PreprocessUseCase::new(&en, &fr, &out).execute().unwrap();
        assert_eq!(prep.rows(), 2);
        assert_eq!(prep.target_max_len(), 6);

        let dir = ArtifactDir::open(&out);
        let (en_vocab, fr_vocab, len) = TokenizerStore::new(&dir).load().unwrap();
        assert_eq!(en_vocab, prep.source.vocab);
        assert_eq!(fr_vocab, prep.target.vocab);
        assert_eq!(len, 6);
        assert_eq!(fs::read_to_string(out.join(SEQUENCE_LENGTH_FILE)).unwrap(), "6");
        assert_eq!(dir.load_corpus().unwrap().target, prep.target.matrix);
    }

    #[test]
    fn test_mismatched_files_write_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let en  = tmp.path().join("en");
        let fr  = tmp.path().join("fr");
        fs::write(&en, "a\nb\n").unwrap();
        fs::write(&fr, "x\n").unwrap();
        let out = tmp.path().join("artifacts");

        assert!(PreprocessUseCase::new(&en, &fr, &out).execute().is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_whitespace_only_files_write_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let en  = tmp.path().join("en");
        let fr  = tmp.path().join("fr");
        fs::write(&en, "\n\n").unwrap();
        fs::write(&fr, "  \n\n").unwrap();
        let out = tmp.path().join("artifacts");

        let err = PreprocessUseCase::new(&en, &fr, &out).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::domain::error::PipelineError>(),
            Some(crate::domain::error::PipelineError::EmptyCorpus)
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_corpus_stats_per_side() {
        let corpus = ParallelCorpus::new(
            vec!["a a b".to_string()],
            vec!["x".to_string()],
        )
        .unwrap();
        let (en, fr) = corpus_stats(&corpus, 1);
        assert_eq!(en.most_common, vec![("a".to_string(), 2)]);
        assert_eq!(fr.total_words, 1);
    }
}
