// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads two parallel, newline-delimited UTF-8 text files: one
// sentence per line, line i of the source file translated by
// line i of the target file.
//
//   small_vocab_en             small_vocab_fr
//   ──────────────             ──────────────
//   new jersey is ...     ↔    new jersey est ...
//   the united states ... ↔    les états-unis ...
//
// Every line is cleaned by the Preprocessor. Empty lines keep
// their slot so the two files stay aligned; a final trailing
// newline does not add an extra sentence.
//
// Unlike a best-effort document scan, a corpus that cannot be
// read is a hard failure: nothing downstream can work with half
// a parallel corpus.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::data::preprocessor::Preprocessor;
use crate::domain::corpus::ParallelCorpus;
use crate::domain::traits::CorpusSource;

/// A parallel corpus stored as two plain text files
pub struct PlainTextCorpus {
    source_path: PathBuf,
    target_path: PathBuf,
}

impl PlainTextCorpus {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }
}

impl CorpusSource for PlainTextCorpus {
    fn load(&self) -> Result<ParallelCorpus> {
        let source = read_sentences(&self.source_path)?;
        let target = read_sentences(&self.target_path)?;

        tracing::info!(
            "Loaded {} source and {} target lines",
            source.len(),
            target.len()
        );

        ParallelCorpus::new(source, target).with_context(|| {
            format!(
                "'{}' and '{}' are not a usable parallel corpus",
                self.source_path.display(),
                self.target_path.display()
            )
        })
    }
}

/// Read one sentence per line, cleaned.
pub fn read_sentences(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corpus file '{}'", path.display()))?;

    let prep = Preprocessor::new();
    let sentences: Vec<String> = text.lines().map(|line| prep.clean(line)).collect();

    tracing::debug!("Read {} lines from '{}'", sentences.len(), path.display());
    Ok(sentences)
}
