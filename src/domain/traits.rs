// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer talks to
// these traits, never to the concrete loader, store or model.
//
//   - PlainTextCorpus implements CorpusSource
//   - Vocabulary implements Persistable
//   - TranslateUseCase implements Translator
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::corpus::ParallelCorpus;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce an aligned source/target corpus.
pub trait CorpusSource {
    fn load(&self) -> Result<ParallelCorpus>;
}

// ─── Translator ───────────────────────────────────────────────────────────────
/// Any component that can turn a source-language sentence into
/// target-language text.
pub trait Translator {
    fn translate(&self, sentence: &str) -> Result<String>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
pub trait Persistable: Sized {
    /// Save this component's state to the given path
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path.
    fn load(path: &Path) -> Result<Self>;
}
