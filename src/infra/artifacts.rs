// ============================================================
// Layer 6 — Artifact Directory
// ============================================================
// Every stage writes several files into one directory, and a
// later stage (or another process) reads them back as a set.
// A crash between two writes must not leave a set that looks
// complete, so:
//
//   1. each file is written to "<name>.tmp" and renamed into
//      place (a reader never sees half a file)
//   2. manifest.json lists the files whose stage finished; a
//      stage adds its names only after ALL its writes succeeded
//   3. preprocess starts a fresh set by clearing the manifest;
//      train uncommits the previous run's files before it
//      overwrites any of them
//   4. readers call `require` before loading anything
//
// Layout:
//   artifacts/
//     manifest.json          ← committed file names
//     corpus.json            ← padded source/target matrices
//     source_tokenizer.json  ← written by TokenizerStore
//     target_tokenizer.json
//     sequence_length.json
//     train_config.json      ← written by CheckpointManager
//     model.mpk
//     history.csv            ← written by MetricsLogger
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::data::padder::PaddedBatch;
use crate::domain::error::PipelineError;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CORPUS_FILE:   &str = "corpus.json";

/// Write `bytes` to `path` through a temporary sibling and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)
        .with_context(|| format!("Cannot write '{}'", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Cannot move '{}' into place", path.display()))?;
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    files: BTreeSet<String>,
}

/// Padded matrices produced by `preprocess`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMatrices {
    pub source: PaddedBatch,
    pub target: PaddedBatch,
}

pub struct ArtifactDir {
    dir: PathBuf,
}

impl ArtifactDir {
    /// Open (and create, like `mkdir -p`) an artifact directory.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create artifact directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing artifact directory without creating it.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_manifest(&self) -> Result<Manifest> {
        let path = self.file(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid manifest", path.display()))
    }

    /// Forget every committed file. Called when a new set starts.
    pub fn reset(&self) -> Result<()> {
        let path = self.file(MANIFEST_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Cannot remove '{}'", path.display()))?;
        }
        Ok(())
    }

    /// Mark `names` as completely written.
    pub fn commit(&self, names: &[&str]) -> Result<()> {
        let mut manifest = self.read_manifest()?;
        manifest.files.extend(names.iter().map(|n| n.to_string()));
        write_atomic(&self.file(MANIFEST_FILE), serde_json::to_string_pretty(&manifest)?.as_bytes())?;
        tracing::debug!("Committed {:?} in '{}'", names, self.dir.display());
        Ok(())
    }

    /// Drop `names` from the manifest before they are rewritten.
    /// Names that were never committed are ignored.
    pub fn uncommit(&self, names: &[&str]) -> Result<()> {
        let mut manifest = self.read_manifest()?;
        let before = manifest.files.len();
        manifest.files.retain(|f| !names.contains(&f.as_str()));
        if manifest.files.len() != before {
            write_atomic(&self.file(MANIFEST_FILE), serde_json::to_string_pretty(&manifest)?.as_bytes())?;
            tracing::debug!("Uncommitted {:?} in '{}'", names, self.dir.display());
        }
        Ok(())
    }

    /// Fail with `InconsistentArtifacts` unless every name is
    /// committed and present on disk.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        let manifest = self.read_manifest()?;
        let missing: Vec<String> = names
            .iter()
            .filter(|n| !manifest.files.contains(**n) || !self.file(n).exists())
            .map(|n| n.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::InconsistentArtifacts {
                dir: self.dir.display().to_string(),
                missing,
            }
            .into())
        }
    }

    pub fn save_corpus(&self, matrices: &CorpusMatrices) -> Result<()> {
        let json = serde_json::to_string(matrices)?;
        write_atomic(&self.file(CORPUS_FILE), json.as_bytes())
    }

    pub fn load_corpus(&self) -> Result<CorpusMatrices> {
        let path = self.file(CORPUS_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'. Run 'preprocess' first.", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is damaged. Rerun 'preprocess'.", path.display()))
    }
}
