// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Saves and restores the two vocabularies and the target
// sequence length, so inference encodes and pads exactly the
// way training did.
//
//   source_tokenizer.json   target_tokenizer.json
//   {
//     "class_name": "Tokenizer",
//     "config": {
//       "lower": true,
//       "split": " ",
//       "document_count": 137861,
//       "tokens": ["new", "jersey", "is", ...],    ← id order
//       "word_index": {"new": 1, "jersey": 2, ...}
//     }
//   }
//
//   sequence_length.json:  21
//
// `tokens` carries the insertion order the ids came from;
// `word_index` is the same mapping keyed by token. On load the
// two must agree, otherwise the file was edited or damaged.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

use crate::data::vocabulary::Vocabulary;
use crate::domain::error::PipelineError;
use crate::domain::traits::Persistable;
use crate::infra::artifacts::{write_atomic, ArtifactDir};

pub const SOURCE_TOKENIZER_FILE: &str = "source_tokenizer.json";
pub const TARGET_TOKENIZER_FILE: &str = "target_tokenizer.json";
pub const SEQUENCE_LENGTH_FILE:  &str = "sequence_length.json";

const CLASS_NAME: &str = "Tokenizer";

#[derive(Debug, Serialize, Deserialize)]
struct TokenizerRecord {
    class_name: String,
    config:     TokenizerRecordConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenizerRecordConfig {
    lower:          bool,
    split:          String,
    document_count: usize,
    tokens:         Vec<String>,
    word_index:     BTreeMap<String, u32>,
}

impl Persistable for Vocabulary {
    fn save(&self, path: &Path) -> Result<()> {
        let record = TokenizerRecord {
            class_name: CLASS_NAME.to_string(),
            config: TokenizerRecordConfig {
                lower:          true,
                split:          " ".to_string(),
                document_count: self.document_count(),
                tokens:         self.tokens().to_vec(),
                word_index:     self.iter().map(|(id, t)| (t.to_string(), id)).collect(),
            },
        };
        write_atomic(path, serde_json::to_string(&record)?.as_bytes())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read tokenizer '{}'", path.display()))?;
        let record: TokenizerRecord = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a tokenizer file", path.display()))?;

        if record.class_name != CLASS_NAME {
            return Err(PipelineError::CorruptVocabulary(format!(
                "unexpected class_name '{}'",
                record.class_name
            ))
            .into());
        }

        let cfg   = record.config;
        let vocab = Vocabulary::from_tokens(cfg.tokens, cfg.document_count)?;

        let rebuilt: BTreeMap<String, u32> = vocab.iter().map(|(id, t)| (t.to_string(), id)).collect();
        if rebuilt != cfg.word_index {
            return Err(PipelineError::CorruptVocabulary(format!(
                "word_index in '{}' does not match its token order",
                path.display()
            ))
            .into());
        }

        Ok(vocab)
    }
}

pub struct TokenizerStore<'a> {
    dir: &'a ArtifactDir,
}

impl<'a> TokenizerStore<'a> {
    pub fn new(dir: &'a ArtifactDir) -> Self {
        Self { dir }
    }

    /// Write both vocabularies and the target length, then commit them.
    pub fn save(&self, source: &Vocabulary, target: &Vocabulary, sequence_length: usize) -> Result<()> {
        source.save(&self.dir.file(SOURCE_TOKENIZER_FILE))?;
        target.save(&self.dir.file(TARGET_TOKENIZER_FILE))?;
        write_atomic(
            &self.dir.file(SEQUENCE_LENGTH_FILE),
            serde_json::to_string(&sequence_length)?.as_bytes(),
        )?;
        self.dir.commit(&[SOURCE_TOKENIZER_FILE, TARGET_TOKENIZER_FILE, SEQUENCE_LENGTH_FILE])?;

        tracing::info!(
            "Tokenizers saved to '{}' (source={}, target={}, sequence_length={})",
            self.dir.path().display(),
            source.size(),
            target.size(),
            sequence_length
        );
        Ok(())
    }

    /// Load (source, target, sequence_length).
    pub fn load(&self) -> Result<(Vocabulary, Vocabulary, usize)> {
        self.dir.require(&[SOURCE_TOKENIZER_FILE, TARGET_TOKENIZER_FILE, SEQUENCE_LENGTH_FILE])?;

        let source = Vocabulary::load(&self.dir.file(SOURCE_TOKENIZER_FILE))?;
        let target = Vocabulary::load(&self.dir.file(TARGET_TOKENIZER_FILE))?;

        let path = self.dir.file(SEQUENCE_LENGTH_FILE);
        let s = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        let sequence_length: usize = serde_json::from_str(s.trim())
            .with_context(|| format!("'{}' must hold a bare integer", path.display()))?;

        Ok((source, target, sequence_length))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp   = tempfile::tempdir().unwrap();
        let dir   = ArtifactDir::create(tmp.path()).unwrap();
        let store = TokenizerStore::new(&dir);

        let en = Vocabulary::build(&["he saw a old yellow truck ."]);
        let fr = Vocabulary::build(&["il a vu un vieux camion jaune ."]);
        store.save(&en, &fr, 21).unwrap();

        let (en2, fr2, len) = store.load().unwrap();
        assert_eq!(en2, en);
        assert_eq!(fr2, fr);
        assert_eq!(len, 21);
        assert_eq!(fs::read_to_string(dir.file(SEQUENCE_LENGTH_FILE)).unwrap(), "21");
    }

    #[test]
    fn test_word_index_mismatch_is_rejected() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tok.json");
        fs::write(
            &path,
            r#"{"class_name":"Tokenizer","config":{"lower":true,"split":" ","document_count":1,
               "tokens":["a","b"],"word_index":{"a":2,"b":1}}}"#,
        )
        .unwrap();

        let err = Vocabulary::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::CorruptVocabulary(_))
        ));
    }

    #[test]
    fn test_load_without_commit_is_inconsistent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ArtifactDir::create(tmp.path()).unwrap();
        Vocabulary::build(&["a"]).save(&dir.file(SOURCE_TOKENIZER_FILE)).unwrap();
        assert!(TokenizerStore::new(&dir).load().is_err());
    }
}
