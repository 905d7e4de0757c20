// ============================================================
// Layer 2 — Translate Use Case
// ============================================================
//   1. Clean and encode the sentence with the source vocabulary
//      (unknown words are rejected, not guessed)
//   2. Pad to the sequence length the model was trained on
//   3. Predict per-position class probabilities
//   4. Greedy-decode with the target vocabulary

use anyhow::{Context, Result};
use burn::prelude::Backend;
use std::path::Path;

use crate::data::{padder::pad, preprocessor::Preprocessor, vocabulary::Vocabulary};
use crate::domain::traits::Translator;
use crate::infra::{
    artifacts::ArtifactDir,
    checkpoint::CheckpointManager,
    tokenizer_store::TokenizerStore,
};
use crate::ml::{decoder::decode_sequence, inferencer::Inferencer};

pub struct TranslateUseCase<B: Backend> {
    source_vocab: Vocabulary,
    target_vocab: Vocabulary,
    seq_len:      usize,
    inferencer:   Inferencer<B>,
}

impl<B: Backend> TranslateUseCase<B> {
    /// Load vocabularies, sequence length and model from an artifact set.
    pub fn new(artifacts_dir: impl AsRef<Path>, device: B::Device) -> Result<Self> {
        let dir = ArtifactDir::open(artifacts_dir);
        let (source_vocab, target_vocab, seq_len) = TokenizerStore::new(&dir).load()?;
        let inferencer = Inferencer::from_checkpoint(
            &CheckpointManager::new(&dir),
            source_vocab.num_classes(),
            target_vocab.num_classes(),
            device,
        )?;
        Ok(Self { source_vocab, target_vocab, seq_len, inferencer })
    }

    pub fn from_parts(
        source_vocab: Vocabulary,
        target_vocab: Vocabulary,
        seq_len:      usize,
        inferencer:   Inferencer<B>,
    ) -> Self {
        Self { source_vocab, target_vocab, seq_len, inferencer }
    }
}

impl<B: Backend> Translator for TranslateUseCase<B> {
    fn translate(&self, sentence: &str) -> Result<String> {
        let cleaned = Preprocessor::new().clean(sentence);
        let ids = self
            .source_vocab
            .encode(&cleaned)
            .with_context(|| format!("Cannot encode '{cleaned}'"))?;
        let input = pad(&[ids], Some(self.seq_len))?;

        let predictions = self.inferencer.predict(&input)?;
        let probs = predictions
            .first()
            .context("model returned no prediction")?;

        let text = decode_sequence(probs, &self.target_vocab)?;
        tracing::debug!("'{}' → '{}'", cleaned, text);
        Ok(text)
    }
}
