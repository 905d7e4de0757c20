// ============================================================
// Layer 4 — Vocabulary Builder / Tokenizer
// ============================================================
// Word-level vocabulary over one language of the corpus.
//
// How ids are assigned:
//   Every sentence is split on whitespace and lowercased. Tokens
//   are visited in document order; the first time a token is
//   seen it gets the next integer, starting at 1. Repeats reuse
//   the id they already have. Punctuation ("." "," "?") was
//   delimited by spaces upstream and is an ordinary token.
//
//   "The quick brown fox jumps over the lazy dog ."
//    the=1 quick=2 brown=3 fox=4 jumps=5 over=6 lazy=7 dog=8 .=9
//
// Id 0 is never handed out: it is the padding id, and decodes
// to the literal "<PAD>" marker.
//
// The inverse table is not stored separately. `tokens[id - 1]`
// IS the id → token direction, so the two directions cannot
// drift apart.
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::HashMap;

use crate::domain::error::PipelineError;

/// Reserved id for padding positions
pub const PAD_ID: u32 = 0;

/// Text emitted when decoding the padding id
pub const PAD_TOKEN: &str = "<PAD>";

/// Split a sentence into lowercase whitespace-delimited tokens.
/// Runs of whitespace collapse and the edges are trimmed.
pub fn tokenize(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence.split_whitespace().map(str::to_lowercase)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    /// Tokens in id order: tokens[0] has id 1
    tokens: Vec<String>,
    index: HashMap<String, u32>,
    /// Number of sentences the vocabulary was built from
    document_count: usize,
}

impl Vocabulary {
    /// Scan `sentences` once and assign ids in first-seen order.
    pub fn build<S: AsRef<str>>(sentences: &[S]) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        let mut index: HashMap<String, u32> = HashMap::new();

        for sentence in sentences {
            for token in tokenize(sentence.as_ref()) {
                if !index.contains_key(&token) {
                    // ids start at 1, so the id is the new length
                    tokens.push(token.clone());
                    index.insert(token, tokens.len() as u32);
                }
            }
        }

        tracing::debug!(
            "Built vocabulary: {} tokens from {} sentences",
            tokens.len(),
            sentences.len()
        );

        Self { tokens, index, document_count: sentences.len() }
    }

    /// Rebuild a vocabulary from tokens listed in id order.
    /// Fails if a token appears twice, since ids must stay unique.
    pub fn from_tokens(tokens: Vec<String>, document_count: usize) -> Result<Self, PipelineError> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), i as u32 + 1).is_some() {
                return Err(PipelineError::DuplicateToken(token.clone()));
            }
        }
        Ok(Self { tokens, index, document_count })
    }

    /// Number of distinct real tokens (the pad id is not counted)
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Number of output classes a classifier over this vocabulary
    /// needs: every token plus the pad class 0
    pub fn num_classes(&self) -> usize {
        self.tokens.len() + 1
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Tokens in id order (index 0 holds id 1)
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Look up a single already-lowercased token
    pub fn id(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// (id, token) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, t.as_str()))
    }

    /// Encode a sentence into ids, one per token.
    ///
    /// Tokens that were never seen while building are rejected
    /// with `UnknownToken`; they are never mapped to the pad id.
    pub fn encode(&self, sentence: &str) -> Result<Vec<u32>, PipelineError> {
        tokenize(sentence)
            .enumerate()
            .map(|(position, token)| match self.index.get(&token) {
                Some(&id) => Ok(id),
                None => Err(PipelineError::UnknownToken { token, position }),
            })
            .collect()
    }

    /// Map one id back to its token. Id 0 gives the pad marker.
    pub fn decode(&self, id: u32) -> Result<&str, PipelineError> {
        if id == PAD_ID {
            return Ok(PAD_TOKEN);
        }
        self.tokens
            .get(id as usize - 1)
            .map(String::as_str)
            .ok_or(PipelineError::UnknownId(id))
    }

    /// Decode a whole id sequence and join it with single spaces
    pub fn decode_ids(&self, ids: &[u32]) -> Result<String, PipelineError> {
        let words = ids
            .iter()
            .map(|&id| self.decode(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(" "))
    }
}
