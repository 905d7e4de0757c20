// ============================================================
// Layer 4 — Corpus Statistics
// ============================================================
// Quick summary of one language of the corpus, printed before
// preprocessing so the vocabulary size and the token mix can
// be sanity-checked:
//
//   1823250 English words.
//   227 unique English words.
//   10 Most common words in the English dataset:
//   "is" "," "." "in" "it" "during" "the" "but" "and" "sometimes"
//
// Counts use the same tokenisation as the Vocabulary, so the
// unique count equals the vocabulary size.

use std::collections::HashMap;

use crate::data::vocabulary::tokenize;

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    pub total_words:  usize,
    pub unique_words: usize,
    /// (token, count), most frequent first; equal counts keep
    /// first-seen order
    pub most_common:  Vec<(String, usize)>,
}

impl CorpusStats {
    pub fn from_sentences<S: AsRef<str>>(sentences: &[S], top_n: usize) -> Self {
        // first-seen position is kept alongside the count for stable ties
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut total = 0usize;

        for sentence in sentences {
            for token in tokenize(sentence.as_ref()) {
                let seen = counts.len();
                counts.entry(token).or_insert((0, seen)).0 += 1;
                total += 1;
            }
        }

        let unique_words = counts.len();
        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(top_n);

        Self {
            total_words: total,
            unique_words,
            most_common: ranked.into_iter().map(|(t, c, _)| (t, c)).collect(),
        }
    }
}
