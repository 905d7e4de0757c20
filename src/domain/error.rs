// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every failure the preprocessing, training and persistence
// steps can report in domain terms. Callers in the upper layers
// wrap these in anyhow with extra context; tests match on the
// variants directly.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use thiserror::Error;

use crate::domain::history::TrainingHistory;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A sentence contains a token the vocabulary was never built with.
    /// There is no out-of-vocabulary id: unknown tokens are rejected.
    #[error("unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },

    /// An id that is neither the pad id nor assigned to a token
    #[error("id {0} is not assigned in this vocabulary")]
    UnknownId(u32),

    /// A row would have to be truncated to fit the padded width
    #[error("sequence {row} has {len} tokens, longer than the padded length {max}")]
    SequenceTooLong { row: usize, len: usize, max: usize },

    /// A stored id matrix whose data does not fill `rows x width`
    #[error("matrix claims {rows} x {width} ids but holds {len}")]
    MalformedMatrix { rows: usize, width: usize, len: usize },

    #[error("corpus line counts differ: {source_lines} source vs {target_lines} target")]
    CorpusMismatch { source_lines: usize, target_lines: usize },

    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("duplicate token '{0}' in vocabulary")]
    DuplicateToken(String),

    /// A persisted vocabulary whose word index disagrees with its token list
    #[error("vocabulary is corrupt: {0}")]
    CorruptVocabulary(String),

    /// Training produced a NaN or infinite loss. `history` keeps every
    /// epoch that finished before the divergence.
    #[error("training diverged in epoch {epoch}: loss is not finite ({} epochs completed)", .history.len())]
    NonFiniteLoss { epoch: usize, history: TrainingHistory },

    #[error("no training samples left after holding out {validation_fraction} for validation")]
    EmptyTrainingSet { validation_fraction: f64 },

    /// A training setting outside the range the model can use
    #[error("invalid {name} = {value}: {reason}")]
    InvalidConfig { name: &'static str, value: String, reason: &'static str },

    /// Some stage did not finish writing its files
    #[error("artifact set in '{dir}' is inconsistent, missing: {}", .missing.join(", "))]
    InconsistentArtifacts { dir: String, missing: Vec<String> },
}
