// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands: `preprocess`, `train`,
// `translate` and `stats`, and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::TrainConfig;
use crate::ml::model::ModelVariant;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build vocabularies and padded matrices from a parallel corpus
    Preprocess(PreprocessArgs),

    /// Train a sequence model on a preprocessed artifact set
    Train(TrainArgs),

    /// Translate one English sentence with a trained model
    Translate(TranslateArgs),

    /// Print word counts for a parallel corpus
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// English file, one sentence per line
    #[arg(long)]
    pub source: String,

    /// French file, line-aligned with --source
    #[arg(long)]
    pub target: String,

    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}

/// Architecture choice as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VariantArg {
    /// One recurrent layer over raw ids
    Simple,
    /// Forward and backward recurrent layers over raw ids
    Bidirectional,
    /// Learned embedding, then a bidirectional layer
    EmbedBidirectional,
}

impl From<VariantArg> for ModelVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Simple             => ModelVariant::Simple,
            VariantArg::Bidirectional      => ModelVariant::Bidirectional,
            VariantArg::EmbedBidirectional => ModelVariant::EmbedBidirectional,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory written by `preprocess`; the model is saved here too
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    #[arg(long, value_enum, default_value_t = VariantArg::EmbedBidirectional)]
    pub variant: VariantArg,

    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    #[arg(long, default_value_t = 1024)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 5e-3)]
    pub lr: f64,

    /// Share of pairs, taken from the end, held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_fraction: f64,

    /// Units per recurrent direction
    #[arg(long, default_value_t = 256)]
    pub hidden_size: usize,

    #[arg(long, default_value_t = 1024)]
    pub dense_size: usize,

    /// Only used by the embed-bidirectional variant
    #[arg(long, default_value_t = 256)]
    pub embedding_dim: usize,

    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Leave pad positions out of the loss
    #[arg(long)]
    pub mask_padding: bool,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            artifacts_dir:       a.artifacts_dir,
            variant:             a.variant.into(),
            epochs:              a.epochs,
            batch_size:          a.batch_size,
            lr:                  a.lr,
            validation_fraction: a.validation_fraction,
            hidden_size:         a.hidden_size,
            dense_size:          a.dense_size,
            embedding_dim:       a.embedding_dim,
            dropout:             a.dropout,
            mask_padding:        a.mask_padding,
            seed:                a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// English sentence to translate
    pub sentence: String,

    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long)]
    pub source: String,

    #[arg(long)]
    pub target: String,

    /// How many of the most frequent words to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}
