// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap` and hands every subcommand to a Layer 2 use case.
//
//   1. `preprocess` - corpus files → artifact set
//   2. `train`      - artifact set → trained model
//   3. `translate`  - trained model + sentence → French
//   4. `stats`      - word counts for a corpus
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PreprocessArgs, StatsArgs, TrainArgs, TranslateArgs};

use crate::data::stats::CorpusStats;

/// Training runs on the GPU through WGPU, with autodiff on top
pub type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

/// Inference needs no gradients
pub type InferBackend = burn::backend::Wgpu;

#[derive(Parser, Debug)]
#[command(
    name = "rnn-translate",
    version = "0.1.0",
    about = "Preprocess an English-French corpus, train a recurrent model, translate sentences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Train(args)      => run_train(args),
            Commands::Translate(args)  => run_translate(args),
            Commands::Stats(args)      => run_stats(args),
        }
    }
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let prep = PreprocessUseCase::new(&args.source, &args.target, &args.artifacts_dir).execute()?;

    println!("Data Preprocessed");
    println!("Max English sentence length: {}", prep.source_max_len());
    println!("Max French sentence length: {}", prep.target_max_len());
    println!("English vocabulary size: {}", prep.source.vocab.size());
    println!("French vocabulary size: {}", prep.target.vocab.size());
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Training from artifacts in: {}", args.artifacts_dir);
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    let history = TrainUseCase::<TrainBackend>::new(args.into(), device).execute()?;

    match history.last() {
        Some(m) => println!(
            "Training complete. Final val_loss={:.4} val_accuracy={:.4}",
            m.val_loss, m.val_accuracy
        ),
        None => println!("Training complete."),
    }
    if let Some(best) = history.best_epoch() {
        println!("Best epoch: {} (val_loss={:.4})", best.epoch, best.val_loss);
    }
    Ok(())
}

fn run_translate(args: TranslateArgs) -> Result<()> {
    use crate::application::translate_use_case::TranslateUseCase;
    use crate::domain::traits::Translator;

    let use_case = TranslateUseCase::<InferBackend>::new(&args.artifacts_dir, Default::default())?;
    println!("{}", use_case.translate(&args.sentence)?);
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::preprocess_use_case::corpus_stats;
    use crate::data::loader::PlainTextCorpus;
    use crate::domain::traits::CorpusSource;

    let corpus = PlainTextCorpus::new(&args.source, &args.target).load()?;
    let (source, target) = corpus_stats(&corpus, args.top);
    print_stats("English", &source);
    print_stats("French", &target);
    Ok(())
}

fn print_stats(language: &str, stats: &CorpusStats) {
    println!("{} {} words.", stats.total_words, language);
    println!("{} unique {} words.", stats.unique_words, language);
    let words: Vec<String> = stats
        .most_common
        .iter()
        .map(|(w, _)| format!("\"{w}\""))
        .collect();
    println!("{} most common words in the {} dataset:", stats.most_common.len(), language);
    println!("{}", words.join(" "));
    println!();
}
