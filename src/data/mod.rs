// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the two raw corpus files to tensor batches.
//
//   small_vocab_en / small_vocab_fr
//       │
//       ▼
//   PlainTextCorpus   → reads both files, cleans every line
//       │
//       ▼
//   Vocabulary        → first-seen ids per language, 0 = pad
//       │
//       ▼
//   pad               → fixed-width id matrices
//       │
//       ▼
//   TranslationDataset → implements Burn's Dataset trait
//       │
//       ▼
//   TranslationBatcher → stacks samples into tensor batches
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the parallel corpus files
pub mod loader;

/// Cleans raw corpus lines
pub mod preprocessor;

/// Word-level vocabulary with encode/decode
pub mod vocabulary;

/// Right-pads id sequences into a matrix
pub mod padder;

/// Builds vocabularies and matrices for both languages
pub mod pipeline;

/// Word counts for a quick look at the corpus
pub mod stats;

/// Implements Burn's Dataset trait for translation pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Holds out the tail of the data for validation
pub mod splitter;
