// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   artifacts.rs       - The artifact directory: atomic writes,
//                        the manifest of committed files, and
//                        the padded corpus matrices.
//
//   tokenizer_store.rs - Vocabulary persistence. Saves both
//                        vocabularies and the target sequence
//                        length so inference encodes and pads
//                        the same way training did.
//
//   checkpoint.rs      - Model weights via Burn's CompactRecorder,
//                        plus TrainConfig as JSON so inference
//                        can rebuild the architecture.
//
//   metrics.rs         - Training history, one CSV row per epoch.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Artifact directory, atomic writes and manifest
pub mod artifacts;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary and sequence length persistence
pub mod tokenizer_store;

/// Training history CSV logger
pub mod metrics;
