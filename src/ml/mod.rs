// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here.
//
//   model.rs      - One configurable recurrent translator.
//                   ModelVariant picks the encoder:
//                   • simple: forward GRU over raw ids
//                   • bidirectional: forward + reversed GRU
//                   • embed-bidirectional: embedding, then both GRUs
//                   followed by a shared per-position head:
//                   Dense(ReLU) → Dropout → Dense(num_classes)
//
//   trainer.rs    - fit: Adam, per-position cross entropy,
//                   validation pass, history per epoch
//
//   inferencer.rs - predict: per-position class probabilities
//
//   decoder.rs    - greedy arg-max decode of probabilities to text
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Cho et al. (2014) GRU

/// Recurrent sequence model and its variants
pub mod model;

/// Training loop with validation and history
pub mod trainer;

/// Inference engine - loads a checkpoint and predicts
pub mod inferencer;

/// Greedy decoding of predictions back to text
pub mod decoder;
