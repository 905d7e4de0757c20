// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// Corpus files → vocabularies, matrices, tokenizer files
pub mod preprocess_use_case;

// Artifact set → trained model
pub mod train_use_case;

// Trained model + sentence → translation
pub mod translate_use_case;
