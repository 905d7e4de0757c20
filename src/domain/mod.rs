// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, errors and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Index-aligned source/target sentences
pub mod corpus;

// Typed failures of the pipeline
pub mod error;

// Per-epoch training figures
pub mod history;

// Core abstractions (traits) that other layers implement
pub mod traits;
