//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts parsed blocks to a stable `Snap` with a plain-text
//!   rendering for `insta` inline snapshots
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   content spans contained in block spans, closed fenced blocks)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
