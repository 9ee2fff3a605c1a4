//! # Block Parsing
//!
//! Two-phase block parsing with a container stack and pluggable fenced block
//! parsers.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (blockquote depth, remainder text, blank status)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` maintains a container stack,
//!    offers fence openers to the registered `FencedBlockParser`s in priority order,
//!    and feeds every following line to the owning parser until it closes
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `BlockKind`, `FencedLeaf`, `ContainerFrame`)
//! - **`kinds`**: Block-specific types with owned delimiters (BlockQuote, CodeFence, CodeLink)
//! - **`parser`**: The `FencedBlockParser` hooks and the `BlockParsers` registry
//! - **`cursor`**: `LineCursor` for column-aware matching within a line
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced blocks are raw zones: no block parsing inside
//! - A fence is closed only by its owning parser (or EOF)
//! - All block nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod cursor;
pub mod kinds;
pub mod open;
pub mod parser;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use cursor::LineCursor;
pub use parser::{BlockParsers, BlockState, FencedBlockParser};
pub use types::{BlockKind, BlockLifecycle, BlockNode, ContainerFrame, FencedLeaf};
