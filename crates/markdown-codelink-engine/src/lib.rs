pub mod io;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use parsing::blocks::kinds::{CodeLinkBlock, CodeLinkParser, CodeLinkSettings};
pub use parsing::{ParsedDoc, parse_document, parse_document_with, parse_document_with_settings};
