pub mod block_quote;
pub mod code_fence;
pub mod code_link;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeBlock, CodeFence, CodeFenceParser, Fence, FenceKind, FenceOpen};
pub use code_link::{CodeLinkBlock, CodeLinkParser, CodeLinkSettings};
