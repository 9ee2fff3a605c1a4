use xi_rope::Rope;

use crate::parsing::blocks::{BlockKind, BlockLifecycle, BlockNode};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All block spans are within rope bounds
/// - All content spans are contained within their block spans
/// - Blocks appear in document order without overlapping
/// - Every emitted fenced block is closed
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[BlockNode]) {
    let n = rope.len();
    let mut prev_end = 0;
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (rope len: {})",
            b.span,
            n
        );
        assert!(
            b.span.contains(b.content_span),
            "content span not contained in block span: content {:?}, block {:?}",
            b.content_span,
            b.span
        );
        assert!(
            b.span.start >= prev_end,
            "block {:?} overlaps previous block ending at {}",
            b.span,
            prev_end
        );
        prev_end = b.span.end;

        match &b.kind {
            BlockKind::Paragraph => {}
            BlockKind::FencedCode(block) => assert_eq!(
                block.state,
                BlockLifecycle::Closed,
                "fenced code block left open: {:?}",
                b.span
            ),
            BlockKind::CodeLink(block) => assert!(
                block.is_closed(),
                "code-link block left open: {:?}",
                b.span
            ),
        }
    }
}
