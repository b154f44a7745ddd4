//! Offset reconciliation after a block has been spliced out of the document.

use crate::types::Block;

/// Correct the ranges of `pending` blocks after `popped` was replaced by its
/// reference tag.
///
/// Blocks at or after the popped block move left by its length delta. Blocks
/// that end before it are untouched. A block that encloses the popped block
/// keeps its start and only its end moves. The popped block is never an
/// ancestor of a pending block, since descendants are always popped first.
pub fn reconcile(popped: &Block, pending: &mut [Block]) {
    for block in pending.iter_mut() {
        if block.start >= popped.start {
            block.shift(popped.length_delta);
        } else if block.end >= popped.end {
            block.shift_end(popped.length_delta);
        }
    }
}
