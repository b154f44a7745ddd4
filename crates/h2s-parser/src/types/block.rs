use serde::Serialize;

/// Nesting bias subtracted from the raw tree depth. The document node sits at
/// depth 0 and `<html>` at depth 1, so body-level elements start near zero.
const DEPTH_BIAS: i32 = 2;

/// One planned extraction site: a qualifying element's byte range in the
/// current document plus the metadata derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Diagnostic nesting depth (tree depth minus a fixed bias).
    pub depth: i32,
    /// Inclusive start byte of the element's opening tag.
    pub start: usize,
    /// Exclusive end byte of the element's closing tag.
    pub end: usize,
    pub component_name: String,
    /// Self-closing placeholder that replaces the range once extracted.
    pub reference_tag: String,
    /// How many bytes the document shrinks by when this block is replaced.
    pub length_delta: isize,
}

impl Block {
    #[must_use]
    pub fn new(range: std::ops::Range<usize>, component_name: String, level: i32) -> Self {
        let reference_tag = format!("<{component_name} />");
        let length_delta = delta_for(range.end - range.start, &reference_tag);
        Self {
            depth: level - DEPTH_BIAS,
            start: range.start,
            end: range.end,
            component_name,
            reference_tag,
            length_delta,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies strictly inside this block's range.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end && self.len() > other.len()
    }

    /// Move both ends of the range left by `delta` bytes.
    pub fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(-delta);
        self.end = self.end.saturating_add_signed(-delta);
    }

    /// Move only the end of the range, for a block that encloses a splice.
    ///
    /// The block gets shorter, so its own length delta is recomputed.
    pub fn shift_end(&mut self, delta: isize) {
        self.end = self.end.saturating_add_signed(-delta);
        self.length_delta = delta_for(self.len(), &self.reference_tag);
    }
}

fn delta_for(len: usize, reference_tag: &str) -> isize {
    signed_len(len) - signed_len(reference_tag.len())
}

#[allow(clippy::cast_possible_wrap)]
const fn signed_len(len: usize) -> isize {
    len as isize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_derives_reference_tag_and_delta() {
        let block = Block::new(10..55, "Card".to_string(), 3);
        assert_eq!(block.reference_tag, "<Card />");
        assert_eq!(block.length_delta, 45 - 8);
        assert_eq!(block.depth, 1);
    }

    #[test]
    fn shift_moves_both_ends() {
        let mut block = Block::new(100..140, "Nav".to_string(), 2);
        block.shift(30);
        assert_eq!((block.start, block.end), (70, 110));
    }

    #[test]
    fn shift_end_keeps_start() {
        let mut block = Block::new(0..140, "Page".to_string(), 1);
        block.shift_end(30);
        assert_eq!((block.start, block.end), (0, 110));
        assert_eq!(block.length_delta, 110 - 8);
    }

    #[test]
    fn shift_keeps_length_delta() {
        let mut block = Block::new(100..140, "Nav".to_string(), 2);
        let before = block.length_delta;
        block.shift(30);
        assert_eq!(block.length_delta, before);
    }

    #[test]
    fn contains_is_strict() {
        let outer = Block::new(0..100, "Outer".to_string(), 1);
        let inner = Block::new(10..40, "Inner".to_string(), 2);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&outer.clone()));
    }
}
