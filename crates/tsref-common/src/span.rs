//! Byte-offset spans over source text.

use serde::Serialize;

/// A half-open byte range `[start, end)` into a source file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }

    /// A span covering `len` bytes starting at `start`.
    pub const fn at(start: u32, len: u32) -> Span {
        Span {
            start,
            end: start + len,
        }
    }

    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` falls inside the half-open range.
    pub const fn contains_pos(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether `other` is fully contained in this span.
    pub const fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub const fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_containment() {
        let span = Span::new(4, 8);
        assert!(span.contains_pos(4));
        assert!(span.contains_pos(7));
        assert!(!span.contains_pos(8));
        assert!(!span.contains_pos(3));
    }

    #[test]
    fn span_at_length() {
        let span = Span::at(10, 3);
        assert_eq!(span.end, 13);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn nested_spans() {
        let outer = Span::new(0, 20);
        let inner = Span::new(5, 9);
        assert!(outer.contains_span(inner));
        assert!(!inner.contains_span(outer));
        assert!(outer.overlaps(inner));
    }
}
