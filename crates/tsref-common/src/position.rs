//! Line/column positions and ranges for source locations.
//!
//! The engine itself works in byte offsets; these types exist for the
//! host-visible results, which use 0-indexed line/character coordinates
//! in the LSP style.

use serde::Serialize;

/// A 0-indexed line/character position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Position {
        Position { line, character }
    }
}

/// A range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Range {
        Range { start, end }
    }
}

/// A file path plus a range within that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file_path: String,
    pub range: Range,
}

/// Precomputed line-start offsets for a source text, used to convert
/// between byte offsets and line/character positions.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line map for `text`. Only `\n` terminates a line; a
    /// preceding `\r` is treated as part of the terminator.
    pub fn build(text: &str) -> LineMap {
        let mut line_starts = vec![0u32];
        for nl in memchr::memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(nl as u32 + 1);
        }
        LineMap { line_starts }
    }

    /// Convert a byte offset into a line/character position.
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position {
            line: line as u32,
            character: offset - self.line_starts[line],
        }
    }

    /// Convert a line/character position back into a byte offset.
    /// Returns `None` when the line is out of range.
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        let start = *self.line_starts.get(position.line as usize)?;
        Some(start + position.character)
    }

    /// Byte offset at which the given 0-indexed line starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip() {
        let text = "let a = 1;\nlet b = 2;\n";
        let map = LineMap::build(text);
        assert_eq!(map.offset_to_position(0), Position::new(0, 0));
        assert_eq!(map.offset_to_position(4), Position::new(0, 4));
        assert_eq!(map.offset_to_position(11), Position::new(1, 0));
        assert_eq!(map.offset_to_position(15), Position::new(1, 4));
        assert_eq!(map.position_to_offset(Position::new(1, 4)), Some(15));
        assert_eq!(map.position_to_offset(Position::new(9, 0)), None);
    }

    #[test]
    fn empty_text_has_one_line() {
        let map = LineMap::build("");
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.offset_to_position(0), Position::new(0, 0));
    }
}
