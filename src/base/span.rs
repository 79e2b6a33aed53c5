pub use text_size::{TextRange, TextSize};

use super::position::Position;

/// Zero-indexed line and UTF-8 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of each line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let lc = self.line_col(offset);
        Position::new(lc.line as usize, lc.col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("package main\n\nfunc f() {}\n");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 0, col: 8 });
        assert_eq!(index.line_col(TextSize::new(14)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(19)), LineCol { line: 2, col: 5 });
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        let index = LineIndex::new("a\nbc");
        assert_eq!(index.position(TextSize::new(3)).to_string(), "2:2");
    }
}
