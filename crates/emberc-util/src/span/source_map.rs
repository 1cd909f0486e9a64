//! Source map for managing source files and computing line/column from byte offsets.

use std::sync::Arc;

use super::{FileId, Span};

/// A source file with its content and precomputed line-start table.
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    name: String,
    content: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    pub fn new(id: usize, name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self {
            id: FileId(id),
            name: name.into(),
            content,
            line_starts,
        }
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        line_starts.into()
    }

    #[inline]
    pub fn id(&self) -> FileId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Resolve a byte offset to a 1-based `(line, column)` pair. `column` is
    /// a byte offset within the line, not a grapheme count (§6: positions
    /// are byte offsets throughout).
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = (offset - line_start) as u32 + 1;
        (line_idx as u32 + 1, column)
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.line_col(start);
        Span::with_file(start, end, self.id, line, column)
    }
}

/// A registry of [`SourceFile`]s, assigning [`FileId`]s in insertion order.
///
/// Per §5, files are independent: the source map never shares mutable state
/// across files beyond the append-only `Vec` below.
#[derive(Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let id = self.files.len();
        let file = SourceFile::new(id, name, content);
        let file_id = file.id();
        self.files.push(file);
        file_id
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_resolves_first_line() {
        let file = SourceFile::new(0, "a.em", "let x = 1;\nlet y = 2;\n");
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(4), (1, 5));
    }

    #[test]
    fn line_col_resolves_second_line() {
        let file = SourceFile::new(0, "a.em", "let x = 1;\nlet y = 2;\n");
        let second_line_start = "let x = 1;\n".len();
        assert_eq!(file.line_col(second_line_start), (2, 1));
    }

    #[test]
    fn source_map_assigns_sequential_ids() {
        let mut map = SourceMap::new();
        let a = map.add_file("a.em", "let x = 1;");
        let b = map.add_file("b.em", "let y = 2;");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(map.get(a).unwrap().content(), "let x = 1;");
        assert_eq!(map.get(b).unwrap().content(), "let y = 2;");
    }
}
