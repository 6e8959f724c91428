//! Rewindable sequential view over the input lines
//!
//!     The whole input is split into lines before parsing starts. Every parser works on a
//!     [`Cursor`]: it consumes lines with [`Cursor::next_line`] and, when an optimistic
//!     sub-parse looked one line too far, gives it back with [`Cursor::rewind`].
//!
//!     All operations are total: reading past the end yields `None`, rewinding at the start
//!     is a no-op.

/// A cursor over an owned list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    lines: Vec<String>,
    offset: usize,
}

impl Cursor {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines, offset: 0 }
    }

    /// Split a source text into lines, normalizing `\r\n` and `\r` to `\n` first.
    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self::new(normalized.split('\n').map(str::to_string).collect())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(Into::into).collect())
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn next_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.offset)?.clone();
        self.offset += 1;
        Some(line)
    }

    pub fn rewind(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Splice `lines` at the current position, they are the next ones returned.
    pub fn insert(&mut self, lines: Vec<String>) {
        let at = self.offset.min(self.lines.len());
        self.lines.splice(at..at, lines);
    }

    /// Overwrite the line just consumed.
    pub fn set_current_line(&mut self, value: String) {
        if self.offset > 0 {
            if let Some(line) = self.lines.get_mut(self.offset - 1) {
                *line = value;
            }
        }
    }

    /// Skip blank lines, `//` line comments and `////` block comments, returning the first
    /// meaningful line.
    ///
    /// An opening `////` without a closing marker is skipped alone and the lines after it are
    /// read normally.
    pub fn skip_blank_and_comments(&mut self) -> Option<String> {
        while let Some(line) = self.next_line() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "////" {
                if let Some(end) = self.lines[self.offset..]
                    .iter()
                    .position(|it| it.trim() == "////")
                {
                    self.offset += end + 1;
                }
                continue;
            }
            if Self::is_comment(&line) {
                continue;
            }
            return Some(line);
        }
        None
    }

    pub fn is_comment(line: &str) -> bool {
        line.starts_with("//") && !line.starts_with("////")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reads_lines_in_order_then_ends() {
        let mut cursor = Cursor::from_text("a\nb");
        assert_eq!(cursor.next_line().as_deref(), Some("a"));
        assert_eq!(cursor.next_line().as_deref(), Some("b"));
        assert_eq!(cursor.next_line(), None);
        assert_eq!(cursor.next_line(), None);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn normalizes_line_endings() {
        let cursor = Cursor::from_text("a\r\nb\rc");
        assert_eq!(cursor.lines(), &["a", "b", "c"]);
    }

    #[test]
    fn rewind_at_start_is_a_no_op() {
        let mut cursor = Cursor::from_text("a\nb");
        cursor.rewind();
        cursor.rewind();
        assert_eq!(cursor.line_number(), 0);
        assert_eq!(cursor.next_line().as_deref(), Some("a"));
        cursor.rewind();
        assert_eq!(cursor.next_line().as_deref(), Some("a"));
    }

    #[test]
    fn insert_splices_at_current_position() {
        let mut cursor = Cursor::from_text("a\nd");
        cursor.next_line();
        cursor.insert(vec!["b".into(), "c".into()]);
        let rest: Vec<_> = std::iter::from_fn(|| cursor.next_line()).collect();
        assert_eq!(rest, vec!["b", "c", "d"]);
    }

    #[test]
    fn set_current_line_overwrites_consumed_line() {
        let mut cursor = Cursor::from_text("{a}\nb");
        cursor.next_line();
        cursor.set_current_line("value".into());
        cursor.rewind();
        assert_eq!(cursor.next_line().as_deref(), Some("value"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut cursor = Cursor::from_text("\n// a comment\n\n////\nhidden\n////\ncontent");
        assert_eq!(cursor.skip_blank_and_comments().as_deref(), Some("content"));
    }

    #[test]
    fn unterminated_block_comment_falls_through() {
        let mut cursor = Cursor::from_text("////\nvisible");
        assert_eq!(cursor.skip_blank_and_comments().as_deref(), Some("visible"));
    }

    #[test]
    fn block_comment_closing_on_next_line() {
        let mut cursor = Cursor::from_text("////\n////\nafter");
        assert_eq!(cursor.skip_blank_and_comments().as_deref(), Some("after"));
    }

    proptest! {
        #[test]
        fn rewind_never_underflows(lines in proptest::collection::vec("[a-z]{0,5}", 0..10), steps in 0usize..20) {
            let mut cursor = Cursor::new(lines.clone());
            for _ in 0..steps {
                cursor.next_line();
            }
            for _ in 0..steps + 2 {
                cursor.rewind();
            }
            prop_assert_eq!(cursor.line_number(), 0);
            prop_assert_eq!(cursor.next_line(), lines.first().cloned());
        }
    }
}
