use std::ops::Range;

/// Text plus caret, anchor and IME composition range, all in char indices.
/// The selection is the span between anchor and caret.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EditBuffer {
    text: String,
    caret: usize,
    anchor: usize,
    marked: Option<Range<usize>>,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            caret: end,
            anchor: end,
            marked: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        if self.anchor == self.caret {
            None
        } else {
            Some(self.anchor.min(self.caret)..self.anchor.max(self.caret))
        }
    }

    /// Selection, or the empty range at the caret.
    pub fn selection_or_caret(&self) -> Range<usize> {
        self.selection().unwrap_or(self.caret..self.caret)
    }

    pub fn is_reversed(&self) -> bool {
        self.caret < self.anchor
    }

    pub fn marked(&self) -> Option<Range<usize>> {
        self.marked.clone()
    }

    pub fn set_marked(&mut self, marked: Option<Range<usize>>) {
        let len = self.len();
        self.marked = marked
            .map(|range| range.start.min(len)..range.end.min(len))
            .filter(|range| range.start < range.end);
    }

    /// Replaces the whole text from outside, parking the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    pub fn selected_text(&self) -> String {
        match self.selection() {
            Some(range) => self.slice(range),
            None => String::new(),
        }
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        self.text
            .chars()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .collect()
    }

    pub fn select(&mut self, anchor: usize, caret: usize) {
        let len = self.len();
        self.anchor = anchor.min(len);
        self.caret = caret.min(len);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len());
    }

    pub fn move_to(&mut self, target: usize, extend: bool) {
        self.caret = target.min(self.len());
        if !extend {
            self.anchor = self.caret;
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        match self.selection() {
            Some(range) if !extend => self.move_to(range.start, false),
            _ => self.move_to(self.caret.saturating_sub(1), extend),
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        match self.selection() {
            Some(range) if !extend => self.move_to(range.end, false),
            _ => self.move_to(self.caret + 1, extend),
        }
    }

    pub fn move_home(&mut self, extend: bool) {
        let (line_start, _) = self.line_bounds(self.caret);
        self.move_to(line_start, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        let (_, line_end) = self.line_bounds(self.caret);
        self.move_to(line_end, extend);
    }

    /// Moves to the same column on the previous line, clamped to that line's end.
    /// On the first line the caret goes to the start.
    pub fn move_up(&mut self, extend: bool) {
        let (line, col) = self.line_col(self.caret);
        if line == 0 {
            self.move_to(0, extend);
            return;
        }
        self.move_to(self.column_on_line(line - 1, col), extend);
    }

    /// Moves to the same column on the next line; on the last line, to the end.
    pub fn move_down(&mut self, extend: bool) {
        let (line, col) = self.line_col(self.caret);
        let (last_line, _) = self.line_col(self.len());
        if line >= last_line {
            self.move_to(self.len(), extend);
            return;
        }
        self.move_to(self.column_on_line(line + 1, col), extend);
    }

    fn column_on_line(&self, line: usize, col: usize) -> usize {
        let (start, end) = self.line_bounds(self.line_start(line));
        (start + col).min(end)
    }

    /// Replaces `range` with `insert` and parks the caret after the inserted text.
    pub fn replace(&mut self, range: Range<usize>, insert: &str) {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        let byte_start = byte_index(&self.text, start);
        let byte_end = byte_index(&self.text, end);
        self.text.replace_range(byte_start..byte_end, insert);
        self.marked = None;
        self.move_to(start + insert.chars().count(), false);
    }

    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let range = self.marked().unwrap_or_else(|| self.selection_or_caret());
        self.replace(range, text);
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        if let Some(range) = self.selection() {
            self.replace(range, "");
            return true;
        }
        if self.caret == 0 {
            return false;
        }
        self.replace(self.caret - 1..self.caret, "");
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if let Some(range) = self.selection() {
            self.replace(range, "");
            return true;
        }
        if self.caret >= self.len() {
            return false;
        }
        self.replace(self.caret..self.caret + 1, "");
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Zero-based line and column of a char index.
    pub fn line_col(&self, index: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(index) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Char index of the first character on `line`, clamped to the text.
    pub fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        let mut seen = 0;
        for (index, ch) in self.text.chars().enumerate() {
            if ch == '\n' {
                seen += 1;
                if seen == line {
                    return index + 1;
                }
            }
        }
        self.len()
    }

    fn line_bounds(&self, index: usize) -> (usize, usize) {
        let (line, _) = self.line_col(index);
        let start = self.line_start(line);
        let end = self
            .text
            .chars()
            .enumerate()
            .skip(start)
            .find(|(_, ch)| *ch == '\n')
            .map(|(index, _)| index)
            .unwrap_or(self.len());
        (start, end)
    }

    pub fn utf16_from_char(&self, char_index: usize) -> usize {
        self.text
            .chars()
            .take(char_index)
            .map(char::len_utf16)
            .sum()
    }

    pub fn char_from_utf16(&self, utf16_index: usize) -> usize {
        let mut utf16 = 0;
        let mut chars = 0;
        for ch in self.text.chars() {
            if utf16 >= utf16_index {
                break;
            }
            utf16 += ch.len_utf16();
            chars += 1;
        }
        chars
    }

    pub fn chars_from_utf16(&self, range: Range<usize>) -> Range<usize> {
        let start = self.char_from_utf16(range.start);
        let end = self.char_from_utf16(range.end);
        start.min(end)..start.max(end)
    }

    pub fn utf16_from_chars(&self, range: Range<usize>) -> Range<usize> {
        self.utf16_from_char(range.start)..self.utf16_from_char(range.end)
    }
}

pub fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
