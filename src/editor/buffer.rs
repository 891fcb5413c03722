use crate::document::Document;
use crate::editor::Viewport;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based row of the active line within the document.
    pub row: usize,
    /// Zero-based byte offset within the active line.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at row 0, column 0.
    pub const fn new() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Create a cursor at a specific position.
    pub const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// The editing session: document, cursor, and viewport in one place.
///
/// Every operation re-derives cursor and viewport state so that
/// `0 <= col <= active_line.len()` and
/// `offset <= row < offset + height` hold after it returns. The buffer is
/// the single owner of the [`Document`]; nothing else mutates it.
pub struct EditorBuffer {
    document: Document,
    cursor: Cursor,
    viewport: Viewport,
}

impl EditorBuffer {
    /// Create a buffer over `document` with the given document-area size.
    pub const fn new(document: Document, width: u16, height: u16) -> Self {
        Self {
            document,
            cursor: Cursor::new(),
            viewport: Viewport::new(width, height),
        }
    }

    /// The underlying document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The viewport onto the document.
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the document has unsaved changes.
    pub const fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Mark the document clean after a successful save.
    pub const fn mark_saved(&mut self) {
        self.document.mark_clean();
    }

    /// Length in bytes of the active line (0 when the document is empty).
    pub fn active_line_len(&self) -> usize {
        self.document
            .line_at(self.cursor.row)
            .map_or(0, crate::document::Line::len)
    }

    /// Move the cursor in the given direction.
    ///
    /// Boundary moves (Left at document start, Right at document end, Up
    /// from the first line, Down from the last) are silent no-ops.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                } else if self.cursor.row > 0 {
                    // Wrap to the end of the previous line.
                    self.cursor.row -= 1;
                    self.cursor.col = self.active_line_len();
                }
            }
            Direction::Right => {
                if self.cursor.col < self.active_line_len() {
                    self.cursor.col += 1;
                } else if self.cursor.row + 1 < self.document.line_count() {
                    self.cursor.row += 1;
                    self.cursor.col = 0;
                }
            }
            Direction::Up => {
                if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                    self.clamp_col();
                }
            }
            Direction::Down => {
                if self.cursor.row + 1 < self.document.line_count() {
                    self.cursor.row += 1;
                    self.clamp_col();
                }
            }
            Direction::Home => {
                self.cursor.col = 0;
            }
            Direction::End => {
                self.cursor.col = self.active_line_len();
            }
            Direction::PageUp => {
                let page = (self.viewport.height() as usize).max(1);
                self.cursor.row = self.cursor.row.saturating_sub(page);
                self.clamp_col();
            }
            Direction::PageDown => {
                let page = (self.viewport.height() as usize).max(1);
                let last = self.document.line_count().saturating_sub(1);
                self.cursor.row = (self.cursor.row + page).min(last);
                self.clamp_col();
            }
        }
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    /// Insert a character at the cursor as its raw UTF-8 bytes.
    ///
    /// Control characters are rejected (the ones that matter arrive as
    /// dedicated commands); printable ASCII and high bytes pass. When the
    /// active line grows past the viewport width it is split at the width
    /// boundary and the cursor follows onto the continuation line.
    pub fn insert_char(&mut self, ch: char) {
        if !is_insertable(ch) {
            return;
        }
        if self.document.line_count() == 0 {
            self.document.append_line(Vec::new());
            self.cursor = Cursor::new();
        }
        let mut bytes = [0_u8; 4];
        for &byte in ch.encode_utf8(&mut bytes).as_bytes() {
            self.document.insert_byte(self.cursor.row, self.cursor.col, byte);
            self.cursor.col += 1;
        }

        let width = self.viewport.width() as usize;
        if width > 0 && self.active_line_len() > width {
            self.document.split_line_at(self.cursor.row, width);
            if self.cursor.col >= width {
                self.cursor.row += 1;
                self.cursor.col -= width;
            }
        }
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    /// Split the active line at the cursor (Enter key).
    ///
    /// On an empty document this just materializes the first line.
    pub fn insert_newline(&mut self) {
        if self.document.line_count() == 0 {
            self.document.append_line(Vec::new());
            self.cursor = Cursor::new();
            return;
        }
        self.document.split_line_at(self.cursor.row, self.cursor.col);
        self.cursor.row += 1;
        self.cursor.col = 0;
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    /// Delete the byte before the cursor (Backspace).
    ///
    /// At column 0 the active line is merged into its predecessor and the
    /// cursor lands on the join point. Returns `true` if anything changed.
    pub fn delete_char(&mut self) -> bool {
        if self.document.line_count() == 0 {
            return false;
        }
        if self.cursor.col > 0 {
            self.document.delete_byte(self.cursor.row, self.cursor.col - 1);
            self.cursor.col -= 1;
            return true;
        }
        let Some(join) = self.document.merge_with_previous(self.cursor.row) else {
            return false;
        };
        self.cursor.row -= 1;
        self.cursor.col = join;
        self.viewport.scroll_to_fit(self.cursor.row);
        true
    }

    /// Move the cursor to an absolute position, clamped to the document.
    pub fn move_to(&mut self, row: usize, col: usize) {
        let last = self.document.line_count().saturating_sub(1);
        self.cursor.row = row.min(last);
        self.cursor.col = col.min(self.active_line_len());
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    /// Restore a saved cursor/scroll snapshot (search cancel).
    ///
    /// Positions are clamped and re-scrolled, so a snapshot taken before a
    /// resize still lands in a valid state.
    pub fn restore(&mut self, cursor: Cursor, offset: usize) {
        self.move_to(cursor.row, cursor.col);
        self.viewport.set_offset(offset);
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    /// Apply a new document-area size, then keep the cursor visible.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.viewport.scroll_to_fit(self.cursor.row);
    }

    fn clamp_col(&mut self) {
        let len = self.active_line_len();
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "document",
                &format_args!("Document({} lines)", self.document.line_count()),
            )
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .finish()
    }
}

/// Byte-insertion policy: printable ASCII and the extended high range pass;
/// remaining control characters are rejected.
fn is_insertable(ch: char) -> bool {
    let code = u32::from(ch);
    code >= 0x20 && code != 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn buffer(lines: &[&str]) -> EditorBuffer {
        buffer_sized(lines, 80, 24)
    }

    fn buffer_sized(lines: &[&str], width: u16, height: u16) -> EditorBuffer {
        let doc =
            Document::from_lines(lines.iter().map(|s| s.as_bytes().to_vec()).collect());
        EditorBuffer::new(doc, width, height)
    }

    fn text_at(buf: &EditorBuffer, row: usize) -> String {
        buf.document().line_at(row).unwrap().display().into_owned()
    }

    // --- Empty document ---

    #[test]
    fn test_empty_document_moves_are_noops() {
        let mut buf = buffer(&[]);
        for dir in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
            Direction::Home,
            Direction::End,
            Direction::PageUp,
            Direction::PageDown,
        ] {
            buf.move_cursor(dir);
            assert_eq!(buf.cursor(), Cursor::new());
        }
    }

    #[test]
    fn test_insert_into_empty_document_creates_line() {
        let mut buf = buffer(&[]);
        buf.insert_char('a');
        assert_eq!(buf.document().line_count(), 1);
        assert_eq!(text_at(&buf, 0), "a");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_newline_on_empty_document_creates_one_line() {
        let mut buf = buffer(&[]);
        buf.insert_newline();
        assert_eq!(buf.document().line_count(), 1);
        assert_eq!(buf.cursor(), Cursor::new());
    }

    #[test]
    fn test_delete_on_empty_document_is_noop() {
        let mut buf = buffer(&[]);
        assert!(!buf.delete_char());
        assert!(!buf.is_dirty());
    }

    // --- Movement: left/right ---

    #[test]
    fn test_move_left_at_document_start_is_noop() {
        let mut buf = buffer(&["hello"]);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_left_wraps_to_end_of_previous_line() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_right_at_document_end_is_noop() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(1, 5);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line_start() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Movement: up/down clamp ---

    #[test]
    fn test_move_up_clamps_to_shorter_line() {
        let mut buf = buffer(&["hi", "hello"]);
        buf.move_to(1, 4);
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_move_down_clamps_to_shorter_line() {
        let mut buf = buffer(&["hello", "hi"]);
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_move_up_from_first_line_is_noop() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_move_down_from_last_line_is_noop() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(1, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    // --- Home / End / paging ---

    #[test]
    fn test_home_and_end() {
        let mut buf = buffer(&["hello"]);
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Home);
        assert_eq!(buf.cursor().col, 0);
        buf.move_cursor(Direction::End);
        assert_eq!(buf.cursor().col, 5);
    }

    #[test]
    fn test_page_down_moves_a_viewport_height() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut buf = buffer_sized(&refs, 80, 10);
        buf.move_cursor(Direction::PageDown);
        assert_eq!(buf.cursor().row, 10);
        buf.move_cursor(Direction::PageUp);
        assert_eq!(buf.cursor().row, 0);
    }

    #[test]
    fn test_page_down_clamps_at_last_line() {
        let mut buf = buffer_sized(&["a", "b", "c"], 80, 10);
        buf.move_cursor(Direction::PageDown);
        assert_eq!(buf.cursor().row, 2);
    }

    // --- Scrolling follows the cursor ---

    #[test]
    fn test_cursor_below_viewport_scrolls_down() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut buf = buffer_sized(&refs, 80, 10);
        for _ in 0..15 {
            buf.move_cursor(Direction::Down);
        }
        assert_eq!(buf.cursor().row, 15);
        assert_eq!(buf.viewport().offset(), 6); // 15 - 10 + 1
    }

    #[test]
    fn test_cursor_above_viewport_scrolls_up() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut buf = buffer_sized(&refs, 80, 10);
        buf.move_to(30, 0);
        buf.move_to(2, 0);
        assert_eq!(buf.viewport().offset(), 2);
    }

    #[test]
    fn test_resize_keeps_cursor_visible() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut buf = buffer_sized(&refs, 80, 24);
        buf.move_to(20, 0);
        buf.resize(80, 5);
        let offset = buf.viewport().offset();
        assert!(offset <= 20 && 20 < offset + 5);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = buffer(&["hllo"]);
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(text_at(&buf, 0), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_rejects_control_characters() {
        let mut buf = buffer(&["hello"]);
        buf.insert_char('\t');
        buf.insert_char('\u{1b}');
        buf.insert_char('\u{7f}');
        assert_eq!(text_at(&buf, 0), "hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_multibyte_char_advances_by_byte_count() {
        let mut buf = buffer(&["caf"]);
        buf.move_cursor(Direction::End);
        buf.insert_char('é');
        assert_eq!(text_at(&buf, 0), "café");
        assert_eq!(buf.cursor().col, 5);
    }

    #[test]
    fn test_insert_auto_splits_at_viewport_width() {
        let mut buf = buffer_sized(&["abcde"], 5, 24);
        buf.move_cursor(Direction::End);
        buf.insert_char('f');
        assert_eq!(buf.document().line_count(), 2);
        assert_eq!(text_at(&buf, 0), "abcde");
        assert_eq!(text_at(&buf, 1), "f");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_insert_before_boundary_keeps_cursor_on_line() {
        let mut buf = buffer_sized(&["abcde"], 5, 24);
        buf.move_to(0, 0);
        buf.insert_char('x');
        // Line was "xabcde", splits into "xabcd" / "e"; cursor stays after x.
        assert_eq!(text_at(&buf, 0), "xabcd");
        assert_eq!(text_at(&buf, 1), "e");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    // --- Newline ---

    #[test]
    fn test_insert_newline_splits_at_cursor() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(0, 5);
        buf.insert_newline();
        assert_eq!(buf.document().line_count(), 3);
        assert_eq!(text_at(&buf, 0), "hello");
        assert_eq!(text_at(&buf, 1), "");
        assert_eq!(text_at(&buf, 2), "world");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_newline_mid_line_carries_tail() {
        let mut buf = buffer(&["hello world"]);
        buf.move_to(0, 5);
        buf.insert_newline();
        assert_eq!(text_at(&buf, 0), "hello");
        assert_eq!(text_at(&buf, 1), " world");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Backspace ---

    #[test]
    fn test_delete_char_removes_previous_byte() {
        let mut buf = buffer(&["hello"]);
        buf.move_to(0, 5);
        assert!(buf.delete_char());
        assert_eq!(text_at(&buf, 0), "hell");
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
    }

    #[test]
    fn test_delete_char_at_line_start_merges() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_to(1, 0);
        assert!(buf.delete_char());
        assert_eq!(buf.document().line_count(), 1);
        assert_eq!(text_at(&buf, 0), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_char_at_document_start_is_noop() {
        let mut buf = buffer(&["hello"]);
        assert!(!buf.delete_char());
        assert_eq!(text_at(&buf, 0), "hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_split_then_delete_restores_line_and_cursor() {
        let mut buf = buffer(&["helloworld"]);
        buf.move_to(0, 5);
        buf.insert_newline();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.delete_char();
        assert_eq!(buf.document().line_count(), 1);
        assert_eq!(text_at(&buf, 0), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    // --- Dirty tracking ---

    #[test]
    fn test_loaded_buffer_is_clean_until_edited() {
        let mut buf = buffer(&["hello"]);
        assert!(!buf.is_dirty());
        buf.insert_char('!');
        assert!(buf.is_dirty());
        buf.mark_saved();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_movement_never_dirties() {
        let mut buf = buffer(&["hello", "world"]);
        buf.move_cursor(Direction::Down);
        buf.move_cursor(Direction::End);
        buf.move_cursor(Direction::Left);
        assert!(!buf.is_dirty());
    }

    // --- Invariant sweep ---

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Move(Direction),
            Insert(char),
            Newline,
            Delete,
            Resize(u16, u16),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                prop_oneof![
                    Just(Direction::Left),
                    Just(Direction::Right),
                    Just(Direction::Up),
                    Just(Direction::Down),
                    Just(Direction::Home),
                    Just(Direction::End),
                    Just(Direction::PageUp),
                    Just(Direction::PageDown),
                ]
                .prop_map(Op::Move),
                proptest::char::range('a', 'z').prop_map(Op::Insert),
                Just(Op::Newline),
                Just(Op::Delete),
                (10..120u16, 1..50u16).prop_map(|(w, h)| Op::Resize(w, h)),
            ]
        }

        proptest! {
            #[test]
            fn cursor_and_viewport_invariants_hold(
                ops in proptest::collection::vec(op_strategy(), 0..200),
            ) {
                let mut buf = EditorBuffer::new(
                    Document::from_lines(vec![b"hello".to_vec(), b"world".to_vec()]),
                    40,
                    8,
                );
                for op in ops {
                    match op {
                        Op::Move(dir) => buf.move_cursor(dir),
                        Op::Insert(ch) => buf.insert_char(ch),
                        Op::Newline => buf.insert_newline(),
                        Op::Delete => {
                            buf.delete_char();
                        }
                        Op::Resize(w, h) => buf.resize(w, h),
                    }

                    let cursor = buf.cursor();
                    prop_assert!(cursor.col <= buf.active_line_len());
                    let offset = buf.viewport().offset();
                    let height = buf.viewport().height() as usize;
                    prop_assert!(offset <= cursor.row);
                    prop_assert!(cursor.row < offset + height.max(1));
                    if buf.document().line_count() > 0 {
                        prop_assert!(cursor.row < buf.document().line_count());
                    }
                }
            }
        }
    }
}
