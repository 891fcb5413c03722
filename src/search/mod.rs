//! Incremental search over the document.
//!
//! Search is an explicit two-state machine consulted by the one dispatch
//! loop: `Idle` is the absence of a [`SearchState`] in the model, `Active`
//! is its presence. The state owns the query, the currently highlighted
//! match, and the cursor/scroll snapshot taken when the search started so
//! a cancel can restore it.
//!
//! Matching is a case-sensitive literal byte scan — no regex. Navigation
//! is cyclic: [`SearchState::find_next`] resumes just after (or before)
//! the current match and wraps around the document ends, giving up only
//! after a full fruitless cycle.

use crate::document::Document;
use crate::editor::Cursor;

/// Direction for match navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// A located occurrence of the query within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Row of the line holding the match.
    pub row: usize,
    /// Byte offset of the match within the line.
    pub col: usize,
}

/// State of an active search session.
#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    current: Option<SearchMatch>,
    saved_cursor: Cursor,
    saved_offset: usize,
}

impl SearchState {
    /// Start a search session, snapshotting the pre-search cursor and
    /// scroll offset for restore-on-cancel.
    pub const fn new(saved_cursor: Cursor, saved_offset: usize) -> Self {
        Self {
            query: String::new(),
            current: None,
            saved_cursor,
            saved_offset,
        }
    }

    /// The active query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query (incremental typing); the caller re-runs
    /// [`SearchState::find_first`] afterwards.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// The currently highlighted match, if any.
    pub const fn current(&self) -> Option<SearchMatch> {
        self.current
    }

    /// Cursor position saved when the search started.
    pub const fn saved_cursor(&self) -> Cursor {
        self.saved_cursor
    }

    /// Scroll offset saved when the search started.
    pub const fn saved_offset(&self) -> usize {
        self.saved_offset
    }

    /// Scan from the first line for the first occurrence of the query.
    ///
    /// On a miss the current match is cleared and the session stays
    /// active; the caller reports "not found" and leaves the cursor alone.
    pub fn find_first(&mut self, document: &Document) -> Option<SearchMatch> {
        if self.query.is_empty() {
            self.current = None;
            return None;
        }
        let needle = self.query.as_bytes();
        let found = document.lines().find_map(|line| {
            find_from(line.as_bytes(), needle, 0).map(|col| SearchMatch {
                row: line.index(),
                col,
            })
        });
        self.current = found;
        found
    }

    /// Advance to the next match in `direction`, wrapping cyclically.
    ///
    /// Returns `None` after a full fruitless cycle; the current match is
    /// left unchanged so the highlight stays put.
    pub fn find_next(
        &mut self,
        document: &Document,
        direction: SearchDirection,
    ) -> Option<SearchMatch> {
        if self.query.is_empty() || document.line_count() == 0 {
            return None;
        }
        let from = match self.current {
            Some(m) => m,
            // Nothing to resume from (the last scan missed): restart the
            // cycle from a virtual position at the top of the document.
            None => SearchMatch { row: 0, col: 0 },
        };
        let needle = self.query.as_bytes();
        let found = match direction {
            SearchDirection::Forward => scan_forward(document, needle, from),
            SearchDirection::Backward => scan_backward(document, needle, from),
        };
        if found.is_some() {
            self.current = found;
        }
        found
    }
}

fn scan_forward(document: &Document, needle: &[u8], from: SearchMatch) -> Option<SearchMatch> {
    let total = document.line_count();
    // Remainder of the current line, just past the match start.
    if let Some(line) = document.line_at(from.row)
        && let Some(col) = find_from(line.as_bytes(), needle, from.col + 1)
    {
        return Some(SearchMatch { row: from.row, col });
    }
    // Following lines, wrapping to the top; the final step re-scans the
    // starting line from column 0 to complete the cycle.
    for step in 1..=total {
        let row = (from.row + step) % total;
        if let Some(line) = document.line_at(row)
            && let Some(col) = find_from(line.as_bytes(), needle, 0)
        {
            return Some(SearchMatch { row, col });
        }
    }
    None
}

fn scan_backward(document: &Document, needle: &[u8], from: SearchMatch) -> Option<SearchMatch> {
    let total = document.line_count();
    // Part of the current line before the match start.
    if let Some(line) = document.line_at(from.row)
        && let Some(col) = rfind_before(line.as_bytes(), needle, from.col)
    {
        return Some(SearchMatch { row: from.row, col });
    }
    // Preceding lines, wrapping to the bottom; the final step re-scans the
    // starting line, where only starts at or after the original remain.
    for step in 1..=total {
        let row = (from.row + total - step) % total;
        let Some(line) = document.line_at(row) else {
            continue;
        };
        let Some(col) = rfind_last(line.as_bytes(), needle) else {
            continue;
        };
        if row != from.row || col >= from.col {
            return Some(SearchMatch { row, col });
        }
    }
    None
}

/// Byte spans `(start, len)` of every occurrence of `query` in `line`,
/// non-overlapping, for highlight rendering. Pure query — no state.
pub fn match_spans(line: &[u8], query: &str) -> Vec<(usize, usize)> {
    let needle = query.as_bytes();
    let mut spans = Vec::new();
    if needle.is_empty() {
        return spans;
    }
    let mut from = 0;
    while let Some(start) = find_from(line, needle, from) {
        spans.push((start, needle.len()));
        from = start + needle.len();
    }
    spans
}

/// First occurrence of `needle` in `haystack` starting at or after `from`.
fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let last = haystack.len().checked_sub(needle.len())?;
    (from..=last).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Last occurrence of `needle` starting strictly before `before`.
fn rfind_before(haystack: &[u8], needle: &[u8], before: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let last = haystack.len().checked_sub(needle.len())?;
    let cap = last.min(before.checked_sub(1)?);
    (0..=cap).rev().find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Last occurrence of `needle` anywhere in `haystack`.
fn rfind_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let last = haystack.len().checked_sub(needle.len())?;
    (0..=last).rev().find(|&i| haystack[i..i + needle.len()] == *needle)
}
