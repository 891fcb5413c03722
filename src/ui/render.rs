use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;

use super::status;

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_document(model, frame, chunks[0]);
    status::render_status_bar(model, frame, chunks[1]);
    status::render_message_bar(model, frame, chunks[2]);

    // An open prompt owns the keyboard; the hardware cursor only tracks
    // the document when no prompt is up.
    if !model.prompt_active() {
        place_cursor(model, frame, chunks[0]);
    }
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let document = model.editor.document();
    let offset = model.editor.viewport().offset();

    let mut rows: Vec<Line> = Vec::with_capacity(area.height as usize);
    for y in 0..area.height as usize {
        let file_row = y + offset;
        if let Some(line) = document.line_at(file_row) {
            rows.push(document_row(model, line));
        } else if document.line_count() == 0 && y == (area.height / 2) as usize {
            rows.push(welcome_row(area.width));
        } else {
            rows.push(Line::from("~"));
        }
    }
    frame.render_widget(Paragraph::new(rows), area);
}

/// One document line, with every query occurrence highlighted and the
/// current match visually distinguished.
fn document_row(model: &Model, line: &crate::document::Line) -> Line<'static> {
    let Some(search) = model.search.as_ref().filter(|s| !s.query().is_empty()) else {
        return Line::from(line.display().into_owned());
    };
    let bytes = line.as_bytes();
    let matches = crate::search::match_spans(bytes, search.query());
    if matches.is_empty() {
        return Line::from(line.display().into_owned());
    }

    let current = search.current();
    let mut spans: Vec<Span> = Vec::new();
    let mut pos = 0_usize;
    for (start, len) in matches {
        if start > pos {
            spans.push(Span::raw(lossy(&bytes[pos..start])));
        }
        let is_current =
            current.is_some_and(|m| m.row == line.index() && m.col == start);
        let style = if is_current {
            Style::default().bg(Color::Yellow).fg(Color::Black)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };
        spans.push(Span::styled(lossy(&bytes[start..start + len]), style));
        pos = start + len;
    }
    if pos < bytes.len() {
        spans.push(Span::raw(lossy(&bytes[pos..])));
    }
    Line::from(spans)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn welcome_row(width: u16) -> Line<'static> {
    let banner = concat!("vted -- version ", env!("CARGO_PKG_VERSION"));
    let padding = (width as usize).saturating_sub(banner.width()) / 2;
    let mut text = String::from("~");
    text.push_str(&" ".repeat(padding.saturating_sub(1)));
    text.push_str(banner);
    Line::from(text)
}

fn place_cursor(model: &Model, frame: &mut Frame, doc_area: Rect) {
    let cursor = model.editor.cursor();
    let offset = model.editor.viewport().offset();

    let prefix = model
        .editor
        .document()
        .line_at(cursor.row)
        .map_or_else(String::new, |line| {
            lossy(&line.as_bytes()[..cursor.col.min(line.len())])
        });
    // Display column, clamped to the viewport width.
    #[allow(clippy::cast_possible_truncation)] // clamped to a u16 just below
    let x = (prefix.width() as u16).min(doc_area.width.saturating_sub(1));
    #[allow(clippy::cast_possible_truncation)] // row is within the viewport
    let y = (cursor.row.saturating_sub(offset) as u16)
        .min(doc_area.height.saturating_sub(1));
    frame.set_cursor_position((doc_area.x + x, doc_area.y + y));
}
