use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, StatusLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let name = model.display_name();
    let line_count = model.editor.document().line_count();
    let modified = if model.editor.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let readonly = if model.readonly { " [readonly]" } else { "" };

    let left = format!(" {name} - {line_count} lines{modified}{readonly}");
    let right = format!(
        "Ln {}/{} ",
        model.editor.cursor().row + 1,
        line_count.max(1)
    );
    let gap = (area.width as usize).saturating_sub(left.width() + right.width());
    let status = format!("{left}{}{right}", " ".repeat(gap));

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_message_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if let Some(name) = &model.save_prompt {
        let bar = Paragraph::new(format!("Save as: {name}  Enter: save  Esc: cancel"))
            .style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(bar, area);
        return;
    }

    if let Some(search) = &model.search {
        let bar = Paragraph::new(format!(
            "Search: {}  Left/Right: prev/next  Enter: keep  Esc: cancel",
            search.query()
        ))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(bar, area);
        return;
    }

    if let Some((text, level)) = model.active_status() {
        let (prefix, style) = match level {
            StatusLevel::Info => (
                "[info]",
                Style::default().bg(Color::DarkGray).fg(Color::White),
            ),
            StatusLevel::Warning => (
                "[warn]",
                Style::default().bg(Color::Yellow).fg(Color::Black),
            ),
            StatusLevel::Error => {
                ("[error]", Style::default().bg(Color::Red).fg(Color::White))
            }
        };
        let bar = Paragraph::new(format!("{prefix} {text}")).style(style);
        frame.render_widget(bar, area);
        return;
    }

    let help = Paragraph::new("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
    frame.render_widget(help, area);
}
