use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect_fixed;
use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(
        &mut lines,
        " \u{2191}\u{2193}/jk",
        "Move cursor up/down",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " PgUp/PgDn", "Move by ten rows", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(
        &mut lines,
        " Enter/Space",
        "Toggle, edit or add",
        key_style,
        desc_style,
    );
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Editing", header_style)));
    add_binding(&mut lines, " t", "Rename trip", key_style, desc_style);
    add_binding(&mut lines, " r", "Rename day", key_style, desc_style);
    add_binding(&mut lines, " A", "Add day", key_style, desc_style);
    add_binding(&mut lines, " d", "Delete day", key_style, desc_style);
    add_binding(&mut lines, " a", "Add item to category", key_style, desc_style);
    add_binding(&mut lines, " l", "Set item map link", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+C", "Quit from anywhere", key_style, desc_style);

    let height = lines.len() as u16 + 2;
    let overlay_area = centered_rect_fixed(48, height, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Key Bindings ")
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
