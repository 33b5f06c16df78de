use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect_fixed;
use crate::tui::app::{App, ConfirmAction};
use crate::util::unicode::truncate_to_width;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(&ConfirmAction::DeleteDay { day }) = app.confirm.as_ref() else {
        return;
    };
    let Some(d) = app.itinerary().days.get(day) else {
        return;
    };

    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);

    let count = d.item_count();
    let contents = match count {
        0 => " It has no items.".to_string(),
        1 => " Its 1 item will be lost.".to_string(),
        n => format!(" All {} items will be lost.", n),
    };

    let lines = vec![
        Line::from(Span::styled(" Delete day", header_style)),
        Line::from(Span::styled(
            truncate_to_width(&format!(" \u{201c}{}\u{201d}?", d.title), inner_w),
            text_style,
        )),
        Line::from(Span::styled(contents, text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" delete   ", text_style),
            Span::styled("n", key_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
