use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Itinerary;
use crate::tui::app::{App, Row};
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

const EXPANDED: &str = "\u{25BC}"; // ▼
const COLLAPSED: &str = "\u{25B6}"; // ▶
const BULLET: &str = "\u{2022}"; // •

/// Render the flattened itinerary with the cursor row highlighted
pub fn render_trip_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.rows();
    let height = area.height as usize;
    adjust_scroll(app, height);

    let width = area.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(idx, row)| {
            let selected = idx == app.cursor;
            row_line(app.itinerary(), &app.theme, *row, selected, width)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// Keep the cursor row inside the visible window
fn adjust_scroll(app: &mut App, height: usize) {
    if height == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
}

fn row_line<'a>(it: &Itinerary, theme: &Theme, row: Row, selected: bool, width: usize) -> Line<'a> {
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);

    let mut spans: Vec<Span> = match row {
        Row::Title => vec![Span::styled(
            it.title.clone(),
            base.fg(theme.highlight).add_modifier(Modifier::BOLD),
        )],
        Row::Day { day } => match it.days.get(day) {
            Some(d) => {
                let glyph = if d.is_expanded { EXPANDED } else { COLLAPSED };
                let count = d.item_count();
                let suffix = match count {
                    0 => String::new(),
                    1 => "  (1 item)".to_string(),
                    n => format!("  ({} items)", n),
                };
                vec![
                    Span::styled(format!("{} ", glyph), base.fg(theme.dim)),
                    Span::styled(
                        d.title.clone(),
                        base.fg(theme.text_bright).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(suffix, base.fg(theme.dim)),
                ]
            }
            None => Vec::new(),
        },
        Row::Category { day, category } => {
            match it.days.get(day).and_then(|d| d.categories.get(category)) {
                Some(c) => {
                    let glyph = if c.is_expanded { EXPANDED } else { COLLAPSED };
                    let mut spans = vec![
                        Span::styled(format!("  {} ", glyph), base.fg(theme.dim)),
                        Span::styled(c.name.clone(), base.fg(theme.yellow)),
                    ];
                    if !c.is_expanded && !c.items.is_empty() {
                        spans.push(Span::styled(
                            format!("  ({})", c.items.len()),
                            base.fg(theme.dim),
                        ));
                    }
                    spans
                }
                None => Vec::new(),
            }
        }
        Row::Item {
            day,
            category,
            item,
        } => match it
            .days
            .get(day)
            .and_then(|d| d.categories.get(category))
            .and_then(|c| c.items.get(item))
        {
            Some(i) => {
                let mut spans = vec![
                    Span::styled(format!("      {} ", BULLET), base.fg(theme.dim)),
                    Span::styled(i.text.clone(), base.fg(theme.text)),
                ];
                if i.has_link() {
                    spans.push(Span::styled(format!("  {}", i.link), base.fg(theme.cyan)));
                }
                spans
            }
            None => Vec::new(),
        },
        Row::AddItem { .. } => vec![Span::styled("      + add item", base.fg(theme.green))],
        Row::AddDay => vec![Span::styled("+ add day", base.fg(theme.green))],
    };

    fit_to_width(&mut spans, width, base);
    Line::from(spans)
}

/// Truncate spans that overflow `width`, then pad with the row background
fn fit_to_width(spans: &mut Vec<Span>, width: usize, pad_style: Style) {
    let mut used = 0;
    let mut keep = 0;
    for span in spans.iter_mut() {
        if used >= width {
            break;
        }
        let w = display_width(&span.content);
        if used + w > width {
            let cut = truncate_to_width(&span.content, width - used);
            used += display_width(&cut);
            span.content = cut.into();
        } else {
            used += w;
        }
        keep += 1;
    }
    spans.truncate(keep);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), pad_style));
    }
}
