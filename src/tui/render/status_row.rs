use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

const NAVIGATE_HINTS: &str = "? help  q quit";
const PROMPT_HINTS: &str = "Enter save  Esc cancel";
const CONFIRM_HINTS: &str = "y delete  n cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::Navigate => {
            let spans = match &app.status_message {
                Some(msg) => vec![Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                )],
                None => Vec::new(),
            };
            let hint = if app.show_key_hints {
                NAVIGATE_HINTS
            } else {
                ""
            };
            (spans, hint)
        }
        Mode::Prompt => match &app.prompt {
            Some(prompt) => {
                let (before, after) = prompt.buffer.split_at(prompt.cursor);
                let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
                let spans = vec![
                    Span::styled(
                        format!("{}: ", prompt.target.label()),
                        Style::default().fg(app.theme.dim).bg(bg),
                    ),
                    Span::styled(before.to_string(), text_style),
                    Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
                    Span::styled(after.to_string(), text_style),
                ];
                (spans, PROMPT_HINTS)
            }
            None => (Vec::new(), ""),
        },
        Mode::Confirm => (Vec::new(), CONFIRM_HINTS),
    };

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::tui::app::{Prompt, PromptTarget};

    fn render_status(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_hints() {
        let app = fresh_app();
        let output = render_status(&app);
        assert!(output.ends_with(NAVIGATE_HINTS));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = fresh_app();
        app.show_key_hints = false;
        assert_eq!(render_status(&app), "");
    }

    #[test]
    fn status_message_shown_left() {
        let mut app = fresh_app();
        app.status_message = Some("deleted \"Day 1\"".into());
        let output = render_status(&app);
        assert!(output.starts_with("deleted \"Day 1\""));
    }

    #[test]
    fn prompt_shows_label_buffer_and_cursor() {
        let mut app = fresh_app();
        let mut prompt = Prompt::new(PromptTarget::TripTitle, "Jeju");
        prompt.cursor = 2;
        app.prompt = Some(prompt);
        app.mode = Mode::Prompt;
        let output = render_status(&app);
        assert!(output.starts_with("trip title: Je\u{258C}ju"));
        assert!(output.ends_with(PROMPT_HINTS));
    }

    #[test]
    fn confirm_shows_choices() {
        let mut app = fresh_app();
        app.mode = Mode::Confirm;
        assert!(render_status(&app).ends_with(CONFIRM_HINTS));
    }
}
