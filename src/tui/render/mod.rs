pub mod confirm_popup;
pub mod help_overlay;
pub mod status_row;
pub mod trip_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: itinerary rows, status row, then overlays
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    trip_view::render_trip_view(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);

    if app.confirm.is_some() {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// A `width` x `height` rectangle centered in `area`
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
