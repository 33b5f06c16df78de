use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::kv::{KeyValueStore, MemoryStore};
use crate::model::config::TripConfig;
use crate::store::ItineraryStore;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an empty in-memory store: the default trip with one day.
pub fn fresh_app() -> App {
    let kv: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    App::new(
        ItineraryStore::load(kv, &TripConfig::default()),
        Theme::default(),
    )
}

/// An App whose first day has two route items (one with a map link)
/// and one food item.
pub fn app_with_items() -> App {
    let mut app = fresh_app();
    app.store.add_item(0, 0, "Seongsan sunrise").unwrap();
    app.store.add_item(0, 0, "Manjanggul cave").unwrap();
    app.store
        .set_item_link(0, 0, 1, "https://maps.example/cave")
        .unwrap();
    app.store.add_item(0, 2, "Black pork BBQ").unwrap();
    app
}
