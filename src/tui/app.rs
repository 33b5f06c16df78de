use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::kv::{FileStore, KeyValueStore};
use crate::io::lock::FileLock;
use crate::model::Itinerary;
use crate::store::{ItineraryStore, Outcome, StoreError};

use super::input;
use super::render;
use super::theme::Theme;

/// One line of the flattened itinerary view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Title,
    Day {
        day: usize,
    },
    Category {
        day: usize,
        category: usize,
    },
    Item {
        day: usize,
        category: usize,
        item: usize,
    },
    /// "+ add item" at the end of an expanded category
    AddItem {
        day: usize,
        category: usize,
    },
    /// "+ add day" at the very end
    AddDay,
}

impl Row {
    /// The day this row belongs to
    pub fn day(self) -> Option<usize> {
        match self {
            Row::Day { day }
            | Row::Category { day, .. }
            | Row::Item { day, .. }
            | Row::AddItem { day, .. } => Some(day),
            Row::Title | Row::AddDay => None,
        }
    }

    /// The (day, category) this row belongs to
    pub fn category(self) -> Option<(usize, usize)> {
        match self {
            Row::Category { day, category }
            | Row::Item { day, category, .. }
            | Row::AddItem { day, category } => Some((day, category)),
            _ => None,
        }
    }
}

/// Flatten the itinerary into visible rows. Collapsed days hide their
/// categories; collapsed categories hide their items.
pub fn build_rows(it: &Itinerary) -> Vec<Row> {
    let mut rows = vec![Row::Title];
    for (d, day) in it.days.iter().enumerate() {
        rows.push(Row::Day { day: d });
        if !day.is_expanded {
            continue;
        }
        for (c, cat) in day.categories.iter().enumerate() {
            rows.push(Row::Category {
                day: d,
                category: c,
            });
            if !cat.is_expanded {
                continue;
            }
            for i in 0..cat.items.len() {
                rows.push(Row::Item {
                    day: d,
                    category: c,
                    item: i,
                });
            }
            rows.push(Row::AddItem {
                day: d,
                category: c,
            });
        }
    }
    rows.push(Row::AddDay);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Prompt,
    Confirm,
}

/// Which value a prompt will be handed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTarget {
    TripTitle,
    DayTitle {
        day: usize,
    },
    NewItem {
        day: usize,
        category: usize,
    },
    ItemLink {
        day: usize,
        category: usize,
        item: usize,
    },
}

impl PromptTarget {
    pub fn label(&self) -> &'static str {
        match self {
            PromptTarget::TripTitle => "trip title",
            PromptTarget::DayTitle { .. } => "day title",
            PromptTarget::NewItem { .. } => "new item",
            PromptTarget::ItemLink { .. } => "map link",
        }
    }
}

/// A modal single-line text prompt
#[derive(Debug, Clone)]
pub struct Prompt {
    pub target: PromptTarget,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
}

impl Prompt {
    pub fn new(target: PromptTarget, initial: &str) -> Self {
        Prompt {
            target,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteDay { day: usize },
}

pub type AppStore = ItineraryStore<Box<dyn KeyValueStore>>;

/// Main application state
pub struct App {
    pub store: AppStore,
    /// Data directory for the write lock and UI state. None in tests.
    pub data_dir: Option<PathBuf>,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Index into `rows()`
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub prompt: Option<Prompt>,
    pub confirm: Option<ConfirmAction>,
    pub show_help: bool,
    pub show_key_hints: bool,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: AppStore, theme: Theme) -> Self {
        App {
            store,
            data_dir: None,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            prompt: None,
            confirm: None,
            show_help: false,
            show_key_hints: true,
            status_message: None,
        }
    }

    pub fn itinerary(&self) -> &Itinerary {
        self.store.itinerary()
    }

    pub fn rows(&self) -> Vec<Row> {
        build_rows(self.itinerary())
    }

    pub fn current_row(&self) -> Row {
        let rows = self.rows();
        rows.get(self.cursor)
            .copied()
            .unwrap_or(Row::AddDay)
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    /// Put the cursor on `row` if it is visible
    pub fn select_row(&mut self, row: Row) {
        if let Some(idx) = self.rows().iter().position(|r| *r == row) {
            self.cursor = idx;
        }
    }

    /// Run one store operation under the write lock, after reloading any
    /// changes other processes saved. Indices given to `op` refer to the
    /// rows last drawn, so an edit racing an external one can miss and
    /// become a no-op. Failures end up in the status row; no-ops are silent.
    pub fn apply<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut AppStore) -> Result<Outcome, StoreError>,
    {
        let _lock = match self.data_dir.as_deref().map(FileLock::acquire_default) {
            Some(Err(e)) => {
                self.status_message = Some(e.to_string());
                return false;
            }
            Some(Ok(lock)) => Some(lock),
            None => None,
        };
        if let Err(e) = self.store.reload() {
            self.status_message = Some(e.to_string());
            return false;
        }
        let changed = match op(&mut self.store) {
            Ok(outcome) => outcome.is_changed(),
            Err(e) => {
                self.status_message = Some(format!("save failed: {}", e));
                // The edit itself is kept in memory
                true
            }
        };
        self.clamp_cursor();
        changed
    }
}

/// Restore cursor and scroll from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(dir) = app.data_dir.as_deref() else {
        return;
    };
    if let Some(state) = read_ui_state(dir) {
        app.cursor = state.cursor;
        app.scroll_offset = state.scroll_offset;
        app.clamp_cursor();
    }
}

/// Save cursor and scroll to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let Some(dir) = app.data_dir.as_deref() else {
        return;
    };
    let state = UiState {
        cursor: app.cursor,
        scroll_offset: app.scroll_offset,
    };
    let _ = write_ui_state(dir, &state);
}

/// Open the store in `data_dir` and build the app around it
pub fn open_app(data_dir: &Path) -> Result<App, Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let kv: Box<dyn KeyValueStore> = Box::new(FileStore::open(data_dir)?);
    let store = ItineraryStore::load(kv, &config.trip);

    let mut app = App::new(store, Theme::from_config(&config.ui));
    app.show_key_hints = config.ui.show_key_hints;
    app.data_dir = Some(data_dir.to_path_buf());
    restore_ui_state(&mut app);
    Ok(app)
}

/// Run the TUI against the data directory
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(data_dir)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
