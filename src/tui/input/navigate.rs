use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode, Prompt, PromptTarget, Row};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    // Help overlay swallows everything except its close keys
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    let row = app.current_row();
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::PageDown) => move_cursor(app, 10),
        (_, KeyCode::PageUp) => move_cursor(app, -10),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.rows().len().saturating_sub(1);
        }

        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => activate(app, row),

        (_, KeyCode::Char('t')) => begin_rename_trip(app),
        (_, KeyCode::Char('r')) => {
            if let Some(day) = row.day() {
                begin_rename_day(app, day);
            }
        }
        (_, KeyCode::Char('d')) => {
            if let Some(day) = row.day() {
                app.confirm = Some(ConfirmAction::DeleteDay { day });
                app.mode = Mode::Confirm;
            }
        }
        (_, KeyCode::Char('a')) => {
            if let Some((day, category)) = row.category() {
                open_prompt(app, PromptTarget::NewItem { day, category }, "");
            }
        }
        (_, KeyCode::Char('l')) => {
            if let Row::Item {
                day,
                category,
                item,
            } = row
            {
                begin_set_link(app, day, category, item);
            }
        }
        (_, KeyCode::Char('A')) => add_day(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let last = app.rows().len().saturating_sub(1);
    app.cursor = app.cursor.saturating_add_signed(delta).min(last);
}

/// Enter/Space: the row's primary action
fn activate(app: &mut App, row: Row) {
    match row {
        Row::Title => begin_rename_trip(app),
        Row::Day { day } => {
            app.apply(|store| store.toggle_day(day));
        }
        Row::Category { day, category } => {
            app.apply(|store| store.toggle_category(day, category));
        }
        Row::Item {
            day,
            category,
            item,
        } => begin_set_link(app, day, category, item),
        Row::AddItem { day, category } => {
            open_prompt(app, PromptTarget::NewItem { day, category }, "");
        }
        Row::AddDay => add_day(app),
    }
}

fn add_day(app: &mut App) {
    app.apply(|store| store.add_day());
    let new_day = app.itinerary().days.len().saturating_sub(1);
    app.select_row(Row::Day { day: new_day });
}

fn begin_rename_trip(app: &mut App) {
    let current = app.itinerary().title.clone();
    open_prompt(app, PromptTarget::TripTitle, &current);
}

fn begin_rename_day(app: &mut App, day: usize) {
    let Some(current) = app.itinerary().days.get(day).map(|d| d.title.clone()) else {
        return;
    };
    open_prompt(app, PromptTarget::DayTitle { day }, &current);
}

fn begin_set_link(app: &mut App, day: usize, category: usize, item: usize) {
    let current = app
        .itinerary()
        .days
        .get(day)
        .and_then(|d| d.categories.get(category))
        .and_then(|c| c.items.get(item))
        .map(|i| i.link.clone())
        .unwrap_or_default();
    open_prompt(
        app,
        PromptTarget::ItemLink {
            day,
            category,
            item,
        },
        &current,
    );
}

fn open_prompt(app: &mut App, target: PromptTarget, initial: &str) {
    app.prompt = Some(Prompt::new(target, initial));
    app.mode = Mode::Prompt;
}
