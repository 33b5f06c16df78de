use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, Prompt, PromptTarget};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let Some(prompt) = app.prompt.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => close_prompt(app),
        (_, KeyCode::Enter) => submit(app),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            prompt.buffer.clear();
            prompt.cursor = 0;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => prompt.cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => prompt.cursor = prompt.buffer.len(),
        (_, KeyCode::Home) => prompt.cursor = 0,
        (_, KeyCode::End) => prompt.cursor = prompt.buffer.len(),
        (_, KeyCode::Left) => {
            if let Some(prev) = prev_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = next_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.buffer.replace_range(prev..prompt.cursor, "");
                prompt.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = next_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.buffer.replace_range(prompt.cursor..next, "");
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => insert_char(prompt, c),
        _ => {}
    }
}

fn insert_char(prompt: &mut Prompt, c: char) {
    if c.is_control() {
        return;
    }
    prompt.buffer.insert(prompt.cursor, c);
    prompt.cursor += c.len_utf8();
}

fn close_prompt(app: &mut App) {
    app.prompt = None;
    app.mode = Mode::Navigate;
}

/// Hand the text to the matching store operation. Blank text is rejected
/// by the store and leaves everything as it was.
fn submit(app: &mut App) {
    let Some(prompt) = app.prompt.take() else {
        return;
    };
    app.mode = Mode::Navigate;
    let text = prompt.buffer.as_str();
    match prompt.target {
        PromptTarget::TripTitle => {
            app.apply(|store| store.rename_trip(text));
        }
        PromptTarget::DayTitle { day } => {
            app.apply(|store| store.rename_day(day, text));
        }
        PromptTarget::NewItem { day, category } => {
            app.apply(|store| store.add_item(day, category, text));
        }
        PromptTarget::ItemLink {
            day,
            category,
            item,
        } => {
            app.apply(|store| store.set_item_link(day, category, item, text));
        }
    }
}
