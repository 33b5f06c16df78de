mod confirm;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use navigate::handle_navigate;
use prompt::handle_prompt;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Prompt => handle_prompt(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}
