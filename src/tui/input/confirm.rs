use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            match action {
                Some(ConfirmAction::DeleteDay { day }) => confirm_delete_day(app, day),
                None => {}
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn confirm_delete_day(app: &mut App, day: usize) {
    let title = app.itinerary().days.get(day).map(|d| d.title.clone());
    if app.apply(|store| store.delete_day(day))
        && let Some(title) = title
    {
        app.status_message = Some(format!("deleted \"{}\"", title));
    }
}
