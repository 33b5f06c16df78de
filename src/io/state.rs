use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json). Never part of the itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Cursor row in the flattened view
    #[serde(default)]
    pub cursor: usize,
    /// First visible row
    #[serde(default)]
    pub scroll_offset: usize,
}

pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(state)?;
    fs::write(dir.join(".state.json"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            cursor: 5,
            scroll_offset: 2,
        };
        write_ui_state(dir.path(), &state).unwrap();
        assert_eq!(read_ui_state(dir.path()), Some(state));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, UiState::default());
    }
}
