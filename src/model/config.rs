use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::itinerary::{DEFAULT_TRIP_TITLE, default_category_names};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    /// Title used when no trip title is stored yet
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Categories copied into each newly created day
    #[serde(default = "default_category_names")]
    pub default_categories: Vec<String>,
}

impl Default for TripConfig {
    fn default() -> Self {
        TripConfig {
            default_title: default_title(),
            default_categories: default_category_names(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TRIP_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Palette overrides, key name to `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
