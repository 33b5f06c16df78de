use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::itinerary::{Day, Item, Itinerary};

const EXPANDED: char = '\u{25BC}'; // ▼
const COLLAPSED: char = '\u{25B6}'; // ▶

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// `show --json`: the title plus the days in their persisted layout
#[derive(Serialize)]
pub struct TripJson<'a> {
    pub title: &'a str,
    pub days: &'a [Day],
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn trip_to_json(it: &Itinerary) -> TripJson<'_> {
    TripJson {
        title: &it.title,
        days: &it.days,
    }
}

pub fn recovery_entry_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn glyph(expanded: bool) -> char {
    if expanded { EXPANDED } else { COLLAPSED }
}

/// Format one item as `text` or `text <link>`
pub fn format_item(item: &Item) -> String {
    if item.has_link() {
        format!("{} <{}>", item.text, item.link)
    } else {
        item.text.clone()
    }
}

/// Format the whole trip, numbering days, categories and items from 1 so
/// the numbers can be fed straight back to the editing commands. Collapsed
/// entries are marked but still listed in full.
pub fn format_trip(it: &Itinerary) -> Vec<String> {
    let mut lines = vec![it.title.clone()];
    if it.days.is_empty() {
        lines.push(String::new());
        lines.push("(no days)".to_string());
        return lines;
    }

    for (d, day) in it.days.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{} {}. {}", glyph(day.is_expanded), d + 1, day.title));
        for (c, cat) in day.categories.iter().enumerate() {
            lines.push(format!(
                "  {} {}. {}",
                glyph(cat.is_expanded),
                c + 1,
                cat.name
            ));
            for (i, item) in cat.items.iter().enumerate() {
                lines.push(format!("      {}. {}", i + 1, format_item(item)));
            }
        }
    }
    lines
}

/// Format a recovery entry for the terminal
pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}: {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for line in entry.body.lines() {
        lines.push(format!("    {}", line));
    }
    lines
}
