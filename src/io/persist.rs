//! Layout of the itinerary inside a key-value store.
//!
//! Two independent entries: the raw trip title, and the day list as a
//! JSON array. Each one loads on its own; a bad value in one never costs
//! the other.

use crate::io::kv::KeyValueStore;
use crate::model::itinerary::Day;

pub const TRIP_TITLE_KEY: &str = "tripTitle";
pub const TRAVEL_DAYS_KEY: &str = "travelDays";

/// Result of reading one persisted entry
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Stored(T),
    Missing,
    /// Present but unusable; `raw` is kept so it can be preserved
    Corrupt { raw: String, error: String },
}

impl<T> Loaded<T> {
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Loaded::Stored(v) => v,
            Loaded::Missing | Loaded::Corrupt { .. } => f(),
        }
    }
}

/// An empty stored title counts as missing.
pub fn load_title(store: &impl KeyValueStore) -> Loaded<String> {
    match store.get(TRIP_TITLE_KEY) {
        Some(title) if !title.is_empty() => Loaded::Stored(title),
        _ => Loaded::Missing,
    }
}

pub fn load_days(store: &impl KeyValueStore) -> Loaded<Vec<Day>> {
    match store.get(TRAVEL_DAYS_KEY) {
        None => Loaded::Missing,
        Some(raw) => match parse_days(&raw) {
            Ok(days) => Loaded::Stored(days),
            Err(e) => Loaded::Corrupt {
                raw,
                error: e.to_string(),
            },
        },
    }
}

pub fn serialize_days(days: &[Day]) -> Result<String, serde_json::Error> {
    serde_json::to_string(days)
}

/// Parse a stored day list. Well-formed JSON with an empty day title,
/// category name or item text is rejected like malformed JSON.
pub fn parse_days(raw: &str) -> Result<Vec<Day>, serde_json::Error> {
    let days: Vec<Day> = serde_json::from_str(raw)?;
    if let Some(what) = find_empty_text(&days) {
        return Err(serde::de::Error::custom(format!("empty {}", what)));
    }
    Ok(days)
}

fn find_empty_text(days: &[Day]) -> Option<String> {
    for (d, day) in days.iter().enumerate() {
        if day.title.is_empty() {
            return Some(format!("title in day {}", d + 1));
        }
        for (c, cat) in day.categories.iter().enumerate() {
            if cat.name.is_empty() {
                return Some(format!("name in day {} category {}", d + 1, c + 1));
            }
            if let Some(i) = cat.items.iter().position(|item| item.text.is_empty()) {
                return Some(format!(
                    "text in day {} category {} item {}",
                    d + 1,
                    c + 1,
                    i + 1
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryStore;
    use crate::model::itinerary::{Item, default_days};
    use pretty_assertions::assert_eq;

    fn sample_days() -> Vec<Day> {
        let mut days = default_days(&crate::model::default_category_names());
        days[0].categories[0].items.push(Item {
            text: "Visit lake".into(),
            link: "https://maps.example/x".into(),
        });
        days[0].categories[3].is_expanded = false;
        days.push(Day::new("Day 2", &["food"]));
        days[1].is_expanded = false;
        days
    }

    #[test]
    fn days_round_trip() {
        let days = sample_days();
        let raw = serialize_days(&days).unwrap();
        assert_eq!(parse_days(&raw).unwrap(), days);
    }

    #[test]
    fn reads_externally_written_layout() {
        let raw = r#"[{"title":"Day 1","isExpanded":false,"categories":[
            {"name":"food","isExpanded":true,"items":[{"text":"Noodles","link":""}]}]}]"#;
        let days = parse_days(raw).unwrap();
        assert_eq!(days[0].title, "Day 1");
        assert!(!days[0].is_expanded);
        assert_eq!(days[0].categories[0].items[0].text, "Noodles");
    }

    #[test]
    fn missing_keys_load_as_missing() {
        let store = MemoryStore::new();
        assert_eq!(load_title(&store), Loaded::Missing);
        assert_eq!(load_days(&store), Loaded::Missing);
    }

    #[test]
    fn empty_title_is_missing() {
        let store = MemoryStore::with(&[(TRIP_TITLE_KEY, "")]);
        assert_eq!(load_title(&store), Loaded::Missing);
    }

    #[test]
    fn corrupt_days_keep_raw_text() {
        let store = MemoryStore::with(&[(TRAVEL_DAYS_KEY, "null")]);
        match load_days(&store) {
            Loaded::Corrupt { raw, .. } => assert_eq!(raw, "null"),
            other => panic!("expected corrupt, got {:?}", other),
        }
    }

    #[test]
    fn title_and_days_load_independently() {
        let store = MemoryStore::with(&[(TRIP_TITLE_KEY, "Coast"), (TRAVEL_DAYS_KEY, "{bad")]);
        assert_eq!(load_title(&store), Loaded::Stored("Coast".to_string()));
        assert!(matches!(load_days(&store), Loaded::Corrupt { .. }));
    }

    #[test]
    fn empty_required_text_is_corrupt() {
        for raw in [
            r#"[{"title":"","isExpanded":true,"categories":[]}]"#,
            r#"[{"title":"Day 1","isExpanded":true,"categories":[{"name":"","isExpanded":true,"items":[]}]}]"#,
            r#"[{"title":"Day 1","isExpanded":true,"categories":[{"name":"food","isExpanded":true,"items":[{"text":"","link":""}]}]}]"#,
        ] {
            let store = MemoryStore::with(&[(TRAVEL_DAYS_KEY, raw)]);
            match load_days(&store) {
                Loaded::Corrupt { raw: kept, error } => {
                    assert_eq!(kept, raw);
                    assert!(error.starts_with("empty "), "{}", error);
                }
                other => panic!("expected corrupt, got {:?}", other),
            }
        }
    }

    #[test]
    fn empty_link_is_fine() {
        let raw = r#"[{"title":"Day 1","isExpanded":true,"categories":[{"name":"food","isExpanded":true,"items":[{"text":"Noodles","link":""}]}]}]"#;
        assert_eq!(parse_days(raw).unwrap()[0].categories[0].items[0].link, "");
    }
}
