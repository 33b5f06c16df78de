use serde::{Deserialize, Serialize};

/// Title given to a trip that has never been renamed
pub const DEFAULT_TRIP_TITLE: &str = "Travel Itinerary";

/// Category names every new day starts with, in display order
pub const DEFAULT_CATEGORIES: [&str; 4] = [
    "route/nature",
    "sightseeing/experience",
    "food",
    "camping/car-camping",
];

/// A single planned entry with an optional map link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    /// External map URL. Empty string means no link.
    #[serde(default)]
    pub link: String,
}

impl Item {
    pub fn new(text: String) -> Self {
        Item {
            text,
            link: String::new(),
        }
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A fixed-purpose grouping of items within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub is_expanded: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    /// An empty, expanded category
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            is_expanded: true,
            items: Vec::new(),
        }
    }
}

/// One day of the trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub title: String,
    pub is_expanded: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Day {
    /// A new expanded day holding one empty category per name.
    ///
    /// The names are copied in, so later changes to the configured
    /// category list never touch days that already exist.
    pub fn new<S: AsRef<str>>(title: impl Into<String>, category_names: &[S]) -> Self {
        Day {
            title: title.into(),
            is_expanded: true,
            categories: category_names
                .iter()
                .map(|name| Category::new(name.as_ref()))
                .collect(),
        }
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

/// The whole in-memory itinerary: trip title plus ordered days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    pub title: String,
    pub days: Vec<Day>,
    /// Category names snapshotted into each day created from now on
    pub category_names: Vec<String>,
}

impl Itinerary {
    /// The state a first launch starts from: one expanded "Day 1"
    pub fn new(title: impl Into<String>, category_names: Vec<String>) -> Self {
        let days = default_days(&category_names);
        Itinerary {
            title: title.into(),
            days,
            category_names,
        }
    }
}

impl Default for Itinerary {
    fn default() -> Self {
        Itinerary::new(DEFAULT_TRIP_TITLE, default_category_names())
    }
}

pub fn default_category_names() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// The day list used when nothing usable is persisted
pub fn default_days(category_names: &[String]) -> Vec<Day> {
    vec![Day::new("Day 1", category_names)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_itinerary_has_one_expanded_day() {
        let it = Itinerary::default();
        assert_eq!(it.title, "Travel Itinerary");
        assert_eq!(it.days.len(), 1);
        let day = &it.days[0];
        assert_eq!(day.title, "Day 1");
        assert!(day.is_expanded);
        let names: Vec<&str> = day.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CATEGORIES);
        assert!(day.categories.iter().all(|c| c.is_expanded && c.items.is_empty()));
    }

    #[test]
    fn day_serializes_with_camel_case_keys() {
        let mut day = Day::new("Day 1", &["food"]);
        day.categories[0].items.push(Item::new("Noodles".into()));
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["isExpanded"], true);
        assert_eq!(json["categories"][0]["isExpanded"], true);
        assert_eq!(json["categories"][0]["items"][0]["text"], "Noodles");
        assert_eq!(json["categories"][0]["items"][0]["link"], "");
    }

    #[test]
    fn item_link_defaults_to_empty() {
        let item: Item = serde_json::from_str(r#"{"text":"Lake"}"#).unwrap();
        assert_eq!(item.link, "");
        assert!(!item.has_link());
    }

    #[test]
    fn item_count_sums_categories() {
        let mut day = Day::new("Day 1", &["a", "b"]);
        day.categories[0].items.push(Item::new("x".into()));
        day.categories[1].items.push(Item::new("y".into()));
        day.categories[1].items.push(Item::new("z".into()));
        assert_eq!(day.item_count(), 3);
    }
}
