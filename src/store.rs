//! The itinerary store: owns the in-memory itinerary, applies edits, and
//! writes both persisted entries after every edit that changes something.

use std::path::Path;

use crate::io::kv::KeyValueStore;
use crate::io::persist::{self, Loaded, TRAVEL_DAYS_KEY, TRIP_TITLE_KEY};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::TripConfig;
use crate::model::itinerary::{DEFAULT_TRIP_TITLE, Day, Itinerary, default_days};
use crate::ops::itinerary_ops::{self, EditError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize days: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write store: {0}")]
    Write(#[from] std::io::Error),
    #[error("could not read store: {0}")]
    Read(std::io::Error),
}

/// What an edit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and was saved
    Changed,
    /// Nothing changed; the reason is kept for front ends that report it
    Unchanged(EditError),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

pub struct ItineraryStore<S: KeyValueStore> {
    itinerary: Itinerary,
    kv: S,
    default_title: String,
    /// Set while the last save failed, so memory is ahead of the store
    unsaved: bool,
}

impl<S: KeyValueStore> ItineraryStore<S> {
    /// Load title and days from `kv`, each falling back to its own default
    /// when missing or unreadable. Unreadable values are copied to the
    /// recovery log before they are replaced.
    pub fn load(kv: S, config: &TripConfig) -> Self {
        // Empty titles and category names never reach persisted state
        let category_names: Vec<String> = config
            .default_categories
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect();
        let default_title = if config.default_title.is_empty() {
            DEFAULT_TRIP_TITLE.to_string()
        } else {
            config.default_title.clone()
        };

        let (title, days) = read_entries(&kv, &default_title, &category_names);
        ItineraryStore {
            itinerary: Itinerary {
                title,
                days,
                category_names,
            },
            kv,
            default_title,
            unsaved: false,
        }
    }

    /// Re-read title and days if another writer changed the store since
    /// this one last read or wrote it. Skipped while a failed save is
    /// pending, so the edit that failed is written by the next save.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        if self.unsaved || !self.kv.refresh().map_err(StoreError::Read)? {
            return Ok(());
        }
        let (title, days) = read_entries(
            &self.kv,
            &self.default_title,
            &self.itinerary.category_names,
        );
        self.itinerary.title = title;
        self.itinerary.days = days;
        Ok(())
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Write both entries in full. On failure the payload goes to the
    /// recovery log so the edit is not lost.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let days = persist::serialize_days(&self.itinerary.days)?;
        let entries = [
            (TRIP_TITLE_KEY, self.itinerary.title.as_str()),
            (TRAVEL_DAYS_KEY, days.as_str()),
        ];
        if let Err(e) = self.kv.put(&entries) {
            if let Some(dir) = self.kv.dir() {
                log_failed_write(dir, &self.itinerary.title, &days, &e);
            }
            self.unsaved = true;
            return Err(StoreError::Write(e));
        }
        self.unsaved = false;
        Ok(())
    }

    /// Save when the edit went through, otherwise report why it did not
    fn commit<T>(&mut self, result: Result<T, EditError>) -> Result<Outcome, StoreError> {
        match result {
            Ok(_) => {
                self.save()?;
                Ok(Outcome::Changed)
            }
            Err(e) => Ok(Outcome::Unchanged(e)),
        }
    }

    pub fn rename_trip(&mut self, title: &str) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::rename_trip(&mut self.itinerary, title);
        self.commit(r)
    }

    pub fn add_day(&mut self) -> Result<Outcome, StoreError> {
        itinerary_ops::add_day(&mut self.itinerary);
        self.commit(Ok(()))
    }

    pub fn toggle_day(&mut self, day: usize) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::toggle_day(&mut self.itinerary, day);
        self.commit(r)
    }

    pub fn rename_day(&mut self, day: usize, title: &str) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::rename_day(&mut self.itinerary, day, title);
        self.commit(r)
    }

    /// Remove a day. Callers confirm with the user first. The removed day
    /// is copied to the recovery log since there is no undo.
    pub fn delete_day(&mut self, day: usize) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::delete_day(&mut self.itinerary, day);
        if let (Ok(removed), Some(dir)) = (&r, self.kv.dir()) {
            recovery::log_recovery(
                dir,
                RecoveryEntry::now(
                    RecoveryCategory::Delete,
                    &format!("day \"{}\" deleted", removed.title),
                    vec![("Position".to_string(), (day + 1).to_string())],
                    serde_json::to_string_pretty(removed)?,
                ),
            );
        }
        self.commit(r)
    }

    pub fn toggle_category(&mut self, day: usize, category: usize) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::toggle_category(&mut self.itinerary, day, category);
        self.commit(r)
    }

    pub fn add_item(
        &mut self,
        day: usize,
        category: usize,
        text: &str,
    ) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::add_item(&mut self.itinerary, day, category, text);
        self.commit(r)
    }

    pub fn set_item_link(
        &mut self,
        day: usize,
        category: usize,
        item: usize,
        link: &str,
    ) -> Result<Outcome, StoreError> {
        let r = itinerary_ops::set_item_link(&mut self.itinerary, day, category, item, link);
        self.commit(r)
    }
}

/// Title and days from `kv`, each falling back to its own default when
/// missing or unreadable. Unreadable days are copied to the recovery log.
fn read_entries<S: KeyValueStore>(
    kv: &S,
    default_title: &str,
    category_names: &[String],
) -> (String, Vec<Day>) {
    let title = persist::load_title(kv).unwrap_or_else(|| default_title.to_string());

    let loaded_days = persist::load_days(kv);
    if let (Loaded::Corrupt { raw, error }, Some(dir)) = (&loaded_days, kv.dir()) {
        recovery::log_recovery(
            dir,
            RecoveryEntry::now(
                RecoveryCategory::Parse,
                "unreadable day list replaced with default",
                vec![
                    ("Key".to_string(), TRAVEL_DAYS_KEY.to_string()),
                    ("Error".to_string(), error.clone()),
                ],
                raw.clone(),
            ),
        );
    }
    let days = loaded_days.unwrap_or_else(|| default_days(category_names));
    (title, days)
}

fn log_failed_write(dir: &Path, title: &str, days: &str, error: &std::io::Error) {
    recovery::log_recovery(
        dir,
        RecoveryEntry::now(
            RecoveryCategory::Write,
            "store write failed",
            vec![
                (TRIP_TITLE_KEY.to_string(), title.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            days.to_string(),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::{FileStore, MemoryStore};
    use crate::model::itinerary::DEFAULT_CATEGORIES;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fresh() -> ItineraryStore<MemoryStore> {
        ItineraryStore::load(MemoryStore::new(), &TripConfig::default())
    }

    /// The persisted entries must always mirror memory.
    fn assert_persisted(store: &ItineraryStore<MemoryStore>) {
        let kv = store.backend();
        assert_eq!(
            kv.get(TRIP_TITLE_KEY).as_deref(),
            Some(store.itinerary().title.as_str())
        );
        let days: Vec<Day> = persist::parse_days(&kv.get(TRAVEL_DAYS_KEY).unwrap()).unwrap();
        assert_eq!(days, store.itinerary().days);
    }

    #[test]
    fn fresh_load_gives_defaults() {
        let store = fresh();
        let it = store.itinerary();
        assert_eq!(it.title, "Travel Itinerary");
        assert_eq!(it.days.len(), 1);
        assert_eq!(it.days[0].title, "Day 1");
        assert!(it.days[0].is_expanded);
        assert_eq!(it.days[0].categories.len(), 4);
        assert!(
            it.days[0]
                .categories
                .iter()
                .all(|c| c.is_expanded && c.items.is_empty())
        );
    }

    #[test]
    fn loading_does_not_write() {
        let store = fresh();
        assert!(store.backend().entries.is_empty());
    }

    #[test]
    fn every_edit_is_persisted() {
        let mut store = fresh();
        assert!(store.add_day().unwrap().is_changed());
        assert_persisted(&store);
        store.rename_trip("Coast").unwrap();
        assert_persisted(&store);
        store.toggle_day(1).unwrap();
        assert_persisted(&store);
        store.rename_day(0, "Arrival").unwrap();
        assert_persisted(&store);
        store.toggle_category(0, 2).unwrap();
        assert_persisted(&store);
        store.add_item(0, 0, "Visit lake").unwrap();
        assert_persisted(&store);
        store.set_item_link(0, 0, 0, "https://maps.example/x").unwrap();
        assert_persisted(&store);
        store.delete_day(1).unwrap();
        assert_persisted(&store);
    }

    #[test]
    fn add_day_on_fresh_state() {
        let mut store = fresh();
        store.add_day().unwrap();
        let days = &store.itinerary().days;
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].title, "Day 2");
    }

    #[test]
    fn add_item_and_link_scenario() {
        let mut store = fresh();
        store.add_item(0, 0, "Visit lake").unwrap();
        store
            .set_item_link(0, 0, 0, "https://maps.example/x")
            .unwrap();
        let items = &store.itinerary().days[0].categories[0].items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Visit lake");
        assert_eq!(items[0].link, "https://maps.example/x");
    }

    #[test]
    fn delete_only_day_then_add() {
        let mut store = fresh();
        store.delete_day(0).unwrap();
        assert!(store.itinerary().days.is_empty());
        assert_persisted(&store);
        store.add_day().unwrap();
        assert_eq!(store.itinerary().days[0].title, "Day 1");
    }

    #[test]
    fn toggle_category_twice_restores() {
        let mut store = fresh();
        store.toggle_category(0, 0).unwrap();
        store.toggle_category(0, 0).unwrap();
        let cats = &store.itinerary().days[0].categories;
        assert!(cats[0].is_expanded);
        assert!(cats[1].is_expanded);
    }

    #[test]
    fn rejected_edits_do_not_write() {
        let mut store = fresh();
        let outcome = store.rename_trip("").unwrap();
        assert_eq!(outcome, Outcome::Unchanged(EditError::EmptyInput));
        assert_eq!(
            store.toggle_day(4).unwrap(),
            Outcome::Unchanged(EditError::DayOutOfRange(4))
        );
        assert!(!store.add_item(0, 0, "").unwrap().is_changed());
        assert!(store.backend().entries.is_empty());
    }

    #[test]
    fn restores_saved_state() {
        let mut store = fresh();
        store.rename_trip("Coast").unwrap();
        store.add_item(0, 2, "Dumplings").unwrap();
        let kv = store.backend().clone();

        let reloaded = ItineraryStore::load(kv, &TripConfig::default());
        assert_eq!(reloaded.itinerary(), store.itinerary());
    }

    #[test]
    fn corrupt_days_fall_back_but_title_survives() {
        let kv = MemoryStore::with(&[(TRIP_TITLE_KEY, "Coast"), (TRAVEL_DAYS_KEY, "{oops")]);
        let store = ItineraryStore::load(kv, &TripConfig::default());
        assert_eq!(store.itinerary().title, "Coast");
        assert_eq!(store.itinerary().days.len(), 1);
        assert_eq!(store.itinerary().days[0].title, "Day 1");
    }

    #[test]
    fn configured_defaults_apply_to_fresh_state_only() {
        let config = TripConfig {
            default_title: "Summer".into(),
            default_categories: vec!["sights".into(), "food".into()],
        };
        let mut store = ItineraryStore::load(MemoryStore::new(), &config);
        assert_eq!(store.itinerary().title, "Summer");
        assert_eq!(store.itinerary().days[0].categories.len(), 2);
        store.add_day().unwrap();
        let kv = store.backend().clone();

        let reloaded = ItineraryStore::load(kv, &TripConfig::default());
        assert_eq!(reloaded.itinerary().days[1].categories.len(), 2);
        assert_eq!(reloaded.itinerary().title, "Summer");
    }

    #[test]
    fn empty_configured_names_never_reach_storage() {
        let config = TripConfig {
            default_title: String::new(),
            default_categories: vec!["food".into(), String::new()],
        };
        let mut store = ItineraryStore::load(MemoryStore::new(), &config);
        assert_eq!(store.itinerary().title, "Travel Itinerary");
        store.add_day().unwrap();
        assert_persisted(&store);
        assert_eq!(
            store.backend().get(TRIP_TITLE_KEY).as_deref(),
            Some("Travel Itinerary")
        );
        for day in &store.itinerary().days {
            let names: Vec<&str> = day.categories.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["food"]);
        }
    }

    #[test]
    fn deleted_day_with_line_break_logs_one_entry() {
        let tmp = TempDir::new().unwrap();
        let kv = FileStore::open(tmp.path()).unwrap();
        let mut store = ItineraryStore::load(kv, &TripConfig::default());
        store.rename_day(0, "Day\nOne").unwrap();
        store.delete_day(0).unwrap();

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert_eq!(entries[0].description, "day \"Day\\nOne\" deleted");
        assert!(entries[0].body.contains("Day\\nOne"));
    }

    #[test]
    fn whitespace_input_is_saved() {
        let mut store = fresh();
        assert!(store.rename_trip(" ").unwrap().is_changed());
        assert!(store.add_item(0, 0, "  ").unwrap().is_changed());
        assert_persisted(&store);
        assert_eq!(store.backend().get(TRIP_TITLE_KEY).as_deref(), Some(" "));
    }

    #[test]
    fn failed_write_keeps_memory_and_reports_error() {
        let mut kv = MemoryStore::new();
        kv.fail_writes = true;
        let mut store = ItineraryStore::load(kv, &TripConfig::default());
        let err = store.add_day().unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));
        assert_eq!(store.itinerary().days.len(), 2);
    }

    #[test]
    fn file_store_logs_deletes_and_corruption() {
        let tmp = TempDir::new().unwrap();
        let kv = FileStore::open(tmp.path()).unwrap();
        let mut store = ItineraryStore::load(kv, &TripConfig::default());
        store.rename_day(0, "Arrival").unwrap();
        store.delete_day(0).unwrap();

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert!(entries[0].body.contains("Arrival"));

        let mut kv = FileStore::open(tmp.path()).unwrap();
        kv.put(&[(TRAVEL_DAYS_KEY, "[{]")]).unwrap();
        let store = ItineraryStore::load(kv, &TripConfig::default());
        assert_eq!(
            store.itinerary().days[0].categories.len(),
            DEFAULT_CATEGORIES.len()
        );
        let entries = recovery::read_recovery_entries(tmp.path(), Some(1));
        assert_eq!(entries[0].category, RecoveryCategory::Parse);
        assert_eq!(entries[0].body, "[{]");
    }

    #[test]
    fn reload_picks_up_other_writers() {
        let tmp = TempDir::new().unwrap();
        let config = TripConfig::default();
        let mut mine = ItineraryStore::load(FileStore::open(tmp.path()).unwrap(), &config);
        mine.add_item(0, 0, "Visit lake").unwrap();

        let mut other = ItineraryStore::load(FileStore::open(tmp.path()).unwrap(), &config);
        other.rename_trip("Busan").unwrap();
        other.add_day().unwrap();

        mine.reload().unwrap();
        assert_eq!(mine.itinerary().title, "Busan");
        assert_eq!(mine.itinerary().days, other.itinerary().days);

        mine.toggle_day(1).unwrap();
        let reopened = ItineraryStore::load(FileStore::open(tmp.path()).unwrap(), &config);
        assert_eq!(reopened.itinerary().title, "Busan");
        assert_eq!(reopened.itinerary().days.len(), 2);
        assert!(!reopened.itinerary().days[1].is_expanded);
        assert_eq!(reopened.itinerary().days[0].categories[0].items[0].text, "Visit lake");
    }

    #[test]
    fn reload_keeps_edits_that_failed_to_save() {
        let tmp = TempDir::new().unwrap();
        let config = TripConfig::default();
        let mut store = ItineraryStore::load(FileStore::open(tmp.path()).unwrap(), &config);
        store.rename_trip("Coast").unwrap();

        // A directory in the store file's place makes the next write fail
        let path = tmp.path().join(crate::io::kv::STORE_FILE);
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        fs::write(path.join("blocker"), "").unwrap();
        assert!(store.rename_trip("Mountains").is_err());

        fs::remove_dir_all(&path).unwrap();
        fs::write(&path, r#"{"tripTitle":"Busan"}"#).unwrap();
        store.reload().unwrap();
        assert_eq!(store.itinerary().title, "Mountains");

        store.save().unwrap();
        store.reload().unwrap();
        assert_eq!(store.itinerary().title, "Mountains");
    }
}
