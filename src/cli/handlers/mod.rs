use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::data_dir;
use crate::io::kv::FileStore;
use crate::io::lock::FileLock;
use crate::io::recovery;
use crate::ops::itinerary_ops::EditError;
use crate::store::{ItineraryStore, Outcome, StoreError};

type CliStore = ItineraryStore<FileStore>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = resolve_dir(cli.project_dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(&dir),
        Some(cmd) => match cmd {
            // Read commands
            Commands::Show => cmd_show(&dir, json),
            Commands::Recovery(args) => cmd_recovery(&dir, args, json),

            // Write commands
            Commands::Title(args) => edit(&dir, |store| store.rename_trip(&args.text)),
            Commands::AddDay => cmd_add_day(&dir),
            Commands::ToggleDay(args) => {
                let day = position(args.day, "day")?;
                edit(&dir, |store| store.toggle_day(day))
            }
            Commands::RenameDay(args) => {
                let day = position(args.day, "day")?;
                edit(&dir, |store| store.rename_day(day, &args.title))
            }
            Commands::DeleteDay(args) => cmd_delete_day(&dir, args),
            Commands::ToggleCategory(args) => {
                let day = position(args.day, "day")?;
                let category = position(args.category, "category")?;
                edit(&dir, |store| store.toggle_category(day, category))
            }
            Commands::Add(args) => {
                let day = position(args.day, "day")?;
                let category = position(args.category, "category")?;
                edit(&dir, |store| store.add_item(day, category, &args.text))
            }
            Commands::Link(args) => {
                let day = position(args.day, "day")?;
                let category = position(args.category, "category")?;
                let item = position(args.item, "item")?;
                edit(&dir, |store| store.set_item_link(day, category, item, &args.url))
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The data directory for this run: found above the start directory, or
/// to be created in it on first write
fn resolve_dir(project_dir: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let start = match project_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir.display(), e))?,
        None => std::env::current_dir()?,
    };
    Ok(data_dir::resolve_data_dir(&start))
}

fn load_store(dir: &Path) -> Result<CliStore, Box<dyn std::error::Error>> {
    let config = config_io::read_config(dir)?;
    let kv = FileStore::open(dir)?;
    Ok(ItineraryStore::load(kv, &config.trip))
}

/// Convert a 1-based command-line position to an index
fn position(n: usize, what: &str) -> Result<usize, String> {
    n.checked_sub(1)
        .ok_or_else(|| format!("{} positions start at 1", what))
}

/// Describe an out-of-range edit with 1-based positions
fn describe_edit_error(e: &EditError) -> String {
    match e {
        EditError::EmptyInput => "empty input".to_string(),
        EditError::DayOutOfRange(day) => format!("day {} not found", day + 1),
        EditError::CategoryOutOfRange { day, category } => {
            format!("category {} not found in day {}", category + 1, day + 1)
        }
        EditError::ItemOutOfRange {
            day,
            category,
            item,
        } => format!(
            "item {} not found in day {} category {}",
            item + 1,
            day + 1,
            category + 1
        ),
    }
}

/// Load, edit and save under the data directory lock. Blank input is
/// reported but is not an error; a missing position is.
fn edit<F>(dir: &Path, op: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut CliStore) -> Result<Outcome, StoreError>,
{
    let _lock = FileLock::acquire_default(dir)?;
    let mut store = load_store(dir)?;
    match op(&mut store)? {
        Outcome::Changed => Ok(()),
        Outcome::Unchanged(e) if e.is_empty_input() => {
            eprintln!("nothing changed: {}", describe_edit_error(&e));
            Ok(())
        }
        Outcome::Unchanged(e) => Err(describe_edit_error(&e).into()),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(dir)?;
    let it = store.itinerary();
    if json {
        println!("{}", serde_json::to_string_pretty(&trip_to_json(it))?);
    } else {
        for line in format_trip(it) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_recovery(
    dir: &Path,
    args: RecoveryCmd,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(RecoveryAction::Path) = args.action {
        println!("{}", recovery::recovery_log_path(dir).display());
        return Ok(());
    }

    let limit = args.limit.unwrap_or(10);
    let entries = recovery::read_recovery_entries(dir, Some(limit));

    if json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("recovery log is empty");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_recovery_entry(entry) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add_day(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = FileLock::acquire_default(dir)?;
    let mut store = load_store(dir)?;
    store.add_day()?;
    let days = &store.itinerary().days;
    if let Some(day) = days.last() {
        println!("{}. {}", days.len(), day.title);
    }
    Ok(())
}

fn cmd_delete_day(dir: &Path, args: DeleteDayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let day = position(args.day, "day")?;
    if !args.yes {
        return Err(format!(
            "refusing to delete day {} without --yes (its items are deleted too)",
            args.day
        )
        .into());
    }

    let _lock = FileLock::acquire_default(dir)?;
    let mut store = load_store(dir)?;
    let title = store.itinerary().days.get(day).map(|d| d.title.clone());
    match store.delete_day(day)? {
        Outcome::Changed => {
            if let Some(title) = title {
                println!("deleted \"{}\"", title);
            }
            Ok(())
        }
        Outcome::Unchanged(e) => Err(describe_edit_error(&e).into()),
    }
}
