use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trip", about = concat!("trip v", env!("CARGO_PKG_VERSION"), " - plan a trip day by day"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Look for the .trip data directory starting here instead of the current directory
    #[arg(short = 'C', long = "project-dir", env = "TRIP_DIR", global = true)]
    pub project_dir: Option<PathBuf>,
}

/// Positions on the command line are 1-based: `add 2 1 "Lunch"` adds to
/// the first category of the second day.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the whole itinerary
    Show,
    /// Rename the trip
    Title(TitleArgs),
    /// Append a new day with the default categories
    AddDay,
    /// Expand or collapse a day
    ToggleDay(DayArg),
    /// Rename a day
    RenameDay(RenameDayArgs),
    /// Delete a day and everything in it
    DeleteDay(DeleteDayArgs),
    /// Expand or collapse a category
    ToggleCategory(CategoryArgs),
    /// Add an item to a category
    Add(AddArgs),
    /// Set the map link of an item
    Link(LinkArgs),
    /// View the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Trip and day args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TitleArgs {
    /// New trip title
    pub text: String,
}

#[derive(Args)]
pub struct DayArg {
    /// Day position (1-based)
    pub day: usize,
}

#[derive(Args)]
pub struct RenameDayArgs {
    /// Day position (1-based)
    pub day: usize,
    /// New day title
    pub title: String,
}

#[derive(Args)]
pub struct DeleteDayArgs {
    /// Day position (1-based)
    pub day: usize,
    /// Actually delete (required; there is no undo)
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Category and item args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CategoryArgs {
    /// Day position (1-based)
    pub day: usize,
    /// Category position within the day (1-based)
    pub category: usize,
}

#[derive(Args)]
pub struct AddArgs {
    /// Day position (1-based)
    pub day: usize,
    /// Category position within the day (1-based)
    pub category: usize,
    /// Item text
    pub text: String,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Day position (1-based)
    pub day: usize,
    /// Category position within the day (1-based)
    pub category: usize,
    /// Item position within the category (1-based)
    pub item: usize,
    /// Map URL
    pub url: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Print the absolute path to the recovery log
    Path,
}
