use clap::Parser;
use itinerary::cli::commands::Cli;
use itinerary::cli::handlers;

fn main() {
    // No subcommand launches the TUI
    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
