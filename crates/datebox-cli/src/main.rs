mod components;
mod models;

use clap::{Parser, Subcommand};
use components::grid::{GridArgs, handle_grid};
use components::pick::{PickArgs, handle_pick, report_failure};
use components::replay::{TypeArgs, handle_type};
use dotenv::dotenv;

/// Date field with a DD/MM/YYYY mask and a month picker
#[derive(Parser)]
#[command(name = "datebox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive picker
    Pick(PickArgs),
    /// Replay keystrokes against a headless field
    Type(TypeArgs),
    /// Print a month grid
    Grid(GridArgs),
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        // the picker captures logs in memory while the terminal is in raw mode
        Command::Pick(args) => {
            if let Err(e) = handle_pick(args).await {
                report_failure(&mut std::io::stderr(), &e);
                std::process::exit(1);
            }
        }
        Command::Type(args) => {
            env_logger::init();
            handle_type(args);
        }
        Command::Grid(args) => {
            env_logger::init();
            handle_grid(args);
        }
    }
}
