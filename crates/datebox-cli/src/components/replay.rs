use crate::models::parse_date_arg;
use chrono::NaiveDate;
use datebox_core::{Clock, Commit, DateInput, DateInputSnapshot, FixedClock, SharedClock, SystemClock};
use serde::Serialize;
use std::sync::Arc;

/// Key standing in for Backspace
const BACKSPACE: char = '<';

/// Replay keystrokes against a headless field and print the result as JSON
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct TypeArgs {
    /// Characters to type; `<` deletes the last character
    pub keys: String,

    /// Initial value as YYYY-MM-DD
    #[arg(long)]
    pub value: Option<String>,

    /// Open the popup before typing and close it afterwards
    #[arg(long, default_value_t = false)]
    pub close: bool,

    /// Pretend today is this date
    #[arg(long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub commits: Vec<Commit>,
    pub state: DateInputSnapshot,
}

pub fn replay(args: &TypeArgs) -> ReplayOutput {
    let clock: SharedClock = match args.today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };
    log::debug!("Replaying {:?} with today = {}", args.keys, clock.today());

    let mut widget = DateInput::with_clock(clock).with_value(args.value.as_deref());
    let mut commits = Vec::new();

    if args.close {
        widget.open_popup();
    }
    for key in args.keys.chars() {
        let commit = match key {
            BACKSPACE => widget.backspace(),
            c => widget.type_char(c),
        };
        commits.extend(commit);
    }
    if args.close {
        commits.extend(widget.close_popup());
    }

    ReplayOutput {
        commits,
        state: widget.snapshot(),
    }
}

pub fn handle_type(args: TypeArgs) {
    let output = replay(&args);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialise replay output: {}", e),
    }
}
