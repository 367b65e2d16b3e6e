use datebox_tui::{FieldProps, TuiOptions, tui_main};
use std::io::{self, Write};

/// Open the interactive picker and print the final value on exit
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct PickArgs {
    /// Initial value as YYYY-MM-DD
    #[arg(long)]
    pub value: Option<String>,

    /// Field label
    #[arg(long, default_value = "Date")]
    pub label: String,

    /// Error text shown under the field
    #[arg(long)]
    pub error: Option<String>,

    /// Text shown while the field is empty
    #[arg(long, default_value = "DD/MM/YYYY")]
    pub placeholder: String,
}

impl PickArgs {
    fn into_options(self) -> TuiOptions {
        TuiOptions {
            value: self.value,
            props: FieldProps {
                label: self.label,
                error: self.error,
                placeholder: self.placeholder,
            },
            on_commit: None,
        }
    }
}

/// Write a failed run to `out`. Logs captured while the picker ran are never
/// shown, so this is the only place the error surfaces.
pub fn report_failure<W: Write>(out: &mut W, error: &io::Error) {
    let _ = writeln!(out, "datebox pick failed: {}", error);
}

pub async fn handle_pick(args: PickArgs) -> io::Result<()> {
    let value = tui_main(args.into_options()).await?;
    println!("{}", value);
    Ok(())
}
