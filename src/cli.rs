use std::path::PathBuf;

use clap::Parser;

use crate::app::ViewMode;

/// Terminal calendar with German public holidays and yearly birthdays.
#[derive(Debug, Parser)]
#[command(name = "kalender-tui", version, about)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for events.json and the log file.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Keep events in memory only; nothing is read or written.
    #[arg(long)]
    pub ephemeral: bool,

    /// View to open with.
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,
}
