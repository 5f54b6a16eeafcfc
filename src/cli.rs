use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Arcade snake with a leaderboard")]
pub struct Cli {
    /// Directory holding settings.json and leaderboard.json
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// File the log is written to
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
