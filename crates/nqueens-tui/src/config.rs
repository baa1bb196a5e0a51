//! Command line and environment configuration

use crate::theme::ThemeName;
use clap::Parser;
use nqueens_core::FigureKind;
use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NQUEENS_DATA_DIR";

const BEST_TIMES_FILE: &str = "nqueens_best_times.json";
const LOG_FILE: &str = "nqueens.log";

#[derive(Parser, Debug)]
#[command(name = "nqueens", version, about = "Place N figures on an NxN board so that none attack each other")]
pub struct Args {
    /// Board size of the first game
    #[arg(short, long, default_value_t = 8)]
    pub size: usize,

    /// Figure to place: queen or knight
    #[arg(short, long, default_value = "queen")]
    pub figure: FigureKind,

    /// Color theme
    #[arg(short, long, value_enum, default_value_t = ThemeName::Dark)]
    pub theme: ThemeName,

    /// Largest board offered in the new game menu
    #[arg(long, default_value_t = 16)]
    pub max_size: usize,

    /// Directory for best times and the log file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Do not ring the terminal bell
    #[arg(short, long)]
    pub quiet: bool,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub board_size: usize,
    pub figure: FigureKind,
    pub theme: ThemeName,
    pub max_board_size: usize,
    pub data_dir: PathBuf,
    pub bell: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let data_dir = args
            .data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        Self {
            board_size: args.size,
            figure: args.figure,
            theme: args.theme,
            max_board_size: args.max_size,
            data_dir,
            bell: !args.quiet,
        }
    }

    pub fn best_times_path(&self) -> PathBuf {
        self.data_dir.join(BEST_TIMES_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("nqueens"))
        .unwrap_or_else(|| PathBuf::from("."))
}
