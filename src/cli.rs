//! 命令列參數
//!
//! 設定優先順序：預設值 → 設定檔 → 命令列

use crate::config::{Config, SETTINGS_FILE_NAME};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Sanitizes Noritsu scan files by renaming images and correcting EXIF metadata.
#[derive(Parser, Debug)]
#[command(name = "noritsu_cleanup")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// The path to search for Noritsu scan files
    #[arg(default_value = ".")]
    pub search_path: PathBuf,

    /// How many characters of zero padding to add for the roll number (0-16) [default: 4]
    #[arg(
        long,
        alias = "roll_padding",
        value_parser = clap::value_parser!(u8).range(0..=16)
    )]
    pub roll_padding: Option<u8>,

    /// Use the DX reader frame numbers/names in the final filename instead of
    /// numbering frames sequentially
    #[arg(long, alias = "use_frame_names")]
    pub use_frame_names: bool,

    /// Keep the *.thm thumbnails and Info_HD.txt files EZController leaves behind
    #[arg(long)]
    pub keep_stray_files: bool,

    /// Show the planned changes without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the exiftool executable
    #[arg(long, env = "EXIFTOOL_PATH")]
    pub exiftool: Option<String>,

    /// Settings file to load
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    pub config: PathBuf,

    /// Don't ask for confirmation when using frame names
    #[arg(short, long)]
    pub yes: bool,

    /// Log every step (debug level)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// 載入設定檔並套用命令列參數
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        let options = &mut config.options;
        if let Some(roll_padding) = self.roll_padding {
            options.roll_padding = usize::from(roll_padding);
        }
        if self.use_frame_names {
            options.use_frame_names = true;
        }
        if self.keep_stray_files {
            options.delete_stray_files = false;
        }
        if let Some(exiftool) = &self.exiftool {
            options.exiftool_path.clone_from(exiftool);
        }
    }
}
