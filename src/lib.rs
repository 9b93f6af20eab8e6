pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod tools;

use crate::component::noritsu_cleaner::CleanResult;
use anyhow::Result;
use console::style;
use dialoguer::Confirm;

/// frame name 模式可能覆蓋檔案，在終端機上需要使用者確認（警告已由整理器輸出）
pub fn confirm_frame_names(assume_yes: bool) -> Result<bool> {
    if assume_yes || !console::user_attended() {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt("Continue with frame names?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}

pub fn display_summary(result: &CleanResult, dry_run: bool) {
    println!();
    if dry_run {
        println!("{}", style("=== Dry run (no files changed) ===").cyan().bold());
    } else {
        println!("{}", style("=== Cleanup summary ===").cyan().bold());
    }
    println!(
        "  Directories processed: {}",
        style(result.directories_processed).green()
    );
    if result.directories_skipped > 0 {
        println!(
            "  Directories skipped: {}",
            style(result.directories_skipped).yellow()
        );
    }
    if dry_run {
        return;
    }
    println!("  Files renamed: {}", style(result.files_renamed).green());
    println!(
        "  Stray files deleted: {}",
        style(result.stray_files_deleted).green()
    );
    println!(
        "  Timestamps written: {}",
        style(result.timestamps_written).green()
    );
    if result.timestamps_failed > 0 {
        println!(
            "  Timestamps failed: {}",
            style(result.timestamps_failed).red()
        );
    }
}
