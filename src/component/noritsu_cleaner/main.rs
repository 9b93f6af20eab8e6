//! Noritsu 掃描檔整理主模組
//!
//! 逐一處理每個訂單目錄：檢查檔名 → 刪除附帶檔案 → 修正拍攝時間 → 重新命名

use super::filename_normalizer::{FilenameNormalizer, RenamePlan};
use super::stray_file_remover::{delete_stray_files, find_stray_files};
use super::timestamp_synthesizer::{display_name, fix_timestamps, synthesize_capture_times};
use crate::config::{CleanerOptions, Config};
use crate::error::{CleanupError, Result};
use crate::tools::{MetadataWriter, ScanPatterns, find_image_dirs, list_scan_images};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const FRAME_NAME_WARNING: &str = "WARNING: this may cause files to be overwritten due to \
     multiple files having the same frame name such as ### or for cases of film with no rebate";

/// 啟用 frame name 模式時需要提醒的訊息
#[must_use]
pub fn frame_name_warning(options: &CleanerOptions) -> Option<&'static str> {
    options.use_frame_names.then_some(FRAME_NAME_WARNING)
}

/// 整理結果統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanResult {
    pub directories_processed: usize,
    pub directories_skipped: usize,
    pub files_renamed: usize,
    pub stray_files_deleted: usize,
    pub timestamps_written: usize,
    pub timestamps_failed: usize,
}

/// Noritsu 掃描檔整理器
pub struct NoritsuCleaner<W: MetadataWriter> {
    config: Config,
    patterns: ScanPatterns,
    writer: W,
    dry_run: bool,
    show_progress: bool,
}

impl<W: MetadataWriter> NoritsuCleaner<W> {
    pub fn new(config: Config, writer: W) -> Self {
        if let Some(warning) = frame_name_warning(&config.options) {
            warn!("{warning}");
        }

        Self {
            config,
            patterns: ScanPatterns::new(),
            writer,
            dry_run: false,
            show_progress: false,
        }
    }

    /// 只列出預計的變更，不實際修改檔案
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// 處理搜尋路徑下所有訂單目錄
    ///
    /// 檔名相關錯誤只略過該目錄；檔案系統錯誤直接回傳。
    pub fn clean(&mut self, search_path: &Path) -> Result<CleanResult> {
        let image_dirs = find_image_dirs(search_path, &self.patterns)?;
        info!(
            "found {} image directories under {}",
            image_dirs.len(),
            search_path.display()
        );

        let progress_bar = self.create_progress_bar(image_dirs.len());
        let mut result = CleanResult::default();

        for image_dir in &image_dirs {
            progress_bar.set_message(display_name(image_dir));

            match self.process_directory(image_dir, &mut result) {
                Ok(()) => result.directories_processed += 1,
                Err(e) if e.is_directory_scoped() => {
                    error!("{e}");
                    warn!("skipping directory {}...", image_dir.display());
                    result.directories_skipped += 1;
                }
                Err(e) => {
                    progress_bar.abandon_with_message("aborted");
                    return Err(e);
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");
        Ok(result)
    }

    /// 處理單一訂單目錄
    pub fn process_directory(&mut self, image_dir: &Path, result: &mut CleanResult) -> Result<()> {
        let images = list_scan_images(image_dir)?;

        // 先檢查整個目錄，任何檔名錯誤都不會留下一半的變更
        let normalizer = FilenameNormalizer::new(
            &self.patterns,
            self.config.options.roll_padding,
            self.config.options.use_frame_names,
        );
        let plans = normalizer.plan_renames(&images)?;

        if self.dry_run {
            self.preview_directory(image_dir, &images, &plans)?;
            return Ok(());
        }

        if self.config.options.delete_stray_files {
            result.stray_files_deleted +=
                delete_stray_files(image_dir, &self.config.stray_file_table)?;
        }

        let timestamps = fix_timestamps(&mut self.writer, &images)?;
        result.timestamps_written += timestamps.written;
        result.timestamps_failed += timestamps.failed;

        result.files_renamed += apply_renames(&plans)?;
        Ok(())
    }

    fn preview_directory(
        &self,
        image_dir: &Path,
        images: &[PathBuf],
        plans: &[RenamePlan],
    ) -> Result<()> {
        info!("[dry run] {}", image_dir.display());

        if self.config.options.delete_stray_files {
            for path in find_stray_files(image_dir, &self.config.stray_file_table)? {
                info!("[dry run] would delete {}", path.display());
            }
        }

        for assignment in synthesize_capture_times(images)? {
            info!(
                "[dry run] {} would get datetime: {}:{}",
                display_name(&assignment.path),
                assignment.datetime_string(),
                assignment.subsec_string()
            );
        }

        for plan in plans {
            info!(
                "[dry run] {} => {}",
                display_name(&plan.source),
                display_name(&plan.target)
            );
        }

        Ok(())
    }

    fn create_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar
    }
}

/// 依計畫順序重新命名，回傳成功數量
///
/// frame name 模式下不同來源可能得到相同的新檔名，後面的會覆蓋前面的。
fn apply_renames(plans: &[RenamePlan]) -> Result<usize> {
    for plan in plans {
        info!(
            "{} => {}",
            display_name(&plan.source),
            display_name(&plan.target)
        );
        fs::rename(&plan.source, &plan.target).map_err(|e| CleanupError::io(&plan.source, e))?;
    }
    Ok(plans.len())
}
