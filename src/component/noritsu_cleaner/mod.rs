//! Noritsu EZController 掃描檔整理元件
//!
//! 將掃描檔重新命名為 `R{roll}F{frame}` 並修正 EXIF 拍攝時間

mod filename_normalizer;
mod main;
mod stray_file_remover;
mod timestamp_synthesizer;

pub use filename_normalizer::{FilenameNormalizer, ImageFilename, ParsedName, RenamePlan};
pub use main::{CleanResult, NoritsuCleaner};
pub use stray_file_remover::{delete_stray_files, find_stray_files};
pub use timestamp_synthesizer::{
    CaptureTimeAssignment, EXIF_DATETIME_FORMAT, TimestampResult, fix_timestamps,
    synthesize_capture_times, write_capture_time,
};
