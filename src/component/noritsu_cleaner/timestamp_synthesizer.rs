//! 拍攝時間修正模組
//!
//! EZController 不保證依 frame 順序寫入檔案，所以不能直接用各檔案的修改時間當拍攝時間。
//! 同一目錄的所有影像共用第一個檔案的修改時間（精確到秒），
//! 再以遞增的 SubSecTime 保持順序：第 1 張 `000`、第 2 張 `001`、第 3 張 `002`⋯
//! 這樣即使 frame name 重複（`###`、`00`、`0`、`E`、`XA`），依拍攝時間排序仍然正確。

use crate::error::{CleanupError, Result};
use crate::tools::{MetadataWriter, TagAssignments};
use chrono::{DateTime, Local};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// SubSecTime 固定 3 位數；超過 1000 張時會溢位，不另外處理
const SUBSEC_WIDTH: usize = 3;

const TAG_DATETIME_ORIGINAL: &str = "EXIF:DateTimeOriginal";
const TAG_DATETIME_DIGITIZED: &str = "EXIF:DateTimeDigitized";
const TAG_SUBSEC_ORIGINAL: &str = "EXIF:SubSecTimeOriginal";
const TAG_SUBSEC_DIGITIZED: &str = "EXIF:SubSecTimeDigitized";

/// 單一影像的拍攝時間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTimeAssignment {
    pub path: PathBuf,
    /// 目錄中第一張影像的修改時間
    pub base_datetime: DateTime<Local>,
    /// 從 0 開始的序號
    pub millisecond_offset: usize,
}

impl CaptureTimeAssignment {
    #[must_use]
    pub fn datetime_string(&self) -> String {
        self.base_datetime.format(EXIF_DATETIME_FORMAT).to_string()
    }

    #[must_use]
    pub fn subsec_string(&self) -> String {
        format!("{:0>width$}", self.millisecond_offset, width = SUBSEC_WIDTH)
    }

    /// 四個時間欄位一次寫入
    #[must_use]
    pub fn tags(&self) -> TagAssignments {
        let datetime = self.datetime_string();
        let subsec = self.subsec_string();
        vec![
            (TAG_DATETIME_ORIGINAL.to_string(), datetime.clone()),
            (TAG_DATETIME_DIGITIZED.to_string(), datetime),
            (TAG_SUBSEC_ORIGINAL.to_string(), subsec.clone()),
            (TAG_SUBSEC_DIGITIZED.to_string(), subsec),
        ]
    }
}

/// 時間寫入結果統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimestampResult {
    pub written: usize,
    pub failed: usize,
}

/// 依排序後的影像清單計算拍攝時間
///
/// 基準時間取自清單中的第一個檔案，不論其檔名是否能解析。
pub fn synthesize_capture_times(images: &[PathBuf]) -> Result<Vec<CaptureTimeAssignment>> {
    let Some(first_image) = images.first() else {
        return Ok(Vec::new());
    };
    let first_image_mtime = modified_time(first_image)?;

    Ok(images
        .iter()
        .enumerate()
        .map(|(index, path)| CaptureTimeAssignment {
            path: path.clone(),
            base_datetime: first_image_mtime,
            millisecond_offset: index,
        })
        .collect())
}

fn modified_time(path: &Path) -> Result<DateTime<Local>> {
    let modified = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| CleanupError::io(path, e))?;
    Ok(DateTime::<Local>::from(modified))
}

/// 寫入單一檔案；失敗只影響這個檔案
pub fn write_capture_time<W: MetadataWriter + ?Sized>(
    writer: &mut W,
    assignment: &CaptureTimeAssignment,
) -> Result<()> {
    let path = &assignment.path;
    let acknowledgment = writer
        .set_tags(path, &assignment.tags())
        .map_err(|e| CleanupError::MetadataWrite {
            path: path.clone(),
            reason: format!("exiftool error: {e:#}"),
        })?;

    let acknowledgment = acknowledgment.trim();
    if acknowledgment != writer.expected_acknowledgment() {
        return Err(CleanupError::MetadataWrite {
            path: path.clone(),
            reason: format!("exiftool: {acknowledgment}"),
        });
    }

    Ok(())
}

/// 依序為每張影像寫入拍攝時間
pub fn fix_timestamps<W: MetadataWriter + ?Sized>(
    writer: &mut W,
    images: &[PathBuf],
) -> Result<TimestampResult> {
    let mut result = TimestampResult::default();

    for assignment in synthesize_capture_times(images)? {
        info!(
            "{} getting datetime: {}:{}",
            display_name(&assignment.path),
            assignment.datetime_string(),
            assignment.subsec_string()
        );

        match write_capture_time(writer, &assignment) {
            Ok(()) => result.written += 1,
            Err(e) => {
                warn!("{e}");
                result.failed += 1;
            }
        }
    }

    Ok(result)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
