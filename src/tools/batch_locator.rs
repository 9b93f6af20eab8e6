use super::path_validator::validate_directory_exists;
use super::scan_patterns::ScanPatterns;
use crate::error::{CleanupError, Result};
use log::debug;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 遞迴尋找所有名稱為 8 位數字的目錄（包含搜尋根目錄本身），依路徑排序
///
/// 日期目錄也會被列入，但它底下只有訂單目錄、沒有影像，處理時不會有任何動作。
pub fn find_image_dirs(search_path: &Path, patterns: &ScanPatterns) -> Result<Vec<PathBuf>> {
    validate_directory_exists(search_path)?;

    let mut found_dirs = Vec::new();
    for entry in WalkDir::new(search_path).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let is_batch_dir = patterns.is_batch_dir_name(&entry_name(&entry)?);
        if is_batch_dir {
            debug!("found image directory: {}", entry.path().display());
            found_dirs.push(entry.into_path());
        }
    }

    found_dirs.sort();
    Ok(found_dirs)
}

/// 根目錄可能是 `.` 之類的相對路徑，需要解析出實際名稱
fn entry_name(entry: &DirEntry) -> Result<Cow<'_, str>> {
    if entry.depth() > 0 {
        return Ok(entry.file_name().to_string_lossy());
    }

    let canonical = entry
        .path()
        .canonicalize()
        .map_err(|e| CleanupError::io(entry.path(), e))?;
    Ok(Cow::Owned(
        canonical
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
    ))
}
