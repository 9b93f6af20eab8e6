use crate::error::{CleanupError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// EZController 輸出的影像副檔名（不分大小寫）
const SCAN_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "tif"];

/// 依檔名判斷是否為掃描影像：副檔名為 jpg/tif 且不是隱藏檔
#[must_use]
pub fn has_scan_image_name(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    if hidden {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCAN_IMAGE_EXTENSIONS
                .iter()
                .any(|image_ext| ext.eq_ignore_ascii_case(image_ext))
        })
}

/// 重新命名與時間修正共用的篩選條件
#[must_use]
pub fn is_scan_image(path: &Path) -> bool {
    has_scan_image_name(path) && path.is_file()
}

/// 列出目錄下的直接子項目，依路徑字典序排序
pub fn list_directory(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory).map_err(|e| CleanupError::io(directory, e))?;

    let mut paths = entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| CleanupError::io(directory, e))
        })
        .collect::<Result<Vec<PathBuf>>>()?;

    paths.sort();
    Ok(paths)
}

/// 列出目錄中的掃描影像（已排序）
pub fn list_scan_images(directory: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_directory(directory)?
        .into_iter()
        .filter(|path| is_scan_image(path))
        .collect())
}
