//! 附帶檔案清除
//!
//! EZController 輸出 TIFF 時會產生 `*.thm` 縮圖，勾選「直接存到硬碟」時會產生 `Info_HD.txt`

use crate::config::StrayFileTable;
use crate::error::{CleanupError, Result};
use crate::tools::list_directory;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 找出目錄中需要清除的檔案（已排序）
pub fn find_stray_files(directory: &Path, table: &StrayFileTable) -> Result<Vec<PathBuf>> {
    Ok(list_directory(directory)?
        .into_iter()
        .filter(|path| path.is_file() && table.is_stray_file(path))
        .collect())
}

/// 刪除附帶檔案，回傳刪除數量
pub fn delete_stray_files(directory: &Path, table: &StrayFileTable) -> Result<usize> {
    let stray_files = find_stray_files(directory, table)?;

    for path in &stray_files {
        info!("deleting {}", path.display());
        fs::remove_file(path).map_err(|e| CleanupError::io(path, e))?;
    }

    Ok(stray_files.len())
}
