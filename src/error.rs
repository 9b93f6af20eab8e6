//! 錯誤類型
//!
//! 目錄層級的錯誤（檔名格式、捲號不一致、缺少 frame name）只會中止該目錄，
//! 其餘錯誤則直接回傳給呼叫端。

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanupError {
    /// 檔名不符合 `{roll:8}{frame:4}[_{name}]` 格式
    #[error("image filename doesn't match expected format: {}", path.display())]
    Format { path: PathBuf },

    /// 同一目錄中出現不同的捲號
    #[error(
        "image has different roll number than other files: {} (expected {expected}, found {found})",
        path.display()
    )]
    BatchConsistency {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// 啟用 frame name 模式但檔名沒有 frame name
    #[error("image filename doesn't contain the frame name: {}", path.display())]
    MissingFrameName { path: PathBuf },

    /// 寫入 EXIF 失敗（僅影響單一檔案）
    #[error("failed to update timestamps on image: {} ({reason})", path.display())]
    MetadataWrite { path: PathBuf, reason: String },

    #[error("filesystem error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CleanupError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// 是否只需略過目前目錄，繼續處理下一個
    #[must_use]
    pub const fn is_directory_scoped(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::BatchConsistency { .. } | Self::MissingFrameName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CleanupError>;
