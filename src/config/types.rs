use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_ROLL_PADDING: usize = 4;
/// 捲號補零寬度上限
pub const MAX_ROLL_PADDING: usize = 16;
const DEFAULT_EXIFTOOL: &str = "exiftool";
pub const SETTINGS_FILE_NAME: &str = "noritsu_cleanup.json";

/// 掃描器附帶產生、需要清除的檔案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrayFileTable {
    /// EZController 輸出 TIFF 時產生的縮圖（含前導點）
    #[serde(rename = "STRAY_EXTENSIONS")]
    pub stray_extensions: Vec<String>,
    /// 勾選「直接存到硬碟」時產生的說明檔
    #[serde(rename = "STRAY_FILENAMES")]
    pub stray_filenames: Vec<String>,
}

impl StrayFileTable {
    #[must_use]
    pub fn is_stray_file(&self, path: &Path) -> bool {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = format!(".{}", ext.to_lowercase());
                self.stray_extensions
                    .iter()
                    .any(|stray| stray.to_lowercase() == ext)
            });

        let by_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.stray_filenames.iter().any(|stray| stray == name));

        by_extension || by_name
    }
}

/// 整理選項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerOptions {
    /// 捲號補零寬度
    pub roll_padding: usize,
    /// 使用 DX 讀取到的 frame name 而不是 frame number
    pub use_frame_names: bool,
    /// 刪除 `.thm` 與 `Info_HD.txt`
    pub delete_stray_files: bool,
    /// exiftool 執行檔
    pub exiftool_path: String,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            roll_padding: DEFAULT_ROLL_PADDING,
            use_frame_names: false,
            delete_stray_files: true,
            exiftool_path: DEFAULT_EXIFTOOL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub options: CleanerOptions,
    pub stray_file_table: StrayFileTable,
}
