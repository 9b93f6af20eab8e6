//! 檔名正規化模組
//!
//! 將 `{roll:8}{frame:4}[_{frame_name}]` 轉換為 `R{roll}F{frame}`，並檢查同一目錄的捲號一致

use crate::config::MAX_ROLL_PADDING;
use crate::error::{CleanupError, Result};
use crate::tools::ScanPatterns;
use std::path::{Path, PathBuf};

/// frame number 補零寬度
const FRAME_NUMBER_PADDING: usize = 2;

/// 解析後的掃描檔名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilename {
    /// 8 位數捲號
    pub roll_number: String,
    /// 4 位數 frame number
    pub frame_number: String,
    /// DX 讀取到的 frame name（例如 `00`、`E`、`XA`、`###`）
    pub frame_name: Option<String>,
}

/// 檔名解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    Scanner(ImageFilename),
    /// 已經是 `R{roll}F{frame}` 格式，不需再處理
    Canonical,
}

/// 單一檔案的重新命名計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// 檔名正規化器
pub struct FilenameNormalizer<'a> {
    patterns: &'a ScanPatterns,
    roll_padding: usize,
    use_frame_names: bool,
}

impl<'a> FilenameNormalizer<'a> {
    /// 補零寬度超過 [`MAX_ROLL_PADDING`] 時以上限計算
    pub fn new(patterns: &'a ScanPatterns, roll_padding: usize, use_frame_names: bool) -> Self {
        Self {
            patterns,
            roll_padding: roll_padding.min(MAX_ROLL_PADDING),
            use_frame_names,
        }
    }

    /// 解析檔名主幹；非 UTF-8 檔名視為格式錯誤
    pub fn parse(&self, path: &Path) -> Result<ParsedName> {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return Err(CleanupError::Format {
                path: path.to_path_buf(),
            });
        };

        if let Some(caps) = self.patterns.match_image_stem(stem) {
            return Ok(ParsedName::Scanner(ImageFilename {
                roll_number: caps["roll_number"].to_string(),
                frame_number: caps["frame_number"].to_string(),
                frame_name: caps.name("frame_name").map(|m| m.as_str().to_string()),
            }));
        }

        if self.patterns.is_canonical_stem(stem) {
            return Ok(ParsedName::Canonical);
        }

        Err(CleanupError::Format {
            path: path.to_path_buf(),
        })
    }

    /// 產生新檔名（不含目錄）
    ///
    /// # Arguments
    /// * `filename` - 解析後的檔名
    /// * `extension` - 原始副檔名（含前導點，大小寫不變）
    /// * `path` - 原始路徑，僅用於錯誤訊息
    pub fn canonical_name(
        &self,
        filename: &ImageFilename,
        extension: &str,
        path: &Path,
    ) -> Result<String> {
        let roll_number = trim_leading_zeros(&filename.roll_number);

        let frame_identifier = if self.use_frame_names {
            match filename.frame_name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    return Err(CleanupError::MissingFrameName {
                        path: path.to_path_buf(),
                    });
                }
            }
        } else {
            format!(
                "{:0>width$}",
                trim_leading_zeros(&filename.frame_number),
                width = FRAME_NUMBER_PADDING
            )
        };

        Ok(format!(
            "R{:0>width$}F{}{}",
            roll_number,
            frame_identifier,
            extension,
            width = self.roll_padding
        ))
    }

    /// 依排序後的清單產生整個目錄的重新命名計畫
    ///
    /// 第一個解析成功的檔案決定捲號基準；任何錯誤都會在動到檔案之前回傳。
    pub fn plan_renames(&self, images: &[PathBuf]) -> Result<Vec<RenamePlan>> {
        let mut roll_number: Option<String> = None;
        let mut plans = Vec::with_capacity(images.len());

        for path in images {
            let filename = match self.parse(path)? {
                ParsedName::Scanner(filename) => filename,
                ParsedName::Canonical => continue,
            };

            let expected = roll_number.get_or_insert_with(|| filename.roll_number.clone());
            if *expected != filename.roll_number {
                return Err(CleanupError::BatchConsistency {
                    path: path.clone(),
                    expected: expected.clone(),
                    found: filename.roll_number,
                });
            }

            let extension = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            let new_name = self.canonical_name(&filename, &extension, path)?;

            plans.push(RenamePlan {
                source: path.clone(),
                target: path.with_file_name(new_name),
            });
        }

        Ok(plans)
    }
}

/// 以整數方式去除前導零（全為 0 時保留一個 0）
fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}
