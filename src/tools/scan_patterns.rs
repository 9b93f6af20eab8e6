//! EZController 命名規則
//!
//! 目錄結構：
//!
//! ```text
//! 20211226/                  <- 日期
//!   00007466/                <- 訂單（捲）編號
//!     000074660001_00.jpg    <- 捲號 + frame number + frame name
//!     000074660002_0.jpg
//!   00007467/
//! ```
//!
//! 日期與訂單目錄都是 8 位數字，所以定位時只看名稱、不看層級。

use regex::{Captures, Regex};

const BATCH_DIR_PATTERN: &str = r"^[0-9]{8}$";
const IMAGE_NAME_PATTERN: &str =
    r"^(?P<roll_number>[0-9]{8})(?P<frame_number>[0-9]{4})(?:_(?P<frame_name>.*))?$";
const CANONICAL_NAME_PATTERN: &str = r"^R(?P<roll_number>[0-9]+)F(?P<frame_identifier>.+)$";

/// 編譯一次後以參照傳遞的正規表示式
#[derive(Debug, Clone)]
pub struct ScanPatterns {
    batch_dir: Regex,
    image_name: Regex,
    canonical_name: Regex,
}

impl Default for ScanPatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanPatterns {
    pub fn new() -> Self {
        Self {
            batch_dir: Regex::new(BATCH_DIR_PATTERN).expect("Invalid regex"),
            image_name: Regex::new(IMAGE_NAME_PATTERN).expect("Invalid regex"),
            canonical_name: Regex::new(CANONICAL_NAME_PATTERN).expect("Invalid regex"),
        }
    }

    #[must_use]
    pub fn is_batch_dir_name(&self, name: &str) -> bool {
        self.batch_dir.is_match(name)
    }

    /// 比對掃描器輸出的檔名主幹（不含副檔名）
    pub fn match_image_stem<'a>(&self, stem: &'a str) -> Option<Captures<'a>> {
        self.image_name.captures(stem)
    }

    /// 是否已經是 `R{roll}F{frame}` 格式
    #[must_use]
    pub fn is_canonical_stem(&self, stem: &str) -> bool {
        self.canonical_name.is_match(stem)
    }
}
