use crate::config::types::{CleanerOptions, Config, MAX_ROLL_PADDING, StrayFileTable};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的附帶檔案規則
const STRAY_FILE_TABLE_JSON: &str = include_str!("../data/stray_file_table.json");

impl Config {
    /// 載入設定檔（不存在則使用預設值）
    pub fn load(settings_path: &Path) -> Result<Self> {
        let stray_file_table = Self::load_embedded_stray_file_table()?;
        let options = Self::load_options(settings_path)?;

        Ok(Self {
            options,
            stray_file_table,
        })
    }

    fn load_options(path: &Path) -> Result<CleanerOptions> {
        if !path.exists() {
            return Ok(CleanerOptions::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let options: CleanerOptions = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        validate_options(&options)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(options)
    }

    fn load_embedded_stray_file_table() -> Result<StrayFileTable> {
        serde_json::from_str(STRAY_FILE_TABLE_JSON).context("無法解析嵌入的附帶檔案設定")
    }
}

fn validate_options(options: &CleanerOptions) -> Result<()> {
    if options.roll_padding > MAX_ROLL_PADDING {
        bail!(
            "roll_padding must be between 0 and {MAX_ROLL_PADDING}, got {}",
            options.roll_padding
        );
    }
    Ok(())
}
