use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// exiftool 成功更新一個檔案時的回應
pub const SUCCESSFUL_WRITE_MESSAGE: &str = "1 image files updated";

/// `-G`、`-n` 為預設共用參數，`-overwrite_original` 避免留下 `_original` 備份檔
const COMMON_ARGS: [&str; 3] = ["-G", "-n", "-overwrite_original"];

/// 一組「標籤名稱 → 值」的寫入指令，依序寫入同一個檔案
pub type TagAssignments = Vec<(String, String)>;

/// 中繼資料寫入器
pub trait MetadataWriter {
    /// 將標籤寫入檔案（直接覆寫原檔），回傳寫入工具的回應訊息
    fn set_tags(&mut self, path: &Path, tags: &[(String, String)]) -> Result<String>;

    /// 代表寫入成功的回應
    fn expected_acknowledgment(&self) -> &str {
        SUCCESSFUL_WRITE_MESSAGE
    }
}

/// 透過外部 exiftool 程式寫入 EXIF
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 執行 `exiftool -ver`，確認程式可用
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .output()
            .with_context(|| format!("無法執行 exiftool: {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("exiftool 執行失敗: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn build_args(tags: &[(String, String)]) -> Vec<String> {
        COMMON_ARGS
            .iter()
            .map(|arg| (*arg).to_string())
            .chain(tags.iter().map(|(tag, value)| format!("-{tag}={value}")))
            .collect()
    }
}

impl MetadataWriter for ExifTool {
    fn set_tags(&mut self, path: &Path, tags: &[(String, String)]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(Self::build_args(tags))
            .arg(path)
            .output()
            .with_context(|| format!("無法執行 exiftool: {}", path.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "exiftool 執行失敗: {} {}",
                stdout.trim(),
                stderr.trim()
            );
        }

        Ok(stdout.trim().to_string())
    }
}
