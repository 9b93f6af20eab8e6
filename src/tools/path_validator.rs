use crate::error::{CleanupError, Result};
use std::io;
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    let metadata = path.metadata().map_err(|e| CleanupError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(CleanupError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "路徑不是資料夾"),
        ));
    }
    Ok(())
}
