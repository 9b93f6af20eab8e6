pub mod load;
pub mod types;

pub use types::{CleanerOptions, Config, MAX_ROLL_PADDING, SETTINGS_FILE_NAME, StrayFileTable};
