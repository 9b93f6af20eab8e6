mod batch_locator;
mod exiftool;
mod image_scanner;
mod path_validator;
mod scan_patterns;

pub use batch_locator::find_image_dirs;
pub use exiftool::{ExifTool, MetadataWriter, SUCCESSFUL_WRITE_MESSAGE, TagAssignments};
pub use image_scanner::{has_scan_image_name, is_scan_image, list_directory, list_scan_images};
pub use scan_patterns::ScanPatterns;
