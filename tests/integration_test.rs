//! 整合測試 - 以暫存目錄模擬 EZController 的輸出結構
//!
//! ```text
//! 20211226/
//!   00007466/   <- 正常
//!   00007467/   <- 檔名格式錯誤
//!   00007468/   <- 捲號不一致
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::bail;
use chrono::{DateTime, Local};
use noritsu_cleanup::component::NoritsuCleaner;
use noritsu_cleanup::component::noritsu_cleaner::{CleanResult, EXIF_DATETIME_FORMAT};
use noritsu_cleanup::config::{CleanerOptions, Config, StrayFileTable};
use noritsu_cleanup::tools::{MetadataWriter, ScanPatterns, find_image_dirs};
use tempfile::TempDir;

/// 假的 exiftool，記錄所有寫入
#[derive(Default)]
struct FakeExifTool {
    calls: Vec<(String, Vec<(String, String)>)>,
    reject: Vec<String>,
    crash: Vec<String>,
}

impl MetadataWriter for FakeExifTool {
    fn set_tags(&mut self, path: &Path, tags: &[(String, String)]) -> anyhow::Result<String> {
        let name = file_name(path);
        self.calls.push((name.clone(), tags.to_vec()));
        if self.crash.contains(&name) {
            bail!("Error: Not a valid JPG");
        }
        if self.reject.contains(&name) {
            return Ok("0 image files updated".to_string());
        }
        Ok("1 image files updated".to_string())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

fn config(options: CleanerOptions) -> Config {
    Config {
        options,
        stray_file_table: StrayFileTable {
            stray_extensions: vec![".thm".to_string()],
            stray_filenames: vec!["Info_HD.txt".to_string()],
        },
    }
}

fn base_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_640_500_000)
}

fn create_file(dir: &Path, name: &str, mtime: SystemTime) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, name.as_bytes()).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
    path
}

fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

fn build_scan_tree(root: &Path) {
    let good = root.join("20211226/00007466");
    create_file(&good, "000074660001_00.jpg", base_time() + Duration::from_secs(30));
    create_file(&good, "000074660002_0.jpg", base_time());
    create_file(&good, "000074660003_E.TIF", base_time() + Duration::from_secs(5));
    create_file(&good, "000074660003_E.thm", base_time());
    create_file(&good, "Info_HD.txt", base_time());
    create_file(&good, ".DS_Store", base_time());

    let malformed = root.join("20211226/00007467");
    create_file(&malformed, "000074670001_00.jpg", base_time());
    create_file(&malformed, "abc123.jpg", base_time());

    let mixed = root.join("20211226/00007468");
    create_file(&mixed, "000074660001_00.jpg", base_time());
    create_file(&mixed, "999974660002_0.jpg", base_time());
}

#[test]
fn test_locator_finds_every_batch_directory() {
    let temp_dir = TempDir::new().unwrap();
    build_scan_tree(temp_dir.path());

    let dirs = find_image_dirs(temp_dir.path(), &ScanPatterns::new()).unwrap();
    let names: Vec<String> = dirs.iter().map(|d| file_name(d)).collect();

    assert_eq!(names, vec!["20211226", "00007466", "00007467", "00007468"]);
}

#[test]
fn test_clean_scan_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_scan_tree(root);

    let mut cleaner = NoritsuCleaner::new(config(CleanerOptions::default()), FakeExifTool::default());
    let result = cleaner.clean(root).unwrap();

    assert_eq!(
        result,
        CleanResult {
            directories_processed: 2,
            directories_skipped: 2,
            files_renamed: 3,
            stray_files_deleted: 2,
            timestamps_written: 3,
            timestamps_failed: 0,
        }
    );

    assert_eq!(
        list_names(&root.join("20211226/00007466")),
        vec![".DS_Store", "R7466F01.jpg", "R7466F02.jpg", "R7466F03.TIF"]
    );
    // 格式錯誤與捲號不一致的目錄完全不動
    assert_eq!(
        list_names(&root.join("20211226/00007467")),
        vec!["000074670001_00.jpg", "abc123.jpg"]
    );
    assert_eq!(
        list_names(&root.join("20211226/00007468")),
        vec!["000074660001_00.jpg", "999974660002_0.jpg"]
    );

    // 只寫入正常目錄的三個檔案，基準時間取自排序後的第一個檔案
    let calls = &cleaner.writer().calls;
    let names: Vec<&str> = calls.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["000074660001_00.jpg", "000074660002_0.jpg", "000074660003_E.TIF"]
    );

    let expected_datetime = DateTime::<Local>::from(base_time() + Duration::from_secs(30))
        .format(EXIF_DATETIME_FORMAT)
        .to_string();
    for (index, (_, tags)) in calls.iter().enumerate() {
        let subsec = format!("{index:03}");
        assert_eq!(
            tags,
            &vec![
                ("EXIF:DateTimeOriginal".to_string(), expected_datetime.clone()),
                ("EXIF:DateTimeDigitized".to_string(), expected_datetime.clone()),
                ("EXIF:SubSecTimeOriginal".to_string(), subsec.clone()),
                ("EXIF:SubSecTimeDigitized".to_string(), subsec),
            ]
        );
    }
}

#[test]
fn test_frame_name_mode() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_00.jpg", base_time());
    create_file(&dir, "000074660002_E.jpg", base_time());
    create_file(&dir, "000074660003_XA.jpg", base_time());

    let options = CleanerOptions {
        use_frame_names: true,
        ..CleanerOptions::default()
    };
    let mut cleaner = NoritsuCleaner::new(config(options), FakeExifTool::default());
    let result = cleaner.clean(&dir).unwrap();

    assert_eq!(result.files_renamed, 3);
    assert_eq!(
        list_names(&dir),
        vec!["R7466F00.jpg", "R7466FE.jpg", "R7466FXA.jpg"]
    );
}

#[test]
fn test_frame_name_collisions_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_###.jpg", base_time());
    create_file(&dir, "000074660002_###.jpg", base_time());

    let options = CleanerOptions {
        use_frame_names: true,
        ..CleanerOptions::default()
    };
    let mut cleaner = NoritsuCleaner::new(config(options), FakeExifTool::default());
    cleaner.clean(&dir).unwrap();

    // 兩個檔案都寫入了時間，但重新命名後只剩最後一個
    assert_eq!(cleaner.writer().calls.len(), 2);
    assert_eq!(list_names(&dir), vec!["R7466F###.jpg"]);
    assert_eq!(
        fs::read_to_string(dir.join("R7466F###.jpg")).unwrap(),
        "000074660002_###.jpg"
    );
}

#[test]
fn test_missing_frame_name_skips_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_00.jpg", base_time());
    create_file(&dir, "000074660002.jpg", base_time());

    let options = CleanerOptions {
        use_frame_names: true,
        ..CleanerOptions::default()
    };
    let mut cleaner = NoritsuCleaner::new(config(options), FakeExifTool::default());
    let result = cleaner.clean(&dir).unwrap();

    assert_eq!(result.directories_skipped, 1);
    assert_eq!(
        list_names(&dir),
        vec!["000074660001_00.jpg", "000074660002.jpg"]
    );
}

#[test]
fn test_writer_failures_do_not_stop_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_00.jpg", base_time());
    create_file(&dir, "000074660002_0.jpg", base_time());
    create_file(&dir, "000074660003_1.jpg", base_time());

    let writer = FakeExifTool {
        reject: vec!["000074660001_00.jpg".to_string()],
        crash: vec!["000074660002_0.jpg".to_string()],
        ..FakeExifTool::default()
    };
    let mut cleaner = NoritsuCleaner::new(config(CleanerOptions::default()), writer);
    let result = cleaner.clean(&dir).unwrap();

    assert_eq!(result.timestamps_written, 1);
    assert_eq!(result.timestamps_failed, 2);
    assert_eq!(result.files_renamed, 3);
    assert_eq!(cleaner.writer().calls[2].1[3].1, "002");
}

#[test]
fn test_second_run_is_fixed_point() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_00.jpg", base_time());
    create_file(&dir, "000074660002_0.jpg", base_time());

    let mut cleaner = NoritsuCleaner::new(config(CleanerOptions::default()), FakeExifTool::default());
    cleaner.clean(&dir).unwrap();
    let first_names = list_names(&dir);

    let second = cleaner.clean(&dir).unwrap();
    assert_eq!(second.files_renamed, 0);
    assert_eq!(second.directories_skipped, 0);
    assert_eq!(list_names(&dir), first_names);
    assert_eq!(first_names, vec!["R7466F01.jpg", "R7466F02.jpg"]);
}

#[test]
fn test_keep_stray_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("00007466");
    create_file(&dir, "000074660001_00.tif", base_time());
    create_file(&dir, "000074660001_00.thm", base_time());

    let options = CleanerOptions {
        delete_stray_files: false,
        ..CleanerOptions::default()
    };
    let mut cleaner = NoritsuCleaner::new(config(options), FakeExifTool::default());
    let result = cleaner.clean(&dir).unwrap();

    assert_eq!(result.stray_files_deleted, 0);
    assert_eq!(
        list_names(&dir),
        vec!["000074660001_00.thm", "R7466F01.tif"]
    );
}

#[test]
fn test_dry_run_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_scan_tree(root);
    let before = list_names(&root.join("20211226/00007466"));

    let mut cleaner = NoritsuCleaner::new(config(CleanerOptions::default()), FakeExifTool::default())
        .with_dry_run(true);
    let result = cleaner.clean(root).unwrap();

    assert_eq!(result.directories_processed, 2);
    assert_eq!(result.directories_skipped, 2);
    assert_eq!(result.files_renamed, 0);
    assert!(cleaner.writer().calls.is_empty());
    assert_eq!(list_names(&root.join("20211226/00007466")), before);
}

#[test]
fn test_missing_search_path_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let mut cleaner = NoritsuCleaner::new(config(CleanerOptions::default()), FakeExifTool::default());
    assert!(cleaner.clean(&temp_dir.path().join("missing")).is_err());
}
