use crate::renamer::{rename_if_dated, RenameOutcome};
use crate::scan::{collect_jpg_files, ScanStats};
use crate::thumbnail::{generate_thumbnail, THUMBNAIL_HEIGHT};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub directory: PathBuf,
    pub thumbnail_height: u32,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            thumbnail_height: THUMBNAIL_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub scan: ScanStats,
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped_no_date: usize,
    pub skipped_malformed: usize,
    pub rename_failed: usize,
    pub thumbnails: usize,
    pub thumbnail_failed: usize,
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("フォルダが存在しません: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error(transparent)]
    Scan(#[from] anyhow::Error),
}

/// リネーム(1パス目)とサムネイル作成(2パス目)をまとめて実行する。
///
/// 一覧は処理前に一度だけ取得する。2パス目はリネーム後のパスを使う。
/// ファイル単位の失敗は警告を出して続行する。
pub fn process_directory(options: &ProcessOptions) -> Result<BatchReport, BatchError> {
    let root = &options.directory;
    if !root.is_dir() {
        return Err(BatchError::DirectoryNotFound(root.clone()));
    }

    let listing = collect_jpg_files(root)?;
    let mut report = BatchReport {
        scan: listing.stats,
        ..BatchReport::default()
    };

    let mut current_paths = Vec::with_capacity(listing.files.len());
    for path in listing.files {
        match rename_if_dated(&path) {
            Ok(outcome) => {
                match &outcome {
                    RenameOutcome::Renamed { .. } => report.renamed += 1,
                    RenameOutcome::Unchanged(_) => report.unchanged += 1,
                    RenameOutcome::NoDate(_) => report.skipped_no_date += 1,
                    RenameOutcome::MalformedDate { .. } => report.skipped_malformed += 1,
                }
                current_paths.push(outcome.current_path().to_path_buf());
            }
            Err(err) => {
                warn!("{err:#}");
                report.rename_failed += 1;
                current_paths.push(path);
            }
        }
    }

    for path in &current_paths {
        match generate_thumbnail(path, options.thumbnail_height) {
            Ok(_) => report.thumbnails += 1,
            Err(err) => {
                warn!("{:#}", anyhow::Error::from(err));
                report.thumbnail_failed += 1;
            }
        }
    }

    info!(
        renamed = report.renamed,
        unchanged = report.unchanged,
        skipped = report.skipped_no_date + report.skipped_malformed,
        thumbnails = report.thumbnails,
        "処理完了"
    );
    Ok(report)
}
