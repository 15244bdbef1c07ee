use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub scanned_files: usize,
    pub jpg_files: usize,
    pub skipped_non_jpg: usize,
    pub skipped_hidden: usize,
    pub skipped_inaccessible: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub stats: ScanStats,
}

/// 直下のJPGファイルを名前順で列挙する(再帰しない)。
///
/// 通常ファイルのみ対象。シンボリックリンク、隠しファイル、読み書きできないファイルは除外する。
pub fn collect_jpg_files(root: &Path) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    for entry in
        fs::read_dir(root).with_context(|| format!("フォルダを読めませんでした: {}", root.display()))?
    {
        let entry = entry.with_context(|| format!("エントリ読み取り失敗: {}", root.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("ファイル種別を取得できませんでした: {}", path.display()))?;
        if file_type.is_dir() {
            continue;
        }
        result.stats.scanned_files += 1;

        if file_type.is_symlink() || !file_type.is_file() {
            result.stats.skipped_inaccessible += 1;
            continue;
        }
        if is_hidden(&path) {
            result.stats.skipped_hidden += 1;
            continue;
        }
        if !is_jpg(&path) {
            result.stats.skipped_non_jpg += 1;
            continue;
        }
        if !is_read_write(&path) {
            debug!("読み書きできないためスキップ: {}", path.display());
            result.stats.skipped_inaccessible += 1;
            continue;
        }

        result.stats.jpg_files += 1;
        result.files.push(path);
    }

    result.files.sort();
    Ok(result)
}

pub fn is_jpg(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// 読み書き両用で実際に開けるかを確認する(書き込みは行わない)。
///
/// 権限ビット上の読み取り専用も除外する。
fn is_read_write(path: &Path) -> bool {
    let writable_bits = fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false);
    writable_bits && OpenOptions::new().read(true).write(true).open(path).is_ok()
}
