use crate::collision::{file_path_for, resolve_unique_stem_for};
use crate::exif_reader::read_exif_date;
use crate::timestamp::ExifTimestamp;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Unchanged(PathBuf),
    NoDate(PathBuf),
    MalformedDate { path: PathBuf, raw: String },
}

impl RenameOutcome {
    /// 処理後にファイルが存在するパス
    pub fn current_path(&self) -> &Path {
        match self {
            Self::Renamed { to, .. } => to,
            Self::Unchanged(path) | Self::NoDate(path) => path,
            Self::MalformedDate { path, .. } => path,
        }
    }
}

pub fn rename_if_dated(path: &Path) -> Result<RenameOutcome> {
    let Some(raw) = read_exif_date(path) else {
        debug!("撮影日時なし: {}", path.display());
        return Ok(RenameOutcome::NoDate(path.to_path_buf()));
    };

    let timestamp = match ExifTimestamp::parse(&raw) {
        Ok(ts) => ts,
        Err(err) => {
            warn!("{err} ({})", path.display());
            return Ok(RenameOutcome::MalformedDate {
                path: path.to_path_buf(),
                raw,
            });
        }
    };

    let parent = path
        .parent()
        .with_context(|| format!("親ディレクトリを取得できませんでした: {}", path.display()))?;
    let extension = path
        .extension()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();

    let base = timestamp.to_stem();
    if file_path_for(parent, &base, &extension) == path {
        return Ok(RenameOutcome::Unchanged(path.to_path_buf()));
    }

    let stem = resolve_unique_stem_for(&base, &extension, parent, path)?;
    let target = file_path_for(parent, &stem, &extension);
    if target == path {
        return Ok(RenameOutcome::Unchanged(path.to_path_buf()));
    }

    fs::rename(path, &target).with_context(|| {
        format!(
            "リネームに失敗しました: {} -> {}",
            path.display(),
            target.display()
        )
    })?;
    info!("{} -> {}", path.display(), target.display());

    Ok(RenameOutcome::Renamed {
        from: path.to_path_buf(),
        to: target,
    })
}

#[cfg(test)]
mod tests {
    use super::{rename_if_dated, RenameOutcome};
    use crate::test_support::{encode_jpeg, jpeg_with_exif_date};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn renames_dated_file_to_timestamp_stem() {
        let temp = tempdir().expect("tempdir");
        let original = temp.path().join("DSC_0001.JPG");
        fs::write(&original, jpeg_with_exif_date(8, 8, "2023:05:11 08:30:00")).expect("write");

        let outcome = rename_if_dated(&original).expect("rename");
        let target = temp.path().join("20230511_083000.JPG");
        assert_eq!(
            outcome,
            RenameOutcome::Renamed {
                from: original.clone(),
                to: target.clone(),
            }
        );
        assert!(!original.exists());
        assert!(target.exists());
        assert_eq!(outcome.current_path(), target);
    }

    #[test]
    fn already_renamed_file_is_left_alone() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("20230511_083000.jpg");
        let bytes = jpeg_with_exif_date(8, 8, "2023:05:11 08:30:00");
        fs::write(&path, &bytes).expect("write");

        let outcome = rename_if_dated(&path).expect("rename");
        assert_eq!(outcome, RenameOutcome::Unchanged(path.clone()));
        assert_eq!(fs::read(&path).expect("read back"), bytes);
        assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 1);
    }

    #[test]
    fn disambiguated_file_is_left_alone_on_rerun() {
        let temp = tempdir().expect("tempdir");
        let bytes = jpeg_with_exif_date(8, 8, "2023:05:11 08:30:00");
        fs::write(temp.path().join("20230511_083000.jpg"), &bytes).expect("write base");
        let second = temp.path().join("20230511_083000(0).jpg");
        fs::write(&second, &bytes).expect("write second");

        let outcome = rename_if_dated(&second).expect("rename");
        assert_eq!(outcome, RenameOutcome::Unchanged(second));
    }

    #[test]
    fn collisions_get_a_counter_suffix() {
        let temp = tempdir().expect("tempdir");
        let bytes = jpeg_with_exif_date(8, 8, "2023:05:11 08:30:00");
        fs::write(temp.path().join("20230511_083000.jpg"), b"other").expect("write taken");
        fs::write(temp.path().join("20230511_083000(0).jpg"), b"other").expect("write taken");
        let original = temp.path().join("IMG_1234.jpg");
        fs::write(&original, &bytes).expect("write original");

        let outcome = rename_if_dated(&original).expect("rename");
        assert_eq!(
            outcome.current_path(),
            temp.path().join("20230511_083000(1).jpg")
        );
        assert_eq!(
            fs::read(temp.path().join("20230511_083000.jpg")).expect("read"),
            b"other"
        );
    }

    #[test]
    fn file_without_exif_is_skipped() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("plain.jpg");
        fs::write(&path, encode_jpeg(8, 8)).expect("write");

        let outcome = rename_if_dated(&path).expect("rename");
        assert_eq!(outcome, RenameOutcome::NoDate(path.clone()));
        assert!(path.exists());
    }

    #[test]
    fn malformed_date_is_skipped() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("broken.jpg");
        fs::write(&path, jpeg_with_exif_date(8, 8, "2023:05:11")).expect("write");

        let outcome = rename_if_dated(&path).expect("rename");
        assert_eq!(
            outcome,
            RenameOutcome::MalformedDate {
                path: path.clone(),
                raw: "2023:05:11".to_string(),
            }
        );
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_treated_as_undated() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("gone.jpg");

        let outcome = rename_if_dated(&path).expect("rename");
        assert_eq!(outcome, RenameOutcome::NoDate(path));
    }
}
