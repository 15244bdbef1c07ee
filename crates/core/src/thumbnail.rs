use image::imageops::FilterType;
use image::ImageError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const THUMBNAIL_HEIGHT: u32 = 120;
pub const THUMBS_DIR: &str = "thumbs";

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("サムネイルの出力先を決定できません: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("画像をデコードできませんでした: {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("サムネイルフォルダを作成できませんでした: {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("サムネイルを書き込めませんでした: {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// `<dir>/thumbs/<stem>_thumb.<小文字の拡張子>`
pub fn thumbnail_path(source: &Path) -> Result<PathBuf, ThumbnailError> {
    let invalid = || ThumbnailError::InvalidPath(source.to_path_buf());
    let parent = source.parent().ok_or_else(invalid)?;
    // 最後の拡張子だけを除く(`a.b.jpg` -> `a.b_thumb.jpg`)
    let stem = source.file_stem().ok_or_else(invalid)?.to_string_lossy();
    let extension = source
        .extension()
        .map(|v| v.to_string_lossy().to_lowercase())
        .ok_or_else(invalid)?;

    Ok(parent
        .join(THUMBS_DIR)
        .join(format!("{stem}_thumb.{extension}")))
}

/// 高さを `target_height` に合わせたときの幅(四捨五入、最低1)
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    if height == 0 {
        return target_height.max(1);
    }
    let scaled = (f64::from(width) * f64::from(target_height) / f64::from(height)).round();
    (scaled as u32).max(1)
}

pub fn generate_thumbnail(source: &Path, height: u32) -> Result<PathBuf, ThumbnailError> {
    let out_path = thumbnail_path(source)?;
    let height = height.max(1);

    let img = image::open(source).map_err(|source_err| ThumbnailError::Decode {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let width = scaled_width(img.width(), img.height(), height);
    let thumb = img.resize_exact(width, height, FilterType::Lanczos3);

    if let Some(dir) = out_path.parent() {
        fs::create_dir_all(dir).map_err(|err| ThumbnailError::CreateDir {
            path: dir.to_path_buf(),
            source: err,
        })?;
    }

    thumb
        .save(&out_path)
        .map_err(|err| ThumbnailError::Encode {
            path: out_path.clone(),
            source: err,
        })?;
    info!("サムネイル作成: {} ({}x{})", out_path.display(), width, height);

    Ok(out_path)
}
