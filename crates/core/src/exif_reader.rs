use exif::{In, Reader, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// EXIFの撮影日時(DateTimeOriginal)を生の文字列で返す。
///
/// EXIFが無い、壊れている、タグが無い、空文字のいずれも `None`。
pub fn read_date_time_original(bytes: &[u8]) -> Option<String> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .map_err(|err| debug!("EXIFを解析できませんでした: {err}"))
        .ok()?;

    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let raw = match &field.value {
        Value::Ascii(values) => values.first()?,
        _ => return None,
    };

    let text = String::from_utf8_lossy(raw);
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub fn read_exif_date(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => read_date_time_original(&bytes),
        Err(err) => {
            debug!("ファイルを読めませんでした: {}: {err}", path.display());
            None
        }
    }
}
