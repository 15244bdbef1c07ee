use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const STEM_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("撮影日時に時刻部分がありません: {0}")]
    MissingTime(String),
    #[error("撮影日時の形式が不正です: {0}")]
    Invalid(String),
}

/// `YYYY:MM:DD HH:MM:SS` 形式の検証済み撮影日時
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExifTimestamp(NaiveDateTime);

impl ExifTimestamp {
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split(' ').collect();
        match parts.as_slice() {
            [date, time] if is_colon_triplet(date) && is_colon_triplet(time) => {}
            [date] if is_colon_triplet(date) => {
                return Err(TimestampError::MissingTime(raw.to_string()));
            }
            _ => return Err(TimestampError::Invalid(raw.to_string())),
        }

        NaiveDateTime::parse_from_str(trimmed, EXIF_FORMAT)
            .map(Self)
            .map_err(|_| TimestampError::Invalid(raw.to_string()))
    }

    pub fn to_stem(&self) -> String {
        self.0.format(STEM_FORMAT).to_string()
    }
}

impl fmt::Display for ExifTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(EXIF_FORMAT))
    }
}

pub fn format_stem(raw: &str) -> Result<String, TimestampError> {
    ExifTimestamp::parse(raw).map(|ts| ts.to_stem())
}

fn is_colon_triplet(value: &str) -> bool {
    let fields: Vec<&str> = value.split(':').collect();
    fields.len() == 3
        && fields
            .iter()
            .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}
