mod batch;
mod collision;
mod exif_reader;
mod renamer;
mod scan;
mod thumbnail;
mod timestamp;

#[cfg(test)]
mod test_support;

pub use batch::{process_directory, BatchError, BatchReport, ProcessOptions};
pub use collision::{next_candidate, resolve_unique_stem, resolve_unique_stem_for, split_counter};
pub use exif_reader::{read_date_time_original, read_exif_date};
pub use renamer::{rename_if_dated, RenameOutcome};
pub use scan::{collect_jpg_files, ScanResult, ScanStats};
pub use thumbnail::{
    generate_thumbnail, scaled_width, thumbnail_path, ThumbnailError, THUMBNAIL_HEIGHT, THUMBS_DIR,
};
pub use timestamp::{format_stem, ExifTimestamp, TimestampError};
