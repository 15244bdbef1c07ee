use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    JpegEncoder::new(&mut out)
        .encode_image(&img)
        .expect("encode jpeg");
    out
}

/// APP1セグメント(リトルエンディアンTIFF, IFD0 -> Exif IFD -> DateTimeOriginal)
pub fn exif_segment(date: &str) -> Vec<u8> {
    let mut value = date.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "inline ASCII values are not supported here");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut tiff, 0x8769, 4, 1, 26);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut tiff, 0x9003, 2, value.len() as u32, 44);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&value);

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

pub fn jpeg_with_exif_date(width: u32, height: u32, date: &str) -> Vec<u8> {
    let jpeg = encode_jpeg(width, height);
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&exif_segment(date));
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}
