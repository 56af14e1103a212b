use chrono::{DateTime, Local};
use image::{GenericImageView, ImageError, ImageReader};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, ViewerError};

// ---------------------------------------------------------------------------
// Decoded image data
// ---------------------------------------------------------------------------

pub struct DecodedImage {
    pub rgba_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub format_name: String,
    /// EXIF capture time, or the file modification time when absent.
    pub captured: Option<String>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format_name", &self.format_name)
            .finish_non_exhaustive()
    }
}

pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let decode_err = |source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    };

    // Trust the file's magic bytes over its extension.
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?;
    let format_name = reader
        .format()
        .map(|f| format!("{:?}", f).to_uppercase())
        .unwrap_or_else(|| "unknown".to_string());
    let img = reader.decode().map_err(decode_err)?;

    let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let (width, height) = img.dimensions();

    Ok(DecodedImage {
        rgba_bytes: img.to_rgba8().into_raw(),
        width,
        height,
        file_size,
        format_name,
        captured: capture_time(path),
    })
}

fn capture_time(path: &Path) -> Option<String> {
    exif_capture_time(path).or_else(|| modified_time(path))
}

fn exif_capture_time(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let exif = exif::Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok()?;
    let field = exif.get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)?;
    Some(field.display_value().to_string())
}

fn modified_time(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
