use std::fs;
use std::path::Path;

use crate::error::{Result, ViewerError};

const BASIC_EXTENSIONS: &[&str] = &["png", "gif", "ppm", "pgm"];

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "ppm", "pgm"];

// ---------------------------------------------------------------------------
// Extension allow-set
// ---------------------------------------------------------------------------

/// File extensions treated as images. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowSet {
    extensions: Vec<String>,
}

impl AllowSet {
    /// Build from any list of extensions. A leading dot is ignored, so both
    /// `"png"` and `".PNG"` are accepted.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        extensions.sort();
        extensions.dedup();
        Self { extensions }
    }

    /// `{png, gif, ppm, pgm}`
    pub fn basic() -> Self {
        Self::new(BASIC_EXTENSIONS)
    }

    /// `{jpg, jpeg, png, gif, ppm, pgm}`
    pub fn with_jpeg() -> Self {
        Self::new(JPEG_EXTENSIONS)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn contains(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }

    pub fn is_image_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.contains(e))
            .unwrap_or(false)
    }
}

impl Default for AllowSet {
    fn default() -> Self {
        Self::with_jpeg()
    }
}

// ---------------------------------------------------------------------------
// Directory listing
// ---------------------------------------------------------------------------

/// List the direct entries of `dir` that are regular files with an allowed
/// extension. Returns bare file names in byte-wise lexicographic order, so
/// upper-case names sort before lower-case ones.
pub fn list_images(dir: &Path, allow: &AllowSet) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| ViewerError::filesystem(dir, e))?;
    let mut names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| ViewerError::filesystem(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !allow.is_image_file(&path) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non UTF-8 file name {:?} in {:?}", raw, dir),
        }
    }

    names.sort();
    Ok(names)
}
