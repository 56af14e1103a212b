use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// The target already existed and was left untouched.
    AlreadyPresent,
    /// The archive was extracted into a freshly created target.
    Extracted { entries: usize },
}

/// Make sure `target_dir` exists, extracting `archive_path` into it if it
/// does not.
///
/// An existing target is accepted as-is: its contents are not compared with
/// the archive, so a stale directory stays stale until removed by hand.
pub fn ensure_materialized(archive_path: &Path, target_dir: &Path) -> Result<Materialized> {
    if target_dir.exists() {
        log::debug!("{:?} already exists, skipping extraction", target_dir);
        return Ok(Materialized::AlreadyPresent);
    }

    // Open and validate before touching the filesystem so a bad archive
    // leaves nothing behind.
    let file = File::open(archive_path)
        .map_err(|e| ViewerError::archive(archive_path, ZipError::Io(e)))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ViewerError::archive(archive_path, e))?;
    let entries = archive.len();

    fs::create_dir_all(target_dir).map_err(|e| ViewerError::filesystem(target_dir, e))?;

    log::info!(
        "Extracting {} entries from {:?} into {:?}",
        entries,
        archive_path,
        target_dir
    );
    if let Err(e) = extract_entries(&mut archive, archive_path, target_dir) {
        if let Err(cleanup) = fs::remove_dir_all(target_dir) {
            log::warn!("Failed to remove partial {:?}: {}", target_dir, cleanup);
        }
        return Err(e);
    }

    Ok(Materialized::Extracted { entries })
}

/// Unpack entry by entry so read failures (bad checksum, truncated data) are
/// blamed on the archive and write failures on the target.
fn extract_entries(
    archive: &mut ZipArchive<File>,
    archive_path: &Path,
    target_dir: &Path,
) -> Result<()> {
    let mut buf = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ViewerError::archive(archive_path, e))?;
        let Some(relative) = entry.enclosed_name() else {
            log::warn!("Skipping unsafe entry name {:?}", entry.name());
            continue;
        };
        let out = target_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out).map_err(|e| ViewerError::filesystem(&out, e))?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(|e| ViewerError::filesystem(parent, e))?;
        }

        buf.clear();
        entry
            .read_to_end(&mut buf)
            .map_err(|e| ViewerError::archive(archive_path, ZipError::Io(e)))?;
        fs::write(&out, &buf).map_err(|e| ViewerError::filesystem(&out, e))?;
    }
    Ok(())
}
