//! Cyclic navigation over the images of one directory.
//!
//! The image list is read once when the navigator is built and never
//! rescanned, so files added or removed afterwards are not seen.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::{list_images, AllowSet};

#[derive(Debug, Clone)]
pub struct Navigator {
    dir: PathBuf,
    names: Vec<String>,
    /// `Some(i)` with `i < names.len()` whenever `names` is non-empty.
    cursor: Option<usize>,
}

impl Navigator {
    /// List `dir`, keep the files whose extension is in `allow`, and point
    /// the cursor at the first one.
    pub fn build(dir: impl AsRef<Path>, allow: &AllowSet) -> Result<Self> {
        let dir = dir.as_ref();
        let names = list_images(dir, allow)?;
        log::info!("Found {} images in {:?}", names.len(), dir);
        Ok(Self::from_names(dir.to_path_buf(), names))
    }

    fn from_names(dir: PathBuf, names: Vec<String>) -> Self {
        let cursor = if names.is_empty() { None } else { Some(0) };
        Self { dir, names, cursor }
    }

    pub fn current(&self) -> Option<PathBuf> {
        self.cursor.map(|i| self.dir.join(&self.names[i]))
    }

    /// Move to the next image, wrapping from the last back to the first.
    pub fn advance(&mut self) -> Option<PathBuf> {
        let i = self.cursor?;
        self.cursor = Some((i + 1) % self.names.len());
        self.current()
    }

    /// Move to the previous image, wrapping from the first to the last.
    pub fn retreat(&mut self) -> Option<PathBuf> {
        let i = self.cursor?;
        let len = self.names.len();
        self.cursor = Some((i + len - 1) % len);
        self.current()
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_name(&self) -> Option<&str> {
        self.cursor.map(|i| self.names[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::{tempdir, TempDir};

    fn dir_with(names: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for name in names {
            File::create(dir.path().join(name)).unwrap();
        }
        dir
    }

    fn build(dir: &TempDir) -> Navigator {
        Navigator::build(dir.path(), &AllowSet::basic()).unwrap()
    }

    #[test]
    fn starts_at_first_sorted_image() {
        let dir = dir_with(&["b.png", "a.png", "C.PNG"]);
        let nav = build(&dir);
        assert_eq!(nav.names, ["C.PNG", "a.png", "b.png"]);
        assert_eq!(nav.position(), Some(0));
        assert_eq!(nav.current(), Some(dir.path().join("C.PNG")));
    }

    #[test]
    fn advance_wraps_to_first() {
        let dir = dir_with(&["1.png", "2.png", "3.png"]);
        let mut nav = build(&dir);
        assert_eq!(nav.advance(), Some(dir.path().join("2.png")));
        assert_eq!(nav.advance(), Some(dir.path().join("3.png")));
        assert_eq!(nav.advance(), Some(dir.path().join("1.png")));
    }

    #[test]
    fn retreat_wraps_to_last() {
        let dir = dir_with(&["1.png", "2.png", "3.png"]);
        let mut nav = build(&dir);
        assert_eq!(nav.retreat(), Some(dir.path().join("3.png")));
        assert_eq!(nav.position(), Some(2));
        assert_eq!(nav.retreat(), Some(dir.path().join("2.png")));
    }

    #[test]
    fn n_advances_close_the_cycle() {
        let dir = dir_with(&["a.gif", "b.pgm", "c.ppm", "d.png", "e.png"]);
        let mut nav = build(&dir);
        for start in 0..nav.len() {
            let before = nav.current();
            for _ in 0..nav.len() {
                nav.advance();
            }
            assert_eq!(nav.current(), before, "start {start}");
            nav.advance();
        }
    }

    #[test]
    fn advance_and_retreat_are_inverses() {
        let dir = dir_with(&["a.png", "b.png", "c.png", "d.png"]);
        let mut nav = build(&dir);
        for _ in 0..nav.len() {
            let before = nav.current();
            nav.advance();
            assert_eq!(nav.retreat(), before);
            nav.retreat();
            assert_eq!(nav.advance(), before);
            nav.advance();
        }
    }

    #[test]
    fn single_image_never_moves() {
        let dir = dir_with(&["only.png", "notes.txt"]);
        let mut nav = build(&dir);
        let only = Some(dir.path().join("only.png"));
        for _ in 0..3 {
            assert_eq!(nav.advance(), only);
            assert_eq!(nav.retreat(), only);
        }
        assert_eq!(nav.position(), Some(0));
    }

    #[test]
    fn empty_directory_answers_none() {
        let dir = dir_with(&["readme.txt", "photo.jpg"]);
        let mut nav = build(&dir);
        assert!(nav.is_empty());
        assert_eq!(nav.current(), None);
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.retreat(), None);
        assert_eq!(nav.position(), None);
        assert_eq!(nav.current_name(), None);
    }

    #[test]
    fn allow_set_is_configurable() {
        let dir = dir_with(&["photo.jpg", "frame.png"]);
        let basic = Navigator::build(dir.path(), &AllowSet::basic()).unwrap();
        let jpeg = Navigator::build(dir.path(), &AllowSet::with_jpeg()).unwrap();
        assert_eq!(basic.names, ["frame.png"]);
        assert_eq!(jpeg.names, ["frame.png", "photo.jpg"]);
    }

    #[test]
    fn list_is_not_rescanned() {
        let dir = dir_with(&["a.png"]);
        let mut nav = build(&dir);
        File::create(dir.path().join("b.png")).unwrap();
        assert_eq!(nav.advance(), Some(dir.path().join("a.png")));
        assert_eq!(nav.len(), 1);
    }
}
