//! Filesystem-backed image store.
//!
//! There is no image table. The gallery directory under the store root *is*
//! the record: an image exists exactly when its file does, and a gallery's
//! images are whatever [`ImageStore::by_gallery_id`] finds in its directory.
//!
//! No locking is done. Two uploads of the same `(gallery_id, filename)` race
//! and the last writer wins; a listing taken during an upload may see a
//! partially written file. Callers that need more must serialize per gallery.

use super::ImageError;
use super::paths::{self, validate_filename};
use crate::types::Image;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl Default for ImageStore {
    /// Store rooted at the process working directory.
    fn default() -> Self {
        Self::new(".")
    }
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk directory for a gallery.
    pub fn gallery_dir(&self, gallery_id: u64) -> PathBuf {
        self.root.join(paths::gallery_dir(gallery_id))
    }

    /// On-disk location of an image file.
    pub fn file_path(&self, image: &Image) -> PathBuf {
        self.root.join(paths::image_file(image))
    }

    /// Write `reader` to `images/galleries/<gallery_id>/<filename>`.
    ///
    /// Missing directories are created. An existing file with the same name is
    /// truncated and replaced.
    pub fn create<R: Read>(
        &self,
        gallery_id: u64,
        mut reader: R,
        filename: &str,
    ) -> Result<Image, ImageError> {
        validate_filename(filename)?;
        let dir = self.gallery_dir(gallery_id);
        fs::create_dir_all(&dir)?;

        let image = Image::new(gallery_id, filename);
        let mut dst = fs::File::create(dir.join(filename))?;
        let bytes = io::copy(&mut reader, &mut dst)?;
        debug!(gallery_id, filename, bytes, "image stored");
        Ok(image)
    }

    /// Every file directly inside the gallery's directory, sorted by filename.
    ///
    /// A gallery that never had an upload has no directory and no images.
    /// Any other failure to reach the directory is an error. Files whose names
    /// are not valid UTF-8 cannot be addressed as an [`Image`] and are skipped.
    pub fn by_gallery_id(&self, gallery_id: u64) -> Result<Vec<Image>, ImageError> {
        let dir = self.gallery_dir(gallery_id);
        match fs::metadata(&dir) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }

        let mut images = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str() else {
                warn!(gallery_id, path = %entry.path().display(), "skipping non-UTF-8 filename");
                continue;
            };
            images.push(Image::new(gallery_id, filename));
        }
        debug!(gallery_id, count = images.len(), "images listed");
        Ok(images)
    }

    /// Remove an image's file. Fails if it doesn't exist.
    pub fn delete(&self, image: &Image) -> Result<(), ImageError> {
        validate_filename(&image.filename)?;
        fs::remove_file(self.file_path(image))?;
        debug!(gallery_id = image.gallery_id, filename = %image.filename, "image deleted");
        Ok(())
    }

    /// Remove a gallery's whole image directory. Missing directories are fine.
    ///
    /// Deleting a gallery record never calls this on its own; the caller
    /// decides whether the files go too.
    pub fn delete_gallery_dir(&self, gallery_id: u64) -> Result<(), ImageError> {
        let dir = self.gallery_dir(gallery_id);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                debug!(gallery_id, "image directory removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
