//! Path building for image files.
//!
//! Every image lives at a deterministic location derived from its gallery ID
//! and filename:
//!
//! ```text
//! images/galleries/<gallery_id>/<filename>      relative path (store root)
//! /images/galleries/<gallery_id>/<filename>     web path (percent-encoded)
//! ```
//!
//! Relative paths always use `/`, whatever the host separator, so they can be
//! stored and compared across platforms. The web path is served as a static
//! asset and embedded in rendered pages, so its shape must not change.
//!
//! ## Filenames
//!
//! Filenames are used verbatim, but only single path components are
//! accepted. Anything that could address a file outside the gallery
//! directory is rejected by [`validate_filename`]:
//! - `""`, `"."`, `".."`
//! - names containing `/` or `\`
//! - names containing NUL

use super::ImageError;
use crate::types::Image;
use std::path::PathBuf;

/// Directory under the store root that holds one sub-directory per gallery.
pub const GALLERIES_DIR: [&str; 2] = ["images", "galleries"];

/// `images/galleries/<gallery_id>/<filename>`, `/`-separated.
pub fn relative_path(image: &Image) -> String {
    format!(
        "{}/{}/{}",
        GALLERIES_DIR.join("/"),
        image.gallery_id,
        image.filename
    )
}

/// Absolute web path for an image, each segment percent-encoded.
///
/// Only RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through.
/// Sub-delimiters that are legal in a path, such as `+ & = @ : ; , $`, are
/// escaped too; servers decode both spellings to the same file.
///
/// - `{7, "a.png"}` → `/images/galleries/7/a.png`
/// - `{7, "my photo.png"}` → `/images/galleries/7/my%20photo.png`
pub fn url_path(image: &Image) -> String {
    relative_path(image)
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .fold(String::new(), |mut path, segment| {
            path.push('/');
            path.push_str(&segment);
            path
        })
}

/// OS path of a gallery's directory, relative to the store root.
pub fn gallery_dir(gallery_id: u64) -> PathBuf {
    let mut dir: PathBuf = GALLERIES_DIR.iter().collect();
    dir.push(gallery_id.to_string());
    dir
}

/// OS path of an image file, relative to the store root.
pub fn image_file(image: &Image) -> PathBuf {
    gallery_dir(image.gallery_id).join(&image.filename)
}

/// Reject filenames that are not a single, ordinary path component.
pub fn validate_filename(filename: &str) -> Result<(), ImageError> {
    let bad = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if bad {
        return Err(ImageError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
