//! Shared test utilities for the imagecloud test suite.
//!
//! Provides isolated stores backed by temp directories, gallery builders, and
//! lookup helpers that panic with the available values on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, services) = temp_services();
//! let gallery = create_gallery(&services, 1, "Trip");
//! services.images.create(gallery.id(), &b"abc"[..], "a.png").unwrap();
//!
//! let images = services.images.by_gallery_id(gallery.id()).unwrap();
//! assert_eq!(filenames(&images), vec!["a.png"]);
//! ```

use tempfile::TempDir;

use crate::gallery::GalleryDb;
use crate::images::ImageStore;
use crate::services::Services;
use crate::types::{Gallery, Image};

// =========================================================================
// Fixture setup
// =========================================================================

/// An image store rooted in a fresh temp directory.
///
/// Keep the `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (TempDir, ImageStore) {
    let tmp = TempDir::new().unwrap();
    let store = ImageStore::new(tmp.path());
    (tmp, store)
}

/// Migrated in-memory gallery store plus an image store in a temp directory.
pub fn temp_services() -> (TempDir, Services) {
    let tmp = TempDir::new().unwrap();
    let services = Services::in_memory(tmp.path()).unwrap();
    services.auto_migrate().unwrap();
    (tmp, services)
}

/// Create and return a gallery through the validated service.
pub fn create_gallery(services: &Services, user_id: u64, title: &str) -> Gallery {
    let mut gallery = Gallery::new(user_id, title);
    services.gallery.create(&mut gallery).unwrap();
    gallery
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// All filenames in order.
pub fn filenames(images: &[Image]) -> Vec<&str> {
    images.iter().map(|i| i.filename.as_str()).collect()
}

/// Find a gallery by title. Panics if not found.
pub fn find_gallery<'a>(galleries: &'a [Gallery], title: &str) -> &'a Gallery {
    galleries
        .iter()
        .find(|g| g.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = galleries.iter().map(|g| g.title.as_str()).collect();
            panic!("gallery '{title}' not found. Available: {titles:?}")
        })
}
