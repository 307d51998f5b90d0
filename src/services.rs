//! The service bundle handed to collaborators.
//!
//! [`Services`] owns one gallery service and one image store. The two are
//! independent systems of record: nothing here keeps them consistent with
//! each other, and deleting a gallery leaves its image directory in place
//! unless the caller also asks the image store to remove it.

use crate::config::AppConfig;
use crate::gallery::{GalleryDb, GalleryError, GalleryService, SqliteBackend};
use crate::images::{ImageError, ImageStore};
use crate::types::Gallery;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Gallery(#[from] GalleryError),
    #[error(transparent)]
    Image(#[from] ImageError),
}

pub struct Services {
    pub gallery: GalleryService,
    pub images: ImageStore,
}

impl Services {
    /// Open the database and image root named in `config`.
    pub fn open(config: &AppConfig) -> Result<Self, GalleryError> {
        let backend = SqliteBackend::open(&config.database.path)?;
        info!(
            database = %config.database.path.display(),
            images = %config.images.root.display(),
            "services opened"
        );
        Ok(Self {
            gallery: GalleryService::new(backend),
            images: ImageStore::new(config.images.root.clone()),
        })
    }

    /// In-memory gallery store, images under `images_root`.
    pub fn in_memory(images_root: impl Into<PathBuf>) -> Result<Self, GalleryError> {
        Ok(Self {
            gallery: GalleryService::new(SqliteBackend::open_in_memory()?),
            images: ImageStore::new(images_root),
        })
    }

    /// Create any missing tables.
    pub fn auto_migrate(&self) -> Result<(), GalleryError> {
        self.gallery.sqlite().auto_migrate()
    }

    /// Drop every gallery record and recreate the schema. Image files stay.
    pub fn destructive_reset(&self) -> Result<(), GalleryError> {
        info!("resetting gallery table");
        self.gallery.sqlite().destructive_reset()
    }

    /// Look up a gallery and fill in its images from disk.
    pub fn gallery_with_images(&self, id: u64) -> Result<Gallery, ServiceError> {
        let mut gallery = self.gallery.by_id(id)?;
        gallery.images = self.images.by_gallery_id(id)?;
        Ok(gallery)
    }

    /// Soft-delete a gallery, optionally removing its image directory too.
    ///
    /// The record is deleted first; files are only touched once that succeeded.
    pub fn delete_gallery(&self, id: u64, purge_images: bool) -> Result<(), ServiceError> {
        self.gallery.delete(id)?;
        if purge_images {
            self.images.delete_gallery_dir(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn gallery_with_images_fills_sorted_images() {
        let (_tmp, services) = temp_services();
        let g = create_gallery(&services, 1, "Trip");
        services.images.create(g.id(), &b"2"[..], "b.jpg").unwrap();
        services.images.create(g.id(), &b"1"[..], "a.jpg").unwrap();

        let loaded = services.gallery_with_images(g.id()).unwrap();
        assert_eq!(loaded.title, "Trip");
        assert_eq!(filenames(&loaded.images), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn gallery_with_images_missing_gallery() {
        let (_tmp, services) = temp_services();
        assert!(matches!(
            services.gallery_with_images(5),
            Err(ServiceError::Gallery(GalleryError::NotFound))
        ));
    }

    #[test]
    fn delete_gallery_keeps_images_by_default() {
        let (_tmp, services) = temp_services();
        let g = create_gallery(&services, 1, "Trip");
        services.images.create(g.id(), &b"x"[..], "a.jpg").unwrap();

        services.delete_gallery(g.id(), false).unwrap();
        assert!(matches!(
            services.gallery.by_id(g.id()),
            Err(GalleryError::NotFound)
        ));
        assert_eq!(services.images.by_gallery_id(g.id()).unwrap().len(), 1);
    }

    #[test]
    fn delete_gallery_can_purge_images() {
        let (_tmp, services) = temp_services();
        let g = create_gallery(&services, 1, "Trip");
        services.images.create(g.id(), &b"x"[..], "a.jpg").unwrap();

        services.delete_gallery(g.id(), true).unwrap();
        assert!(services.images.by_gallery_id(g.id()).unwrap().is_empty());
        assert!(!services.images.gallery_dir(g.id()).exists());
    }

    #[test]
    fn invalid_delete_leaves_images_alone() {
        let (_tmp, services) = temp_services();
        services.images.create(0, &b"x"[..], "a.jpg").unwrap();
        assert!(matches!(
            services.delete_gallery(0, true),
            Err(ServiceError::Gallery(GalleryError::InvalidId))
        ));
        assert_eq!(services.images.by_gallery_id(0).unwrap().len(), 1);
    }

    #[test]
    fn destructive_reset_clears_records() {
        let (_tmp, services) = temp_services();
        create_gallery(&services, 1, "Trip");
        services.destructive_reset().unwrap();
        assert!(services.gallery.by_user_id(1).unwrap().is_empty());
    }

    #[test]
    fn open_uses_configured_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.database.path = tmp.path().join("db/imagecloud.db");
        config.images.root = tmp.path().to_path_buf();

        let services = Services::open(&config).unwrap();
        services.auto_migrate().unwrap();
        assert!(config.database.path.exists());
        assert_eq!(services.images.root(), tmp.path());
    }
}
