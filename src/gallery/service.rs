//! The gallery service handed to collaborators.

use super::backend::{GalleryDb, GalleryError};
use super::sqlite_backend::SqliteBackend;
use super::validator::GalleryValidator;
use crate::types::Gallery;

/// Gallery store with validation interposed.
///
/// Same contract as the backend it wraps; `new` wires
/// validator → SQLite backend.
pub struct GalleryService<D = SqliteBackend> {
    db: GalleryValidator<D>,
}

impl GalleryService<SqliteBackend> {
    pub fn new(backend: SqliteBackend) -> Self {
        Self::with_backend(backend)
    }

    /// The SQLite gateway at the bottom of the chain, for schema management.
    pub fn sqlite(&self) -> &SqliteBackend {
        self.db.inner()
    }
}

impl<D: GalleryDb> GalleryService<D> {
    /// Build the chain over any backend.
    pub fn with_backend(backend: D) -> Self {
        Self {
            db: GalleryValidator::new(backend),
        }
    }

    pub fn backend(&self) -> &D {
        self.db.inner()
    }
}

impl<D: GalleryDb> GalleryDb for GalleryService<D> {
    fn by_id(&self, id: u64) -> Result<Gallery, GalleryError> {
        self.db.by_id(id)
    }

    fn by_user_id(&self, user_id: u64) -> Result<Vec<Gallery>, GalleryError> {
        self.db.by_user_id(user_id)
    }

    fn create(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        self.db.create(gallery)
    }

    fn update(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        self.db.update(gallery)
    }

    fn delete(&self, id: u64) -> Result<(), GalleryError> {
        self.db.delete(id)
    }
}
