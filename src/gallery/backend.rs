//! Gallery store trait and error type.
//!
//! [`GalleryDb`] is the contract shared by every stage of the gallery store:
//! the SQLite gateway, the validator wrapping it, and the service facade
//! wrapping both. Each stage holds the next one and delegates whatever it
//! doesn't handle itself.
//!
//! For single-gallery reads: a found gallery is `Ok`, a missing or
//! soft-deleted one is [`GalleryError::NotFound`], anything else is a wrapped
//! backend fault.

use crate::types::Gallery;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Gallery not found")]
    NotFound,
    #[error("User ID is required")]
    UserIdRequired,
    #[error("Title is required")]
    TitleRequired,
    #[error("ID provided was invalid")]
    InvalidId,
    #[error("Database error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse grouping of [`GalleryError`] for callers that map errors to
/// user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input rejected before any store call.
    Validation,
    /// The requested record does not exist.
    NotFound,
    /// Storage fault, propagated without interpretation.
    Fault,
}

impl GalleryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GalleryError::UserIdRequired | GalleryError::TitleRequired | GalleryError::InvalidId => {
                ErrorCategory::Validation
            }
            GalleryError::NotFound => ErrorCategory::NotFound,
            GalleryError::Backend(_) | GalleryError::Io(_) => ErrorCategory::Fault,
        }
    }
}

/// Operations on gallery records.
pub trait GalleryDb {
    /// Look up a live gallery by ID.
    fn by_id(&self, id: u64) -> Result<Gallery, GalleryError>;

    /// All live galleries owned by `user_id`, oldest first. Never `NotFound`.
    fn by_user_id(&self, user_id: u64) -> Result<Vec<Gallery>, GalleryError>;

    /// Insert `gallery`, writing the generated ID and timestamps back into it.
    fn create(&self, gallery: &mut Gallery) -> Result<(), GalleryError>;

    /// Persist the mutable fields of the live row matching `gallery.model.id`.
    fn update(&self, gallery: &mut Gallery) -> Result<(), GalleryError>;

    /// Soft-delete the row with this ID. Deleting a missing ID is not an error.
    fn delete(&self, id: u64) -> Result<(), GalleryError>;
}
