//! # imagecloud
//!
//! Persistence and validation core of a photo-gallery manager. Users own
//! galleries (titled records in SQLite); galleries contain images (plain
//! files on disk).
//!
//! # Architecture: Two Systems of Record
//!
//! ```text
//! gallery records   GalleryService → GalleryValidator → SqliteBackend → galleries table
//! image files       ImageStore → images/galleries/<gallery id>/<filename>
//! ```
//!
//! The two stores are independent. A gallery row knows nothing about its
//! images; its images are rebuilt on demand by listing its directory. Neither
//! store checks the other, and there are no cross-store transactions.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Layered gallery record store: trait, validator, SQLite backend, facade |
//! | [`images`] | Filesystem image store and path builder |
//! | [`layout`] | Round-robin split of images into display columns |
//! | [`services`] | Bundle of both stores, built from config |
//! | [`config`] | `config.toml` loading merged over stock defaults |
//! | [`types`] | Shared records: `Model`, `Gallery`, `Image` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Validation as a Stage, Not a Method
//!
//! The validator implements the same [`gallery::GalleryDb`] trait as the
//! backend it wraps. Checks run in a fixed order and stop at the first
//! failure, and nothing reaches the backend unless every check passed, so an
//! invalid gallery can never be partially written.
//!
//! ## Soft Delete
//!
//! Deleting a gallery stamps `deleted_at`; every read filters on it. The row
//! stays, which leaves room for a restore. For the same reason deleting a
//! gallery leaves its image files alone unless the caller asks for a purge.
//!
//! ## The Directory Is the Index
//!
//! There is no image table. An image exists when its file exists. Listings
//! are sorted by filename because raw directory order differs between
//! platforms.
//!
//! ## Filenames Are Single Components
//!
//! Uploaded filenames are used verbatim but must not contain separators or
//! be `.`/`..`, so no image operation can reach outside its gallery directory.
//!
//! # Errors
//!
//! Each module has its own `thiserror` enum. [`gallery::GalleryError`]
//! separates validation failures, not-found, and opaque storage faults so a
//! caller can map them to distinct responses
//! (see [`gallery::GalleryError::category`]).

pub mod config;
pub mod gallery;
pub mod images;
pub mod layout;
pub mod output;
pub mod services;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
