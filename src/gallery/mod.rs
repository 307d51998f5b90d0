//! Gallery record store.
//!
//! Three stages implement the same [`GalleryDb`] trait and are stacked at
//! construction time:
//!
//! ```text
//! GalleryService  →  GalleryValidator  →  SqliteBackend  →  galleries table
//!   (facade)          (check chain)        (data access)
//! ```
//!
//! The module is split into:
//! - **Backend**: [`GalleryDb`] trait, [`GalleryError`], [`ErrorCategory`]
//! - **SQLite backend**: [`SqliteBackend`], schema and soft-delete queries
//! - **Validator**: ordered, short-circuiting invariant checks
//! - **Service**: [`GalleryService`], the composed facade

pub mod backend;
pub mod service;
pub mod sqlite_backend;
pub mod validator;

pub use backend::{ErrorCategory, GalleryDb, GalleryError};
pub use service::GalleryService;
pub use sqlite_backend::SqliteBackend;
pub use validator::GalleryValidator;
