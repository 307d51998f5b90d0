//! Image files on disk.
//!
//! | Piece | Role |
//! |---|---|
//! | [`paths`] | pure path builder: relative path, web path, filename checks |
//! | [`store`] | [`ImageStore`]: upload, list, delete under `images/galleries/` |

pub mod paths;
pub mod store;

pub use store::ImageStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid image filename: {0:?}")]
    InvalidFilename(String),
}
