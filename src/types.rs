//! Shared record and value types.
//!
//! [`Model`] is the bookkeeping every persisted record carries (identity,
//! timestamps, soft-delete marker). [`Gallery`] embeds it by value.
//! [`Image`] is never persisted: it only names a file on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::images::paths;
use crate::layout::{self, LayoutError};

/// Identity and lifecycle fields shared by every stored record.
///
/// `id == 0` means the record has not been inserted yet. A record with
/// `deleted_at` set is soft-deleted and invisible to every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A titled, user-owned collection of images.
///
/// `images` is filled on demand from the image store and is never written to
/// the gallery table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(flatten)]
    pub model: Model,
    pub user_id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

impl Gallery {
    /// An unsaved gallery owned by `user_id`.
    pub fn new(user_id: u64, title: impl Into<String>) -> Self {
        Self {
            model: Model::default(),
            user_id,
            title: title.into(),
            images: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.model.id
    }

    /// Distribute this gallery's images round-robin into `n` columns.
    ///
    /// See [`layout::images_split_n`].
    pub fn images_split_n(&self, n: usize) -> Result<Vec<Vec<Image>>, LayoutError> {
        layout::images_split_n(&self.images, n)
    }
}

/// An image file belonging to a gallery.
///
/// Identified only by `(gallery_id, filename)`; two images are equal when both
/// match. Existence is defined by the file at [`Image::relative_path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Image {
    pub gallery_id: u64,
    pub filename: String,
}

impl Image {
    pub fn new(gallery_id: u64, filename: impl Into<String>) -> Self {
        Self {
            gallery_id,
            filename: filename.into(),
        }
    }

    /// Web path of this image, e.g. `/images/galleries/7/a.png`.
    pub fn path(&self) -> String {
        paths::url_path(self)
    }

    /// Path relative to the store root, always with `/` separators.
    pub fn relative_path(&self) -> String {
        paths::relative_path(self)
    }
}
