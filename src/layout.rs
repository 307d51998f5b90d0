//! Column layout for gallery pages.
//!
//! Galleries render as `n` side-by-side columns. Images are dealt out
//! round-robin so that reading across the columns row by row follows the
//! original order:
//!
//! ```text
//! images:   0 1 2 3 4 5 6     n = 3
//!
//! column 0: 0 3 6
//! column 1: 1 4
//! column 2: 2 5
//! ```

use crate::types::Image;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Bucket count must be at least 1")]
    ZeroBuckets,
}

/// Split `images` into exactly `n` buckets; image `i` lands in bucket `i % n`.
///
/// Order inside each bucket follows input order. Buckets past the image count
/// are empty. `n == 0` has no meaningful layout and is rejected.
pub fn images_split_n(images: &[Image], n: usize) -> Result<Vec<Vec<Image>>, LayoutError> {
    if n == 0 {
        return Err(LayoutError::ZeroBuckets);
    }
    let mut buckets: Vec<Vec<Image>> = vec![Vec::new(); n];
    for (i, image) in images.iter().enumerate() {
        buckets[i % n].push(image.clone());
    }
    Ok(buckets)
}
