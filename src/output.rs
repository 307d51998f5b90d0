//! CLI output formatting.
//!
//! # Entity Display Contract
//!
//! Every entity follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + identity (title or filename)
//! 2. **Context lines**: indented `ID:`, `Owner:`, `Path:` and similar
//!
//! ```text
//! Galleries (user 1)
//! 001 Trip (3 photos)
//!     ID: 4
//!     Created: 2026-10-16 09:12:44 UTC
//!     Column 1
//!         001 a.jpg
//!             Path: /images/galleries/4/a.jpg
//!         002 d.jpg
//!             Path: /images/galleries/4/d.jpg
//!     Column 2
//!         001 b.jpg
//!             Path: /images/galleries/4/b.jpg
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout.

use crate::types::{Gallery, Image};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Gallery header: index + title, with photo count once images are loaded.
///
/// ```text
/// 001 Trip (3 photos)
/// 002 Untouched
/// ```
fn gallery_header(index: usize, gallery: &Gallery) -> String {
    if gallery.images.is_empty() {
        format!("{} {}", format_index(index), gallery.title)
    } else {
        format!(
            "{} {} ({} photos)",
            format_index(index),
            gallery.title,
            gallery.images.len()
        )
    }
}

fn image_lines(index: usize, image: &Image, depth: usize) -> Vec<String> {
    vec![
        format!("{}{} {}", indent(depth), format_index(index), image.filename),
        format!("{}Path: {}", indent(depth + 1), image.path()),
    ]
}

// ============================================================================
// Galleries
// ============================================================================

/// Header plus context lines for one gallery.
pub fn format_gallery(index: usize, gallery: &Gallery) -> Vec<String> {
    let mut lines = vec![gallery_header(index, gallery)];
    lines.push(format!("{}ID: {}", indent(1), gallery.id()));
    lines.push(format!("{}Owner: user {}", indent(1), gallery.user_id));
    if let Some(created) = gallery.model.created_at {
        lines.push(format!(
            "{}Created: {}",
            indent(1),
            created.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    if let Some(updated) = gallery.model.updated_at
        && gallery.model.updated_at != gallery.model.created_at
    {
        lines.push(format!(
            "{}Updated: {}",
            indent(1),
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    lines
}

/// All galleries owned by one user.
pub fn format_gallery_list(user_id: u64, galleries: &[Gallery]) -> Vec<String> {
    let mut lines = vec![format!("Galleries (user {})", user_id)];
    if galleries.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
        return lines;
    }
    for (i, gallery) in galleries.iter().enumerate() {
        lines.extend(format_gallery(i + 1, gallery));
    }
    lines
}

/// A gallery with its images laid out in columns.
pub fn format_gallery_columns(gallery: &Gallery, columns: &[Vec<Image>]) -> Vec<String> {
    let mut lines = format_gallery(1, gallery);
    if gallery.images.is_empty() {
        lines.push(format!("{}No images", indent(1)));
        return lines;
    }
    for (c, column) in columns.iter().enumerate() {
        lines.push(format!("{}Column {}", indent(1), c + 1));
        for (i, image) in column.iter().enumerate() {
            lines.extend(image_lines(i + 1, image, 2));
        }
    }
    lines
}

// ============================================================================
// Images
// ============================================================================

/// Flat image listing for one gallery.
pub fn format_images(gallery_id: u64, images: &[Image]) -> Vec<String> {
    let mut lines = vec![format!("Images (gallery {})", gallery_id)];
    if images.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
        return lines;
    }
    for (i, image) in images.iter().enumerate() {
        lines.extend(image_lines(i + 1, image, 0));
    }
    lines
}

// ============================================================================
// Printers
// ============================================================================

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_gallery(gallery: &Gallery) {
    print_lines(format_gallery(1, gallery));
}

pub fn print_gallery_list(user_id: u64, galleries: &[Gallery]) {
    print_lines(format_gallery_list(user_id, galleries));
}

pub fn print_gallery_columns(gallery: &Gallery, columns: &[Vec<Image>]) {
    print_lines(format_gallery_columns(gallery, columns));
}

pub fn print_images(gallery_id: u64, images: &[Image]) {
    print_lines(format_images(gallery_id, images));
}
