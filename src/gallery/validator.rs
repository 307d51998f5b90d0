//! Validation stage in front of the gallery backend.
//!
//! Every mutating call runs an ordered list of checks before it is passed on.
//! The first failing check wins and later checks are not evaluated, so a
//! gallery with both a missing owner and an empty title reports
//! [`GalleryError::UserIdRequired`]. Nothing reaches the wrapped stage unless
//! the whole list passes.
//!
//! | Operation | Checks, in order |
//! |---|---|
//! | `create`, `update` | `user_id_required`, `title_required` |
//! | `delete` | `non_zero_id` |
//! | `by_id`, `by_user_id` | none |

use super::backend::{GalleryDb, GalleryError};
use crate::types::Gallery;
use tracing::warn;

/// A single invariant check.
pub type GalleryValFn = fn(&Gallery) -> Result<(), GalleryError>;

/// Run `fns` in order against `gallery`, stopping at the first error.
pub fn run_gallery_val_fns(gallery: &Gallery, fns: &[GalleryValFn]) -> Result<(), GalleryError> {
    for check in fns {
        check(gallery)?;
    }
    Ok(())
}

pub fn user_id_required(gallery: &Gallery) -> Result<(), GalleryError> {
    if gallery.user_id == 0 {
        return Err(GalleryError::UserIdRequired);
    }
    Ok(())
}

pub fn title_required(gallery: &Gallery) -> Result<(), GalleryError> {
    if gallery.title.is_empty() {
        return Err(GalleryError::TitleRequired);
    }
    Ok(())
}

pub fn non_zero_id(gallery: &Gallery) -> Result<(), GalleryError> {
    if gallery.model.id == 0 {
        return Err(GalleryError::InvalidId);
    }
    Ok(())
}

const WRITE_CHECKS: &[GalleryValFn] = &[user_id_required, title_required];
const DELETE_CHECKS: &[GalleryValFn] = &[non_zero_id];

/// Wraps the next [`GalleryDb`] stage and gates its mutations.
pub struct GalleryValidator<D> {
    next: D,
}

impl<D: GalleryDb> GalleryValidator<D> {
    pub fn new(next: D) -> Self {
        Self { next }
    }

    pub fn inner(&self) -> &D {
        &self.next
    }

    fn check(&self, op: &str, gallery: &Gallery, fns: &[GalleryValFn]) -> Result<(), GalleryError> {
        run_gallery_val_fns(gallery, fns).inspect_err(|e| {
            warn!(op, gallery_id = gallery.model.id, error = %e, "gallery rejected");
        })
    }
}

impl<D: GalleryDb> GalleryDb for GalleryValidator<D> {
    fn by_id(&self, id: u64) -> Result<Gallery, GalleryError> {
        self.next.by_id(id)
    }

    fn by_user_id(&self, user_id: u64) -> Result<Vec<Gallery>, GalleryError> {
        self.next.by_user_id(user_id)
    }

    fn create(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        self.check("create", gallery, WRITE_CHECKS)?;
        self.next.create(gallery)
    }

    fn update(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        self.check("update", gallery, WRITE_CHECKS)?;
        self.next.update(gallery)
    }

    fn delete(&self, id: u64) -> Result<(), GalleryError> {
        let mut gallery = Gallery::default();
        gallery.model.id = id;
        self.check("delete", &gallery, DELETE_CHECKS)?;
        self.next.delete(gallery.model.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::backend::tests::{MockBackend, RecordedOp};

    fn validator() -> GalleryValidator<MockBackend> {
        GalleryValidator::new(MockBackend::new())
    }

    #[test]
    fn zero_user_id_rejected_before_backend() {
        let v = validator();
        let mut g = Gallery::new(0, "Trip");
        assert!(matches!(v.create(&mut g), Err(GalleryError::UserIdRequired)));
        assert!(v.inner().get_operations().is_empty());
        assert_eq!(g.id(), 0);
    }

    #[test]
    fn empty_title_rejected_before_backend() {
        let v = validator();
        let mut g = Gallery::new(1, "");
        assert!(matches!(v.create(&mut g), Err(GalleryError::TitleRequired)));
        assert!(v.inner().get_operations().is_empty());
    }

    #[test]
    fn user_id_checked_before_title() {
        let v = validator();
        let mut g = Gallery::new(0, "");
        assert!(matches!(v.create(&mut g), Err(GalleryError::UserIdRequired)));
    }

    #[test]
    fn valid_create_reaches_backend() {
        let v = validator();
        let mut g = Gallery::new(1, "Trip");
        v.create(&mut g).unwrap();
        assert_eq!(g.id(), 1);
        assert_eq!(
            v.inner().get_operations(),
            vec![RecordedOp::Create {
                user_id: 1,
                title: "Trip".into()
            }]
        );
    }

    #[test]
    fn update_runs_same_checks() {
        let v = validator();
        let mut g = Gallery::new(1, "Trip");
        v.create(&mut g).unwrap();

        g.title.clear();
        assert!(matches!(v.update(&mut g), Err(GalleryError::TitleRequired)));
        g.user_id = 0;
        assert!(matches!(v.update(&mut g), Err(GalleryError::UserIdRequired)));
        assert_eq!(v.inner().get_operations().len(), 1);
    }

    #[test]
    fn delete_zero_id_issues_no_store_call() {
        let v = validator();
        assert!(matches!(v.delete(0), Err(GalleryError::InvalidId)));
        assert!(v.inner().get_operations().is_empty());
    }

    #[test]
    fn delete_non_zero_id_delegates_without_existence_check() {
        let v = validator();
        v.delete(99).unwrap();
        assert_eq!(v.inner().get_operations(), vec![RecordedOp::Delete(99)]);
    }

    #[test]
    fn reads_pass_through() {
        let v = validator();
        assert!(matches!(v.by_id(5), Err(GalleryError::NotFound)));
        assert!(v.by_user_id(5).unwrap().is_empty());
        assert_eq!(
            v.inner().get_operations(),
            vec![RecordedOp::ById(5), RecordedOp::ByUserId(5)]
        );
    }

    #[test]
    fn run_val_fns_stops_at_first_failure() {
        fn always_fails(_: &Gallery) -> Result<(), GalleryError> {
            Err(GalleryError::InvalidId)
        }
        fn never_reached(_: &Gallery) -> Result<(), GalleryError> {
            panic!("check after a failure must not run");
        }
        let g = Gallery::new(1, "Trip");
        let result = run_gallery_val_fns(&g, &[always_fails, never_reached]);
        assert!(matches!(result, Err(GalleryError::InvalidId)));
    }

    #[test]
    fn empty_check_list_passes() {
        assert!(run_gallery_val_fns(&Gallery::default(), &[]).is_ok());
    }
}
