//! Comment-annotation boundary.
//!
//! Marked-up rendering of commit messages is host-surface work; the
//! decoder only exposes the raw comment plus the seam annotation passes
//! plug into. Annotators are injected, never discovered through a
//! registry.

use crate::changeset::ChangeSet;

/// One text-annotation pass over a change set's comment.
pub trait CommentAnnotator {
    /// Returns the annotated rendering of `comment`.
    ///
    /// The change set is available for context (id, paths, identities).
    /// Passes run in registration order, each seeing the previous output.
    fn annotate(&self, changeset: &ChangeSet, comment: String) -> String;
}

/// Applies every annotator, in order, to the raw comment.
pub fn annotated_comment(
    changeset: &ChangeSet,
    annotators: &[Box<dyn CommentAnnotator>],
) -> String {
    annotators
        .iter()
        .fold(changeset.comment().to_string(), |text, annotator| {
            annotator.annotate(changeset, text)
        })
}
