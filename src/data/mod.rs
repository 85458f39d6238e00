//! Serialization views over decoded change sets.
//!
//! The core types carry non-serializable state (the collection backlink),
//! so output rendering goes through these plain-data views instead.

use serde::{Deserialize, Serialize};

use crate::changeset::{ChangeSet, FileChange, Identity};

pub mod yaml;

pub use yaml::to_yaml;

/// Serializable rendering of one decoded change set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSetView {
    /// Commit hash, omitted when the block carried no `commit` line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Last-seen parent commit hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Author identity.
    pub author: IdentityView,
    /// Committer identity.
    pub committer: IdentityView,
    /// First line of the message.
    pub title: String,
    /// Full message, newline-terminated per original message line.
    pub comment: String,
    /// File changes ordered by path.
    pub files: Vec<FileChangeView>,
}

/// Serializable rendering of an author/committer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityView {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Normalized date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Serializable rendering of one file change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChangeView {
    /// Add / delete / edit classification.
    pub action: String,
    /// Path the change applies to.
    pub path: String,
    /// Source blob hash, omitted for newly created content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Destination blob hash, omitted for deleted content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
}

impl From<&ChangeSet> for ChangeSetView {
    fn from(changeset: &ChangeSet) -> Self {
        ChangeSetView {
            commit: changeset.id().map(str::to_string),
            parent: changeset.parent_commit().map(str::to_string),
            author: changeset.author().into(),
            committer: changeset.committer().into(),
            title: changeset.title().to_string(),
            comment: changeset.comment().to_string(),
            files: changeset.paths().iter().map(FileChangeView::from).collect(),
        }
    }
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        IdentityView {
            name: identity.name().map(str::to_string),
            email: identity.email().map(str::to_string),
            date: identity.date().map(str::to_string),
        }
    }
}

impl From<&FileChange> for FileChangeView {
    fn from(change: &FileChange) -> Self {
        FileChangeView {
            action: change.action().as_str().to_string(),
            path: change.path().to_string(),
            src: change.src().map(str::to_string),
            dst: change.dst().map(str::to_string),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn blob(c: char) -> String {
        std::iter::repeat(c).take(40).collect()
    }

    #[test]
    fn view_mirrors_the_changeset() {
        let lines = vec![
            format!("commit {}", blob('c')),
            "author Jane Doe <jane@example.com> 0 +0000".to_string(),
            "    Fix the widget".to_string(),
            format!(":000000 100644 {} {} A\tnew.txt", blob('0'), blob('b')),
        ];
        let changeset = ChangeSet::parse(lines, true);
        let view = ChangeSetView::from(&changeset);

        assert_eq!(view.commit.as_deref(), Some(blob('c').as_str()));
        assert_eq!(view.title, "Fix the widget");
        assert_eq!(view.files.len(), 1);
        assert_eq!(view.files[0].action, "add");
        assert_eq!(view.files[0].src, None);
        assert_eq!(view.files[0].dst.as_deref(), Some(blob('b').as_str()));
    }

    #[test]
    fn unset_fields_are_omitted_from_yaml() {
        let changeset = ChangeSet::parse(vec!["    orphan message"], true);
        let rendered = to_yaml(&ChangeSetView::from(&changeset)).unwrap();

        assert!(!rendered.contains("commit:"));
        assert!(!rendered.contains("parent:"));
        assert!(rendered.contains("orphan message"));
    }
}
