//! Change-set decoding for git raw-log output.
//!
//! A raw-log block is the per-commit text segment produced by
//! `git whatchanged --raw`: header lines (`commit`, `tree`, `parent`,
//! `author`, `committer`), a four-space-indented free-text message, and
//! raw diff-tree file entries. [`ChangeSet::parse`] decodes one block;
//! [`ChangeLog::parse`] decodes a whole stream of them.
//!
//! Decoding is best-effort and total: malformed lines are dropped, the
//! fields they would have populated stay unset, and no input can make
//! construction fail.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use tracing::trace;

pub mod classify;
pub mod timestamp;

mod filechange;
mod identity;
mod log;

pub use self::log::ChangeLog;

use self::classify::{classify, LineKind};
use crate::user::{self, UserDirectory, UserRecord};

/// Three-way classification of a file change.
///
/// Every underlying diff-tree action collapses into one of these: renames
/// become a delete plus an add, copies become an add, and everything that
/// is not a creation or a removal is an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// Content now exists at the path.
    Add,
    /// Content no longer exists at the path.
    Delete,
    /// Content at the path changed in place.
    Edit,
}

impl EditType {
    /// Lower-case label used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            EditType::Add => "add",
            EditType::Delete => "delete",
            EditType::Edit => "edit",
        }
    }
}

impl fmt::Display for EditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file change within a commit.
///
/// A blob hash is absent when the corresponding side of the change does
/// not exist (the raw entry carried the all-zero sentinel hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    src: Option<String>,
    dst: Option<String>,
    action: EditType,
    path: String,
}

impl FileChange {
    pub(crate) fn new(
        src: Option<String>,
        dst: Option<String>,
        action: EditType,
        path: impl Into<String>,
    ) -> Self {
        FileChange {
            src,
            dst,
            action,
            path: path.into(),
        }
    }

    /// Source-side blob hash, absent for newly created content.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Destination-side blob hash, absent for deleted content.
    pub fn dst(&self) -> Option<&str> {
        self.dst.as_deref()
    }

    /// Add / delete / edit classification.
    pub fn action(&self) -> EditType {
        self.action
    }

    /// Path the change applies to.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Author or committer identity with a normalized timestamp.
///
/// Any subset of the fields may be unset when the identity line was
/// missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) date: Option<String>,
}

impl Identity {
    /// Display name, trimmed of surrounding whitespace.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email address as written in the block.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Normalized date string (see [`timestamp::normalize`]).
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// An immutable change record decoded from one commit's raw-log block.
#[derive(Debug)]
pub struct ChangeSet {
    id: Option<String>,
    parent_commit: Option<String>,
    author: Identity,
    committer: Identity,
    prefer_author: bool,
    comment: String,
    title: String,
    paths: Vec<FileChange>,
    collection: OnceLock<Weak<ChangeLog>>,
}

impl ChangeSet {
    /// Decodes one commit's raw-log block.
    ///
    /// `prefer_author` fixes, for the lifetime of the change set, whether
    /// the author or the committer identity is the one used for display.
    ///
    /// Construction is total: malformed lines are dropped, the fields they
    /// would have populated stay unset, and the worst possible input still
    /// yields a (sparsely populated) change set.
    pub fn parse<I, S>(lines: I, prefer_author: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut id = None;
        let mut parent_commit = None;
        let mut author = Identity::default();
        let mut committer = Identity::default();
        let mut message = String::new();
        // Keyed by path so duplicates collapse and iteration comes out in
        // lexicographic path order. First seen wins: a later entry for the
        // same path is discarded.
        let mut paths: BTreeMap<String, FileChange> = BTreeMap::new();

        for line in lines {
            let line = line.as_ref();
            match classify(line) {
                LineKind::Blank | LineKind::Ignored => {}
                LineKind::Commit(hash) => id = Some(hash.to_string()),
                // A merge commit carries several parent lines; only the
                // last one survives.
                LineKind::Parent(hash) => parent_commit = Some(hash.to_string()),
                LineKind::Committer(rest) => committer = identity::parse(rest),
                LineKind::Author(rest) => author = identity::parse(rest),
                LineKind::Message(text) => {
                    message.push_str(text);
                    message.push('\n');
                }
                LineKind::FileEntry(raw) => {
                    for change in filechange::decode(raw) {
                        paths.entry(change.path.clone()).or_insert(change);
                    }
                }
                LineKind::Other => trace!(line, "discarding unrecognized line"),
            }
        }

        let title = match message.find('\n') {
            Some(end) => message[..end].to_string(),
            None => message.clone(),
        };

        ChangeSet {
            id,
            parent_commit,
            author,
            committer,
            prefer_author,
            comment: message,
            title,
            paths: paths.into_values().collect(),
            collection: OnceLock::new(),
        }
    }

    /// Commit hash, absent when the block never contained a `commit` line.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Last-seen parent commit hash.
    ///
    /// A merge commit's earlier `parent` lines are overwritten; only the
    /// final one is retained.
    pub fn parent_commit(&self) -> Option<&str> {
        self.parent_commit.as_deref()
    }

    /// Author identity as written in the block.
    pub fn author(&self) -> &Identity {
        &self.author
    }

    /// Committer identity as written in the block.
    pub fn committer(&self) -> &Identity {
        &self.committer
    }

    /// Whether the author (rather than the committer) identity was selected
    /// for display at construction time.
    pub fn prefers_author(&self) -> bool {
        self.prefer_author
    }

    /// The identity selected for display.
    pub fn display_identity(&self) -> &Identity {
        if self.prefer_author {
            &self.author
        } else {
            &self.committer
        }
    }

    /// Display name of the selected identity.
    pub fn display_name(&self) -> Option<&str> {
        self.display_identity().name()
    }

    /// Email address of the selected identity.
    pub fn display_email(&self) -> Option<&str> {
        self.display_identity().email()
    }

    /// Normalized date string of the selected identity.
    pub fn date(&self) -> Option<&str> {
        self.display_identity().date()
    }

    /// Epoch milliseconds re-parsed from the normalized date string.
    ///
    /// Returns [`timestamp::EPOCH_MILLIS_SENTINEL`] when the date is absent
    /// or does not re-parse; this accessor never fails.
    pub fn timestamp_millis(&self) -> i64 {
        self.date()
            .and_then(|date| timestamp::epoch_millis(date).ok())
            .unwrap_or(timestamp::EPOCH_MILLIS_SENTINEL)
    }

    /// Full commit message; every original message line is
    /// newline-terminated, with the four-space indent stripped.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// First line of the message (always a prefix of
    /// [`comment`](Self::comment)).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File changes ordered by path, one entry per path (first seen wins).
    pub fn paths(&self) -> &[FileChange] {
        &self.paths
    }

    /// Paths touched by this commit, in path order.
    pub fn affected_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.iter().map(FileChange::path)
    }

    /// Resolves the display identity against an injected user directory.
    ///
    /// A nameless identity resolves to the directory's unknown-user
    /// account, the same degrade-don't-fail posture as the rest of the
    /// decoder.
    pub fn resolve_display_user<D: UserDirectory + ?Sized>(
        &self,
        directory: &mut D,
        create_by_email: bool,
    ) -> UserRecord {
        let identity = self.display_identity();
        user::find_or_create_user(
            directory,
            identity.name(),
            identity.email().unwrap_or(""),
            create_by_email,
        )
    }

    /// Publishes the owning collection backlink.
    ///
    /// This is the only post-construction mutation a change set admits.
    /// The first call wins; later calls are ignored.
    pub fn attach_collection(&self, collection: Weak<ChangeLog>) {
        let _ = self.collection.set(collection);
    }

    /// The collection this change set was published into, when still alive.
    pub fn collection(&self) -> Option<Arc<ChangeLog>> {
        self.collection.get().and_then(Weak::upgrade)
    }
}

/// Change sets with ids compare by id; a change set without an id is equal
/// only to itself.
impl PartialEq for ChangeSet {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ChangeSet {}

impl Hash for ChangeSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.id {
            Some(id) => id.hash(state),
            // identity hash, mirroring the reference-identity equality
            None => std::ptr::from_ref(self).hash(state),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const COMMIT_HASH: &str = "4a31a6bd2bf7e6e5c5e8dbfbfd9d2b76cb2a3f36";
    const PARENT_HASH: &str = "1b2d1c8f3a6a0f3e4d5c6b7a8998a7b6c5d4e3f2";

    fn blob(c: char) -> String {
        std::iter::repeat(c).take(40).collect()
    }

    fn sample_block() -> Vec<String> {
        vec![
            format!("commit {COMMIT_HASH}"),
            "tree 9c6bf66b6b6b0f3e4d5c6b7a8998a7b6c5d4e3f2".to_string(),
            format!("parent {PARENT_HASH}"),
            "author Jane Doe <jane@example.com> 0 +0000".to_string(),
            "committer Joe Bloggs <joe@example.com> 0 +0000".to_string(),
            String::new(),
            "    Fix the widget".to_string(),
        ]
    }

    #[test]
    fn well_formed_block_populates_everything() {
        let changeset = ChangeSet::parse(sample_block(), true);

        assert_eq!(changeset.id(), Some(COMMIT_HASH));
        assert_eq!(changeset.parent_commit(), Some(PARENT_HASH));
        assert_eq!(changeset.author().name(), Some("Jane Doe"));
        assert_eq!(changeset.author().email(), Some("jane@example.com"));
        assert_eq!(changeset.committer().name(), Some("Joe Bloggs"));
        assert_eq!(changeset.title(), "Fix the widget");
        assert_eq!(changeset.comment(), "Fix the widget\n");
        assert!(changeset.paths().is_empty());
    }

    #[test]
    fn empty_input_yields_unset_changeset() {
        let changeset = ChangeSet::parse(Vec::<String>::new(), true);

        assert_eq!(changeset.id(), None);
        assert_eq!(changeset.parent_commit(), None);
        assert_eq!(changeset.author().name(), None);
        assert_eq!(changeset.comment(), "");
        assert_eq!(changeset.title(), "");
        assert!(changeset.paths().is_empty());
        assert_eq!(changeset.timestamp_millis(), timestamp::EPOCH_MILLIS_SENTINEL);
    }

    #[test]
    fn title_is_first_line_of_multiline_message() {
        let lines = vec![
            "    Fix the widget",
            "    ",
            "    The widget was broken because of reasons.",
        ];
        let changeset = ChangeSet::parse(lines, true);

        assert_eq!(changeset.title(), "Fix the widget");
        assert_eq!(
            changeset.comment(),
            "Fix the widget\n\nThe widget was broken because of reasons.\n"
        );
        assert!(changeset.comment().starts_with(changeset.title()));
    }

    #[test]
    fn blank_lines_are_not_message_separators() {
        // A zero-length line is skipped outright; a four-space line appends
        // an empty message line.
        let changeset = ChangeSet::parse(vec!["    first", "", "    third"], true);
        assert_eq!(changeset.comment(), "first\nthird\n");
    }

    #[test]
    fn paths_come_out_in_path_order() {
        let lines = vec![
            format!(":100644 100644 {} {} M\tz.txt", blob('a'), blob('b')),
            format!(":100644 100644 {} {} M\ta.txt", blob('c'), blob('d')),
        ];
        let changeset = ChangeSet::parse(lines, true);

        let paths: Vec<&str> = changeset.affected_paths().collect();
        assert_eq!(paths, vec!["a.txt", "z.txt"]);
    }

    #[test]
    fn duplicate_paths_collapse_first_seen_wins() {
        let lines = vec![
            format!(":100644 000000 {} {} D\tsame.txt", blob('a'), blob('0')),
            format!(":100644 100644 {} {} M\tsame.txt", blob('a'), blob('b')),
        ];
        let changeset = ChangeSet::parse(lines, true);

        assert_eq!(changeset.paths().len(), 1);
        assert_eq!(changeset.paths()[0].action(), EditType::Delete);
    }

    #[test]
    fn rename_expands_to_delete_plus_add() {
        let line = format!(
            ":100644 100644 {} {} R100\told/a.txt\tnew/a.txt",
            blob('a'),
            blob('b')
        );
        let changeset = ChangeSet::parse(vec![line], true);

        assert_eq!(changeset.paths().len(), 2);
        let new = &changeset.paths()[0];
        let old = &changeset.paths()[1];
        assert_eq!(new.path(), "new/a.txt");
        assert_eq!(new.action(), EditType::Add);
        assert_eq!(old.path(), "old/a.txt");
        assert_eq!(old.action(), EditType::Delete);
        assert_eq!(new.src(), Some(blob('a').as_str()));
        assert_eq!(new.dst(), Some(blob('b').as_str()));
        assert_eq!(old.src(), Some(blob('a').as_str()));
        assert_eq!(old.dst(), Some(blob('b').as_str()));
    }

    #[test]
    fn multi_parent_keeps_the_last_one() {
        let first = format!("parent {PARENT_HASH}");
        let second = format!("parent {}", blob('f'));
        let changeset = ChangeSet::parse(vec![first, second], true);

        assert_eq!(changeset.parent_commit(), Some(blob('f').as_str()));
    }

    #[test]
    fn equality_follows_commit_id() {
        let a = ChangeSet::parse(sample_block(), true);
        let b = ChangeSet::parse(sample_block(), true);
        assert_eq!(a, b);

        let no_id_a = ChangeSet::parse(vec!["    message only"], true);
        let no_id_b = ChangeSet::parse(vec!["    message only"], true);
        assert_ne!(no_id_a, no_id_b);
        let same_instance = &no_id_a;
        assert_eq!(&no_id_a, same_instance);
        assert_ne!(a, no_id_a);
    }

    #[test]
    fn display_identity_selection_is_fixed_at_construction() {
        let lines = vec![
            "author Jane Doe <jane@example.com> 0 +0000".to_string(),
            "committer Joe Bloggs <joe@example.com> 86400 +0000".to_string(),
        ];

        let by_author = ChangeSet::parse(lines.clone(), true);
        assert!(by_author.prefers_author());
        assert_eq!(by_author.display_name(), Some("Jane Doe"));
        assert_eq!(by_author.date(), Some("1970-01-01T00:00:00+0000"));
        assert_eq!(by_author.timestamp_millis(), 0);

        let by_committer = ChangeSet::parse(lines, false);
        assert_eq!(by_committer.display_name(), Some("Joe Bloggs"));
        assert_eq!(by_committer.date(), Some("1970-01-02T00:00:00+0000"));
        assert_eq!(by_committer.timestamp_millis(), 86_400_000);
    }

    #[test]
    fn timestamp_sentinel_when_identity_is_malformed() {
        let changeset = ChangeSet::parse(vec!["author not an identity line"], true);
        assert_eq!(changeset.display_name(), None);
        assert_eq!(changeset.timestamp_millis(), timestamp::EPOCH_MILLIS_SENTINEL);
    }

    #[test]
    fn display_user_resolves_through_the_injected_directory() {
        use crate::user::{InMemoryDirectory, UNKNOWN_USER_ID};

        let mut directory = InMemoryDirectory::new();
        let changeset = ChangeSet::parse(sample_block(), true);
        let user = changeset.resolve_display_user(&mut directory, true);

        assert_eq!(user.id, "jane@example.com");
        assert_eq!(user.full_name.as_deref(), Some("Jane Doe"));

        let nameless = ChangeSet::parse(Vec::<String>::new(), true);
        let user = nameless.resolve_display_user(&mut directory, true);
        assert_eq!(user.id, UNKNOWN_USER_ID);
    }

    #[test]
    fn header_lines_missing_their_token_leave_fields_unset() {
        let changeset = ChangeSet::parse(vec!["commit ", "parent "], true);
        assert_eq!(changeset.id(), None);
        assert_eq!(changeset.parent_commit(), None);
    }
}
