//! Line classification for raw-log blocks.
//!
//! Each sub-grammar gets its own matcher; [`classify`] evaluates them in a
//! fixed order, first match wins. The order is load-bearing: the header
//! rules must win over the message rule, and the message rule must win
//! over the file-entry rule, so the table below is walked positionally
//! rather than dispatched on.

/// Classification of a single raw-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Zero-length line; skipped outright, not even a message separator.
    Blank,
    /// `commit <hash>` header; carries the commit id token.
    Commit(&'a str),
    /// `parent <hash>` header; carries the parent id token.
    Parent(&'a str),
    /// Recognized header with nothing to record (`tree`, or an id header
    /// missing its token).
    Ignored,
    /// `committer ` line; payload is the text after the prefix.
    Committer(&'a str),
    /// `author ` line; payload is the text after the prefix.
    Author(&'a str),
    /// Four-space-indented message line, with the indent stripped.
    Message(&'a str),
    /// Raw diff-tree file entry (leading `:`), passed through verbatim.
    FileEntry(&'a str),
    /// Unmatched line; dropped silently.
    Other,
}

type Matcher = for<'a> fn(&'a str) -> Option<LineKind<'a>>;

/// Matchers in precedence order; the first to return `Some` wins.
const MATCHERS: &[Matcher] = &[
    blank, commit, tree, parent, committer, author, message, file_entry,
];

/// Classifies one line of a raw-log block.
pub fn classify(line: &str) -> LineKind<'_> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(line))
        .unwrap_or(LineKind::Other)
}

fn blank(line: &str) -> Option<LineKind<'_>> {
    line.is_empty().then_some(LineKind::Blank)
}

fn commit(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("commit ")?;
    Some(id_token(line).map_or(LineKind::Ignored, LineKind::Commit))
}

fn tree(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("tree ").map(|_| LineKind::Ignored)
}

fn parent(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("parent ")?;
    Some(id_token(line).map_or(LineKind::Ignored, LineKind::Parent))
}

fn committer(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("committer ").map(LineKind::Committer)
}

fn author(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("author ").map(LineKind::Author)
}

fn message(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("    ").map(LineKind::Message)
}

fn file_entry(line: &str) -> Option<LineKind<'_>> {
    line.starts_with(':').then_some(LineKind::FileEntry(line))
}

/// Second whitespace-delimited token of a header line.
fn id_token(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}
