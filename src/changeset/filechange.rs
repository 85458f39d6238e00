//! Raw diff-tree file entry decoding.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{EditType, FileChange};

/// Blob hash meaning "no content on that side" (creation or deletion).
pub(crate) const NULL_HASH: &str = "0000000000000000000000000000000000000000";

/// `:<src-mode> <dst-mode> <src-hash> <dst-hash> <action>[score]\t<path-field>`.
/// The numeric score after the action letter is consumed but ignored.
static FILE_ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:[0-9]{6} [0-9]{6} ([0-9a-f]{40}) ([0-9a-f]{40}) ([ACDMRTUX])[0-9]*\t(.*)$")
        .unwrap()
});

/// Decodes one raw diff-tree line into zero, one, or two file changes.
///
/// Renames expand into a delete at the old path plus an add at the new
/// path; copies collapse into a single add at the new path, with the
/// origin discarded. Malformed lines produce nothing.
pub(crate) fn decode(line: &str) -> Vec<FileChange> {
    let Some(caps) = FILE_ENTRY_PATTERN.captures(line) else {
        debug!(line, "dropping malformed file entry");
        return Vec::new();
    };

    let action = &caps[3];
    // Hash resolution only applies to content-bearing actions; type
    // changes and the unmerged/unknown markers keep no hashes.
    let (src, dst) = match action {
        "M" | "A" | "D" | "R" | "C" => (resolve_hash(&caps[1]), resolve_hash(&caps[2])),
        _ => (None, None),
    };
    let path_field = &caps[4];

    match action {
        // A rename is two operations: a delete at the old path and an add
        // at the new one, sharing the hash pair.
        "R" => match path_field.split_once('\t') {
            Some((old_path, new_path)) => vec![
                FileChange::new(src.clone(), dst.clone(), EditType::Delete, old_path),
                FileChange::new(src, dst, EditType::Add, new_path),
            ],
            None => {
                debug!(line, "dropping rename entry with unsplit path field");
                Vec::new()
            }
        },
        // A copy is just an add at the destination.
        "C" => match path_field.split_once('\t') {
            Some((_, new_path)) => vec![FileChange::new(src, dst, EditType::Add, new_path)],
            None => {
                debug!(line, "dropping copy entry with unsplit path field");
                Vec::new()
            }
        },
        "A" => vec![FileChange::new(src, dst, EditType::Add, path_field)],
        "D" => vec![FileChange::new(src, dst, EditType::Delete, path_field)],
        _ => vec![FileChange::new(src, dst, EditType::Edit, path_field)],
    }
}

fn resolve_hash(hash: &str) -> Option<String> {
    (hash != NULL_HASH).then(|| hash.to_string())
}
