//! Multi-commit raw-log streams.

use std::sync::{Arc, Weak};

use super::ChangeSet;

/// An ordered collection of change sets decoded from one raw-log stream.
///
/// Each entry's collection backlink is published exactly once, before the
/// log is handed out, so unsynchronized concurrent readers always observe
/// it set.
#[derive(Debug)]
pub struct ChangeLog {
    entries: Vec<Arc<ChangeSet>>,
}

impl ChangeLog {
    /// Splits a raw-log stream into per-commit blocks (each starting at a
    /// `commit ` header) and decodes every block independently.
    ///
    /// Lines before the first `commit ` header are discarded.
    pub fn parse(text: &str, prefer_author: bool) -> Arc<Self> {
        let blocks = split_blocks(text);
        Arc::new_cyclic(|log| {
            let entries = blocks
                .into_iter()
                .map(|block| {
                    let changeset = Arc::new(ChangeSet::parse(block, prefer_author));
                    changeset.attach_collection(Weak::clone(log));
                    changeset
                })
                .collect();
            ChangeLog { entries }
        })
    }

    /// Decoded change sets in stream order.
    pub fn entries(&self) -> &[Arc<ChangeSet>] {
        &self.entries
    }

    /// True when the stream contained no commit blocks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of commit blocks in the stream.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Groups lines into per-commit blocks, starting a new block at every
/// `commit ` header.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        if line.starts_with("commit ") {
            blocks.push(Vec::new());
        }
        if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }
    blocks
}
