//! # rawlog
//!
//! Decoder for git raw-log output (`git whatchanged --raw` style dumps)
//! into structured, immutable change sets.
//!
//! The core entry points are [`ChangeSet::parse`] for a single commit's
//! line block and [`ChangeLog::parse`] for a whole raw-log stream.
//!
//! ```rust
//! use rawlog::ChangeSet;
//!
//! let lines = [
//!     "commit 4a31a6bd2bf7e6e5c5e8dbfbfd9d2b76cb2a3f36",
//!     "author Jane Doe <jane@example.com> 1700000000 +0000",
//!     "    Fix the widget",
//! ];
//! let changeset = ChangeSet::parse(lines, true);
//! assert_eq!(changeset.title(), "Fix the widget");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod annotate;
pub mod changeset;
pub mod cli;
pub mod data;
pub mod user;

pub use crate::changeset::{ChangeLog, ChangeSet, EditType, FileChange, Identity};
pub use crate::cli::Cli;

/// The current version of rawlog.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
