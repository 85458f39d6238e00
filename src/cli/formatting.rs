//! Display formatting for the decode summary output.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::changeset::{ChangeSet, EditType};

/// Number of hex characters shown for abbreviated commit hashes.
pub(crate) const SHORT_HASH_LEN: usize = 8;

/// Truncates a commit hash to [`SHORT_HASH_LEN`] characters.
pub(crate) fn truncate_hash(hash: &str) -> &str {
    if hash.len() > SHORT_HASH_LEN {
        &hash[..SHORT_HASH_LEN]
    } else {
        hash
    }
}

fn action_color(action: EditType) -> Color {
    match action {
        EditType::Add => Color::Green,
        EditType::Delete => Color::Red,
        EditType::Edit => Color::Yellow,
    }
}

fn action_marker(action: EditType) -> &'static str {
    match action {
        EditType::Add => "A",
        EditType::Delete => "D",
        EditType::Edit => "M",
    }
}

/// Prints a per-commit summary with colored file actions.
pub(crate) fn print_summary(entries: &[Arc<ChangeSet>]) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    for changeset in entries {
        let hash = changeset.id().map_or("????????", truncate_hash);
        let name = changeset.display_name().unwrap_or("(unknown)");
        let date = changeset.date().unwrap_or("(no date)");
        writeln!(stdout, "{hash} {date} {name}: {}", changeset.title())?;

        for change in changeset.paths() {
            stdout.set_color(ColorSpec::new().set_fg(Some(action_color(change.action()))))?;
            write!(stdout, "  {}", action_marker(change.action()))?;
            stdout.reset()?;
            writeln!(stdout, " {}", change.path())?;
        }
    }

    Ok(())
}
