//! Identity line parsing (`author ` / `committer ` payloads).

use std::sync::LazyLock;

use regex::Regex;

use super::{timestamp, Identity};

/// `<name> <email-in-angle-brackets> <epoch> <tz>`. The email group is
/// greedy, so the split lands on the last `"> "` of the payload.
static IDENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^([^<]*)<(.*)> (.*)$").unwrap());

/// Parses the text after the `author `/`committer ` prefix.
///
/// A payload that does not match the grammar yields a fully unset
/// identity; a matching payload with a malformed trailing timestamp
/// yields name and email with the date unset.
pub(crate) fn parse(input: &str) -> Identity {
    let Some(caps) = IDENTITY_PATTERN.captures(input) else {
        return Identity::default();
    };

    Identity {
        name: Some(caps[1].trim().to_string()),
        email: Some(caps[2].to_string()),
        date: timestamp::normalize(&caps[3]),
    }
}
