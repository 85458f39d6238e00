//! Identity-directory boundary.
//!
//! Resolving a commit identity to a persistent account record lives
//! outside the decoder. This module defines the capability callers
//! inject ([`UserDirectory`]) and the resolution policy applied on top
//! of it ([`find_or_create_user`]); nothing here reaches for global
//! state.

use std::collections::HashMap;

/// Account id of the well-known fallback returned for nameless identities.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// A persistent account record held by a [`UserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Directory key for the account.
    pub id: String,
    /// Human display name, when one has been recorded.
    pub full_name: Option<String>,
    /// Contact address on file, when one has been recorded.
    pub email: Option<String>,
}

/// Directory of persistent user accounts.
pub trait UserDirectory {
    /// Looks up an existing account by directory key.
    fn lookup(&self, key: &str) -> Option<UserRecord>;

    /// Creates the account for the key, or returns the existing one.
    fn create(&mut self, key: &str) -> UserRecord;

    /// Records the account's display name.
    fn set_display_name(&mut self, key: &str, name: &str);

    /// True when the account already has a contact address on file.
    fn has_contact_email(&self, key: &str) -> bool;

    /// Attaches a contact address to the account.
    fn attach_contact_email(&mut self, key: &str, email: &str);

    /// The well-known account returned for identities with no name.
    fn unknown_user(&self) -> UserRecord {
        UserRecord {
            id: UNKNOWN_USER_ID.to_string(),
            full_name: None,
            email: None,
        }
    }
}

/// Resolves (or lazily creates) the account behind a commit identity.
///
/// * A missing name short-circuits to the directory's unknown-user
///   account.
/// * With `create_by_email`, the account is keyed by the email address
///   and gets the display name on first creation.
/// * Otherwise the account is keyed by name, falling back to creating
///   one keyed by the email's local part.
/// * An email on the identity is attached to the resolved account when
///   the account has no contact address on file yet.
pub fn find_or_create_user<D: UserDirectory + ?Sized>(
    directory: &mut D,
    name: Option<&str>,
    email: &str,
    create_by_email: bool,
) -> UserRecord {
    let Some(name) = name else {
        return directory.unknown_user();
    };

    let record = if create_by_email {
        if let Some(existing) = directory.lookup(email) {
            existing
        } else {
            let created = directory.create(email);
            directory.set_display_name(&created.id, name);
            created
        }
    } else if let Some(existing) = directory.lookup(name) {
        existing
    } else {
        let local_part = email.split('@').next().unwrap_or(email);
        directory.create(local_part)
    };

    if !email.is_empty() && !directory.has_contact_email(&record.id) {
        directory.attach_contact_email(&record.id, email);
    }

    // re-read so name/email mutations above are reflected
    directory.lookup(&record.id).unwrap_or(record)
}

/// Map-backed [`UserDirectory`], usable as-is or as a test double.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: HashMap<String, UserRecord>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts in the directory.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True when the directory holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl UserDirectory for InMemoryDirectory {
    fn lookup(&self, key: &str) -> Option<UserRecord> {
        self.accounts.get(key).cloned()
    }

    fn create(&mut self, key: &str) -> UserRecord {
        self.accounts
            .entry(key.to_string())
            .or_insert_with(|| UserRecord {
                id: key.to_string(),
                full_name: None,
                email: None,
            })
            .clone()
    }

    fn set_display_name(&mut self, key: &str, name: &str) {
        if let Some(account) = self.accounts.get_mut(key) {
            account.full_name = Some(name.to_string());
        }
    }

    fn has_contact_email(&self, key: &str) -> bool {
        self.accounts.get(key).is_some_and(|a| a.email.is_some())
    }

    fn attach_contact_email(&mut self, key: &str, email: &str) {
        if let Some(account) = self.accounts.get_mut(key) {
            account.email = Some(email.to_string());
        }
    }
}
