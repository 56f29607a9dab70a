//! In-process user registry for HTTP Basic authentication.
//!
//! Passwords are held as SHA-256 hexadecimal hashes, never plaintext. The
//! registry is built once at startup from configuration and is read-only
//! afterwards, so it needs no locking.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use cashcard_core::{Principal, Role};

/// Hash a password with SHA-256 for storage and comparison.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

#[derive(Debug, Clone)]
struct UserEntry {
    password_hash: String,
    role: Role,
}

/// Registry of known users, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: HashMap<String, UserEntry>,
}

impl UserRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. A later registration under the same name wins.
    pub fn add_user(&mut self, name: impl Into<String>, password: &str, role: Role) {
        self.users.insert(
            name.into(),
            UserEntry {
                password_hash: hash_password(password),
                role,
            },
        );
    }

    /// Verify a name/password pair and return the matching [`Principal`].
    ///
    /// Returns `None` for unknown users and wrong passwords alike.
    #[must_use]
    pub fn verify(&self, name: &str, password: &str) -> Option<Principal> {
        let entry = self.users.get(name)?;
        if entry.password_hash != hash_password(password) {
            return None;
        }
        Some(Principal {
            name: name.to_owned(),
            role: entry.role,
        })
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
