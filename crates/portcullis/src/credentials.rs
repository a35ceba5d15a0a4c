//! Credential storage: loading and lookup.
//!
//! The store is built once at engine construction from exactly one source
//! and never mutated afterwards, so it can be shared across concurrent
//! evaluations without locking.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A username/password pair, compared byte-for-byte with no normalization.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Password redacted so credentials never leak into logs.
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the credential set comes from. Exactly one source per engine.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Explicit inline list.
    List(Vec<Credential>),
    /// UTF-8 file, one `username:password` per line.
    File(PathBuf),
    /// Environment variable holding `;`-separated `username:password` pairs.
    Env(String),
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Env("BASIC_AUTH_CREDENTIALS".to_owned())
    }
}

/// Immutable username → credential map.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    entries: HashMap<String, Credential>,
}

impl CredentialStore {
    /// Loads a store from the given source.
    ///
    /// An unreadable file aborts construction. An unset environment
    /// variable yields an empty store — nobody can authenticate, but the
    /// engine still runs. Duplicate usernames resolve last-wins.
    pub fn load(source: &CredentialSource) -> Result<Self, ConfigError> {
        match source {
            CredentialSource::List(list) => Ok(Self::collect(list.iter().cloned())),
            CredentialSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::SourceUnreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(Self::parse_entries(text.lines()))
            }
            CredentialSource::Env(name) => {
                let value = std::env::var(name).unwrap_or_default();
                Ok(Self::parse_entries(value.split(';')))
            }
        }
    }

    /// Looks up the credential for a username. O(1) amortized.
    pub fn find(&self, username: &str) -> Option<&Credential> {
        self.entries.get(username)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Single-pass build, one insert per entry, last duplicate wins.
    fn collect(credentials: impl Iterator<Item = Credential>) -> Self {
        let mut entries = HashMap::new();
        for credential in credentials {
            entries.insert(credential.username.clone(), credential);
        }
        Self { entries }
    }

    fn parse_entries<'a>(raw: impl Iterator<Item = &'a str>) -> Self {
        Self::collect(raw.filter_map(parse_entry))
    }
}

/// Parses one `username:password` entry. Entries missing either part are
/// skipped silently; passwords may contain further colons.
fn parse_entry(raw: &str) -> Option<Credential> {
    let (username, password) = raw.trim().split_once(':')?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credential::new(username, password))
}
