//! Dotenv-style profile files.
//!
//! A profile is a `KEY=value` file whose keys are matched case-insensitively
//! against the upper-cased field names. Loading never touches the process
//! environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::fields::Field;

/// Field values read from a profile file.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl Profile {
    /// A profile with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a profile file.
    ///
    /// A missing, unreadable or malformed file is logged and yields a profile
    /// that still remembers its path but has no entries.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let values = match read_entries(path) {
            Ok(values) => {
                tracing::debug!(path = %path.display(), entries = values.len(), "Loaded profile");
                values
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Error loading profile, continuing without it");
                HashMap::new()
            }
        };

        Self {
            path: Some(path.to_path_buf()),
            values,
        }
    }

    /// Build a profile from in-memory entries.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            path: None,
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Path the profile was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Non-empty value for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field.env_key())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn read_entries(path: &Path) -> dotenvy::Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for entry in dotenvy::from_path_iter(path)? {
        let (key, value) = entry?;
        values.insert(key.to_uppercase(), value);
    }
    Ok(values)
}
