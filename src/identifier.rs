// src/identifier.rs

//! Canonical task identifiers.
//!
//! A task is referenced by a `path` (relative to the project root) and a
//! `name`. Everywhere in the crate, identity is decided by the canonical
//! string form:
//!
//! - `//{path}:{name}` in general
//! - `//:{name}` when the task lives at the project root (`path == "."`)
//!
//! `Eq`, `Hash` and `Ord` all go through that string, so two identifiers
//! that print the same are the same node.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::ExplorerError;

const ROOT_PATH: &str = ".";

/// `{path, name}` exactly as the engine sends it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawIdentifier {
    pub path: String,
    pub name: String,
}

impl RawIdentifier {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawIdentifier")]
pub struct Identifier {
    path: String,
    name: String,
    canonical: String,
}

impl Identifier {
    /// Build an identifier from its parts. Never fails; odd input is kept
    /// as-is and simply shows up in the canonical string.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        let name = name.into();
        let canonical = canonical_form(&path, &name);
        Self {
            path,
            name,
            canonical,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical string used as the identity key.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

fn canonical_form(path: &str, name: &str) -> String {
    if path == ROOT_PATH || path.is_empty() {
        format!("//:{name}")
    } else {
        format!("//{path}:{name}")
    }
}

impl From<RawIdentifier> for Identifier {
    fn from(raw: RawIdentifier) -> Self {
        Identifier::new(raw.path, raw.name)
    }
}

impl From<&RawIdentifier> for Identifier {
    fn from(raw: &RawIdentifier) -> Self {
        Identifier::new(raw.path.clone(), raw.name.clone())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

/// Parse a canonical string (`//a/b:c` or `//:c`) back into an identifier.
impl FromStr for Identifier {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExplorerError::InvalidIdentifier(s.to_string());

        let rest = s.strip_prefix("//").ok_or_else(invalid)?;
        let (path, name) = rest.rsplit_once(':').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }

        let path = if path.is_empty() { ROOT_PATH } else { path };
        Ok(Identifier::new(path, name))
    }
}
