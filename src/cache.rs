// src/cache.rs
// =============================================================================
// The star list cache: data model plus reading and writing the JSON file.
//
// In memory every list is an ordered Vec of Repo records, so an identifier
// and its description can never drift apart. On disk we keep the layout the
// cache has always had, two parallel arrays per list:
//
//   {
//       "rust": {
//           "href": ["tokio-rs/tokio", "serde-rs/serde"],
//           "description": ["A runtime for ...", "Serialization ..."]
//       }
//   }
//
// The conversion between the two shapes happens only in this file.
//
// Rust concepts:
// - Custom Serialize/Deserialize impls: to keep list order without a map type
// - thiserror-based CacheError: so main can tell "missing" from "broken"
// =============================================================================

use crate::error::CacheError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Placeholder used when a repository has no description on its card.
pub const NO_DESCRIPTION: &str = "No description available";

/// One starred repository inside a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// `owner/name`, e.g. `tokio-rs/tokio`
    pub id: String,
    pub description: String,
}

impl Repo {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Repo {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Directory name for an identifier: everything after the final `/`,
/// which is also where `git clone` puts it.
pub fn repo_basename(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// A named, user-curated star list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarList {
    pub name: String,
    pub repos: Vec<Repo>,
}

/// All star lists of one user, in the order GitHub shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarLists {
    lists: Vec<StarList>,
}

impl StarLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a list. A list with the same name is replaced in place, so
    /// names stay unique and keep their first position.
    pub fn insert(&mut self, name: impl Into<String>, repos: Vec<Repo>) {
        let name = name.into();
        match self.lists.iter_mut().find(|l| l.name == name) {
            Some(existing) => existing.repos = repos,
            None => self.lists.push(StarList { name, repos }),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&StarList> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StarList> {
        self.lists.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().map(|l| l.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Total number of repo entries across all lists (duplicates included).
    pub fn repo_count(&self) -> usize {
        self.lists.iter().map(|l| l.repos.len()).sum()
    }
}

// On-disk shape of one list: two index-aligned arrays.
#[derive(Serialize, Deserialize)]
struct ListRecord {
    #[serde(default)]
    href: Vec<String>,
    #[serde(default)]
    description: Vec<String>,
}

impl From<&StarList> for ListRecord {
    fn from(list: &StarList) -> Self {
        let (href, description): (Vec<String>, Vec<String>) = list
            .repos
            .iter()
            .map(|r| (r.id.clone(), r.description.clone()))
            .unzip();
        ListRecord { href, description }
    }
}

impl ListRecord {
    fn into_repos(self, list_name: &str) -> Vec<Repo> {
        if self.href.len() != self.description.len() {
            warn!(
                list = list_name,
                hrefs = self.href.len(),
                descriptions = self.description.len(),
                "href/description length mismatch, extra entries dropped"
            );
        }
        self.href
            .into_iter()
            .zip(self.description)
            .map(|(id, description)| Repo { id, description })
            .collect()
    }
}

impl Serialize for StarLists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lists.len()))?;
        for list in &self.lists {
            map.serialize_entry(&list.name, &ListRecord::from(list))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StarLists {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StarListsVisitor;

        impl<'de> Visitor<'de> for StarListsVisitor {
            type Value = StarLists;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping list names to {href, description}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StarLists, A::Error> {
                let mut lists = StarLists::new();
                while let Some((name, record)) = access.next_entry::<String, ListRecord>()? {
                    let repos = record.into_repos(&name);
                    lists.insert(name, repos);
                }
                Ok(lists)
            }
        }

        deserializer.deserialize_map(StarListsVisitor)
    }
}

/// Reads the cache file.
///
/// Fails with [`CacheError::NotFound`] when the file does not exist and with
/// [`CacheError::Malformed`] when it is not parseable. No further schema
/// checks are made.
pub fn read_cache(path: &Path) -> Result<StarLists, CacheError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            CacheError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CacheError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let lists: StarLists =
        serde_json::from_str(&content).map_err(|source| CacheError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        lists = lists.len(),
        repos = lists.repo_count(),
        "cache loaded"
    );
    Ok(lists)
}

/// Writes the cache file, replacing whatever was there.
///
/// The parent directory is created if needed. Output uses 4-space
/// indentation and keeps list order.
pub fn write_cache(path: &Path, lists: &StarLists) -> Result<(), CacheError> {
    let io_err = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    lists
        .serialize(&mut ser)
        .map_err(|e| io_err(std::io::Error::other(e)))?;

    fs::write(path, buf).map_err(io_err)?;
    debug!(path = %path.display(), lists = lists.len(), "cache written");
    Ok(())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not a HashMap<String, Vec<Repo>>?
//    - HashMap iteration order is random, and the picker should show lists
//      in the order GitHub does
//    - A Vec plus a name lookup is plenty for a few dozen lists
//
// 2. Why does insert() replace instead of push?
//    - List names are keys in the JSON object, so they must be unique
//    - Replacing mirrors what a JSON object with a repeated key means
// -----------------------------------------------------------------------------
