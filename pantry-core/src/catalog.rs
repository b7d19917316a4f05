//! The closed vocabulary of ingredient names.
//!
//! Catalog records are product listings; only the `name` field matters here.
//! Every other component asks this index whether a name is allowed and never
//! introduces names of its own.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::CatalogError;

/// A single catalog record. Fields other than `name` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: Option<String>,
}

impl CatalogEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Lower-cased, trimmed form used for every membership comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Deduplicated, normalized ingredient names, iterated in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedNameSet {
    names: BTreeSet<String>,
}

impl AllowedNameSet {
    /// Build the allowed set from catalog records.
    ///
    /// Records whose name is missing or blank are skipped. Fails when there
    /// are no records at all, or when none of them has a usable name.
    pub fn load(records: &[CatalogEntry]) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let names: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.name.as_deref())
            .map(normalize_name)
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return Err(CatalogError::NoUsableNames {
                records: records.len(),
            });
        }

        tracing::info!(
            records = records.len(),
            distinct_names = names.len(),
            "Loaded ingredient catalog"
        );

        Ok(Self { names })
    }

    /// Convenience constructor from bare names.
    pub fn from_names<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records: Vec<CatalogEntry> = names.into_iter().map(CatalogEntry::named).collect();
        Self::load(&records)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    /// The catalog's own spelling of `name`, if it is a member.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.names.get(&normalize_name(name)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
