//! Route-keyed view catalog.

use std::collections::btree_map::{self, BTreeMap};

use crate::view::ViewDescriptor;

/// Mapping from route key to exactly one view.
///
/// Keys are kept sorted so that iteration, and therefore the emitted JSON,
/// is identical for identical inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<String, ViewDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a view, returning the view previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, view: ViewDescriptor) -> Option<ViewDescriptor> {
        self.entries.insert(key.into(), view)
    }

    pub fn get(&self, key: &str) -> Option<&ViewDescriptor> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ViewDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Catalog {
    type Item = (String, ViewDescriptor);
    type IntoIter = btree_map::IntoIter<String, ViewDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a ViewDescriptor);
    type IntoIter = btree_map::Iter<'a, String, ViewDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ViewDescriptor)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, ViewDescriptor)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
