//! Catalog merge logic
//!
//! The client catalog is the base layer. When server exposure is enabled the
//! server catalog is overlaid on it and wins every key collision.

use route_model::Catalog;

/// Rule applied when both sources provide a view for the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Server-declared views are authoritative.
    #[default]
    ServerWins,
    /// Client-declared views are kept; server views only fill gaps.
    ClientWins,
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Merged {
    Catalog(MergedCatalog),
    /// Neither source produced a view; nothing should be emitted.
    Empty,
}

impl Merged {
    pub fn into_catalog(self) -> Option<Catalog> {
        match self {
            Self::Catalog(merged) => Some(merged.catalog),
            Self::Empty => None,
        }
    }
}

/// A non-empty merged catalog, with the keys where the client entry lost.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCatalog {
    pub catalog: Catalog,
    pub overridden: Vec<String>,
}

/// Merge with [`Precedence::ServerWins`].
pub fn merge(client: Catalog, server: Catalog, expose_server: bool) -> Merged {
    merge_with(client, server, expose_server, Precedence::ServerWins)
}

/// Merge the client catalog with the server catalog under `precedence`.
///
/// With `expose_server` false the server catalog is ignored entirely.
pub fn merge_with(client: Catalog, server: Catalog, expose_server: bool, precedence: Precedence) -> Merged {
    let mut catalog = client;
    let mut overridden = Vec::new();

    if expose_server {
        for (key, view) in server {
            match (catalog.contains_key(&key), precedence) {
                (true, Precedence::ClientWins) => {}
                (true, Precedence::ServerWins) => {
                    overridden.push(key.clone());
                    catalog.insert(key, view);
                }
                (false, _) => {
                    catalog.insert(key, view);
                }
            }
        }
    }

    if !overridden.is_empty() {
        tracing::debug!(?overridden, "server views replaced client views");
    }

    if catalog.is_empty() {
        Merged::Empty
    } else {
        Merged::Catalog(MergedCatalog { catalog, overridden })
    }
}
