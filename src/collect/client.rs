//! Client view collection.

use std::sync::Arc;

use route_model::Catalog;

use super::{is_authorized, is_navigable};
use crate::authz::{AuthorizerSet, Principal};
use crate::registry::{ClientRouteRegistry, DevModeSource};

/// Client views read from one registry snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientViews {
    pub catalog: Catalog,
    /// Main-layout flag of the snapshot `catalog` was built from.
    pub has_main_layout: bool,
}

/// Reads the client route table and filters it for one principal.
#[derive(Debug, Clone)]
pub struct ClientViewCollector {
    registry: Arc<ClientRouteRegistry>,
    authorizers: AuthorizerSet,
    production_mode: bool,
    dev_source: Option<DevModeSource>,
}

impl ClientViewCollector {
    /// A production-mode collector using the standard login and role checks.
    pub fn new(registry: Arc<ClientRouteRegistry>) -> Self {
        Self {
            registry,
            authorizers: AuthorizerSet::standard(),
            production_mode: true,
            dev_source: None,
        }
    }

    pub fn with_authorizers(mut self, authorizers: AuthorizerSet) -> Self {
        self.authorizers = authorizers;
        self
    }

    /// Outside production mode the route file is checked for changes on
    /// every collection.
    pub fn with_dev_mode(mut self, source: DevModeSource) -> Self {
        self.production_mode = false;
        self.dev_source = Some(source);
        self
    }

    pub fn registry(&self) -> &ClientRouteRegistry {
        &self.registry
    }

    /// Collect the client views visible to `principal`, keyed by route path.
    pub fn collect(&self, principal: &dyn Principal) -> Catalog {
        self.collect_views(principal).catalog
    }

    /// Like [`collect`](Self::collect), plus the main-layout flag of the
    /// same snapshot the views were read from.
    pub fn collect_views(&self, principal: &dyn Principal) -> ClientViews {
        if !self.production_mode {
            if let Some(source) = &self.dev_source {
                self.registry.refresh_if_stale(source);
            }
        }

        let snapshot = self.registry.get_all_routes();
        let catalog = snapshot
            .routes
            .iter()
            .map(|(path, config)| (path.clone(), config.to_descriptor()))
            .filter(|(_, view)| is_navigable(view))
            .filter(|(_, view)| is_authorized(&self.authorizers, principal, view))
            .collect();

        ClientViews {
            catalog,
            has_main_layout: snapshot.has_main_layout,
        }
    }
}
