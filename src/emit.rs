//! Index page emission
//!
//! [`ViewCatalogEmitter`] runs the whole pipeline for one page request:
//! collect client views, collect server views when they are exposed, merge,
//! serialize, and append the bootstrap script to the document head. Nothing
//! in here fails the page; every error is logged and the page renders without
//! (part of) the catalog.

use std::sync::Arc;

use route_model::{Catalog, CatalogError};

use crate::authz::{AuthorizerSet, Principal};
use crate::collect::{collect_server_views, ClientViewCollector, ServerRouteSource};
use crate::config::{MenuPopulation, UnifyConfig};
use crate::merge::{merge, Merged};
use crate::registry::{ClientRouteRegistry, DevModeSource};
use crate::serialize::{emit_into, CatalogEncoder, HtmlHead, JsonEncoder};

/// Looks up the server route source for the current request.
pub trait ServerSourceResolver: Send + Sync {
    fn resolve(&self) -> Result<Arc<dyn ServerRouteSource>, CatalogError>;
}

/// Always resolves to the same source.
#[derive(Clone)]
pub struct FixedServerSource(pub Arc<dyn ServerRouteSource>);

impl ServerSourceResolver for FixedServerSource {
    fn resolve(&self) -> Result<Arc<dyn ServerRouteSource>, CatalogError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Emits the unified view catalog into index pages.
pub struct ViewCatalogEmitter {
    config: UnifyConfig,
    client: ClientViewCollector,
    server: Option<Arc<dyn ServerSourceResolver>>,
    server_authorizers: AuthorizerSet,
    encoder: Arc<dyn CatalogEncoder>,
}

impl ViewCatalogEmitter {
    pub fn new(config: UnifyConfig, registry: Arc<ClientRouteRegistry>) -> Self {
        let mut client = ClientViewCollector::new(registry);
        if !config.production_mode {
            if let Some(dir) = &config.frontend_dir {
                client = client.with_dev_mode(DevModeSource::new(dir));
            }
        }

        Self {
            config,
            client,
            server: None,
            server_authorizers: AuthorizerSet::standard(),
            encoder: Arc::new(JsonEncoder),
        }
    }

    pub fn with_server_source(mut self, resolver: Arc<dyn ServerSourceResolver>) -> Self {
        self.server = Some(resolver);
        self
    }

    pub fn with_client_authorizers(mut self, authorizers: AuthorizerSet) -> Self {
        self.client = self.client.with_authorizers(authorizers);
        self
    }

    pub fn with_server_authorizers(mut self, authorizers: AuthorizerSet) -> Self {
        self.server_authorizers = authorizers;
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn CatalogEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &UnifyConfig {
        &self.config
    }

    pub fn collect_client_views(&self, principal: &dyn Principal) -> Catalog {
        self.client.collect(principal)
    }

    /// Server views for the client menu.
    ///
    /// Collected only when the population policy is `always` or the client
    /// has no main layout of its own; otherwise the result is empty.
    /// `client_has_main_layout` must come from the snapshot the client views
    /// were read from.
    pub fn collect_server_views(
        &self,
        principal: &dyn Principal,
        client_has_main_layout: bool,
    ) -> Result<Catalog, CatalogError> {
        let resolver = self
            .server
            .as_ref()
            .ok_or_else(|| CatalogError::source_unavailable("no server route source configured"))?;
        let source = resolver.resolve()?;

        let populate = self.config.menu_population == MenuPopulation::Always || !client_has_main_layout;
        if !populate {
            tracing::debug!("client main layout present, server views not collected for the menu");
            return Ok(Catalog::new());
        }

        collect_server_views(source.as_ref(), &self.server_authorizers, principal)
    }

    /// Collect and merge both sources for `principal`.
    pub fn build_catalog(&self, principal: &dyn Principal) -> Merged {
        let client = self.client.collect_views(principal);
        let expose = self.config.expose_server_routes;

        let server = if expose {
            tracing::debug!("exposing server-side views to the client");
            match self.collect_server_views(principal, client.has_main_layout) {
                Ok(views) => views,
                Err(e @ CatalogError::SourceUnavailable(_)) => {
                    tracing::debug!(error = %e, "skipping server view collection");
                    Catalog::new()
                }
                Err(e) => {
                    tracing::error!(code = %e.code(), error = %e, "server views dropped for this request");
                    Catalog::new()
                }
            }
        } else {
            Catalog::new()
        };

        merge(client.catalog, server, expose)
    }

    /// Append the catalog script to `head`, if there is anything to emit.
    pub fn modify_index_html(&self, principal: &dyn Principal, head: &mut dyn HtmlHead) {
        let catalog = match self.build_catalog(principal) {
            Merged::Catalog(merged) => merged.catalog,
            Merged::Empty => {
                tracing::debug!("no server-side nor client-side views found, leaving the page unchanged");
                return;
            }
        };
        emit_into(self.encoder.as_ref(), &catalog, head);
    }
}
