//! Route Unify - one view catalog for client and server routes
//!
//! This crate merges the views declared by client-side file routes with the
//! views declared by server-side routes, filters them for the current
//! principal, and emits the result as a bootstrap script for the index page.

pub mod authz;
pub mod collect;
pub mod config;
pub mod emit;
pub mod merge;
pub mod registry;
pub mod serialize;

pub use authz::{Authorizer, AuthorizerSet, Principal, RequestPrincipal};
pub use collect::{
    collect_server_views, group_by_menu_link, menu_link, ClientViewCollector, ClientViews, ServerRouteSource,
    StaticServerRoutes,
};
pub use config::{EffectiveConfig, MenuPopulation, UnifyConfig};
pub use emit::{FixedServerSource, ServerSourceResolver, ViewCatalogEmitter};
pub use merge::{merge, Merged, MergedCatalog, Precedence};
pub use registry::{ClientRouteRegistry, DevModeSource};
pub use serialize::{render_script, serialize, CatalogEncoder, HtmlHead, JsonEncoder, ScriptBuffer};

pub use route_model::{Catalog, CatalogError, ClientViewConfig, ErrorCode, ViewDescriptor};
