//! View collectors for the client and server route sources.
//!
//! Both collectors apply the same two filters: views with a required
//! parameter are never navigable from a menu, and views the principal is not
//! authorized for are dropped.

mod client;
mod server;

pub use client::{ClientViewCollector, ClientViews};
pub use server::{collect_server_views, group_by_menu_link, menu_link, ServerRouteSource, StaticServerRoutes};

use crate::authz::{AuthorizerSet, Principal};
use route_model::ViewDescriptor;

/// Required-parameter exclusion.
pub fn is_navigable(view: &ViewDescriptor) -> bool {
    !view.has_required_parameter()
}

/// Authorization exclusion.
pub fn is_authorized(authorizers: &AuthorizerSet, principal: &dyn Principal, view: &ViewDescriptor) -> bool {
    authorizers.allows(principal, view)
}
