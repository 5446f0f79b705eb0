//! Server view collection.
//!
//! Server views are keyed by their menu link: the route template with every
//! parameter segment removed. Two distinct server views with the same menu
//! link are a configuration error and are reported as
//! [`CatalogError::DuplicateRoute`].

use route_model::{Catalog, CatalogError, ViewDescriptor};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::is_navigable;
use crate::authz::{AuthorizerSet, Principal};

/// Menu-collection capability of a server-side router.
pub trait ServerRouteSource: Send + Sync {
    /// Return the menu views visible to `principal`.
    ///
    /// Implementations are responsible for consulting `authorizers`.
    fn collect_menu_views(&self, authorizers: &AuthorizerSet, principal: &dyn Principal) -> Vec<ViewDescriptor>;
}

/// Server routes held in memory, in registration order.
#[derive(Debug, Clone, Default)]
pub struct StaticServerRoutes {
    views: Vec<ViewDescriptor>,
}

impl StaticServerRoutes {
    pub fn new(views: Vec<ViewDescriptor>) -> Self {
        Self { views }
    }

    /// Parse a JSON array of view descriptors.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::route_file(path.display(), e))?;
        Self::from_json(&contents).map_err(|e| CatalogError::route_file(path.display(), e))
    }

    pub fn register(&mut self, view: ViewDescriptor) {
        self.views.push(view);
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }
}

impl ServerRouteSource for StaticServerRoutes {
    fn collect_menu_views(&self, authorizers: &AuthorizerSet, principal: &dyn Principal) -> Vec<ViewDescriptor> {
        self.views
            .iter()
            .filter(|view| authorizers.allows(principal, view))
            .cloned()
            .collect()
    }
}

/// Collect server views keyed by menu link.
pub fn collect_server_views(
    source: &dyn ServerRouteSource,
    authorizers: &AuthorizerSet,
    principal: &dyn Principal,
) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    for (link, mut group) in group_by_menu_link(source.collect_menu_views(authorizers, principal)) {
        if group.len() > 1 {
            return Err(CatalogError::DuplicateRoute {
                link,
                first: group[0].route.clone(),
                second: group[1].route.clone(),
            });
        }
        if let Some(view) = group.pop() {
            catalog.insert(link, view);
        }
    }

    Ok(catalog)
}

/// Navigable views grouped by menu link.
///
/// Views with a required parameter are dropped and identical views are
/// collapsed, so a group with more than one entry is a real collision.
pub fn group_by_menu_link<I>(views: I) -> BTreeMap<String, Vec<ViewDescriptor>>
where
    I: IntoIterator<Item = ViewDescriptor>,
{
    let mut groups: BTreeMap<String, Vec<ViewDescriptor>> = BTreeMap::new();
    for view in views.into_iter().filter(is_navigable) {
        let group = groups.entry(menu_link(&view)).or_default();
        if !group.contains(&view) {
            group.push(view);
        }
    }
    groups
}

/// Compute the parameter-free link for a view.
///
/// A placeholder segment (`:name`, `:name?`, `:name*` or a lone `*`) is
/// removed when its bare name matches a declared parameter's bare name.
/// Literal segments are always kept, as are undeclared placeholders. Empty
/// segments are dropped and the result always starts with `/`.
pub fn menu_link(view: &ViewDescriptor) -> String {
    let parameters: Vec<&str> = view.parameters.names().map(bare_name).collect();
    let segments: Vec<&str> = view
        .route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            !(is_placeholder(segment) && parameters.iter().any(|name| *name == bare_name(segment)))
        })
        .collect();
    format!("/{}", segments.join("/"))
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with(':') || segment == "*"
}

/// `:id` / `:id?` / `:id*` / `id` all name `id`; a lone `*` names `*`.
fn bare_name(placeholder: &str) -> &str {
    let name = placeholder.strip_prefix(':').unwrap_or(placeholder);
    if name == "*" {
        return name;
    }
    name.strip_suffix('?')
        .or_else(|| name.strip_suffix('*'))
        .unwrap_or(name)
}
