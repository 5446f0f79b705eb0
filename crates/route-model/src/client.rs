//! Client route tree nodes, as generated into `file-routes.json`.

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::view::{MenuData, RouteParameters, ViewDescriptor};

/// One node of the client-side route tree.
///
/// Every field is optional on disk. A node with children is a layout; the
/// registry flattens the tree so that only leaves become routes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientViewConfig {
    pub route: Option<String>,
    pub title: Option<String>,
    pub roles_allowed: Option<BTreeSet<String>>,
    pub login_required: bool,
    pub lazy: bool,
    #[serde(alias = "register")]
    pub auto_registered: bool,
    pub menu: Option<MenuData>,
    #[serde(alias = "params")]
    pub route_parameters: RouteParameters,
    pub children: Option<Vec<ClientViewConfig>>,
}

impl ClientViewConfig {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            ..Self::default()
        }
    }

    pub fn route(&self) -> &str {
        self.route.as_deref().unwrap_or("")
    }

    /// True for nodes that only group other routes.
    pub fn is_layout(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn has_required_parameter(&self) -> bool {
        self.route_parameters.has_required()
    }

    /// Project into a catalog entry. Children are not carried over.
    pub fn to_descriptor(&self) -> ViewDescriptor {
        ViewDescriptor {
            route: self.route().to_string(),
            title: self.title.clone().unwrap_or_default(),
            roles_allowed: self.roles_allowed.clone(),
            login_required: self.login_required,
            lazy: self.lazy,
            auto_registered: self.auto_registered,
            menu: self.menu.clone(),
            parameters: self.route_parameters.clone(),
            children: Vec::new(),
        }
    }
}
