//! Flattening of the client route tree into a path-keyed table.
//!
//! Layout nodes (nodes with children) are not routes themselves. Their path,
//! parameters and access constraints are pushed down to every descendant.

use route_model::{ClientViewConfig, RouteParameters};
use std::collections::{BTreeMap, BTreeSet};

/// Constraints accumulated from the ancestors of a node.
struct Inherited<'a> {
    path: String,
    login_required: bool,
    roles_allowed: Option<&'a BTreeSet<String>>,
    parameters: RouteParameters,
}

/// Flatten a route tree into `path -> leaf config`.
pub fn flatten_routes(nodes: &[ClientViewConfig]) -> BTreeMap<String, ClientViewConfig> {
    let mut routes = BTreeMap::new();
    let root = Inherited {
        path: String::new(),
        login_required: false,
        roles_allowed: None,
        parameters: RouteParameters::new(),
    };
    visit(nodes, &root, &mut routes);
    routes
}

/// A main layout is a top-level node with an empty path that wraps other routes.
pub fn has_main_layout(nodes: &[ClientViewConfig]) -> bool {
    nodes
        .iter()
        .any(|node| node.route().trim_matches('/').is_empty() && node.is_layout())
}

/// Join a parent path and a relative route into `/a/b` form. The root is `/`.
pub fn join_path(parent: &str, route: &str) -> String {
    let segments: Vec<&str> = parent
        .split('/')
        .chain(route.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

fn visit<'a>(
    nodes: &'a [ClientViewConfig],
    parent: &Inherited<'a>,
    routes: &mut BTreeMap<String, ClientViewConfig>,
) {
    for node in nodes {
        let path = join_path(&parent.path, node.route());
        let login_required = parent.login_required || node.login_required;
        let roles_allowed = node.roles_allowed.as_ref().or(parent.roles_allowed);

        let mut parameters = parent.parameters.clone();
        for (name, kind) in node.route_parameters.iter() {
            parameters.insert(name, kind);
        }

        match node.children.as_deref() {
            Some(children) if !children.is_empty() => {
                let inherited = Inherited {
                    path,
                    login_required,
                    roles_allowed,
                    parameters,
                };
                visit(children, &inherited, routes);
            }
            _ => {
                let mut leaf = node.clone();
                leaf.login_required = login_required;
                leaf.roles_allowed = roles_allowed.cloned();
                leaf.route_parameters = parameters;
                leaf.children = None;

                if let Some(previous) = routes.insert(path.clone(), leaf) {
                    tracing::warn!(
                        path = %path,
                        replaced = ?previous.title,
                        "duplicate client route, keeping the later definition"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_model::ParamKind;

    fn node(route: &str, title: &str) -> ClientViewConfig {
        let mut config = ClientViewConfig::new(route);
        config.title = Some(title.to_string());
        config
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", ""), "/");
        assert_eq!(join_path("", "about"), "/about");
        assert_eq!(join_path("/profile", "account/"), "/profile/account");
        assert_eq!(join_path("/profile", ""), "/profile");
        assert_eq!(join_path("/", "/home"), "/home");
    }

    #[test]
    fn test_nested_paths_are_joined() {
        let mut profile = node("profile", "Profile");
        profile.children = Some(vec![node("", "Overview"), node("friends/list", "List")]);

        let routes = flatten_routes(&[node("about", "About"), profile]);
        let keys: Vec<_> = routes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/about", "/profile", "/profile/friends/list"]);
        assert_eq!(routes["/profile"].title.as_deref(), Some("Overview"));
        assert!(routes["/profile"].children.is_none());
    }

    #[test]
    fn test_children_inherit_constraints() {
        let mut admin = node("admin", "Admin");
        admin.login_required = true;
        admin.roles_allowed = Some(["ROLE_ADMIN".to_string()].into_iter().collect());

        let mut audit = node("audit", "Audit");
        audit.roles_allowed = Some(["ROLE_AUDITOR".to_string()].into_iter().collect());
        admin.children = Some(vec![node("users", "Users"), audit]);

        let routes = flatten_routes(&[admin]);

        let users = &routes["/admin/users"];
        assert!(users.login_required);
        assert!(users.roles_allowed.as_ref().unwrap().contains("ROLE_ADMIN"));

        // Own roles take precedence over inherited ones.
        let audit = &routes["/admin/audit"];
        assert!(audit.login_required);
        assert!(audit.roles_allowed.as_ref().unwrap().contains("ROLE_AUDITOR"));
        assert!(!audit.roles_allowed.as_ref().unwrap().contains("ROLE_ADMIN"));
    }

    #[test]
    fn test_layout_parameters_are_inherited() {
        let mut user = node("user/:userId", "User");
        user.route_parameters.insert(":userId", ParamKind::Required);
        user.children = Some(vec![node("edit", "Edit")]);

        let routes = flatten_routes(&[user]);
        assert!(routes["/user/:userId/edit"].has_required_parameter());
    }

    #[test]
    fn test_main_layout_detection() {
        let mut layout = node("", "Main");
        layout.children = Some(vec![node("home", "Home")]);
        assert!(has_main_layout(&[layout]));

        let mut empty = node("", "Index");
        empty.children = Some(vec![]);
        assert!(!has_main_layout(&[empty, node("home", "Home")]));
    }
}
