//! Authorization module - access gate for catalog views
//!
//! An [`AuthorizerSet`] is an ordered list of [`Authorizer`]s. A view passes
//! the gate only if every authorizer in the set allows it for the current
//! [`Principal`].

mod principal;

pub use principal::{Principal, RequestPrincipal};

use route_model::ViewDescriptor;
use std::fmt;
use std::sync::Arc;

/// Decides whether a principal may access a view.
pub trait Authorizer: Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &str;

    fn is_allowed(&self, principal: &dyn Principal, view: &ViewDescriptor) -> bool;
}

/// Denies `login_required` views to unauthenticated principals.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginAuthorizer;

impl Authorizer for LoginAuthorizer {
    fn name(&self) -> &str {
        "login"
    }

    fn is_allowed(&self, principal: &dyn Principal, view: &ViewDescriptor) -> bool {
        !view.login_required || principal.is_authenticated()
    }
}

/// Checks `roles_allowed`.
///
/// Absent roles admit everyone; otherwise the principal must hold at least
/// one listed role, so an empty list admits nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAuthorizer;

impl Authorizer for RoleAuthorizer {
    fn name(&self) -> &str {
        "roles"
    }

    fn is_allowed(&self, principal: &dyn Principal, view: &ViewDescriptor) -> bool {
        match &view.roles_allowed {
            None => true,
            Some(roles) => roles.iter().any(|role| principal.is_user_in_role(role)),
        }
    }
}

/// Ordered set of authorizers combined with logical AND.
#[derive(Clone, Default)]
pub struct AuthorizerSet {
    authorizers: Vec<Arc<dyn Authorizer>>,
}

impl AuthorizerSet {
    /// An empty set, which allows every view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Login check followed by role check.
    pub fn standard() -> Self {
        Self::new()
            .with(LoginAuthorizer)
            .with(RoleAuthorizer)
    }

    pub fn with(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizers.push(Arc::new(authorizer));
        self
    }

    pub fn push(&mut self, authorizer: Arc<dyn Authorizer>) {
        self.authorizers.push(authorizer);
    }

    pub fn len(&self) -> usize {
        self.authorizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authorizers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.authorizers.iter().map(|a| a.name()).collect()
    }

    /// True only if every authorizer allows the view.
    pub fn allows(&self, principal: &dyn Principal, view: &ViewDescriptor) -> bool {
        match self
            .authorizers
            .iter()
            .find(|authorizer| !authorizer.is_allowed(principal, view))
        {
            Some(denied_by) => {
                tracing::trace!(
                    route = %view.route,
                    authorizer = denied_by.name(),
                    "view denied"
                );
                false
            }
            None => true,
        }
    }
}

impl fmt::Debug for AuthorizerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizerSet")
            .field("authorizers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_only() -> ViewDescriptor {
        ViewDescriptor::new("/admin", "Admin")
            .with_login_required(true)
            .with_roles(["ROLE_ADMIN"])
    }

    #[test]
    fn test_login_authorizer() {
        let view = ViewDescriptor::new("/profile", "Profile").with_login_required(true);
        assert!(!LoginAuthorizer.is_allowed(&RequestPrincipal::anonymous(), &view));
        assert!(LoginAuthorizer.is_allowed(&RequestPrincipal::authenticated(["ROLE_USER"]), &view));

        let open = ViewDescriptor::new("/home", "Home");
        assert!(LoginAuthorizer.is_allowed(&RequestPrincipal::anonymous(), &open));
    }

    #[test]
    fn test_role_authorizer_any_match() {
        let view = ViewDescriptor::new("/profile", "Profile").with_roles(["ROLE_USER", "ROLE_ADMIN"]);
        assert!(RoleAuthorizer.is_allowed(&RequestPrincipal::authenticated(["ROLE_ADMIN"]), &view));
        assert!(!RoleAuthorizer.is_allowed(&RequestPrincipal::authenticated(["ROLE_GUEST"]), &view));
    }

    #[test]
    fn test_role_authorizer_empty_roles_admit_nobody() {
        let view = ViewDescriptor::new("/locked", "Locked").with_roles(Vec::<String>::new());
        assert!(!RoleAuthorizer.is_allowed(&RequestPrincipal::authenticated(["ROLE_ADMIN"]), &view));

        let unrestricted = ViewDescriptor::new("/open", "Open");
        assert!(RoleAuthorizer.is_allowed(&RequestPrincipal::anonymous(), &unrestricted));
    }

    #[test]
    fn test_set_is_logical_and() {
        let set = AuthorizerSet::standard();
        let view = admin_only();

        assert!(set.allows(&RequestPrincipal::authenticated(["ROLE_ADMIN"]), &view));
        // Role without authentication is still denied by the login check.
        let unauthenticated_admin = RequestPrincipal::anonymous().with_role("ROLE_ADMIN");
        assert!(!set.allows(&unauthenticated_admin, &view));
        assert!(!set.allows(&RequestPrincipal::authenticated(["ROLE_USER"]), &view));
    }

    #[test]
    fn test_empty_set_allows_everything() {
        let set = AuthorizerSet::new();
        assert!(set.is_empty());
        assert!(set.allows(&RequestPrincipal::anonymous(), &admin_only()));
    }

    struct DenyAll;

    impl Authorizer for DenyAll {
        fn name(&self) -> &str {
            "deny-all"
        }

        fn is_allowed(&self, _: &dyn Principal, _: &ViewDescriptor) -> bool {
            false
        }
    }

    #[test]
    fn test_custom_authorizer_composes() {
        let set = AuthorizerSet::standard().with(DenyAll);
        assert_eq!(set.names(), vec!["login", "roles", "deny-all"]);
        assert!(!set.allows(&RequestPrincipal::anonymous(), &ViewDescriptor::new("/home", "Home")));
    }
}
