//! Principal context for a single page request.

use std::collections::HashSet;

/// The identity making the current request.
pub trait Principal {
    fn is_authenticated(&self) -> bool;

    fn is_user_in_role(&self, role: &str) -> bool;
}

/// A principal with a fixed authentication state and role set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPrincipal {
    authenticated: bool,
    roles: HashSet<String>,
}

impl RequestPrincipal {
    /// Unauthenticated and holding no roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authenticated: true,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl Principal for RequestPrincipal {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn is_user_in_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        let principal = RequestPrincipal::anonymous();
        assert!(!principal.is_authenticated());
        assert!(!principal.is_user_in_role("ROLE_USER"));
    }

    #[test]
    fn test_authenticated_roles() {
        let principal = RequestPrincipal::authenticated(["ROLE_USER"]).with_role("ROLE_ADMIN");
        assert!(principal.is_authenticated());
        assert!(principal.is_user_in_role("ROLE_ADMIN"));
        assert!(!principal.is_user_in_role("ROLE_GUEST"));
        assert_eq!(principal.roles().count(), 2);
    }
}
