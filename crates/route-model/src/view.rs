//! View descriptor types.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of a route parameter.
///
/// Wire names match the client runtime (`req`, `opt`, `*`). The upper-case
/// names used by server-side registries are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// Must be supplied externally; the view cannot be linked from a menu.
    #[serde(rename = "req", alias = "REQUIRED")]
    Required,
    /// May be omitted.
    #[serde(rename = "opt", alias = "OPTIONAL")]
    Optional,
    /// Matches any remaining path segments.
    #[serde(rename = "*", alias = "WILDCARD")]
    Wildcard,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "req"),
            Self::Optional => write!(f, "opt"),
            Self::Wildcard => write!(f, "*"),
        }
    }
}

/// Route parameters in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters(Vec<(String, ParamKind)>);

impl RouteParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, kind: ParamKind) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = kind,
            None => self.0.push((name, kind)),
        }
    }

    pub fn get(&self, name: &str) -> Option<ParamKind> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, kind)| *kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn kinds(&self) -> impl Iterator<Item = ParamKind> + '_ {
        self.0.iter().map(|(_, kind)| *kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamKind)> {
        self.0.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// True if any parameter is [`ParamKind::Required`].
    pub fn has_required(&self) -> bool {
        self.kinds().any(|kind| kind == ParamKind::Required)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ParamKind)> for RouteParameters {
    fn from_iter<I: IntoIterator<Item = (S, ParamKind)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, kind) in iter {
            params.insert(name, kind);
        }
        params
    }
}

impl Serialize for RouteParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, kind) in &self.0 {
            map.serialize_entry(name, kind)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RouteParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = RouteParameters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter name to parameter kind")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(RouteParameters::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut params = RouteParameters::new();
                while let Some((name, kind)) = access.next_entry::<String, ParamKind>()? {
                    params.insert(name, kind);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_any(ParamsVisitor)
    }
}

/// Menu hints attached to a view. Not interpreted by the merge pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One entry of a view catalog.
///
/// `children` exists so nested route trees can be represented, but it is
/// never part of the emitted catalog; see the serializer's field whitelist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewDescriptor {
    /// Path template; may contain parameter placeholders.
    pub route: String,
    pub title: String,
    /// `None` is unrestricted; `Some` of an empty set admits nobody.
    pub roles_allowed: Option<BTreeSet<String>>,
    pub login_required: bool,
    pub lazy: bool,
    #[serde(alias = "register")]
    pub auto_registered: bool,
    pub menu: Option<MenuData>,
    #[serde(alias = "params", alias = "routeParameters")]
    pub parameters: RouteParameters,
    pub children: Vec<ViewDescriptor>,
}

impl ViewDescriptor {
    pub fn new(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles_allowed = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_login_required(mut self, login_required: bool) -> Self {
        self.login_required = login_required;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.parameters.insert(name, kind);
        self
    }

    pub fn with_menu(mut self, menu: MenuData) -> Self {
        self.menu = Some(menu);
        self
    }

    /// A view with a required parameter cannot be linked from a static menu.
    pub fn has_required_parameter(&self) -> bool {
        self.parameters.has_required()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_wire_names() {
        assert_eq!(serde_json::to_string(&ParamKind::Required).unwrap(), "\"req\"");
        assert_eq!(serde_json::to_string(&ParamKind::Optional).unwrap(), "\"opt\"");
        assert_eq!(serde_json::to_string(&ParamKind::Wildcard).unwrap(), "\"*\"");

        let upper: ParamKind = serde_json::from_str("\"REQUIRED\"").unwrap();
        assert_eq!(upper, ParamKind::Required);
    }

    #[test]
    fn test_parameters_keep_declaration_order() {
        let params: RouteParameters =
            serde_json::from_str(r#"{"zeta": "opt", "alpha": "req", "mid": "*"}"#).unwrap();
        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"zeta":"opt","alpha":"req","mid":"*"}"#
        );
    }

    #[test]
    fn test_parameters_null_is_empty() {
        let params: RouteParameters = serde_json::from_str("null").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = RouteParameters::new();
        params.insert("a", ParamKind::Optional);
        params.insert("b", ParamKind::Optional);
        params.insert("a", ParamKind::Required);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(ParamKind::Required));
        assert_eq!(params.names().next(), Some("a"));
    }

    #[test]
    fn test_has_required_parameter() {
        let view = ViewDescriptor::new("/user/:id", "User").with_param(":id", ParamKind::Required);
        assert!(view.has_required_parameter());

        let view = ViewDescriptor::new("/files/*", "Files")
            .with_param("*", ParamKind::Wildcard)
            .with_param(":page?", ParamKind::Optional);
        assert!(!view.has_required_parameter());
    }

    #[test]
    fn test_descriptor_accepts_server_field_names() {
        let view: ViewDescriptor = serde_json::from_str(
            r#"{"route": "/bar", "title": "Bar", "register": true, "params": {"x": "OPTIONAL"}}"#,
        )
        .unwrap();
        assert!(view.auto_registered);
        assert_eq!(view.parameters.get("x"), Some(ParamKind::Optional));
        assert!(view.roles_allowed.is_none());
    }
}
