//! Catalog serialization and script emission.
//!
//! The catalog reaches the client runtime as a JSON object keyed by route,
//! assigned to `window.Vaadin.views` by a two-line script appended to the
//! document head. Only the fields of [`WireView`] are encoded; `children`
//! is never part of the output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

use route_model::{Catalog, CatalogError, MenuData, RouteParameters, ViewDescriptor};

/// Field whitelist for one emitted view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireView<'a> {
    pub title: &'a str,
    pub roles_allowed: Option<&'a BTreeSet<String>>,
    pub login_required: bool,
    pub route: &'a str,
    pub lazy: bool,
    #[serde(rename = "register")]
    pub auto_registered: bool,
    pub menu: Option<&'a MenuData>,
    #[serde(rename = "params")]
    pub parameters: &'a RouteParameters,
}

impl<'a> From<&'a ViewDescriptor> for WireView<'a> {
    fn from(view: &'a ViewDescriptor) -> Self {
        Self {
            title: &view.title,
            roles_allowed: view.roles_allowed.as_ref(),
            login_required: view.login_required,
            route: &view.route,
            lazy: view.lazy,
            auto_registered: view.auto_registered,
            menu: view.menu.as_ref(),
            parameters: &view.parameters,
        }
    }
}

struct WireCatalog<'a>(&'a Catalog);

impl Serialize for WireCatalog<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, view) in self.0 {
            map.serialize_entry(key, &WireView::from(view))?;
        }
        map.end()
    }
}

/// Turns a catalog into text.
pub trait CatalogEncoder: Send + Sync {
    fn encode(&self, catalog: &Catalog) -> Result<String, CatalogError>;
}

/// Compact JSON, keys in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl CatalogEncoder for JsonEncoder {
    fn encode(&self, catalog: &Catalog) -> Result<String, CatalogError> {
        serde_json::to_string(&WireCatalog(catalog)).map_err(CatalogError::Encoding)
    }
}

/// Encode a catalog with [`JsonEncoder`].
pub fn serialize(catalog: &Catalog) -> Result<String, CatalogError> {
    JsonEncoder.encode(catalog)
}

/// Wrap encoded views in the client bootstrap script.
pub fn script_for(views_json: &str) -> String {
    format!("window.Vaadin = window.Vaadin ?? {{}};\nwindow.Vaadin.views = {views_json};")
}

/// Encode and wrap a catalog.
pub fn render_script(catalog: &Catalog) -> Result<String, CatalogError> {
    serialize(catalog).map(|json| script_for(&json))
}

/// The document head of the page being rendered.
pub trait HtmlHead {
    fn append_script(&mut self, script: String);
}

/// An [`HtmlHead`] that collects appended scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    scripts: Vec<String>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl HtmlHead for ScriptBuffer {
    fn append_script(&mut self, script: String) {
        self.scripts.push(script);
    }
}

/// Encode `catalog` and append the script to `head`.
///
/// Returns false if encoding failed, in which case `head` is untouched.
pub fn emit_into(encoder: &dyn CatalogEncoder, catalog: &Catalog, head: &mut dyn HtmlHead) -> bool {
    match encoder.encode(catalog) {
        Ok(json) => {
            head.append_script(script_for(&json));
            true
        }
        Err(e) => {
            tracing::error!(
                code = %e.code(),
                error = %e,
                "failed to write client and server routes to the index page"
            );
            false
        }
    }
}
