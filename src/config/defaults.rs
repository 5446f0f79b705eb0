//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

use super::MenuPopulation;

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Expose server routes to the client (default: true)
    pub expose_server_routes: bool,

    /// Production mode (default: true)
    pub production_mode: bool,

    /// Menu population policy (default: auto)
    pub menu_population: MenuPopulation,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            expose_server_routes: true,
            production_mode: true,
            menu_population: MenuPopulation::Auto,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expose_server_routes": self.expose_server_routes,
            "production_mode": self.production_mode,
            "menu_population": self.menu_population,
        })
    }
}
