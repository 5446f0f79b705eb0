//! Test fixtures for catalog assertions
//!
//! This module provides fixtures for:
//! - Client route files (flat and with a main layout)
//! - Server route declarations (valid and with colliding menu links)
//! - Principals used across scenarios

#![allow(dead_code)]

use route_unify::config::{MenuPopulation, UnifyConfig};
use route_unify::{ClientRouteRegistry, FixedServerSource, RequestPrincipal, StaticServerRoutes};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(relative)
}

/// Flat client routes without a main layout
pub fn client_routes_path() -> PathBuf {
    fixture("client/file-routes.json")
}

/// Client routes wrapped in a main layout
pub fn layout_routes_path() -> PathBuf {
    fixture("client/layout-routes.json")
}

/// Server routes with distinct menu links
pub fn server_routes_path() -> PathBuf {
    fixture("server/server-routes.json")
}

/// Server routes where two templates share a menu link
pub fn duplicate_routes_path() -> PathBuf {
    fixture("server/duplicate-routes.json")
}

pub fn client_registry() -> Arc<ClientRouteRegistry> {
    Arc::new(ClientRouteRegistry::load_file(&client_routes_path()).expect("client fixture loads"))
}

pub fn layout_registry() -> Arc<ClientRouteRegistry> {
    Arc::new(ClientRouteRegistry::load_file(&layout_routes_path()).expect("layout fixture loads"))
}

pub fn server_source(path: &Path) -> Arc<FixedServerSource> {
    let routes = StaticServerRoutes::load_file(path).expect("server fixture loads");
    Arc::new(FixedServerSource(Arc::new(routes)))
}

/// Production settings with the given exposure and menu policy
pub fn config(expose_server_routes: bool, menu_population: MenuPopulation) -> UnifyConfig {
    UnifyConfig {
        expose_server_routes,
        production_mode: true,
        menu_population,
        frontend_dir: None,
    }
}

pub fn anonymous() -> RequestPrincipal {
    RequestPrincipal::anonymous()
}

pub fn user() -> RequestPrincipal {
    RequestPrincipal::authenticated(["USER"])
}

pub fn admin() -> RequestPrincipal {
    RequestPrincipal::authenticated(["USER", "ADMIN"])
}
