//! Route Unify CLI
//!
//! Entry point for the `route-unify` command-line tool.

use clap::{Parser, Subcommand};
use route_unify::config::CONFIG_FILE;
use route_unify::{
    group_by_menu_link, render_script, serialize, ClientRouteRegistry, EffectiveConfig, FixedServerSource, Merged,
    RequestPrincipal, StaticServerRoutes, ViewCatalogEmitter,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route-unify")]
#[command(about = "Unified client/server view catalog", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the view catalog script for one principal
    Render {
        /// Client route file (file-routes.json)
        #[arg(long)]
        client: Option<PathBuf>,

        /// Server route file (JSON array of views)
        #[arg(long)]
        server: Option<PathBuf>,

        /// Path to config file (default: route-unify.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Role held by the principal (repeatable)
        #[arg(long = "role", short = 'r')]
        roles: Vec<String>,

        /// Treat the principal as authenticated
        #[arg(long)]
        authenticated: bool,

        /// Do not expose server views
        #[arg(long)]
        no_server: bool,

        /// Menu population policy (always, auto)
        #[arg(long)]
        menu_population: Option<String>,

        /// Print the catalog JSON instead of the script
        #[arg(long)]
        json: bool,
    },

    /// List the menu links of server routes
    Links {
        /// Server route file (JSON array of views)
        server: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            client,
            server,
            config,
            roles,
            authenticated,
            no_server,
            menu_population,
            json,
        } => {
            let overrides = render_overrides(no_server, menu_population);
            let principal = if authenticated || !roles.is_empty() {
                RequestPrincipal::authenticated(roles)
            } else {
                RequestPrincipal::anonymous()
            };
            run_render(client, server, config, overrides, &principal, json);
        }
        Commands::Links { server, json } => {
            run_links(server, json);
        }
    }
}

fn render_overrides(no_server: bool, menu_population: Option<String>) -> Option<serde_json::Value> {
    let mut overrides = serde_json::Map::new();
    if no_server {
        overrides.insert("expose_server_routes".to_string(), serde_json::Value::Bool(false));
    }
    if let Some(policy) = menu_population {
        overrides.insert("menu_population".to_string(), serde_json::Value::String(policy));
    }
    if overrides.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(overrides))
    }
}

fn run_render(
    client_path: Option<PathBuf>,
    server_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: Option<serde_json::Value>,
    principal: &RequestPrincipal,
    json_output: bool,
) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let effective = match EffectiveConfig::build(Some(path.as_path()), overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let registry = match client_path {
        Some(path) => match ClientRouteRegistry::load_file(&path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading client routes: {}", e);
                process::exit(1);
            }
        },
        None => ClientRouteRegistry::new(),
    };

    let mut emitter = ViewCatalogEmitter::new(effective.config, Arc::new(registry));
    if let Some(path) = server_path {
        match StaticServerRoutes::load_file(&path) {
            Ok(routes) => {
                emitter = emitter.with_server_source(Arc::new(FixedServerSource(Arc::new(routes))));
            }
            Err(e) => {
                eprintln!("Error loading server routes: {}", e);
                process::exit(1);
            }
        }
    }

    let catalog = match emitter.build_catalog(principal) {
        Merged::Catalog(merged) => merged.catalog,
        Merged::Empty => {
            eprintln!("No views to emit.");
            return;
        }
    };

    let output = if json_output {
        serialize(&catalog)
    } else {
        render_script(&catalog)
    };
    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_links(server_path: PathBuf, json_output: bool) {
    let routes = match StaticServerRoutes::load_file(&server_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading server routes: {}", e);
            process::exit(1);
        }
    };

    let groups = group_by_menu_link(routes.views().iter().cloned());
    let links: BTreeMap<&str, Vec<&str>> = groups
        .iter()
        .map(|(link, views)| (link.as_str(), views.iter().map(|view| view.route.as_str()).collect()))
        .collect();

    if json_output {
        match serde_json::to_string_pretty(&links) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        for (link, templates) in &links {
            println!("  {} <- {}", link, templates.join(", "));
        }
    }

    let duplicates: Vec<_> = links.iter().filter(|(_, templates)| templates.len() > 1).collect();
    if !duplicates.is_empty() {
        for (link, templates) in duplicates {
            eprintln!("Duplicate menu link '{}': {}", link, templates.join(", "));
        }
        process::exit(1);
    }
}
