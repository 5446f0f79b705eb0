//! Route Model Types
//!
//! Defines the view descriptor shared by the client and server route sources,
//! the catalog that maps route keys to descriptors, and the error registry
//! used across the merge pipeline.

pub mod catalog;
pub mod client;
pub mod error;
pub mod view;

pub use catalog::Catalog;
pub use client::ClientViewConfig;
pub use error::{CatalogError, ErrorCode};
pub use view::{MenuData, ParamKind, RouteParameters, ViewDescriptor};

/// File name of the generated client route tree.
pub const FILE_ROUTES_JSON: &str = "file-routes.json";
