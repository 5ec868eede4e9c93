//! Vendor catalog and model resolution for apikeep.
//!
//! This crate provides:
//! - A registry of AI vendors with endpoints, preset models and probe strategies
//! - A resolver that validates a credential and lists the models it can use
//! - Credential management for API keys
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                ModelCatalogResolver                  │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  │
//! │  │   Listing   │  │  Synthetic  │  │ Static-only │  │
//! │  │    probe    │  │    probe    │  │   presets   │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────┘
//!            │                               │
//!            ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────┐
//! │      VendorRegistry      │   │    ProbeTransport    │
//! │ (endpoints, presets,     │   │   (reqwest / stub)   │
//! │  strategies)             │   └──────────────────────┘
//! └──────────────────────────┘
//! ```

mod error;

pub mod auth;
pub mod query;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod suggest;
pub mod templates;

pub use error::{Error, Result};
pub use query::{CatalogSource, ModelCatalog, ModelQueryResult, QueryError, QueryErrorKind};
pub use registry::{VendorProfile, VendorRegistry};
pub use resolver::{ModelCatalogResolver, ResolveHandle, ResolverConfig};
