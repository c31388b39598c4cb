//! # pagerduty-core
//!
//! Core types and HTTP plumbing shared by the PagerDuty API client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type, API error bodies and status classification
//! - [`id`] - Strongly-typed resource identifiers
//! - [`types`] - Resource discriminator and the `ApiObject` identity reference
//! - [`config`] - Validated client configuration
//! - [`client`] - HTTP transport, client configuration and request/response types
//! - [`query`] - Query-string builder with bracketed-array encoding
//! - [`pagination`] - Offset pagination metadata and list modes
//! - [`envelope`] - Root-key envelope wrapping and unwrapping
//! - [`resource`] - Generic list/get/create/update/delete over any resource type

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod id;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod types;

// Re-export commonly used types
pub use client::{ApiRequest, ApiResponse, ClientConfig, ServiceClient, ServiceClientBuilder, Transport};
pub use error::{ApiErrorBody, Error, Result};
pub use pagination::{ListMeta, ListMode, ListPage, PageRequest};
pub use query::QueryParams;
pub use resource::{Resource, ResourceClient};
pub use types::{ApiObject, ResourceType};
