//! Extension client and data models for PagerDuty.
//!
//! Extensions attach third-party integrations such as outbound webhooks to services.
//! The [`ExtensionBuilder`] assembles new extensions step by step.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ExtensionClient, ExtensionClientBuilder};
pub use models::{
    Extension, ExtensionBuilder, ExtensionSchema, GetExtensionParams, ListExtensionsParams,
    PLACEHOLDER,
};

/// Convenient result alias that reuses the shared PagerDuty error type.
pub type Result<T> = pagerduty_core::Result<T>;
