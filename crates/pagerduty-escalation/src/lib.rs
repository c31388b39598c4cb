//! Escalation policy client and data models for PagerDuty.
//!
//! Provides typed structures and an asynchronous client for escalation policies and the
//! ordered escalation rules nested inside them.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{EscalationClient, EscalationClientBuilder};
pub use models::{
    EscalationPolicy, EscalationRule, GetEscalationPolicyParams, GetEscalationRuleParams,
    ListEscalationPoliciesParams, ListEscalationRulesParams,
};

/// Convenient result alias that reuses the shared PagerDuty error type.
pub type Result<T> = pagerduty_core::Result<T>;
