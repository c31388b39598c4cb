//! Core PagerDuty domain types.
//!
//! This module provides the resource discriminator used to derive envelope keys and
//! collection paths, and the [`ApiObject`] identity reference shared by every record.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default PagerDuty REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

/// Media type requesting version 2 of the REST API
pub const ACCEPT_HEADER: &str = "application/vnd.pagerduty+json;version=2";

/// PagerDuty resource kinds known to this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Escalation policy
    EscalationPolicy,
    /// Escalation rule (nested under a policy)
    EscalationRule,
    /// Extension
    Extension,
    /// Extension schema
    ExtensionSchema,
    /// Service
    Service,
    /// User
    User,
    /// Team
    Team,
    /// On-call schedule
    Schedule,
}

impl ResourceType {
    /// Singular envelope key, also the `type` value of embedded records.
    #[must_use]
    pub const fn root_key(&self) -> &'static str {
        match self {
            Self::EscalationPolicy => "escalation_policy",
            Self::EscalationRule => "escalation_rule",
            Self::Extension => "extension",
            Self::ExtensionSchema => "extension_schema",
            Self::Service => "service",
            Self::User => "user",
            Self::Team => "team",
            Self::Schedule => "schedule",
        }
    }

    /// Plural envelope key used by list responses.
    #[must_use]
    pub const fn collection_key(&self) -> &'static str {
        match self {
            Self::EscalationPolicy => "escalation_policies",
            Self::EscalationRule => "escalation_rules",
            Self::Extension => "extensions",
            Self::ExtensionSchema => "extension_schemas",
            Self::Service => "services",
            Self::User => "users",
            Self::Team => "teams",
            Self::Schedule => "schedules",
        }
    }

    /// `type` value used when the resource is referenced rather than embedded.
    #[must_use]
    pub const fn reference_type(&self) -> &'static str {
        match self {
            Self::EscalationPolicy => "escalation_policy_reference",
            Self::EscalationRule => "escalation_rule_reference",
            Self::Extension => "extension_reference",
            Self::ExtensionSchema => "extension_schema_reference",
            Self::Service => "service_reference",
            Self::User => "user_reference",
            Self::Team => "team_reference",
            Self::Schedule => "schedule_reference",
        }
    }

    /// Top-level collection path, e.g. `/escalation_policies`.
    ///
    /// Escalation rules have no top-level collection; their path is always
    /// nested under a policy.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection_key())
    }

    /// Path of a single resource inside its top-level collection.
    #[must_use]
    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{id}", self.collection_key())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = s.strip_suffix("_reference").unwrap_or(s);
        match kind {
            "escalation_policy" => Ok(Self::EscalationPolicy),
            "escalation_rule" => Ok(Self::EscalationRule),
            "extension" => Ok(Self::Extension),
            "extension_schema" => Ok(Self::ExtensionSchema),
            "service" => Ok(Self::Service),
            "user" => Ok(Self::User),
            "team" => Ok(Self::Team),
            "schedule" => Ok(Self::Schedule),
            _ => Err(Error::InvalidRequest(format!("Unknown resource type: {s}"))),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.root_key())
    }
}

/// Identity reference to a PagerDuty entity.
///
/// Records flatten this into their own JSON so `id` and `type` sit at the top level.
/// `summary`, `self` and `html_url` are read-only and only populated by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiObject {
    /// Identifier (empty for records not yet created)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Object type, e.g. `escalation_policy` or `user_reference`
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Short human-readable summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// API URL of the object
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Web UI URL of the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl ApiObject {
    /// Creates an identity with an explicit `type` string.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Creates a `*_reference` pointer to another resource.
    #[must_use]
    pub fn reference(resource: ResourceType, id: impl Into<String>) -> Self {
        Self::new(id, resource.reference_type())
    }

    /// Creates an identity for a record of the given kind that has no ID yet.
    #[must_use]
    pub fn of_kind(resource: ResourceType) -> Self {
        Self::new(String::new(), resource.root_key())
    }

    /// Parses the `type` field into a [`ResourceType`].
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not one this workspace knows about.
    pub fn resource_type(&self) -> Result<ResourceType> {
        self.kind.parse()
    }

    /// Returns true if the server has assigned an identifier.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
