//! Escalation policy and rule models.

use pagerduty_core::pagination::PageRequest;
use pagerduty_core::query::{encode_pairs, QueryParams};
use pagerduty_core::{ApiObject, Resource, ResourceType};
use serde::{Deserialize, Serialize};

/// One step of an escalation policy: notify `targets` after a delay.
///
/// Rules only exist inside a policy, so every rule operation also takes the parent
/// policy ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscalationRule {
    /// Rule ID, assigned by the server.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Minutes to wait before escalating to the next rule.
    #[serde(
        rename = "escalation_delay_in_minutes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delay: Option<u32>,
    /// Users or schedules to notify, in order.
    #[serde(default)]
    pub targets: Vec<ApiObject>,
}

impl EscalationRule {
    /// Create a rule with a delay and no targets.
    #[must_use]
    pub fn new(delay_minutes: u32) -> Self {
        Self {
            delay: Some(delay_minutes),
            ..Self::default()
        }
    }

    /// Append a target reference.
    #[must_use]
    pub fn with_target(mut self, target: ApiObject) -> Self {
        self.targets.push(target);
        self
    }
}

impl Resource for EscalationRule {
    const KIND: ResourceType = ResourceType::EscalationRule;
}

/// An ordered collection of escalation rules plus the services and teams using it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscalationPolicy {
    /// Identity (`id`, `type`, server summary fields).
    #[serde(flatten)]
    pub object: ApiObject,
    /// Policy name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Rules in escalation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub escalation_rules: Vec<EscalationRule>,
    /// Services using this policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ApiObject>,
    /// Times the policy repeats after the last rule when `repeat_enabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_loops: Option<u32>,
    /// Teams owning the policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<ApiObject>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the policy loops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_enabled: Option<bool>,
}

impl EscalationPolicy {
    /// Create an unsaved policy with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object: ApiObject::of_kind(ResourceType::EscalationPolicy),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: EscalationRule) -> Self {
        self.escalation_rules.push(rule);
        self
    }

    /// Attach a service reference.
    #[must_use]
    pub fn with_service(mut self, service_id: impl Into<String>) -> Self {
        self.services.push(ApiObject::reference(ResourceType::Service, service_id));
        self
    }

    /// Attach a team reference.
    #[must_use]
    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.teams.push(ApiObject::reference(ResourceType::Team, team_id));
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enable repetition for `num_loops` loops.
    #[must_use]
    pub const fn with_repeat(mut self, num_loops: u32) -> Self {
        self.repeat_enabled = Some(true);
        self.num_loops = Some(num_loops);
        self
    }

    /// Server-assigned ID (empty before creation).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.object.id
    }
}

impl Resource for EscalationPolicy {
    const KIND: ResourceType = ResourceType::EscalationPolicy;
}

/// Query parameters for listing escalation policies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListEscalationPoliciesParams {
    /// Filter by name.
    pub query: Option<String>,
    /// Only policies targeting these users.
    pub user_ids: Vec<String>,
    /// Only policies owned by these teams.
    pub team_ids: Vec<String>,
    /// Related records to include (e.g. `services`, `teams`, `targets`).
    pub include: Vec<String>,
    /// Sort field, e.g. `name:desc`.
    pub sort_by: Option<String>,
    /// Pagination for single-page requests.
    pub page: PageRequest,
}

impl ListEscalationPoliciesParams {
    /// Filter pairs, excluding pagination.
    #[must_use]
    pub fn to_filter_pairs(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new();
        params.push_non_empty("query", self.query.as_deref());
        params.push_array("user_ids", &self.user_ids);
        params.push_array("team_ids", &self.team_ids);
        params.push_array("include", &self.include);
        params.push_non_empty("sort_by", self.sort_by.as_deref());
        params.into_pairs()
    }

    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.to_filter_pairs();
        pairs.extend(self.page.to_pairs());
        pairs
    }

    /// Encode as a query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_pairs())
    }
}

/// Query parameters for fetching a single escalation policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GetEscalationPolicyParams {
    /// Related records to include.
    pub include: Vec<String>,
}

impl GetEscalationPolicyParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        include_pairs(&self.include)
    }
}

/// Query parameters for fetching a single escalation rule.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GetEscalationRuleParams {
    /// Related records to include.
    pub include: Vec<String>,
}

impl GetEscalationRuleParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        include_pairs(&self.include)
    }
}

/// Query parameters for listing the rules of a policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListEscalationRulesParams {
    /// Related records to include.
    pub include: Vec<String>,
}

impl ListEscalationRulesParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        include_pairs(&self.include)
    }
}

fn include_pairs(include: &[String]) -> Vec<(String, String)> {
    let mut params = QueryParams::new();
    params.push_array("include", include);
    params.into_pairs()
}
