//! Asynchronous escalation policy client implementation.

use crate::models::{
    EscalationPolicy, EscalationRule, GetEscalationPolicyParams, GetEscalationRuleParams,
    ListEscalationPoliciesParams, ListEscalationRulesParams,
};
use crate::Result;
use pagerduty_core::client::{ClientConfig, ServiceClientBuilder, DEFAULT_TIMEOUT};
use pagerduty_core::config::PagerDutyConfig;
use pagerduty_core::id::{EscalationPolicyId, EscalationRuleId};
use pagerduty_core::pagination::{ListMode, ListPage, PageRequest};
use pagerduty_core::{ResourceClient, ResourceType, Transport};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("pagerduty-escalation/", env!("CARGO_PKG_VERSION"));

/// Builder for [`EscalationClient`].
#[derive(Debug, Clone)]
pub struct EscalationClientBuilder {
    inner: ServiceClientBuilder,
}

impl EscalationClientBuilder {
    /// Create a builder for the specified base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder =
            ServiceClientBuilder::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT))?
                .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from a validated configuration.
    pub fn from_config(config: &PagerDutyConfig) -> Result<Self> {
        let mut builder = ServiceClientBuilder::from_config(config)?;
        if config.user_agent.is_none() {
            builder = builder.with_user_agent(USER_AGENT);
        }
        Ok(Self { inner: builder })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Authenticate with a REST API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Authenticate with an OAuth bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_bearer_token(token);
        self
    }

    /// Send a `From` header with the requester's e-mail.
    #[must_use]
    pub fn with_from(mut self, email: impl Into<String>) -> Self {
        self.inner = self.inner.with_from(email);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<EscalationClient> {
        let inner = self.inner.build()?;
        Ok(EscalationClient {
            resources: ResourceClient::from(inner),
        })
    }
}

/// Asynchronous client for escalation policies and their rules.
#[derive(Debug, Clone)]
pub struct EscalationClient {
    resources: ResourceClient,
}

impl EscalationClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        EscalationClientBuilder::new(base_url)?.build()
    }

    /// Start a builder for the base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<EscalationClientBuilder> {
        EscalationClientBuilder::new(base_url)
    }

    /// Share an existing resource client (and its transport).
    #[must_use]
    pub fn from_resource_client(resources: ResourceClient) -> Self {
        Self { resources }
    }

    /// Use a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::from_resource_client(ResourceClient::new(transport))
    }

    /// List escalation policies, one page or all pages depending on `mode`.
    ///
    /// Pagination fields left unset in `mode` are taken from `params.page`.
    pub async fn list_escalation_policies(
        &self,
        params: &ListEscalationPoliciesParams,
        mode: ListMode,
    ) -> Result<Vec<EscalationPolicy>> {
        let path = ResourceType::EscalationPolicy.collection_path();
        self.resources
            .list(&path, &params.to_filter_pairs(), mode.or_page(params.page))
            .await
    }

    /// Fetch the page described by `params.page`, with its pagination metadata.
    pub async fn list_escalation_policies_page(
        &self,
        params: &ListEscalationPoliciesParams,
    ) -> Result<ListPage<EscalationPolicy>> {
        let path = ResourceType::EscalationPolicy.collection_path();
        self.resources
            .list_page(&path, &params.to_filter_pairs(), params.page)
            .await
    }

    /// Create a new escalation policy.
    pub async fn create_escalation_policy(
        &self,
        policy: &EscalationPolicy,
    ) -> Result<EscalationPolicy> {
        let path = ResourceType::EscalationPolicy.collection_path();
        self.resources.create(&path, policy).await
    }

    /// Fetch an escalation policy and its rules.
    pub async fn get_escalation_policy(
        &self,
        id: &EscalationPolicyId,
        params: &GetEscalationPolicyParams,
    ) -> Result<EscalationPolicy> {
        self.resources
            .get(&policy_path(id), &params.to_pairs())
            .await
    }

    /// Update an escalation policy and its rules.
    pub async fn update_escalation_policy(
        &self,
        id: &EscalationPolicyId,
        policy: &EscalationPolicy,
    ) -> Result<EscalationPolicy> {
        self.resources.update(&policy_path(id), policy).await
    }

    /// Delete an escalation policy and its rules.
    pub async fn delete_escalation_policy(&self, id: &EscalationPolicyId) -> Result<()> {
        self.resources.delete(&policy_path(id)).await
    }

    /// List the rules of a policy in escalation order.
    pub async fn list_escalation_rules(
        &self,
        policy_id: &EscalationPolicyId,
        params: &ListEscalationRulesParams,
    ) -> Result<Vec<EscalationRule>> {
        self.resources
            .list(
                &rules_path(policy_id),
                &params.to_pairs(),
                ListMode::Page(PageRequest::new()),
            )
            .await
    }

    /// Create a rule; the API appends it after the policy's existing rules.
    pub async fn create_escalation_rule(
        &self,
        policy_id: &EscalationPolicyId,
        rule: &EscalationRule,
    ) -> Result<EscalationRule> {
        self.resources.create(&rules_path(policy_id), rule).await
    }

    /// Fetch one rule of a policy.
    pub async fn get_escalation_rule(
        &self,
        policy_id: &EscalationPolicyId,
        rule_id: &EscalationRuleId,
        params: &GetEscalationRuleParams,
    ) -> Result<EscalationRule> {
        self.resources
            .get(&rule_path(policy_id, rule_id), &params.to_pairs())
            .await
    }

    /// Update one rule of a policy.
    pub async fn update_escalation_rule(
        &self,
        policy_id: &EscalationPolicyId,
        rule_id: &EscalationRuleId,
        rule: &EscalationRule,
    ) -> Result<EscalationRule> {
        self.resources
            .update(&rule_path(policy_id, rule_id), rule)
            .await
    }

    /// Delete one rule of a policy.
    pub async fn delete_escalation_rule(
        &self,
        policy_id: &EscalationPolicyId,
        rule_id: &EscalationRuleId,
    ) -> Result<()> {
        self.resources
            .delete(&rule_path(policy_id, rule_id))
            .await
    }
}

fn policy_path(id: &EscalationPolicyId) -> String {
    ResourceType::EscalationPolicy.item_path(id.as_str())
}

fn rules_path(policy_id: &EscalationPolicyId) -> String {
    format!(
        "{}/{}",
        policy_path(policy_id),
        ResourceType::EscalationRule.collection_key()
    )
}

fn rule_path(policy_id: &EscalationPolicyId, rule_id: &EscalationRuleId) -> String {
    format!("{}/{rule_id}", rules_path(policy_id))
}
