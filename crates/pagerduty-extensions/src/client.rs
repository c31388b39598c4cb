//! Asynchronous extension client implementation.

use crate::models::{Extension, ExtensionSchema, GetExtensionParams, ListExtensionsParams};
use crate::Result;
use pagerduty_core::client::{ClientConfig, ServiceClientBuilder, DEFAULT_TIMEOUT};
use pagerduty_core::config::PagerDutyConfig;
use pagerduty_core::id::{ExtensionId, ExtensionSchemaId};
use pagerduty_core::pagination::{ListMode, ListPage};
use pagerduty_core::{ResourceClient, ResourceType, Transport};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("pagerduty-extensions/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ExtensionClient`].
#[derive(Debug, Clone)]
pub struct ExtensionClientBuilder {
    inner: ServiceClientBuilder,
}

impl ExtensionClientBuilder {
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
    pub fn build(self) -> Result<ExtensionClient> {
        let inner = self.inner.build()?;
        Ok(ExtensionClient {
            resources: ResourceClient::from(inner),
        })
    }
}

/// Asynchronous client for extensions and extension schemas.
#[derive(Debug, Clone)]
pub struct ExtensionClient {
    resources: ResourceClient,
}

impl ExtensionClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ExtensionClientBuilder::new(base_url)?.build()
    }

    /// Start a builder for the base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ExtensionClientBuilder> {
        ExtensionClientBuilder::new(base_url)
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

    /// List extensions, one page or all pages depending on `mode`.
    ///
    /// Pagination fields left unset in `mode` are taken from `params.page`.
    pub async fn list_extensions(
        &self,
        params: &ListExtensionsParams,
        mode: ListMode,
    ) -> Result<Vec<Extension>> {
        let path = ResourceType::Extension.collection_path();
        self.resources
            .list(&path, &params.to_filter_pairs(), mode.or_page(params.page))
            .await
    }

    /// Fetch the page described by `params.page`, with its pagination metadata.
    pub async fn list_extensions_page(
        &self,
        params: &ListExtensionsParams,
    ) -> Result<ListPage<Extension>> {
        let path = ResourceType::Extension.collection_path();
        self.resources
            .list_page(&path, &params.to_filter_pairs(), params.page)
            .await
    }

    /// Create an extension.
    pub async fn create_extension(&self, extension: &Extension) -> Result<Extension> {
        let path = ResourceType::Extension.collection_path();
        self.resources.create(&path, extension).await
    }

    /// Fetch an extension.
    pub async fn get_extension(
        &self,
        id: &ExtensionId,
        params: &GetExtensionParams,
    ) -> Result<Extension> {
        let path = ResourceType::Extension.item_path(id.as_str());
        self.resources.get(&path, &params.to_pairs()).await
    }

    /// Update an extension.
    pub async fn update_extension(
        &self,
        id: &ExtensionId,
        extension: &Extension,
    ) -> Result<Extension> {
        let path = ResourceType::Extension.item_path(id.as_str());
        self.resources.update(&path, extension).await
    }

    /// Delete an extension.
    pub async fn delete_extension(&self, id: &ExtensionId) -> Result<()> {
        let path = ResourceType::Extension.item_path(id.as_str());
        self.resources.delete(&path).await
    }

    /// List the available extension schemas.
    pub async fn list_extension_schemas(&self, mode: ListMode) -> Result<Vec<ExtensionSchema>> {
        let path = ResourceType::ExtensionSchema.collection_path();
        self.resources.list(&path, &[], mode).await
    }

    /// Fetch an extension schema.
    pub async fn get_extension_schema(&self, id: &ExtensionSchemaId) -> Result<ExtensionSchema> {
        let path = ResourceType::ExtensionSchema.item_path(id.as_str());
        self.resources.get(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerduty_core::pagination::PageRequest;
    use pagerduty_core::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ExtensionClient {
        ExtensionClient::builder(server.uri())
            .unwrap()
            .with_token("test-token")
            .build()
            .unwrap()
    }

    fn extension_json(id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "type": "extension",
            "name": name,
            "endpoint_url": "https://hooks.example.com",
            "extension_schema": {"id": "PJFWPEP", "type": "extension_schema_reference"},
            "extension_objects": [{"id": "PSVC1", "type": "service_reference"}]
        })
    }

    #[tokio::test]
    async fn list_extensions_filters_by_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/extensions"))
            .and(query_param("extension_object_id", "PSVC1"))
            .and(query_param("offset", "0"))
            .and(header("Authorization", "Token token=test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extensions": [extension_json("PEXT1", "Webhook")],
                "limit": 25,
                "offset": 0,
                "more": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = ListExtensionsParams {
            extension_object_id: Some("PSVC1".into()),
            ..ListExtensionsParams::default()
        };
        let extensions = test_client(&server)
            .list_extensions(&params, ListMode::all())
            .await
            .unwrap();

        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].id(), "PEXT1");
        assert_eq!(extensions[0].extension_objects[0].id, "PSVC1");
    }

    #[tokio::test]
    async fn list_all_extensions_starts_at_params_page() {
        let server = MockServer::start().await;
        for (offset, id, more) in [("50", "PEXT1", true), ("51", "PEXT2", false)] {
            Mock::given(method("GET"))
                .and(path("/extensions"))
                .and(query_param("offset", offset))
                .and(query_param("limit", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "extensions": [extension_json(id, id)],
                    "limit": 1,
                    "offset": offset.parse::<u32>().unwrap(),
                    "more": more
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let params = ListExtensionsParams {
            page: PageRequest::new().with_offset(50).with_limit(1),
            ..ListExtensionsParams::default()
        };
        let extensions = test_client(&server)
            .list_extensions(&params, ListMode::all())
            .await
            .unwrap();

        let ids: Vec<_> = extensions.iter().map(Extension::id).collect();
        assert_eq!(ids, ["PEXT1", "PEXT2"]);
    }

    #[tokio::test]
    async fn list_extensions_page_returns_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/extensions"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extensions": [extension_json("PEXT1", "Webhook")],
                "limit": 1,
                "offset": 0,
                "more": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = ListExtensionsParams {
            page: PageRequest::new().with_limit(1),
            ..ListExtensionsParams::default()
        };
        let page = test_client(&server)
            .list_extensions_page(&params)
            .await
            .unwrap();
        assert!(page.has_more());
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn create_extension_wraps_payload() {
        let server = MockServer::start().await;
        let extension = Extension::builder()
            .with_name("Webhook")
            .with_endpoint("https://hooks.example.com")
            .with_schema("PJFWPEP")
            .with_service("PSVC1")
            .try_build()
            .unwrap();

        Mock::given(method("POST"))
            .and(path("/extensions"))
            .and(body_json(json!({ "extension": extension })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "extension": extension_json("PEXT1", "Webhook")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = test_client(&server)
            .create_extension(&extension)
            .await
            .unwrap();
        assert_eq!(created.id(), "PEXT1");
        assert_eq!(created.name, extension.name);
        assert_eq!(created.extension_objects, extension.extension_objects);
    }

    #[tokio::test]
    async fn get_update_delete_extension() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/extensions/PEXT1"))
            .and(query_param("include[]", "extension_schemas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extension": extension_json("PEXT1", "Webhook")
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/extensions/PEXT1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extension": extension_json("PEXT1", "Renamed")
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/extensions/PEXT1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let id = ExtensionId::parse_str("PEXT1").unwrap();
        let params = GetExtensionParams {
            include: vec!["extension_schemas".into()],
        };

        let mut extension = client.get_extension(&id, &params).await.unwrap();
        extension.name = "Renamed".into();
        let updated = client.update_extension(&id, &extension).await.unwrap();
        assert_eq!(updated.name, "Renamed");

        client.delete_extension(&id).await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_extension_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/extensions/PNOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"message": "Not Found", "code": 2100}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_extension(
                &ExtensionId::parse_str("PNOPE").unwrap(),
                &GetExtensionParams::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn extension_schemas() {
        let server = MockServer::start().await;
        let schema = json!({
            "id": "PJFWPEP",
            "type": "extension_schema",
            "label": "Generic V2 Webhook",
            "key": "generic_v2_webhook",
            "send_types": ["trigger", "acknowledge", "resolve"]
        });
        Mock::given(method("GET"))
            .and(path("/extension_schemas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extension_schemas": [schema.clone()],
                "limit": 25,
                "offset": 0,
                "more": false
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/extension_schemas/PJFWPEP"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "extension_schema": schema })),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let schemas = client.list_extension_schemas(ListMode::all()).await.unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].send_types.len(), 3);

        let fetched = client
            .get_extension_schema(&ExtensionSchemaId::parse_str("PJFWPEP").unwrap())
            .await
            .unwrap();
        assert_eq!(fetched, schemas[0]);
        assert_eq!(fetched.label.as_deref(), Some("Generic V2 Webhook"));
    }

    #[tokio::test]
    async fn create_extension_reports_validation_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/extensions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "message": "Invalid Input Provided",
                    "code": 2001,
                    "errors": ["Extension Schema not found."]
                }
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .create_extension(&Extension::builder().build())
            .await
            .unwrap_err();

        match err {
            Error::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid Input Provided");
                assert_eq!(
                    body.unwrap().errors,
                    vec!["Extension Schema not found.".to_string()]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
