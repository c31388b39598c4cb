//! Extension and extension schema models.

use pagerduty_core::pagination::PageRequest;
use pagerduty_core::query::{encode_pairs, QueryParams};
use pagerduty_core::{ApiObject, Error, Resource, ResourceType, Result};
use serde::{Deserialize, Serialize};

/// Sentinel written by [`ExtensionBuilder`] for fields the caller never set.
pub const PLACEHOLDER: &str = "PLACEHOLDER";

/// The kind of integration an extension implements (e.g. a generic webhook).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtensionSchema {
    /// Identity (`id`, `type`).
    #[serde(flatten)]
    pub object: ApiObject,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Machine key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Event types delivered to the endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub send_types: Vec<String>,
    /// Documentation URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ExtensionSchema {
    /// Reference a schema by ID.
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            object: ApiObject::reference(ResourceType::ExtensionSchema, id),
            ..Self::default()
        }
    }
}

impl Resource for ExtensionSchema {
    const KIND: ResourceType = ResourceType::ExtensionSchema;
}

/// A third-party integration attached to one or more services.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extension {
    /// Identity (`id`, `type`).
    #[serde(flatten)]
    pub object: ApiObject,
    /// Endpoint receiving webhook deliveries.
    #[serde(default)]
    pub endpoint_url: String,
    /// Extension name.
    #[serde(default)]
    pub name: String,
    /// Schema this extension implements.
    #[serde(default)]
    pub extension_schema: ExtensionSchema,
    /// Objects (usually services) the extension is attached to.
    #[serde(default)]
    pub extension_objects: Vec<ApiObject>,
}

impl Extension {
    /// Start building an extension.
    #[must_use]
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::new()
    }

    /// Server-assigned ID (empty before creation).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.object.id
    }

    /// Names of fields still holding [`PLACEHOLDER`].
    #[must_use]
    pub fn placeholder_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name == PLACEHOLDER {
            fields.push("name");
        }
        if self.endpoint_url == PLACEHOLDER {
            fields.push("endpoint_url");
        }
        if self.extension_schema.object.id == PLACEHOLDER {
            fields.push("extension_schema");
        }
        fields
    }
}

impl Resource for Extension {
    const KIND: ResourceType = ResourceType::Extension;
}

/// Staged builder for [`Extension`].
///
/// Each step consumes and returns the builder and is applied in call order. Scalar
/// steps overwrite earlier values; [`with_service`](Self::with_service) appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionBuilder {
    extension: Extension,
}

impl Default for ExtensionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionBuilder {
    /// Start with every required field set to [`PLACEHOLDER`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension: Extension {
                object: ApiObject::of_kind(ResourceType::Extension),
                endpoint_url: PLACEHOLDER.to_string(),
                name: PLACEHOLDER.to_string(),
                extension_schema: ExtensionSchema {
                    object: ApiObject::new(PLACEHOLDER, PLACEHOLDER),
                    ..ExtensionSchema::default()
                },
                extension_objects: Vec::new(),
            },
        }
    }

    /// Attach the extension to a service.
    #[must_use]
    pub fn with_service(mut self, service_id: impl Into<String>) -> Self {
        self.extension
            .extension_objects
            .push(ApiObject::reference(ResourceType::Service, service_id));
        self
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.extension.name = name.into();
        self
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.extension.endpoint_url = endpoint_url.into();
        self
    }

    /// Set the schema by ID.
    #[must_use]
    pub fn with_schema(mut self, schema_id: impl Into<String>) -> Self {
        self.extension.extension_schema = ExtensionSchema::reference(schema_id);
        self
    }

    /// Finish, keeping [`PLACEHOLDER`] in any field that was never set.
    #[must_use]
    pub fn build(self) -> Extension {
        self.extension
    }

    /// Finish, rejecting extensions that still carry placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] naming the unset fields.
    pub fn try_build(self) -> Result<Extension> {
        let missing = self.extension.placeholder_fields();
        if missing.is_empty() {
            Ok(self.extension)
        } else {
            Err(Error::ValidationError(format!(
                "extension fields not set: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Query parameters for listing extensions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListExtensionsParams {
    /// Filter by name.
    pub query: Option<String>,
    /// Only extensions attached to this object (e.g. a service ID).
    pub extension_object_id: Option<String>,
    /// Only extensions of this schema.
    pub extension_schema_id: Option<String>,
    /// Related records to include.
    pub include: Vec<String>,
    /// Pagination for single-page requests.
    pub page: PageRequest,
}

impl ListExtensionsParams {
    /// Filter pairs, excluding pagination.
    #[must_use]
    pub fn to_filter_pairs(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new();
        params.push_non_empty("query", self.query.as_deref());
        params.push_non_empty("extension_object_id", self.extension_object_id.as_deref());
        params.push_non_empty("extension_schema_id", self.extension_schema_id.as_deref());
        params.push_array("include", &self.include);
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

/// Query parameters for fetching a single extension.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GetExtensionParams {
    /// Related records to include.
    pub include: Vec<String>,
}

impl GetExtensionParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new();
        params.push_array("include", &self.include);
        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_defaults_to_placeholders() {
        let extension = ExtensionBuilder::new().build();
        assert_eq!(extension.name, PLACEHOLDER);
        assert_eq!(extension.endpoint_url, PLACEHOLDER);
        assert_eq!(extension.extension_schema.object.id, PLACEHOLDER);
        assert_eq!(extension.object.kind, "extension");
        assert!(extension.extension_objects.is_empty());
        assert_eq!(
            extension.placeholder_fields(),
            vec!["name", "endpoint_url", "extension_schema"]
        );
    }

    #[test]
    fn builder_last_write_wins() {
        let extension = Extension::builder()
            .with_name("first")
            .with_endpoint("https://a.example.com")
            .with_name("second")
            .build();
        assert_eq!(extension.name, "second");
        assert_eq!(extension.endpoint_url, "https://a.example.com");
    }

    #[test]
    fn builder_appends_services_in_order() {
        let extension = Extension::builder()
            .with_service("PSVC1")
            .with_service("PSVC2")
            .build();
        let ids: Vec<_> = extension
            .extension_objects
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["PSVC1", "PSVC2"]);
        assert!(extension
            .extension_objects
            .iter()
            .all(|o| o.kind == "service_reference"));
    }

    #[test]
    fn try_build_rejects_placeholders() {
        let err = Extension::builder()
            .with_name("Webhook")
            .try_build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::ValidationError(
                "extension fields not set: endpoint_url, extension_schema".to_string()
            )
        );

        let extension = Extension::builder()
            .with_name("Webhook")
            .with_endpoint("https://hooks.example.com")
            .with_schema("PJFWPEP")
            .try_build()
            .unwrap();
        assert!(extension.placeholder_fields().is_empty());
    }

    #[test]
    fn extension_serializes_api_shape() {
        let extension = Extension::builder()
            .with_name("Webhook")
            .with_endpoint("https://hooks.example.com")
            .with_schema("PJFWPEP")
            .with_service("PSVC1")
            .build();

        assert_eq!(
            serde_json::to_value(&extension).unwrap(),
            json!({
                "type": "extension",
                "endpoint_url": "https://hooks.example.com",
                "name": "Webhook",
                "extension_schema": {"id": "PJFWPEP", "type": "extension_schema_reference"},
                "extension_objects": [{"id": "PSVC1", "type": "service_reference"}]
            })
        );
    }

    #[test]
    fn list_params_encode_filters() {
        let params = ListExtensionsParams {
            extension_object_id: Some("PSVC1".into()),
            include: vec!["extension_schemas".into()],
            page: PageRequest::new().with_offset(0).with_limit(25),
            ..ListExtensionsParams::default()
        };
        assert_eq!(
            params.to_query_string(),
            "extension_object_id=PSVC1&include%5B%5D=extension_schemas&offset=0&limit=25"
        );
    }
}
