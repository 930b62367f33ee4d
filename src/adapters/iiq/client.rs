//! Incident IQ HTTP client
//!
//! Thin reqwest wrapper that sends the platform's auth headers, turns
//! non-success statuses into [`ApiError::RequestFailed`] and decodes the
//! `{"Items": [...]}` envelope.

use super::api::HelpdeskApi;
use super::models::{activities_endpoint, BulkQuery, CustomFieldDefinition, ItemsEnvelope};
use crate::config::InstanceConfig;
use crate::domain::{ApiError, EntityRecord, IiqError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for one Incident IQ instance
///
/// Built once per process from [`InstanceConfig`] and shared by every sync.
///
/// # Example
///
/// ```no_run
/// use iiq_export::adapters::iiq::IiqClient;
/// use iiq_export::config::load_config;
///
/// # fn example() -> iiq_export::domain::Result<()> {
/// let config = load_config("iiq.toml")?;
/// let client = IiqClient::new(&config.instance)?;
/// # Ok(())
/// # }
/// ```
pub struct IiqClient {
    /// Base URL without a trailing slash
    base_url: String,

    /// HTTP client carrying the default auth headers
    client: Client,
}

impl IiqClient {
    /// Create a client from instance configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token or site id cannot be used
    /// as a header value, or if the HTTP client cannot be built.
    pub fn new(config: &InstanceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&config.token.expose_secret().bearer())
            .map_err(|e| IiqError::Configuration(format!("Invalid instance.token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let site = HeaderValue::from_str(&config.site_id)
            .map_err(|e| IiqError::Configuration(format!("Invalid instance.site_id: {e}")))?;
        headers.insert("SiteId", site);
        headers.insert("Client", HeaderValue::from_static("ApiClient"));

        let mut builder = ClientBuilder::new().default_headers(headers);
        if let Some(timeout) = request_timeout(config) {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| {
                IiqError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!(endpoint = %endpoint, error = %e, "Request could not be sent");
            ApiError::ConnectionFailed {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "Request to {} failed with status code {}",
                endpoint,
                status.as_u16()
            );
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            }
            .into());
        }

        let bytes = resp.bytes().await.map_err(|e| ApiError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }

    /// POST a bulk query and decode its `Items`
    async fn post_items<T: DeserializeOwned>(&self, query: &BulkQuery) -> Result<Vec<T>> {
        let endpoint = query.endpoint();
        tracing::info!(endpoint = %endpoint, method = "POST", "Pulling data");

        let request = self.client.post(self.url(&endpoint)).json(&query.body);
        let body = self.send(&endpoint, request).await?;

        let envelope: ItemsEnvelope<T> =
            serde_json::from_slice(&body).map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            endpoint = %endpoint,
            count = envelope.items.len(),
            "Decoded response items"
        );

        Ok(envelope.items)
    }
}

/// Configured whole-request timeout, `None` leaves reqwest's default
fn request_timeout(config: &InstanceConfig) -> Option<Duration> {
    config.timeout_seconds.map(Duration::from_secs)
}

#[async_trait]
impl HelpdeskApi for IiqClient {
    async fn fetch_records(&self, query: &BulkQuery) -> Result<Vec<EntityRecord>> {
        let items: Vec<Value> = self.post_items(query).await?;
        Ok(items.into_iter().map(EntityRecord::new).collect())
    }

    async fn fetch_custom_field_definitions(
        &self,
        query: &BulkQuery,
    ) -> Result<Vec<CustomFieldDefinition>> {
        self.post_items(query).await
    }

    async fn fetch_asset_activities(&self, asset_id: &str) -> Result<Option<Vec<Value>>> {
        let endpoint = activities_endpoint(asset_id);
        tracing::debug!(endpoint = %endpoint, method = "GET", "Pulling data");

        let request = self.client.get(self.url(&endpoint));
        let body = self.send(&endpoint, request).await?;
        if body.is_empty() {
            return Ok(None);
        }

        let data: Value = serde_json::from_slice(&body).map_err(|e| ApiError::InvalidResponse {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        let items = data
            .get("Items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(Some(items))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, SyncConfig};
    use crate::domain::EntityKind;
    use mockito::Matcher;
    use serde_json::json;

    fn config(base_url: &str) -> InstanceConfig {
        InstanceConfig {
            base_url: base_url.to_string(),
            token: secret_string("test-token".to_string()),
            site_id: "site-1".to_string(),
            timeout_seconds: None,
        }
    }

    #[test]
    fn test_request_timeout_only_when_configured() {
        let mut cfg = config("https://district.incidentiq.com");
        assert_eq!(request_timeout(&cfg), None);
        assert!(IiqClient::new(&cfg).is_ok());

        cfg.timeout_seconds = Some(600);
        assert_eq!(request_timeout(&cfg), Some(Duration::from_secs(600)));
        assert!(IiqClient::new(&cfg).is_ok());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = IiqClient::new(&config("https://district.incidentiq.com/")).unwrap();
        assert_eq!(client.base_url(), "https://district.incidentiq.com");
        assert_eq!(
            client.url("/api/v1.0/users/"),
            "https://district.incidentiq.com/api/v1.0/users/"
        );
    }

    #[test]
    fn test_client_rejects_bad_header_value() {
        let mut cfg = config("https://district.incidentiq.com");
        cfg.site_id = "bad\nsite".to_string();
        let result = IiqClient::new(&cfg);
        assert!(matches!(result, Err(IiqError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_fetch_records_sends_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"^/api/v1\.0/assets/".to_string()))
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer test-token")
            .match_header("siteid", "site-1")
            .match_header("client", "ApiClient")
            .match_body(Matcher::PartialJson(json!({"Strategy": "AggregateAsset"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Items": [{"AssetId": "a-1"}, {"AssetId": "a-2"}]}"#)
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let query = BulkQuery::records(EntityKind::Asset, &SyncConfig::default());
        let records = client.fetch_records(&query).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].field("AssetId"), json!("a-2"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_records_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/api/v1\.0/tickets/".to_string()))
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let query = BulkQuery::records(EntityKind::Ticket, &SyncConfig::default());
        let err = client.fetch_records(&query).await.unwrap_err();

        match err {
            IiqError::Api(api) => {
                assert_eq!(api.status(), Some(500));
                assert!(api.endpoint().starts_with("/api/v1.0/tickets/"));
            }
            other => panic!("Expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_records_missing_items_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/api/v1\.0/users/".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Message": "nothing here"}"#)
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let query = BulkQuery::records(EntityKind::User, &SyncConfig::default());
        let err = client.fetch_records(&query).await.unwrap_err();

        assert!(matches!(
            err,
            IiqError::Api(ApiError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_custom_field_definitions() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/api/v1\.0/custom-fields".to_string()))
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({"Strategy": "AggregateTicket"})))
            .with_status(200)
            .with_body(
                r#"{"Items": [{"CustomFieldTypeId": "cf-1", "CustomFieldType": {"Name": "Payments Stripe"}}]}"#,
            )
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let query = BulkQuery::custom_fields(EntityKind::Ticket, &SyncConfig::default());
        let definitions = client.fetch_custom_field_definitions(&query).await.unwrap();

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name(), Some("Payments Stripe"));
    }

    #[tokio::test]
    async fn test_fetch_asset_activities() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1.0/assets/a-1/activities/")
            .with_status(200)
            .with_body(r#"{"Items": [{"ActivityType": 3}]}"#)
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let items = client.fetch_asset_activities("a-1").await.unwrap();

        assert_eq!(items, Some(vec![json!({"ActivityType": 3})]));
    }

    #[tokio::test]
    async fn test_fetch_asset_activities_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1.0/assets/a-2/activities/")
            .with_status(200)
            .create_async()
            .await;

        let client = IiqClient::new(&config(&server.url())).unwrap();
        let items = client.fetch_asset_activities("a-2").await.unwrap();

        assert_eq!(items, None);
    }
}
