//! Per-asset activity lookup
//!
//! For assets whose model category is in the configured set, the activity
//! log is fetched and rendered into a single string column. Failures are
//! contained to the asset: they are logged and the column stays empty.

use super::codes::{activity_type_name, VIEWED};
use crate::adapters::iiq::HelpdeskApi;
use crate::config::ActivityConfig;
use crate::core::transform::asset_category;
use crate::domain::{EntityRecord, IiqError, Result};
use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Fetches and renders device activity for eligible assets
pub struct DeviceActivityEnricher {
    api: Arc<dyn HelpdeskApi>,
    categories: HashSet<String>,
    max_delay_ms: u64,
}

impl DeviceActivityEnricher {
    pub fn new(api: Arc<dyn HelpdeskApi>, config: &ActivityConfig) -> Self {
        Self {
            api,
            categories: config.categories.iter().cloned().collect(),
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// Whether an asset of this category gets an activity lookup
    pub fn applies_to(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| self.categories.contains(c))
    }

    /// Activity summary for one asset
    ///
    /// Returns `None` for ineligible assets, empty responses and any
    /// failure. Never returns an error.
    pub async fn enrich(&self, record: &EntityRecord) -> Option<String> {
        if !self.applies_to(asset_category(record)) {
            return None;
        }

        let asset_id = record.identifier("AssetId");
        match self.summarize(record).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(
                    asset_id = %asset_id,
                    error = %e,
                    "Device activity lookup failed"
                );
                None
            }
        }
    }

    async fn summarize(&self, record: &EntityRecord) -> Result<Option<String>> {
        let asset_id = record
            .path_str("/AssetId")
            .ok_or_else(|| IiqError::Lookup("asset has no AssetId".to_string()))?;

        let response = self.api.fetch_asset_activities(asset_id).await;
        self.pause().await;

        match response? {
            Some(items) => render_activities(&items),
            None => Ok(None),
        }
    }

    /// Random pause between activity requests
    async fn pause(&self) {
        if self.max_delay_ms == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(0..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

/// Render activity entries into one string
///
/// "Viewed" entries are dropped and each remaining entry's numeric
/// `ActivityType` is replaced by its name. Entries are written as compact
/// JSON with literal `\r\n` escapes removed, separated by one space.
/// Nothing left to report yields `None`.
///
/// # Errors
///
/// Returns [`IiqError::Lookup`] if an entry is not an object, has no numeric
/// `ActivityType`, or carries a code outside the known table.
pub fn render_activities(items: &[Value]) -> Result<Option<String>> {
    let mut rendered = Vec::with_capacity(items.len());

    for item in items {
        let Value::Object(activity) = item else {
            return Err(IiqError::Lookup(format!(
                "activity entry is not an object: {item}"
            )));
        };

        let code = activity
            .get("ActivityType")
            .and_then(Value::as_i64)
            .ok_or_else(|| IiqError::Lookup("activity entry has no ActivityType".to_string()))?;
        if code == VIEWED {
            continue;
        }

        let name = activity_type_name(code)
            .ok_or_else(|| IiqError::Lookup(format!("unknown activity type code {code}")))?;

        let mut activity = activity.clone();
        activity.insert("ActivityType".to_string(), Value::String(name.to_string()));
        let text = serde_json::to_string(&activity)?;
        rendered.push(text.replace(r"\r\n", ""));
    }

    if rendered.is_empty() {
        return Ok(None);
    }
    Ok(Some(rendered.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::iiq::IiqClient;
    use crate::config::{secret_string, InstanceConfig};
    use serde_json::json;

    fn config() -> ActivityConfig {
        ActivityConfig {
            max_delay_ms: 0,
            ..ActivityConfig::default()
        }
    }

    fn client(base_url: &str) -> Arc<dyn HelpdeskApi> {
        let instance = InstanceConfig {
            base_url: base_url.to_string(),
            token: secret_string("test-token".to_string()),
            site_id: "site-1".to_string(),
            timeout_seconds: None,
        };
        Arc::new(IiqClient::new(&instance).unwrap())
    }

    fn chromebook(asset_id: &str) -> EntityRecord {
        EntityRecord::new(json!({
            "AssetId": asset_id,
            "Model": {"Category": {"Name": "Chromebooks"}}
        }))
    }

    #[test]
    fn test_render_skips_viewed() {
        let items = vec![
            json!({"ActivityType": 2, "Summary": "looked"}),
            json!({"ActivityType": 3, "Summary": "changed"}),
        ];
        let rendered = render_activities(&items).unwrap().unwrap();

        assert!(rendered.contains("\"ActivityType\":\"Updated\""));
        assert!(rendered.contains("changed"));
        assert!(!rendered.contains("Viewed"));
        assert!(!rendered.contains("looked"));
    }

    #[test]
    fn test_render_joins_with_space_and_strips_crlf() {
        let items = vec![
            json!({"ActivityType": 1, "Notes": "line one\r\nline two"}),
            json!({"ActivityType": 40}),
        ];
        let rendered = render_activities(&items).unwrap().unwrap();

        assert_eq!(
            rendered,
            r#"{"ActivityType":"Created","Notes":"line oneline two"} {"ActivityType":"SpareIssued"}"#
        );
    }

    #[test]
    fn test_render_unknown_code_is_lookup_error() {
        let items = vec![json!({"ActivityType": 3}), json!({"ActivityType": 99})];
        let err = render_activities(&items).unwrap_err();
        assert!(matches!(err, IiqError::Lookup(_)));
    }

    #[test]
    fn test_render_nothing_left() {
        assert_eq!(render_activities(&[]).unwrap(), None);
        assert_eq!(
            render_activities(&[json!({"ActivityType": 2})]).unwrap(),
            None
        );
    }

    #[test]
    fn test_applies_to_configured_categories() {
        let enricher = DeviceActivityEnricher::new(client("http://127.0.0.1:9"), &config());
        assert!(enricher.applies_to(Some("Chromebooks")));
        assert!(enricher.applies_to(Some("Laptops / Notebooks")));
        assert!(!enricher.applies_to(Some("Projectors")));
        assert!(!enricher.applies_to(None));
    }

    #[tokio::test]
    async fn test_enrich_chromebook_reports_only_updates() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1.0/assets/a-1/activities/")
            .with_status(200)
            .with_body(
                r#"{"Items": [{"ActivityType": 2, "Summary": "viewed"}, {"ActivityType": 3, "Summary": "updated"}]}"#,
            )
            .create_async()
            .await;

        let enricher = DeviceActivityEnricher::new(client(&server.url()), &config());
        let summary = enricher.enrich(&chromebook("a-1")).await.unwrap();

        assert_eq!(summary, r#"{"ActivityType":"Updated","Summary":"updated"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_enrich_skips_other_categories() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let projector = EntityRecord::new(json!({
            "AssetId": "a-2",
            "Model": {"Category": {"Name": "Projectors"}}
        }));
        let enricher = DeviceActivityEnricher::new(client(&server.url()), &config());

        assert_eq!(enricher.enrich(&projector).await, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_enrich_failure_is_contained() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1.0/assets/a-3/activities/")
            .with_status(503)
            .create_async()
            .await;

        let enricher = DeviceActivityEnricher::new(client(&server.url()), &config());
        assert_eq!(enricher.enrich(&chromebook("a-3")).await, None);
    }

    #[tokio::test]
    async fn test_enrich_unknown_code_is_contained() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1.0/assets/a-4/activities/")
            .with_status(200)
            .with_body(r#"{"Items": [{"ActivityType": 99}]}"#)
            .create_async()
            .await;

        let enricher = DeviceActivityEnricher::new(client(&server.url()), &config());
        assert_eq!(enricher.enrich(&chromebook("a-4")).await, None);
    }
}
