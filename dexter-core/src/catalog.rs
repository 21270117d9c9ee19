//! Remote catalog client.

use crate::error::CatalogError;
use crate::record::{Record, RecordId};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Public PokéAPI pokemon resource.
pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// JSON pointer of the image URL inside a catalog record.
pub const IMAGE_POINTER: &str = "/sprites/other/official-artwork/front_default";

/// Reads one record by identifier. One outbound request per call, no retries.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_record(&self, id: RecordId) -> Result<Record, CatalogError>;
}

#[derive(Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_record(&self, id: RecordId) -> Result<Record, CatalogError> {
        let url = self.record_url(id);
        tracing::debug!(%id, %url, "fetching catalog record");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(id, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { id });
        }
        if !status.is_success() {
            return Err(CatalogError::Transport {
                id,
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| transport(id, e))?;
        let value: Value = serde_json::from_slice(&body).map_err(|e| {
            CatalogError::MalformedResponse {
                id,
                reason: e.to_string(),
            }
        })?;
        parse_record(id, &value)
    }
}

fn transport(id: RecordId, err: reqwest::Error) -> CatalogError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    CatalogError::Transport { id, reason }
}

/// Extract a [`Record`] from a catalog JSON object.
///
/// The reported `id` must equal `requested`; records are cached under the
/// requested identifier.
pub fn parse_record(requested: RecordId, value: &Value) -> Result<Record, CatalogError> {
    let malformed = |reason: &str| CatalogError::MalformedResponse {
        id: requested,
        reason: reason.to_string(),
    };

    let id = value
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .and_then(RecordId::new)
        .ok_or_else(|| malformed("missing or invalid integer `id`"))?;
    if id != requested {
        return Err(CatalogError::MalformedResponse {
            id: requested,
            reason: format!("response is for id {}", id),
        });
    }
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing string `name`"))?;
    let image_url = value
        .pointer(IMAGE_POINTER)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing image url"))?;

    Ok(Record::new(id, name, image_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: u32) -> RecordId {
        RecordId::new(value).unwrap()
    }

    #[test]
    fn parses_catalog_shape() {
        let value = json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "sprites": {
                "front_default": "front.png",
                "other": { "official-artwork": { "front_default": "https://img/1.png" } }
            }
        });
        let record = parse_record(id(1), &value).unwrap();
        assert_eq!(record, Record::new(id(1), "bulbasaur", "https://img/1.png"));
    }

    #[test]
    fn missing_image_is_malformed() {
        let value = json!({ "id": 4, "name": "charmander", "sprites": { "front_default": "a.png" } });
        let err = parse_record(id(4), &value).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse { .. }));
        assert_eq!(err.id(), id(4));
    }

    #[test]
    fn non_integer_id_is_malformed() {
        let value = json!({
            "id": "4",
            "name": "charmander",
            "sprites": { "other": { "official-artwork": { "front_default": "a.png" } } }
        });
        assert!(matches!(
            parse_record(id(4), &value),
            Err(CatalogError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn mismatched_id_is_malformed() {
        let value = json!({
            "id": 132,
            "name": "ditto",
            "sprites": { "other": { "official-artwork": { "front_default": "a.png" } } }
        });
        let err = parse_record(id(25), &value).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse { .. }));
        assert_eq!(err.id(), id(25));
    }

    #[test]
    fn null_image_is_malformed() {
        let value = json!({
            "id": 10001,
            "name": "deoxys-attack",
            "sprites": { "other": { "official-artwork": { "front_default": null } } }
        });
        assert!(parse_record(id(10001), &value).is_err());
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = HttpCatalogClient::new("http://localhost:9/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/api");
        assert_eq!(client.record_url(id(25)), "http://localhost:9/api/25");
    }
}
