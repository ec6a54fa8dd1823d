//! Stateless request builder and response parser for the clothing collection.
//!
//! # Design
//! `ClothingClient` holds only the collection URL. Each CRUD operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`; the `*_via` methods run
//! both through a `Transport`. Nothing here retries or falls back: every
//! failure goes back to the caller.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ClothingItem, ItemDraft, ItemId, Replacement};

/// Synchronous, stateless client for one REST collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingClient {
    collection_url: String,
}

impl ClothingClient {
    pub fn new(base_url: &str, resource: &str) -> Self {
        Self {
            collection_url: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                resource.trim_matches('/')
            ),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base, &config.resource)
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &ItemId) -> String {
        format!("{}/{}", self.collection_url, path_segment(id))
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_item(&self, id: &ItemId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST the draft; the payload never carries an id.
    pub fn build_create_item(&self, draft: &ItemDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// PUT the full record; `id` is echoed into the payload as given.
    pub fn build_replace_item(&self, id: &ItemId, draft: &ItemDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Replacement { id, draft })
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_item(&self, id: &ItemId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A 2xx with no body is read as an empty collection.
    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<ClothingItem>, ApiError> {
        Ok(decode(response)?.unwrap_or_default())
    }

    /// 404 and empty 2xx bodies both mean the record is absent.
    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Option<ClothingItem>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        decode(response)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<ClothingItem, ApiError> {
        let status = response.status;
        decode(response)?.ok_or(ApiError::MissingBody(status))
    }

    /// Any 2xx, with or without a body.
    pub fn parse_replace_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn list_items_via<T: Transport>(&self, transport: &mut T) -> Result<Vec<ClothingItem>, ApiError> {
        let response = send(transport, self.build_list_items())?;
        self.parse_list_items(response)
    }

    pub fn get_item_via<T: Transport>(
        &self,
        transport: &mut T,
        id: &ItemId,
    ) -> Result<Option<ClothingItem>, ApiError> {
        let response = send(transport, self.build_get_item(id))?;
        self.parse_get_item(response)
    }

    pub fn create_item_via<T: Transport>(
        &self,
        transport: &mut T,
        draft: &ItemDraft,
    ) -> Result<ClothingItem, ApiError> {
        let response = send(transport, self.build_create_item(draft)?)?;
        self.parse_create_item(response)
    }

    pub fn replace_item_via<T: Transport>(
        &self,
        transport: &mut T,
        id: &ItemId,
        draft: &ItemDraft,
    ) -> Result<(), ApiError> {
        let response = send(transport, self.build_replace_item(id, draft)?)?;
        self.parse_replace_item(response)
    }

    pub fn delete_item_via<T: Transport>(&self, transport: &mut T, id: &ItemId) -> Result<(), ApiError> {
        let response = send(transport, self.build_delete_item(id))?;
        self.parse_delete_item(response)
    }
}

/// Percent-encode `id` as exactly one path segment, so reserved characters
/// (`/`, `?`, `#`, spaces) and dot segments can never leave the collection.
fn path_segment(id: &ItemId) -> String {
    let raw = id.to_string();
    if raw == "." || raw == ".." {
        return raw.replace('.', "%2E");
    }
    // `byte_serialize` writes spaces as `+`; a literal `+` is already `%2B`.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn send<T: Transport>(transport: &mut T, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = request.method.as_str(), path = %request.path, "sending request");
    let response = transport.execute(request)?;
    debug!(status = response.status, "received response");
    Ok(response)
}

/// Map non-2xx statuses to `ApiError::Request`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Request {
        status: response.status,
        status_text: response.status_text.clone(),
        body: response.body.clone(),
    })
}

/// Check the status, then decode the body unless there is none.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, ApiError> {
    check_status(&response)?;
    if response.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}
