use super::RenderConfig;
use crate::errors::OutputError;
use crate::model::{body_parameters_to_json, EndpointMetadata, EndpointModel};
use serde::Serialize;

const SCHEMA_URL: &str = "https://schema.getpostman.com/json/collection/v2.0.0/collection.json";

/// Postman-compatible collection tree. Field order is fixed by struct
/// declaration, so serialization is byte-stable; `_postman_id` is the single
/// randomized field, a fresh ULID per run.
#[derive(Debug, Serialize)]
pub struct PostmanCollection {
    pub info: CollectionInfo,
    pub item: Vec<CollectionFolder>,
}

#[derive(Debug, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub description: String,
    pub schema: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionFolder {
    pub name: String,
    pub description: String,
    pub item: Vec<RequestItem>,
}

#[derive(Debug, Serialize)]
pub struct RequestItem {
    pub name: String,
    pub request: RequestSpec,
    pub response: Vec<ResponseItem>,
}

#[derive(Debug, Serialize)]
pub struct RequestSpec {
    pub method: String,
    pub header: Vec<HeaderEntry>,
    pub url: UrlSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySpec>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct UrlSpec {
    pub protocol: String,
    pub host: String,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryEntry>,
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct QueryEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct BodySpec {
    pub mode: String,
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseItem {
    pub name: String,
    pub code: u16,
    #[serde(rename = "_postman_previewlanguage")]
    pub preview_language: String,
    pub body: String,
}

/// Build the collection tree: one folder per group in group order, one
/// request item per endpoint in endpoint order.
pub fn build_collection(model: &EndpointModel, config: &RenderConfig) -> PostmanCollection {
    PostmanCollection {
        info: CollectionInfo {
            name: config.title.clone(),
            postman_id: ulid::Ulid::new().to_string(),
            description: String::new(),
            schema: SCHEMA_URL.to_string(),
        },
        item: model
            .groups
            .iter()
            .map(|(key, endpoints)| CollectionFolder {
                name: key.label.clone(),
                description: key.description.clone(),
                item: endpoints
                    .iter()
                    .map(|endpoint| request_item(endpoint, config))
                    .collect(),
            })
            .collect(),
    }
}

/// Serialize with a trailing newline, ready for the staged write.
pub fn render_collection(model: &EndpointModel, config: &RenderConfig) -> Result<String, OutputError> {
    let collection = build_collection(model, config);
    serde_json::to_string_pretty(&collection)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|err| OutputError::Render {
            artifact: "collection",
            reason: err.to_string(),
        })
}

fn request_item(endpoint: &EndpointMetadata, config: &RenderConfig) -> RequestItem {
    let method = endpoint
        .methods
        .first()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "GET".to_string());
    let path = endpoint.uri.trim_start_matches('/').to_string();
    let query: Vec<QueryEntry> = endpoint
        .query_parameters
        .iter()
        .map(|p| QueryEntry {
            key: p.name.clone(),
            value: plain(&p.example),
        })
        .collect();
    let raw = {
        let mut raw = format!("{}://{}/{}", config.protocol(), config.host(), path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|q| format!("{}={}", q.key, q.value))
                .collect();
            raw.push('?');
            raw.push_str(&pairs.join("&"));
        }
        raw
    };
    let body = endpoint.has_body().then(|| BodySpec {
        mode: "raw".to_string(),
        raw: serde_json::to_string_pretty(&body_parameters_to_json(&endpoint.body_parameters))
            .unwrap_or_else(|_| "{}".to_string()),
    });

    RequestItem {
        name: endpoint.display_title().to_string(),
        request: RequestSpec {
            method,
            header: endpoint
                .headers
                .iter()
                .map(|(key, value)| HeaderEntry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
            url: UrlSpec {
                protocol: config.protocol().to_string(),
                host: config.host(),
                path,
                query,
                raw,
            },
            body,
            description: endpoint.description.clone(),
        },
        response: endpoint
            .responses
            .iter()
            .map(|r| ResponseItem {
                name: r
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Example response ({})", r.status)),
                code: r.status,
                preview_language: "json".to_string(),
                body: r.body.clone(),
            })
            .collect(),
    }
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
