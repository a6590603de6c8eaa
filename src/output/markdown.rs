use super::RenderConfig;
use crate::errors::OutputError;
use crate::model::{
    body_parameters_to_json, EndpointMetadata, GroupKey, Parameter,
};
use askama::Template;

/// One group page: endpoint sections in endpoint order, parameters as
/// tables, a ready-to-run example exchange per endpoint.
#[derive(Template)]
#[template(path = "group.md.txt", escape = "none")]
struct GroupPageTemplate<'a> {
    group: &'a str,
    group_description: &'a str,
    endpoints: Vec<PageEndpoint>,
}

/// Pre-rendered endpoint section data; the template only assembles it.
struct PageEndpoint {
    title: String,
    description: String,
    authenticated: bool,
    curl: String,
    responses: Vec<PageResponse>,
    request_lines: Vec<String>,
    url_rows: Vec<ParamRow>,
    query_rows: Vec<ParamRow>,
    body_rows: Vec<ParamRow>,
}

struct PageResponse {
    status: u16,
    body: String,
}

struct ParamRow {
    name: String,
    ty: String,
    status: String,
    description: String,
}

/// `<sortIndex>-<slug>.md`, so a filesystem listing matches document order.
pub fn markdown_page_name(key: &GroupKey) -> String {
    format!("{}-{}.md", key.sort_index, slugify(&key.label))
}

/// Lowercased label with non-alphanumeric runs collapsed to `-`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub fn render_group_page(
    key: &GroupKey,
    endpoints: &[EndpointMetadata],
    config: &RenderConfig,
) -> Result<String, OutputError> {
    let template = GroupPageTemplate {
        group: &key.label,
        group_description: &key.description,
        endpoints: endpoints
            .iter()
            .map(|endpoint| page_endpoint(endpoint, config))
            .collect(),
    };
    template.render().map_err(|err| OutputError::Render {
        artifact: "markdown page",
        reason: err.to_string(),
    })
}

fn page_endpoint(endpoint: &EndpointMetadata, config: &RenderConfig) -> PageEndpoint {
    PageEndpoint {
        title: endpoint.display_title().to_string(),
        description: endpoint.description.clone(),
        authenticated: endpoint.authenticated,
        curl: curl_example(endpoint, config),
        responses: endpoint
            .responses
            .iter()
            .map(|r| PageResponse {
                status: r.status,
                body: r.body.clone(),
            })
            .collect(),
        request_lines: endpoint
            .methods
            .iter()
            .map(|m| format!("{} {}", m.as_str(), endpoint.uri))
            .collect(),
        url_rows: rows(&endpoint.url_parameters),
        query_rows: rows(&endpoint.query_parameters),
        body_rows: rows(&endpoint.body_parameters),
    }
}

fn rows(parameters: &[Parameter]) -> Vec<ParamRow> {
    parameters
        .iter()
        .map(|p| ParamRow {
            name: p.name.clone(),
            ty: p.ty.to_string(),
            status: if p.required { "required" } else { "optional" }.to_string(),
            description: p.description.replace('\n', " "),
        })
        .collect()
}

/// Ready-to-run curl invocation with the merged headers spelled out
/// verbatim and the example body attached when one exists.
fn curl_example(endpoint: &EndpointMetadata, config: &RenderConfig) -> String {
    let method = endpoint
        .methods
        .first()
        .map(|m| m.as_str())
        .unwrap_or("GET");

    let mut path = endpoint.uri.trim_start_matches('/').to_string();
    for param in &endpoint.url_parameters {
        let value = plain(&param.example);
        path = path
            .replace(&format!("{{{}?}}", param.name), &value)
            .replace(&format!("{{{}}}", param.name), &value);
    }
    let mut url = format!("{}://{}/{}", config.protocol(), config.host(), path);
    if !endpoint.query_parameters.is_empty() {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                endpoint
                    .query_parameters
                    .iter()
                    .map(|p| (p.name.clone(), plain(&p.example))),
            )
            .finish();
        url.push('?');
        url.push_str(&query);
    }

    let mut lines = Vec::new();
    if method == "GET" {
        lines.push(format!("curl -X GET -G \"{url}\""));
    } else {
        lines.push(format!("curl -X {method} \"{url}\""));
    }
    for (name, value) in &endpoint.headers {
        lines.push(format!("    -H \"{name}: {value}\""));
    }
    if endpoint.has_body() {
        let body = serde_json::to_string(&body_parameters_to_json(&endpoint.body_parameters))
            .unwrap_or_else(|_| "{}".to_string());
        lines.push(format!("    -d '{body}'"));
    }
    lines.join(" \\\n")
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
