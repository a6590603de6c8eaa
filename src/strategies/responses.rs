use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::ExampleGenerator;
use crate::invoke::{invoke_with_timeout, SyntheticRequest};
use crate::model::{body_parameters_to_json, EndpointMetadata, ResponseExample};
use std::time::Duration;
use tracing::debug;

const JSON: &str = "application/json";

/// Example responses, resolved by a short-circuit sub-chain: literal
/// `@response` tags, then `@responseFile`, then an in-process handler
/// invocation, then the handler's declared transformer shape. The first
/// source that yields wins; a missing response file fails the route.
pub struct ResponseStrategy;

impl Strategy for ResponseStrategy {
    fn name(&self) -> &'static str {
        "responses"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[MetadataField::Responses]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        so_far: &EndpointMetadata,
        _examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let sources: [Source; 4] = [
            from_literal_tags,
            from_response_files,
            from_invocation,
            from_transformer_shape,
        ];
        for source in sources {
            if let Some(responses) = source(ctx, so_far)? {
                return Ok(Some(Fragment {
                    responses: Some(responses),
                    ..Fragment::default()
                }));
            }
        }
        Ok(None)
    }
}

type Source = fn(
    &StrategyContext<'_>,
    &EndpointMetadata,
) -> Result<Option<Vec<ResponseExample>>, StrategyError>;

/// `@response {json}` / `@response 400 {json}`; every literal tag becomes a
/// response example.
fn from_literal_tags(
    ctx: &StrategyContext<'_>,
    _so_far: &EndpointMetadata,
) -> Result<Option<Vec<ResponseExample>>, StrategyError> {
    let responses: Vec<ResponseExample> = ctx
        .doc
        .tag_values("response")
        .map(|value| {
            let (status, body) = split_status(value);
            ResponseExample {
                status,
                content_type: JSON.to_string(),
                body: body.to_string(),
                description: None,
            }
        })
        .collect();
    Ok((!responses.is_empty()).then_some(responses))
}

/// `@responseFile [status] <path>`, resolved against the configured
/// response-file directory. A missing file is a route failure; the reason
/// carries the filename verbatim.
fn from_response_files(
    ctx: &StrategyContext<'_>,
    _so_far: &EndpointMetadata,
) -> Result<Option<Vec<ResponseExample>>, StrategyError> {
    let mut responses = Vec::new();
    for value in ctx.doc.tag_values("responseFile") {
        let (status, file) = split_status(value);
        let file = file.trim();
        if file.is_empty() {
            return Err(StrategyError::MalformedTag {
                tag: "responseFile",
                reason: "missing file path".to_string(),
            });
        }
        let path = ctx.config.response_file_dir.join(file);
        if !path.exists() {
            return Err(StrategyError::ResponseFileMissing(file.to_string()));
        }
        let body = std::fs::read_to_string(&path).map_err(|err| {
            StrategyError::ResponseFileUnreadable {
                file: file.to_string(),
                reason: err.to_string(),
            }
        })?;
        responses.push(ResponseExample {
            status,
            content_type: JSON.to_string(),
            body,
            description: None,
        });
    }
    Ok((!responses.is_empty()).then_some(responses))
}

/// Best-effort in-process call; any failure degrades to the next source.
fn from_invocation(
    ctx: &StrategyContext<'_>,
    so_far: &EndpointMetadata,
) -> Result<Option<Vec<ResponseExample>>, StrategyError> {
    if !ctx.config.response_calls || !ctx.capabilities.invokable {
        return Ok(None);
    }
    let Some(invoker) = ctx.invoker else {
        return Ok(None);
    };

    let request = synthesize_request(ctx, so_far);
    let timeout = Duration::from_millis(ctx.config.invoke_timeout_ms);
    match invoke_with_timeout(invoker, &ctx.route.handler, request, timeout) {
        Ok(response) => Ok(Some(vec![ResponseExample {
            status: response.status,
            content_type: response.content_type,
            body: response.body,
            description: None,
        }])),
        Err(err) => {
            debug!(route = %ctx.route.uri, error = %err, "response call failed, degrading");
            Ok(None)
        }
    }
}

fn from_transformer_shape(
    ctx: &StrategyContext<'_>,
    _so_far: &EndpointMetadata,
) -> Result<Option<Vec<ResponseExample>>, StrategyError> {
    Ok(ctx.capabilities.transformer_shape.as_ref().map(|shape| {
        vec![ResponseExample {
            status: 200,
            content_type: JSON.to_string(),
            body: serde_json::to_string_pretty(shape).unwrap_or_else(|_| "null".to_string()),
            description: None,
        }]
    }))
}

fn synthesize_request(ctx: &StrategyContext<'_>, so_far: &EndpointMetadata) -> SyntheticRequest {
    let mut uri = ctx.route.uri.clone();
    for param in &so_far.url_parameters {
        let value = plain_value(&param.example);
        uri = uri
            .replace(&format!("{{{}}}", param.name), &value)
            .replace(&format!("{{{}?}}", param.name), &value);
    }
    SyntheticRequest {
        method: ctx
            .route
            .methods
            .first()
            .cloned()
            .unwrap_or(http::Method::GET),
        uri,
        headers: so_far.headers.clone(),
        query: so_far
            .query_parameters
            .iter()
            .map(|p| (p.name.clone(), plain_value(&p.example)))
            .collect(),
        body: so_far
            .has_body()
            .then(|| body_parameters_to_json(&so_far.body_parameters)),
    }
}

fn plain_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split a leading three-digit status code off a tag value; default 200.
fn split_status(value: &str) -> (u16, &str) {
    let trimmed = value.trim_start();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    if let Some(first) = parts.next() {
        if first.len() == 3 && first.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(status) = first.parse() {
                return (status, parts.next().unwrap_or_default().trim_start());
            }
        }
    }
    (200, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::{HandlerInvoker, InvokeError, InvokedResponse};
    use crate::route::HandlerRef;
    use crate::strategies::testing::{context_parts, contribute, contribute_with};
    use crate::strategies::StrategyContext;
    use std::sync::Arc;

    #[test]
    fn literal_tags_win_and_all_are_collected() {
        let parts = context_parts(
            "@response {\"id\": 4}\n@response 400 {\"message\": \"invalid\"}\n@responseFile never-checked.json",
        );
        let fragment = contribute(&ResponseStrategy, &parts).unwrap().unwrap();
        let responses = fragment.responses.unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].status, 200);
        assert_eq!(responses[1].status, 400);
        assert!(responses[1].body.contains("invalid"));
    }

    #[test]
    fn missing_response_file_fails_the_route_with_the_filename() {
        let parts = context_parts("@responseFile i-do-not-exist.json");
        let err = contribute(&ResponseStrategy, &parts).unwrap_err();
        assert_eq!(
            err.to_string(),
            "@responseFile i-do-not-exist.json does not exist"
        );
    }

    #[test]
    fn response_file_contents_are_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("user.json"), "{\"name\": \"Tested\"}").unwrap();
        let mut parts = context_parts("@responseFile user.json");
        parts.config.response_file_dir = dir.path().to_path_buf();
        let fragment = contribute(&ResponseStrategy, &parts).unwrap().unwrap();
        let responses = fragment.responses.unwrap();
        assert_eq!(responses[0].body, "{\"name\": \"Tested\"}");
    }

    #[test]
    fn transformer_shape_is_the_last_resort() {
        let mut parts = context_parts("");
        parts.capabilities.transformer_shape = Some(serde_json::json!({"id": 1}));
        let fragment = contribute(&ResponseStrategy, &parts).unwrap().unwrap();
        let responses = fragment.responses.unwrap();
        assert_eq!(responses[0].status, 200);
        assert!(responses[0].body.contains("\"id\""));
    }

    #[test]
    fn no_source_yields_no_contribution() {
        let parts = context_parts("Just a title.");
        assert!(contribute(&ResponseStrategy, &parts).unwrap().is_none());
    }

    struct Failing;

    impl HandlerInvoker for Failing {
        fn invoke(
            &self,
            _handler: &HandlerRef,
            _request: SyntheticRequest,
        ) -> Result<InvokedResponse, InvokeError> {
            Err(InvokeError::Failed("database offline".to_string()))
        }
    }

    #[test]
    fn failed_invocation_degrades_to_the_transformer_shape() {
        let mut parts = context_parts("");
        parts.capabilities.invokable = true;
        parts.capabilities.transformer_shape = Some(serde_json::json!({"ok": true}));
        let invoker: Arc<dyn HandlerInvoker> = Arc::new(Failing);
        let ctx = StrategyContext {
            route: &parts.route,
            doc: &parts.doc,
            capabilities: &parts.capabilities,
            apply: &parts.apply,
            config: &parts.config,
            invoker: Some(&invoker),
        };
        let mut examples = crate::example::ExampleGenerator::new(0);
        let fragment = ResponseStrategy
            .contribute(&ctx, &EndpointMetadata::default(), &mut examples)
            .unwrap()
            .unwrap();
        assert!(fragment.responses.unwrap()[0].body.contains("ok"));
    }

    #[test]
    fn utf8_response_bodies_pass_through() {
        let parts = context_parts("@response {\"text\": \"Лорем ипсум долор сит амет\"}");
        let fragment = contribute_with(&ResponseStrategy, &parts, &EndpointMetadata::default())
            .unwrap()
            .unwrap();
        assert!(fragment.responses.unwrap()[0]
            .body
            .contains("Лорем ипсум долор сит амет"));
    }
}
