//! Extraction strategies.
//!
//! A strategy is a single-purpose unit contributing one kind of metadata to
//! an endpoint. Strategies declare which fields they own; the pipeline
//! rejects a strategy set where two strategies own the same field without a
//! merge policy, at construction, before any route is processed. During a
//! run each strategy sees the metadata accumulated so far but the driver
//! applies its fragment, so an owned field is never silently overwritten.

mod body_params;
mod headers;
mod metadata;
mod query_params;
mod responses;
mod tagparse;
mod url_params;

pub use body_params::BodyParamStrategy;
pub use headers::{merge_headers, HeaderStrategy};
pub use metadata::MetadataStrategy;
pub use query_params::QueryParamStrategy;
pub use responses::ResponseStrategy;
pub use url_params::UrlParamStrategy;

use crate::config::GeneratorConfig;
use crate::docblock::ParsedDocBlock;
use crate::errors::{ConfigError, StrategyError};
use crate::example::ExampleGenerator;
use crate::invoke::HandlerInvoker;
use crate::matcher::ApplyPayload;
use crate::model::{EndpointMetadata, Parameter, ResponseExample};
use crate::route::{HandlerCapabilities, RouteDescriptor};
use std::sync::Arc;

/// The metadata fields a strategy can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Description,
    Group,
    GroupDescription,
    Authentication,
    UrlParameters,
    QueryParameters,
    BodyParameters,
    Headers,
    Responses,
}

impl MetadataField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Description => "description",
            MetadataField::Group => "group",
            MetadataField::GroupDescription => "group description",
            MetadataField::Authentication => "authentication",
            MetadataField::UrlParameters => "URL parameters",
            MetadataField::QueryParameters => "query parameters",
            MetadataField::BodyParameters => "body parameters",
            MetadataField::Headers => "headers",
            MetadataField::Responses => "responses",
        }
    }
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial metadata produced by one strategy. `None` fields are untouched.
#[derive(Debug, Default)]
pub struct Fragment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub group_description: Option<String>,
    pub authenticated: Option<bool>,
    pub url_parameters: Option<Vec<Parameter>>,
    pub query_parameters: Option<Vec<Parameter>>,
    pub body_parameters: Option<Vec<Parameter>>,
    pub headers: Option<Vec<(String, String)>>,
    pub responses: Option<Vec<ResponseExample>>,
}

/// Everything a strategy may read for one route.
pub struct StrategyContext<'a> {
    pub route: &'a RouteDescriptor,
    pub doc: &'a ParsedDocBlock,
    pub capabilities: &'a HandlerCapabilities,
    /// Payload of the first match rule that claimed the route.
    pub apply: &'a ApplyPayload,
    pub config: &'a GeneratorConfig,
    pub invoker: Option<&'a Arc<dyn HandlerInvoker>>,
}

/// One extraction unit. Pure with respect to the pipeline: reads the
/// context and accumulated metadata, returns a fragment or nothing, and
/// reports failures as typed errors for the driver to judge.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn owned_fields(&self) -> &'static [MetadataField];

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        so_far: &EndpointMetadata,
        examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError>;
}

/// An ordered strategy chain with its (optional) merge policies.
pub struct StrategySet {
    strategies: Vec<Box<dyn Strategy>>,
    merge_allowed: Vec<MetadataField>,
}

impl StrategySet {
    /// The built-in chain in its documented order.
    pub fn default_chain() -> Self {
        Self {
            strategies: vec![
                Box::new(MetadataStrategy),
                Box::new(UrlParamStrategy),
                Box::new(QueryParamStrategy),
                Box::new(BodyParamStrategy),
                Box::new(HeaderStrategy),
                Box::new(ResponseStrategy),
            ],
            merge_allowed: Vec::new(),
        }
    }

    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            strategies,
            merge_allowed: Vec::new(),
        }
    }

    /// Declare an explicit merge policy for a field, allowing two owners:
    /// list fields concatenate, scalar fields take the later value.
    pub fn allow_merge(mut self, field: MetadataField) -> Self {
        self.merge_allowed.push(field);
        self
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    /// Reject conflicting field ownership up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, first) in self.strategies.iter().enumerate() {
            for second in &self.strategies[i + 1..] {
                for field in first.owned_fields() {
                    if second.owned_fields().contains(field)
                        && !self.merge_allowed.contains(field)
                    {
                        return Err(ConfigError::ConflictingOwnership {
                            first: first.name().to_string(),
                            second: second.name().to_string(),
                            field: field.as_str(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fold one fragment into the endpoint record. List fields concatenate when
/// a merge policy allowed a second owner; scalars take the later value.
pub fn apply_fragment(metadata: &mut EndpointMetadata, fragment: Fragment) {
    if let Some(title) = fragment.title {
        metadata.title = title;
    }
    if let Some(description) = fragment.description {
        metadata.description = description;
    }
    if let Some(group) = fragment.group {
        metadata.group = group;
    }
    if let Some(group_description) = fragment.group_description {
        metadata.group_description = group_description;
    }
    if let Some(authenticated) = fragment.authenticated {
        metadata.authenticated = authenticated;
    }
    if let Some(params) = fragment.url_parameters {
        metadata.url_parameters.extend(params);
    }
    if let Some(params) = fragment.query_parameters {
        metadata.query_parameters.extend(params);
    }
    if let Some(params) = fragment.body_parameters {
        metadata.body_parameters.extend(params);
    }
    if let Some(headers) = fragment.headers {
        merge_headers(&mut metadata.headers, &headers);
    }
    if let Some(responses) = fragment.responses {
        metadata.responses.extend(responses);
    }
}
