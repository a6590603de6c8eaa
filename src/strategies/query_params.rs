use super::tagparse::parse_param_tag;
use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::{ExampleGenerator, ParameterSpec};
use crate::model::{EndpointMetadata, ParamType, Parameter};
use serde_json::Value;

/// Query parameters from `@queryParam` tags plus the matched rule's query
/// defaults.
pub struct QueryParamStrategy;

impl Strategy for QueryParamStrategy {
    fn name(&self) -> &'static str {
        "query-parameters"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[MetadataField::QueryParameters]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        _so_far: &EndpointMetadata,
        examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let mut parameters = Vec::new();
        for value in ctx.doc.tag_values("queryParam") {
            let tag = parse_param_tag("queryParam", value)?;
            if !tag.required && !ctx.config.include_optional_parameters {
                continue;
            }
            let example = match tag.example {
                Some(example) => example,
                None => examples.generate(&ParameterSpec::new(&tag.name, tag.ty)),
            };
            parameters.push(Parameter {
                name: tag.name,
                ty: tag.ty,
                required: tag.required,
                example,
                description: tag.description,
            });
        }

        // rule defaults fill in only what the endpoint did not declare
        for (name, value) in &ctx.apply.query_params {
            if !parameters.iter().any(|p| &p.name == name) {
                parameters.push(Parameter {
                    name: name.clone(),
                    ty: ParamType::String,
                    required: false,
                    example: Value::String(value.clone()),
                    description: String::new(),
                });
            }
        }

        if parameters.is_empty() {
            return Ok(None);
        }
        Ok(Some(Fragment {
            query_parameters: Some(parameters),
            ..Fragment::default()
        }))
    }
}
