use super::tagparse::parse_param_tag;
use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::{ExampleGenerator, ParameterSpec};
use crate::model::{EndpointMetadata, ParamType, Parameter};
use once_cell::sync::Lazy;
use regex::Regex;

/// `{name}` required, `{name?}` optional.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(\?)?\}").expect("placeholder regex"));

/// URL parameters, derived from the URI template's placeholders and
/// augmented by explicit `@urlParam` tags.
pub struct UrlParamStrategy;

impl Strategy for UrlParamStrategy {
    fn name(&self) -> &'static str {
        "url-parameters"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[MetadataField::UrlParameters]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        _so_far: &EndpointMetadata,
        examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let mut parameters: Vec<Parameter> = PLACEHOLDER
            .captures_iter(&ctx.route.uri)
            .map(|cap| Parameter {
                name: cap[1].to_string(),
                ty: infer_type(&cap[1]),
                required: cap.get(2).is_none(),
                example: serde_json::Value::Null,
                description: String::new(),
            })
            .collect();

        for value in ctx.doc.tag_values("urlParam") {
            let tag = parse_param_tag("urlParam", value)?;
            match parameters.iter_mut().find(|p| p.name == tag.name) {
                Some(existing) => {
                    if tag.explicit_type {
                        existing.ty = tag.ty;
                    }
                    if !tag.description.is_empty() {
                        existing.description = tag.description;
                    }
                    if let Some(example) = tag.example {
                        existing.example = example;
                    }
                }
                None => parameters.push(Parameter {
                    name: tag.name,
                    ty: tag.ty,
                    required: tag.required,
                    example: tag.example.unwrap_or(serde_json::Value::Null),
                    description: tag.description,
                }),
            }
        }

        for parameter in &mut parameters {
            if parameter.example.is_null() {
                parameter.example =
                    examples.generate(&ParameterSpec::new(&parameter.name, parameter.ty));
            }
        }

        if parameters.is_empty() {
            return Ok(None);
        }
        Ok(Some(Fragment {
            url_parameters: Some(parameters),
            ..Fragment::default()
        }))
    }
}

/// Identifier-looking placeholders default to integers, everything else to
/// strings, matching how example URLs are usually filled in.
fn infer_type(name: &str) -> ParamType {
    if name == "id" || name.ends_with("_id") {
        ParamType::Integer
    } else {
        ParamType::String
    }
}
