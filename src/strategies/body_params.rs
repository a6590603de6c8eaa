use super::tagparse::parse_param_tag;
use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::{ExampleGenerator, ParameterSpec};
use crate::model::{EndpointMetadata, ParamType, Parameter};
use crate::route::ValidationRule;

/// Body parameters from `@bodyParam` tags, falling back to static analysis
/// of the handler's declared validation rules, plus the matched rule's body
/// defaults.
pub struct BodyParamStrategy;

impl Strategy for BodyParamStrategy {
    fn name(&self) -> &'static str {
        "body-parameters"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[MetadataField::BodyParameters]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        _so_far: &EndpointMetadata,
        examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let mut parameters = Vec::new();
        for value in ctx.doc.tag_values("bodyParam") {
            let tag = parse_param_tag("bodyParam", value)?;
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

        if parameters.is_empty() {
            parameters = params_from_validation_rules(&ctx.capabilities.validation_rules, examples);
        }

        for (name, value) in &ctx.apply.body_params {
            if !parameters.iter().any(|p| &p.name == name) {
                parameters.push(Parameter {
                    name: name.clone(),
                    ty: type_of_value(value),
                    required: false,
                    example: value.clone(),
                    description: String::new(),
                });
            }
        }

        if parameters.is_empty() {
            return Ok(None);
        }
        Ok(Some(Fragment {
            body_parameters: Some(parameters),
            ..Fragment::default()
        }))
    }
}

/// Derive parameters from `required|integer|min:1|max:20` style rule
/// strings when the doc block declares no body parameters itself.
fn params_from_validation_rules(
    rules: &[ValidationRule],
    examples: &mut ExampleGenerator,
) -> Vec<Parameter> {
    rules
        .iter()
        .map(|(field, rule)| {
            let mut ty = ParamType::String;
            let mut required = false;
            let mut min = None;
            let mut max = None;
            let mut choices: Vec<String> = Vec::new();
            let mut email = false;
            for token in rule.split('|') {
                let token = token.trim();
                match token {
                    "required" => required = true,
                    "email" => email = true,
                    _ => {
                        if let Some(parsed) = ParamType::from_token(token) {
                            ty = parsed;
                        } else if let Some(value) = token.strip_prefix("min:") {
                            min = value.parse::<i64>().ok();
                        } else if let Some(value) = token.strip_prefix("max:") {
                            max = value.parse::<i64>().ok();
                        } else if let Some(list) = token.strip_prefix("in:") {
                            choices = list.split(',').map(|c| c.trim().to_string()).collect();
                        }
                    }
                }
            }
            let hint = if email { "email" } else { field.as_str() };
            let example = examples.generate(&ParameterSpec {
                min,
                max,
                choices: &choices,
                ..ParameterSpec::new(hint, ty)
            });
            Parameter {
                name: field.clone(),
                ty,
                required,
                example,
                description: String::new(),
            }
        })
        .collect()
}

fn type_of_value(value: &serde_json::Value) -> ParamType {
    match value {
        serde_json::Value::Bool(_) => ParamType::Boolean,
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => ParamType::Integer,
        serde_json::Value::Number(_) => ParamType::Number,
        serde_json::Value::Array(_) => ParamType::Array,
        serde_json::Value::Object(_) => ParamType::Object,
        _ => ParamType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testing::{context_parts, contribute};
    use serde_json::json;

    #[test]
    fn body_param_tags_support_nesting_syntax() {
        let parts = context_parts(
            "@bodyParam user.name string required Name. Example: Tested\n@bodyParam tags.* string Tag list.",
        );
        let fragment = contribute(&BodyParamStrategy, &parts).unwrap().unwrap();
        let params = fragment.body_parameters.unwrap();
        assert_eq!(params[0].name, "user.name");
        assert_eq!(params[0].example, json!("Tested"));
        assert_eq!(params[1].name, "tags.*");
    }

    #[test]
    fn validation_rules_are_the_fallback() {
        let mut parts = context_parts("");
        parts.capabilities.validation_rules = vec![
            ("email".to_string(), "required|email".to_string()),
            ("age".to_string(), "integer|min:18|max:65".to_string()),
            (
                "state".to_string(),
                "string|in:draft,published".to_string(),
            ),
        ];
        let fragment = contribute(&BodyParamStrategy, &parts).unwrap().unwrap();
        let params = fragment.body_parameters.unwrap();
        assert_eq!(params.len(), 3);
        assert!(params[0].required);
        assert!(params[0].example.as_str().unwrap().contains('@'));
        let age = params[1].example.as_i64().unwrap();
        assert!((18..=65).contains(&age));
        assert_eq!(params[2].example, json!("draft"));
    }

    #[test]
    fn tags_take_precedence_over_validation_rules() {
        let mut parts = context_parts("@bodyParam note string required A note.");
        parts.capabilities.validation_rules =
            vec![("ignored".to_string(), "required".to_string())];
        let fragment = contribute(&BodyParamStrategy, &parts).unwrap().unwrap();
        let params = fragment.body_parameters.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "note");
    }
}
