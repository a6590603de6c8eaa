use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::ExampleGenerator;
use crate::model::EndpointMetadata;

/// Ordered header merge: overriding a key keeps its original position,
/// new keys append.
pub fn merge_headers(base: &mut Vec<(String, String)>, layer: &[(String, String)]) {
    for (name, value) in layer {
        match base
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_value)) => *existing_value = value.clone(),
            None => base.push((name.clone(), value.clone())),
        }
    }
}

/// Request headers, merged from three layers with later layers overriding:
/// configuration defaults, the matched rule's apply payload, `@header` tags.
pub struct HeaderStrategy;

impl Strategy for HeaderStrategy {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[MetadataField::Headers]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        _so_far: &EndpointMetadata,
        _examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let mut headers = Vec::new();
        merge_headers(&mut headers, &ctx.config.default_headers.0);
        merge_headers(&mut headers, &ctx.apply.headers);

        let tag_headers: Vec<(String, String)> = ctx
            .doc
            .tag_values("header")
            .filter_map(|value| {
                let mut parts = value.splitn(2, char::is_whitespace);
                let name = parts.next()?.trim();
                if name.is_empty() {
                    return None;
                }
                Some((
                    name.to_string(),
                    parts.next().unwrap_or_default().trim().to_string(),
                ))
            })
            .collect();
        merge_headers(&mut headers, &tag_headers);

        if headers.is_empty() {
            return Ok(None);
        }
        Ok(Some(Fragment {
            headers: Some(headers),
            ..Fragment::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testing::{context_parts, contribute};

    #[test]
    fn later_layers_override_in_place() {
        let mut base = vec![
            ("Accept".to_string(), "text/html".to_string()),
            ("X-Trace".to_string(), "1".to_string()),
        ];
        merge_headers(
            &mut base,
            &[("accept".to_string(), "application/json".to_string())],
        );
        assert_eq!(base[0], ("Accept".to_string(), "application/json".to_string()));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn rule_headers_and_tags_merge_in_order() {
        let mut parts = context_parts("@header X-Custom tagged-value");
        parts.config.default_headers.0 =
            vec![("Accept".to_string(), "application/json".to_string())];
        parts.apply.headers = vec![
            ("Authorization".to_string(), "customAuthToken".to_string()),
            ("Custom-Header".to_string(), "NotSoCustom".to_string()),
        ];
        let fragment = contribute(&HeaderStrategy, &parts).unwrap().unwrap();
        let headers = fragment.headers.unwrap();
        let names: Vec<&str> = headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["Accept", "Authorization", "Custom-Header", "X-Custom"]
        );
    }

    #[test]
    fn no_layers_means_no_contribution() {
        let parts = context_parts("");
        assert!(contribute(&HeaderStrategy, &parts).unwrap().is_none());
    }
}
