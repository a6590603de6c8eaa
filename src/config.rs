//! Generator configuration, deserialized from YAML with defaults for every
//! field so a partial config file is enough to get output.

use crate::errors::ConfigError;
use crate::matcher::{ApplyPayload, MatchRule};
use crate::model::GroupSort;
use anyhow::Context;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// An ordered `name: value` mapping. YAML maps lose their order through
/// ordinary map types, so this deserializes via a map visitor and keeps the
/// document order, which the header-merge contract depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedPairs(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = OrderedPairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Ordered mapping with arbitrary JSON values, used for body-parameter
/// defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedValues(pub Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for OrderedValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValuesVisitor;

        impl<'de> Visitor<'de> for ValuesVisitor {
            type Value = OrderedValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of string keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedValues(pairs))
            }
        }

        deserializer.deserialize_map(ValuesVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Collection name and Markdown landing title.
    pub title: String,
    /// Scheme + host every documented URL is rendered against.
    pub base_url: String,
    /// Seed for the example-value stream; identical seed and input give
    /// byte-identical output.
    pub faker_seed: u64,
    /// Match rules in declaration order; empty means document everything.
    pub routes: Vec<RouteRuleConfig>,
    /// Headers applied to every endpoint, under rule and tag layers.
    pub default_headers: OrderedPairs,
    /// Group assigned to endpoints without a `@group` tag.
    pub default_group: String,
    pub group_sort: GroupSort,
    /// Directory `@responseFile` paths resolve against.
    pub response_file_dir: PathBuf,
    /// Allow response strategy (c), in-process handler invocation.
    pub response_calls: bool,
    pub invoke_timeout_ms: u64,
    /// Generate examples for optional parameters too.
    pub include_optional_parameters: bool,
    pub output: OutputConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_string(),
            base_url: "http://localhost".to_string(),
            faker_seed: 0,
            routes: Vec::new(),
            default_headers: OrderedPairs::default(),
            default_group: "General".to_string(),
            group_sort: GroupSort::default(),
            response_file_dir: PathBuf::from("."),
            response_calls: true,
            invoke_timeout_ms: 2_000,
            include_optional_parameters: true,
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Markdown pages land under `<markdown_dir>/groups/`.
    pub markdown_dir: PathBuf,
    pub collection_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            markdown_dir: PathBuf::from("docs"),
            collection_file: PathBuf::from("docs/collection.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteRuleConfig {
    #[serde(rename = "match")]
    pub match_: MatchConfig,
    pub apply: ApplyConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub prefixes: Vec<String>,
    pub methods: Vec<String>,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    pub headers: OrderedPairs,
    pub query_params: OrderedPairs,
    pub body_params: OrderedValues,
}

impl GeneratorConfig {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse generator configuration")
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Compile the declared rules; with none declared, everything matches.
    pub fn compile_rules(&self) -> Result<Vec<MatchRule>, ConfigError> {
        if self.routes.is_empty() {
            let apply = ApplyPayload::default();
            return Ok(vec![MatchRule::compile(
                &["*".to_string()],
                &[],
                &[],
                apply,
            )?]);
        }
        self.routes
            .iter()
            .map(|rule| {
                MatchRule::compile(
                    &rule.match_.prefixes,
                    &rule.match_.methods,
                    &rule.match_.versions,
                    ApplyPayload {
                        headers: rule.apply.headers.0.clone(),
                        query_params: rule.apply.query_params.0.clone(),
                        body_params: rule.apply.body_params.0.clone(),
                    },
                )
            })
            .collect()
    }

    /// Validated base URL; a malformed value is a configuration error.
    pub fn parsed_base_url(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config = GeneratorConfig::from_yaml_str("base_url: https://api.test\n").unwrap();
        assert_eq!(config.base_url, "https://api.test");
        assert_eq!(config.default_group, "General");
        assert_eq!(config.invoke_timeout_ms, 2_000);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn header_order_survives_deserialization() {
        let yaml = r#"
routes:
  - match:
      prefixes: ["api/*"]
    apply:
      headers:
        Authorization: customAuthToken
        Custom-Header: NotSoCustom
        Accept: application/json
"#;
        let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
        let headers = &config.routes[0].apply.headers.0;
        assert_eq!(headers[0].0, "Authorization");
        assert_eq!(headers[1].0, "Custom-Header");
        assert_eq!(headers[2].0, "Accept");
    }

    #[test]
    fn empty_routes_compile_to_a_match_all_rule() {
        let config = GeneratorConfig::default();
        let rules = config.compile_rules().unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let config = GeneratorConfig {
            base_url: "not a url".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.parsed_base_url().is_err());
    }
}
