//! Shared builders for the integration tests.
#![allow(dead_code)]

use routedoc::config::{GeneratorConfig, MatchConfig, OrderedPairs, RouteRuleConfig};
use routedoc::pipeline::{Generator, RunReport};
use routedoc::route::RouteTable;
use std::path::Path;

/// Configuration matching `api/*` with a fixed example seed, the setup most
/// scenarios share.
pub fn api_config() -> GeneratorConfig {
    let mut config = GeneratorConfig {
        faker_seed: 1234,
        ..GeneratorConfig::default()
    };
    config.routes.push(RouteRuleConfig {
        match_: MatchConfig {
            prefixes: vec!["api/*".to_string()],
            ..MatchConfig::default()
        },
        ..RouteRuleConfig::default()
    });
    config
}

/// The same configuration with apply headers on the first rule.
pub fn api_config_with_headers(headers: &[(&str, &str)]) -> GeneratorConfig {
    let mut config = api_config();
    config.routes[0].apply.headers = OrderedPairs(
        headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    config
}

/// Extraction only; no files written.
pub fn extract(table: &RouteTable, config: GeneratorConfig) -> RunReport {
    Generator::new(config)
        .extract(table)
        .expect("extraction should not fail fatally")
}

/// Full run with output redirected below `dir`.
pub fn run_into(table: &RouteTable, mut config: GeneratorConfig, dir: &Path) -> RunReport {
    config.output.markdown_dir = dir.join("docs");
    config.output.collection_file = dir.join("docs").join("collection.json");
    Generator::new(config)
        .run(table)
        .expect("generation should succeed")
}

/// Parsed collection with `_postman_id` blanked so runs compare equal.
pub fn read_collection(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join("docs").join("collection.json"))
        .expect("collection file should exist");
    let mut value: serde_json::Value = serde_json::from_str(&raw).expect("valid collection JSON");
    value["info"]["_postman_id"] = serde_json::Value::String(String::new());
    value
}
