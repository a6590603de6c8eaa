use crate::errors::ConfigError;
use crate::route::RouteDescriptor;
use regex::Regex;
use serde_json::Value;

/// Extra data a rule applies to every route it matches.
#[derive(Debug, Clone, Default)]
pub struct ApplyPayload {
    /// Ordered headers, merged under any headers the endpoint declares
    /// itself.
    pub headers: Vec<(String, String)>,
    /// Default query parameters added when the endpoint declares none with
    /// the same name.
    pub query_params: Vec<(String, String)>,
    /// Default body parameters, same merge rule as query defaults.
    pub body_params: Vec<(String, Value)>,
}

/// One compiled match rule: AND across its predicates, OR across rules.
#[derive(Debug, Clone)]
pub struct MatchRule {
    prefixes: Vec<Regex>,
    /// Uppercased method names; empty or `*` means any.
    methods: Vec<String>,
    versions: Vec<String>,
    pub apply: ApplyPayload,
}

impl MatchRule {
    /// Compile glob patterns into anchored regexes. A malformed pattern is a
    /// configuration error and aborts the run before any route is processed.
    pub fn compile(
        prefixes: &[String],
        methods: &[String],
        versions: &[String],
        apply: ApplyPayload,
    ) -> Result<Self, ConfigError> {
        if prefixes.is_empty() && methods.is_empty() && versions.is_empty() {
            return Err(ConfigError::EmptyMatchRule);
        }
        let prefixes = prefixes
            .iter()
            .map(|glob| compile_glob(glob))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            prefixes,
            methods: methods.iter().map(|m| m.to_uppercase()).collect(),
            versions: versions.to_vec(),
            apply,
        })
    }

    /// All predicates must hold for the rule to claim the route.
    pub fn matches(&self, route: &RouteDescriptor) -> bool {
        self.matches_path(&route.uri) && self.matches_method(route) && self.matches_version(route)
    }

    fn matches_path(&self, uri: &str) -> bool {
        let uri = uri.trim_start_matches('/');
        self.prefixes.is_empty() || self.prefixes.iter().any(|re| re.is_match(uri))
    }

    fn matches_method(&self, route: &RouteDescriptor) -> bool {
        if self.methods.is_empty() || self.methods.iter().any(|m| m == "*") {
            return true;
        }
        route
            .methods
            .iter()
            .any(|m| self.methods.iter().any(|want| want == m.as_str()))
    }

    fn matches_version(&self, route: &RouteDescriptor) -> bool {
        if self.versions.is_empty() || self.versions.iter().any(|v| v == "*") {
            return true;
        }
        route
            .version
            .as_deref()
            .map(|v| self.versions.iter().any(|want| want == v))
            .unwrap_or(false)
    }
}

/// `api/*` style glob to anchored regex; `*` is the only metacharacter.
fn compile_glob(glob: &str) -> Result<Regex, ConfigError> {
    let glob = glob.trim_start_matches('/');
    let escaped = glob
        .split('*')
        .map(|part| regex::escape(part))
        .collect::<Vec<_>>()
        .join(".*");
    let pattern = format!("^{escaped}$");
    Regex::new(&pattern).map_err(|err| ConfigError::MalformedGlob {
        glob: glob.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HandlerRef;
    use http::Method;

    fn route(method: Method, uri: &str, version: Option<&str>) -> RouteDescriptor {
        RouteDescriptor {
            methods: vec![method],
            uri: uri.to_string(),
            handler: HandlerRef::Closure,
            doc_block: String::new(),
            version: version.map(String::from),
        }
    }

    fn rule(prefixes: &[&str], methods: &[&str], versions: &[&str]) -> MatchRule {
        MatchRule::compile(
            &prefixes.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &methods.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &versions.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            ApplyPayload::default(),
        )
        .unwrap()
    }

    #[test]
    fn prefix_glob_matches_subpaths_only() {
        let rule = rule(&["api/*"], &[], &[]);
        assert!(rule.matches(&route(Method::GET, "api/test", None)));
        assert!(rule.matches(&route(Method::GET, "/api/test", None)));
        assert!(!rule.matches(&route(Method::GET, "api", None)));
        assert!(!rule.matches(&route(Method::GET, "internal/api/test", None)));
    }

    #[test]
    fn star_matches_everything() {
        let rule = rule(&["*"], &[], &[]);
        assert!(rule.matches(&route(Method::GET, "anything/at/all", None)));
    }

    #[test]
    fn predicates_combine_with_and() {
        let rule = rule(&["api/*"], &["POST"], &["v1"]);
        assert!(rule.matches(&route(Method::POST, "api/x", Some("v1"))));
        assert!(!rule.matches(&route(Method::GET, "api/x", Some("v1"))));
        assert!(!rule.matches(&route(Method::POST, "api/x", Some("v2"))));
        assert!(!rule.matches(&route(Method::POST, "api/x", None)));
    }

    #[test]
    fn method_set_routes_match_on_any_member() {
        let rule = rule(&["api/*"], &["PATCH"], &[]);
        let update = RouteDescriptor {
            methods: vec![Method::PUT, Method::PATCH],
            uri: "api/users/{user}".to_string(),
            handler: HandlerRef::Closure,
            doc_block: String::new(),
            version: None,
        };
        assert!(rule.matches(&update));
    }

    #[test]
    fn rule_with_no_predicates_is_rejected() {
        let err = MatchRule::compile(&[], &[], &[], ApplyPayload::default()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMatchRule));
    }
}
