use http::Method;
use serde_json::Value;

/// Declared type of a documented parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    /// Recognize a type token from a doc-block tag; anything unknown reads
    /// as a description word, not a type.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "string" => Some(ParamType::String),
            "int" | "integer" => Some(ParamType::Integer),
            "number" | "float" | "numeric" => Some(ParamType::Number),
            "bool" | "boolean" => Some(ParamType::Boolean),
            "object" => Some(ParamType::Object),
            "array" => Some(ParamType::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented parameter (URL, query, or body). Body parameters use
/// dotted names (`user.name`, `tags.*`) to express nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
    pub required: bool,
    pub example: Value,
    pub description: String,
}

/// A captured or declared example response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseExample {
    pub status: u16,
    pub content_type: String,
    /// Raw body text, passed through verbatim to the serializers.
    pub body: String,
    pub description: Option<String>,
}

/// Everything the pipeline knows about one documented endpoint.
///
/// Created empty per matched route, filled in by the strategy pipeline
/// (each strategy touching only the fields it owns), then frozen.
#[derive(Debug, Clone, Default)]
pub struct EndpointMetadata {
    pub title: String,
    pub description: String,
    /// Never empty after the pipeline runs; the default group is applied
    /// when no `@group` tag is present.
    pub group: String,
    pub group_description: String,
    pub authenticated: bool,
    pub methods: Vec<Method>,
    pub uri: String,
    pub url_parameters: Vec<Parameter>,
    pub query_parameters: Vec<Parameter>,
    pub body_parameters: Vec<Parameter>,
    /// Ordered header mapping; later merge layers override by key but keep
    /// the original position.
    pub headers: Vec<(String, String)>,
    pub responses: Vec<ResponseExample>,
}

impl EndpointMetadata {
    pub fn new(methods: Vec<Method>, uri: &str) -> Self {
        Self {
            methods,
            uri: uri.to_string(),
            ..Self::default()
        }
    }

    /// Fallback title when the doc block has none: the URI itself.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.uri
        } else {
            &self.title
        }
    }

    pub fn method_label(&self) -> String {
        let joined = self
            .methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!("[{joined}]")
    }

    pub fn has_body(&self) -> bool {
        !self.body_parameters.is_empty()
    }
}
