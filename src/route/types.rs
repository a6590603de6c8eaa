use http::Method;
use serde_json::Value;

/// Opaque reference to the code that serves a route.
///
/// Only the host adapter knows how to resolve a [`HandlerRef::Named`]
/// reference; the pipeline treats it as an identifier. Closure routes carry
/// no name and resolve to empty capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerRef {
    Named(String),
    Closure,
}

impl HandlerRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            HandlerRef::Named(name) => Some(name),
            HandlerRef::Closure => None,
        }
    }
}

/// One entry of the host's route table, immutable once listed.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// HTTP method set, e.g. `[PUT, PATCH]` for an update route.
    pub methods: Vec<Method>,
    /// URI template; `{name}` is a required placeholder, `{name?}` optional.
    pub uri: String,
    pub handler: HandlerRef,
    /// Raw documentation block attached to the handler, parsed later by a
    /// [`DocBlockParser`](crate::docblock::DocBlockParser).
    pub doc_block: String,
    /// Version or group tag assigned by the host router, matched by
    /// `match.versions` rules.
    pub version: Option<String>,
}

impl RouteDescriptor {
    /// `[GET]` / `[PUT,PATCH]` — the method-set notation used by the
    /// process-log contract.
    pub fn method_label(&self) -> String {
        let joined = self
            .methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!("[{joined}]")
    }

    /// Path with optional-placeholder markers stripped, used when comparing
    /// endpoints for identity.
    pub fn normalized_path(&self) -> String {
        self.uri.replace("?}", "}")
    }
}

/// A single validation rule declared by a handler, e.g.
/// `("email", "required|email")`. Rule strings use the pipe-separated
/// `required|integer|min:1|max:20` form.
pub type ValidationRule = (String, String);

/// What the host knows about a resolved handler beyond its doc block.
#[derive(Debug, Clone, Default)]
pub struct HandlerCapabilities {
    /// Declared input validation rules, used as a fallback source for body
    /// parameters when the doc block declares none.
    pub validation_rules: Vec<ValidationRule>,
    /// Declared response shape (resource/transformer output), the last
    /// resort of the response sub-chain.
    pub transformer_shape: Option<Value>,
    /// Whether the handler may be invoked in-process to capture a live
    /// response.
    pub invokable: bool,
}

/// Read-only view of the host application's routing, the only interface the
/// pipeline depends on.
pub trait HostAdapter {
    /// The full route table in registration order.
    fn list_routes(&self) -> Vec<RouteDescriptor>;

    /// Resolve a handler reference to its capabilities. `None` means the
    /// reference does not resolve at all; the owning route is then skipped.
    fn resolve_handler(&self, handler: &HandlerRef) -> Option<HandlerCapabilities>;
}
