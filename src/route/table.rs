use super::types::{HandlerCapabilities, HandlerRef, HostAdapter, RouteDescriptor};
use http::Method;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// The seven resource actions in expansion order.
const RESOURCE_ACTIONS: [&str; 7] = [
    "index", "create", "show", "edit", "store", "update", "destroy",
];

/// In-memory [`HostAdapter`] implementation.
///
/// Routes are kept in registration order. Convenience methods auto-register
/// the named handler with default capabilities; [`RouteTable::push`] does
/// not, which is how a table ends up with an unresolvable handler.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    handlers: HashMap<String, HandlerCapabilities>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fully built descriptor without touching the handler registry.
    pub fn push(&mut self, route: RouteDescriptor) -> &mut Self {
        self.routes.push(route);
        self
    }

    pub fn add(
        &mut self,
        methods: Vec<Method>,
        uri: &str,
        handler: &str,
        doc_block: &str,
    ) -> &mut Self {
        self.handlers.entry(handler.to_string()).or_default();
        self.routes.push(RouteDescriptor {
            methods,
            uri: uri.to_string(),
            handler: HandlerRef::Named(handler.to_string()),
            doc_block: doc_block.to_string(),
            version: None,
        });
        self
    }

    pub fn get(&mut self, uri: &str, handler: &str, doc_block: &str) -> &mut Self {
        self.add(vec![Method::GET], uri, handler, doc_block)
    }

    pub fn post(&mut self, uri: &str, handler: &str, doc_block: &str) -> &mut Self {
        self.add(vec![Method::POST], uri, handler, doc_block)
    }

    pub fn put(&mut self, uri: &str, handler: &str, doc_block: &str) -> &mut Self {
        self.add(vec![Method::PUT], uri, handler, doc_block)
    }

    pub fn delete(&mut self, uri: &str, handler: &str, doc_block: &str) -> &mut Self {
        self.add(vec![Method::DELETE], uri, handler, doc_block)
    }

    /// Register a closure route: no handler name, empty capabilities.
    pub fn closure(&mut self, method: Method, uri: &str, doc_block: &str) -> &mut Self {
        self.routes.push(RouteDescriptor {
            methods: vec![method],
            uri: uri.to_string(),
            handler: HandlerRef::Closure,
            doc_block: doc_block.to_string(),
            version: None,
        });
        self
    }

    /// Start a resource registration expanding to the seven conventional
    /// routes (index, create, show, edit, store, update, destroy).
    pub fn resource<'t>(&'t mut self, uri: &str, controller: &str) -> ResourceBuilder<'t> {
        ResourceBuilder {
            table: self,
            uri: uri.trim_matches('/').to_string(),
            controller: controller.to_string(),
            only: None,
            except: Vec::new(),
            api: false,
            docs: HashMap::new(),
        }
    }

    /// Resource registration without the `create`/`edit` form routes.
    pub fn api_resource<'t>(&'t mut self, uri: &str, controller: &str) -> ResourceBuilder<'t> {
        let mut builder = self.resource(uri, controller);
        builder.api = true;
        builder
    }

    /// Mutable access to a handler's capabilities, registering it if needed.
    pub fn handler_mut(&mut self, name: &str) -> &mut HandlerCapabilities {
        self.handlers.entry(name.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl HostAdapter for RouteTable {
    fn list_routes(&self) -> Vec<RouteDescriptor> {
        self.routes.clone()
    }

    fn resolve_handler(&self, handler: &HandlerRef) -> Option<HandlerCapabilities> {
        match handler {
            HandlerRef::Closure => Some(HandlerCapabilities::default()),
            HandlerRef::Named(name) => self.handlers.get(name).cloned(),
        }
    }
}

/// Builder returned by [`RouteTable::resource`]; call
/// [`register`](ResourceBuilder::register) to append the expanded routes.
pub struct ResourceBuilder<'t> {
    table: &'t mut RouteTable,
    uri: String,
    controller: String,
    only: Option<Vec<String>>,
    except: Vec<String>,
    api: bool,
    docs: HashMap<String, String>,
}

impl ResourceBuilder<'_> {
    pub fn only(mut self, actions: &[&str]) -> Self {
        self.only = Some(actions.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn except(mut self, actions: &[&str]) -> Self {
        self.except = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Attach a doc block to one action's route.
    pub fn doc(mut self, action: &str, doc_block: &str) -> Self {
        self.docs.insert(action.to_string(), doc_block.to_string());
        self
    }

    pub fn register(self) {
        let one = format!("{{{}}}", singularize(last_segment(&self.uri)));
        for action in RESOURCE_ACTIONS {
            if self.api && (action == "create" || action == "edit") {
                continue;
            }
            if let Some(only) = &self.only {
                if !only.iter().any(|a| a == action) {
                    continue;
                }
            }
            if self.except.iter().any(|a| a == action) {
                continue;
            }
            let (methods, uri) = match action {
                "index" => (vec![Method::GET], self.uri.clone()),
                "create" => (vec![Method::GET], format!("{}/create", self.uri)),
                "show" => (vec![Method::GET], format!("{}/{one}", self.uri)),
                "edit" => (vec![Method::GET], format!("{}/{one}/edit", self.uri)),
                "store" => (vec![Method::POST], self.uri.clone()),
                "update" => (
                    vec![Method::PUT, Method::PATCH],
                    format!("{}/{one}", self.uri),
                ),
                "destroy" => (vec![Method::DELETE], format!("{}/{one}", self.uri)),
                _ => unreachable!(),
            };
            let handler = format!("{}@{action}", self.controller);
            let doc = self.docs.get(action).cloned().unwrap_or_default();
            self.table.add(methods, &uri, &handler, &doc);
        }
    }
}

fn last_segment(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Placeholder name for resource routes: `users` → `user`. A trailing `s`
/// heuristic, matching the conventional plural resource URIs this expansion
/// targets.
fn singularize(word: &str) -> String {
    match word.strip_suffix('s') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => word.to_string(),
    }
}

/// Serialized route-table document loaded by the CLI.
#[derive(Debug, Deserialize)]
pub struct RouteFile {
    #[serde(default)]
    pub routes: Vec<RouteFileEntry>,
    #[serde(default)]
    pub handlers: HashMap<String, HandlerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFileEntry {
    pub methods: Vec<String>,
    pub uri: String,
    /// Omitted means a closure route.
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HandlerEntry {
    /// `[field, rule-string]` pairs, kept in declaration order.
    #[serde(default)]
    pub validation_rules: Vec<(String, String)>,
    #[serde(default)]
    pub transformer_shape: Option<serde_json::Value>,
    #[serde(default)]
    pub invokable: bool,
}

impl RouteFile {
    pub fn into_table(self) -> anyhow::Result<RouteTable> {
        let mut table = RouteTable::new();
        for (name, entry) in self.handlers {
            *table.handler_mut(&name) = HandlerCapabilities {
                validation_rules: entry.validation_rules,
                transformer_shape: entry.transformer_shape,
                invokable: entry.invokable,
            };
        }
        for entry in self.routes {
            let methods = entry
                .methods
                .iter()
                .map(|m| {
                    Method::from_str(&m.to_uppercase())
                        .map_err(|_| anyhow::anyhow!("invalid HTTP method {m:?} for {}", entry.uri))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let handler = match &entry.handler {
                Some(name) => {
                    table.handler_mut(name);
                    HandlerRef::Named(name.clone())
                }
                None => HandlerRef::Closure,
            };
            table.push(RouteDescriptor {
                methods,
                uri: entry.uri.trim_start_matches('/').to_string(),
                handler,
                doc_block: entry.doc,
                version: entry.version,
            });
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_expands_to_seven_routes() {
        let mut table = RouteTable::new();
        table.resource("/api/users", "UserController").register();
        let routes = table.list_routes();
        assert_eq!(routes.len(), 7);
        let labels: Vec<(String, String)> = routes
            .iter()
            .map(|r| (r.method_label(), r.uri.clone()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("[GET]".into(), "api/users".into()),
                ("[GET]".into(), "api/users/create".into()),
                ("[GET]".into(), "api/users/{user}".into()),
                ("[GET]".into(), "api/users/{user}/edit".into()),
                ("[POST]".into(), "api/users".into()),
                ("[PUT,PATCH]".into(), "api/users/{user}".into()),
                ("[DELETE]".into(), "api/users/{user}".into()),
            ]
        );
    }

    #[test]
    fn resource_only_filters_actions() {
        let mut table = RouteTable::new();
        table
            .resource("api/users", "UserController")
            .only(&["index", "store"])
            .register();
        let routes = table.list_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method_label(), "[GET]");
        assert_eq!(routes[1].method_label(), "[POST]");
    }

    #[test]
    fn api_resource_drops_form_routes() {
        let mut table = RouteTable::new();
        table.api_resource("api/users", "UserController").register();
        let uris: Vec<&str> = table.routes.iter().map(|r| r.uri.as_str()).collect();
        assert!(!uris.contains(&"api/users/create"));
        assert!(!uris.contains(&"api/users/{user}/edit"));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn pushed_routes_do_not_register_handlers() {
        let mut table = RouteTable::new();
        table.push(RouteDescriptor {
            methods: vec![Method::GET],
            uri: "api/ghost".to_string(),
            handler: HandlerRef::Named("Nope@missing".to_string()),
            doc_block: String::new(),
            version: None,
        });
        assert!(table
            .resolve_handler(&HandlerRef::Named("Nope@missing".to_string()))
            .is_none());
        assert!(table.resolve_handler(&HandlerRef::Closure).is_some());
    }
}
