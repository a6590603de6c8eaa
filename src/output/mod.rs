//! Output serializers: stateless renderers over the finished endpoint-group
//! model. Each artifact is staged next to its destination and renamed into
//! place only after the whole run succeeds, so a failing run leaves the
//! previous documentation untouched.

mod markdown;
mod postman;
mod staging;

pub use markdown::*;
pub use postman::*;
pub use staging::*;

/// What the serializers know about the run; they never see route tables or
/// strategies.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub title: String,
    pub base_url: url::Url,
}

impl RenderConfig {
    /// Host with port when the base URL carries one, e.g. `localhost:8080`.
    pub fn host(&self) -> String {
        let host = self.base_url.host_str().unwrap_or("localhost");
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    pub fn protocol(&self) -> &str {
        self.base_url.scheme()
    }
}
