//! Optional in-process handler invocation.
//!
//! Response strategy (c) may call handler code with a synthesized request to
//! capture a live response. The call is best-effort: it runs on a helper
//! thread joined with a timeout, and a slow, failing, or panicking handler
//! degrades to the next response source instead of aborting the run.

use crate::route::HandlerRef;
use http::Method;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Request synthesized from the endpoint metadata accumulated so far.
#[derive(Debug, Clone)]
pub struct SyntheticRequest {
    pub method: Method,
    /// URI with URL-parameter placeholders substituted by their examples.
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct InvokedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("handler invocation failed: {0}")]
    Failed(String),

    #[error("handler panicked")]
    Panicked,

    #[error("handler invocation timed out after {0:?}")]
    TimedOut(Duration),
}

/// Host-provided collaborator that can run handler code in-process.
pub trait HandlerInvoker: Send + Sync {
    fn invoke(
        &self,
        handler: &HandlerRef,
        request: SyntheticRequest,
    ) -> Result<InvokedResponse, InvokeError>;
}

/// Run the invocation on a helper thread so a hung handler cannot stall the
/// pipeline. A timed-out thread is left detached; the pipeline moves on.
pub fn invoke_with_timeout(
    invoker: &Arc<dyn HandlerInvoker>,
    handler: &HandlerRef,
    request: SyntheticRequest,
    timeout: Duration,
) -> Result<InvokedResponse, InvokeError> {
    let (tx, rx) = mpsc::channel();
    let invoker = Arc::clone(invoker);
    let handler = handler.clone();
    std::thread::spawn(move || {
        let result = catch_unwind(AssertUnwindSafe(|| invoker.invoke(&handler, request)))
            .unwrap_or(Err(InvokeError::Panicked));
        // receiver may be gone after a timeout
        let _ = tx.send(result);
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(InvokeError::TimedOut(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echoing;

    impl HandlerInvoker for Echoing {
        fn invoke(
            &self,
            _handler: &HandlerRef,
            request: SyntheticRequest,
        ) -> Result<InvokedResponse, InvokeError> {
            Ok(InvokedResponse {
                status: 200,
                content_type: "application/json".to_string(),
                body: format!("{{\"path\":\"{}\"}}", request.uri),
            })
        }
    }

    struct Hanging;

    impl HandlerInvoker for Hanging {
        fn invoke(
            &self,
            _handler: &HandlerRef,
            _request: SyntheticRequest,
        ) -> Result<InvokedResponse, InvokeError> {
            std::thread::sleep(Duration::from_secs(60));
            unreachable!("the pipeline must have moved on by now")
        }
    }

    struct Panicking;

    impl HandlerInvoker for Panicking {
        fn invoke(
            &self,
            _handler: &HandlerRef,
            _request: SyntheticRequest,
        ) -> Result<InvokedResponse, InvokeError> {
            panic!("boom");
        }
    }

    fn request() -> SyntheticRequest {
        SyntheticRequest {
            method: Method::GET,
            uri: "api/test".to_string(),
            headers: vec![],
            query: vec![],
            body: None,
        }
    }

    #[test]
    fn successful_invocation_returns_the_response() {
        let invoker: Arc<dyn HandlerInvoker> = Arc::new(Echoing);
        let response = invoke_with_timeout(
            &invoker,
            &HandlerRef::Closure,
            request(),
            Duration::from_millis(500),
        )
        .unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("api/test"));
    }

    #[test]
    fn hung_handler_times_out_instead_of_stalling() {
        let invoker: Arc<dyn HandlerInvoker> = Arc::new(Hanging);
        let err = invoke_with_timeout(
            &invoker,
            &HandlerRef::Closure,
            request(),
            Duration::from_millis(50),
        )
        .unwrap_err();
        assert!(matches!(err, InvokeError::TimedOut(_)));
    }

    #[test]
    fn panicking_handler_is_contained() {
        let invoker: Arc<dyn HandlerInvoker> = Arc::new(Panicking);
        let err = invoke_with_timeout(
            &invoker,
            &HandlerRef::Closure,
            request(),
            Duration::from_millis(500),
        )
        .unwrap_err();
        assert!(matches!(err, InvokeError::Panicked));
    }
}
