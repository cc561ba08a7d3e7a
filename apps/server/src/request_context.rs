//! Per-request context attached by middleware.

/// Request-scoped metadata made available to handlers via extensions.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
