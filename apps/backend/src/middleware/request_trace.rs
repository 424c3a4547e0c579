//! Per-request trace id, span and completion log.
//!
//! An incoming `x-trace-id` header is honoured when it looks sane; otherwise a
//! fresh id is minted. The id is installed as the task-local trace id for the
//! handler (so `AppError` responses can echo it), stored in request
//! extensions, and returned in the `x-trace-id` response header.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, info_span, warn, Instrument};

use crate::trace_ctx;

pub const TRACE_HEADER: &str = "x-trace-id";
const MAX_INBOUND_TRACE_LEN: usize = 64;

/// Trace id as stored in request extensions.
#[derive(Debug, Clone)]
pub struct TraceId(pub String);

#[derive(Clone, Default)]
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(TRACE_HEADER)?.to_str().ok()?;
    let ok = !raw.is_empty()
        && raw.len() <= MAX_INBOUND_TRACE_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ok.then(|| raw.to_string())
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(trace_ctx::new_trace_id);
        req.extensions_mut().insert(TraceId(trace_id.clone()));

        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let span = info_span!("request", trace_id = %trace_id, method = %method, path = %path);

        let fut = trace_ctx::with_trace_id(trace_id.clone(), self.service.call(req));

        Box::pin(
            async move {
                let result = fut.await;
                let status = match &result {
                    Ok(res) => res.status(),
                    Err(err) => err.as_response_error().status_code(),
                };
                let status_code = status.as_u16();
                let duration_us = start.elapsed().as_micros() as u64;

                if status.is_server_error() {
                    error!(http.status_code = status_code, duration_us, "request_completed");
                } else if status.is_client_error() {
                    warn!(http.status_code = status_code, duration_us, "request_completed");
                } else {
                    info!(http.status_code = status_code, duration_us, "request_completed");
                }

                let mut res = result?;
                if let Ok(value) = HeaderValue::from_str(&trace_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(TRACE_HEADER), value);
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
