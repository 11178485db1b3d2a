//! One structured completion event per request.
//!
//! Level follows the status class: 5xx at error, 4xx at warn, anything else at
//! info. Requests that passed the session gate also carry the (redacted)
//! subject; the precise cause of a rejection is logged by the gate itself.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::claims::SessionClaims;
use crate::logging::pii::Redacted;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Everything the completion event reports about one request.
struct Completion {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    duration_us: u64,
    subject: Option<String>,
}

impl Completion {
    fn emit(&self) {
        let method = &self.method;
        let path = &self.path;
        let trace_id = &self.trace_id;
        let status_code = self.status.as_u16();
        let duration_us = self.duration_us;
        let authenticated = self.subject.is_some();
        let subject = Redacted(self.subject.as_deref().unwrap_or("-"));

        if self.status.is_server_error() {
            error!(%method, %path, status_code, duration_us, %trace_id, authenticated, %subject, "request_completed");
        } else if self.status.is_client_error() {
            warn!(%method, %path, status_code, duration_us, %trace_id, authenticated, %subject, "request_completed");
        } else {
            info!(%method, %path, status_code, duration_us, %trace_id, authenticated, %subject, "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, subject) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<SessionClaims>()
                        .map(|claims| claims.subject().to_string()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completion {
                method,
                path,
                trace_id,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                subject,
            }
            .emit();

            result
        })
    }
}
