use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::error::SessionError;
use crate::pages;
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Any session failure. The cause is kept for logs but never rendered.
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: SessionError },
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    fn code(&self) -> String {
        match self {
            AppError::Unauthorized { .. } => "UNAUTHORIZED".to_string(),
            AppError::BadRequest { code, .. } => code.to_string(),
            AppError::NotFound { code, .. } => code.to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Unauthorized { .. } => "Authentication required".to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized(reason: SessionError) -> Self {
        Self::Unauthorized { reason }
    }

    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// The session failure behind an unauthorized error, if any.
    pub fn session_reason(&self) -> Option<&SessionError> {
        match self {
            AppError::Unauthorized { reason } => Some(reason),
            _ => None,
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        if e.is_internal() {
            AppError::internal(e.to_string())
        } else {
            AppError::unauthorized(e)
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        // One page for every session failure, whatever the cause.
        if let AppError::Unauthorized { .. } = self {
            return HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .insert_header(("x-trace-id", trace_id))
                .body(pages::UNAUTHORIZED);
        }

        let code = self.code();
        let problem_details = ProblemDetails {
            type_: format!("https://gateway.local/errors/{}", code.to_uppercase()),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail: self.detail(),
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use super::AppError;
    use crate::auth::error::SessionError;
    use crate::pages;

    async fn body_of(err: AppError) -> (StatusCode, String) {
        let resp = err.error_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body()).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn test_all_session_failures_render_identically() {
        let reasons = [
            SessionError::NoSession,
            SessionError::SignatureInvalid,
            SessionError::AlgorithmMismatch {
                found: "none".to_string(),
            },
            SessionError::Expired,
            SessionError::IssuerMismatch,
            SessionError::MalformedToken("bad".to_string()),
            SessionError::CredentialsRejected,
        ];

        for reason in reasons {
            let (status, body) = body_of(AppError::from(reason)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, pages::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_signing_failure_is_internal() {
        let err = AppError::from(SessionError::Signing("bad key".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let (_, body) = body_of(err).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "INTERNAL");
        assert_eq!(json["trace_id"], "unknown");
    }

    #[test]
    fn test_humanize_code() {
        assert_eq!(AppError::humanize_code("ROUTE_NOT_FOUND"), "Route Not Found");
        assert_eq!(AppError::humanize_code("INTERNAL"), "Internal");
    }

    #[test]
    fn test_session_reason_is_preserved() {
        let err = AppError::from(SessionError::Expired);
        assert_eq!(err.session_reason(), Some(&SessionError::Expired));
        assert_eq!(AppError::internal("x").session_reason(), None);
    }
}
