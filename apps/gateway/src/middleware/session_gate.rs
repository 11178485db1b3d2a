//! Session gate middleware
//!
//! Wraps a protected resource. The request's session cookie is extracted and
//! verified; on success the claims are stored in request extensions (read
//! through [`crate::CurrentSession`]) and the wrapped service runs. On any
//! failure the wrapped service is never called and the unauthorized page is
//! returned instead.

use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware { service }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            let res = req.error_response(AppError::internal("AppState not available"));
            return Box::pin(async move { Ok(res.map_into_right_body()) });
        };

        match app_state.sessions.validate(req.request(), SystemTime::now()) {
            Ok(claims) => {
                tracing::Span::current()
                    .record("subject", tracing::field::display(Redacted(claims.subject())));
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(reason) => {
                security::session_rejected(&reason, req.path());

                let res = req.error_response(AppError::unauthorized(reason));
                Box::pin(async move { Ok(res.map_into_right_body()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::SessionGate;
    use crate::extractors::session::CurrentSession;
    use crate::state::app_state::AppState;
    use crate::state::security_config::SecurityConfig;

    async fn whoami(session: CurrentSession) -> HttpResponse {
        HttpResponse::Ok().body(session.subject().to_string())
    }

    #[actix_web::test]
    async fn test_gate_reads_session_cookie() {
        let state = AppState::with_security(SecurityConfig::default());
        let token = state
            .sessions
            .codec()
            .mint("TestUser", SystemTime::now(), state.sessions.ttl())
            .unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/me")
                    .wrap(SessionGate)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new("Auth", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "TestUser");

        let req = test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new("Session", "x"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_gate_without_state_is_internal_error() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(SessionGate)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
