use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::SessionClaims;
use crate::auth::error::SessionError;
use crate::error::AppError;

/// Claims of the session validated for this request.
///
/// Only available behind [`crate::SessionGate`], which stores the claims in
/// request extensions. Anywhere else extraction fails as unauthorized.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionClaims);

impl CurrentSession {
    pub fn claims(&self) -> &SessionClaims {
        &self.0
    }
}

impl Deref for CurrentSession {
    type Target = SessionClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionClaims>()
                .cloned()
                .map(CurrentSession)
                .ok_or_else(|| AppError::unauthorized(SessionError::NoSession)),
        )
    }
}
