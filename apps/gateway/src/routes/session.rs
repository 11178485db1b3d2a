use std::time::SystemTime;

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::session::CurrentSession;
use crate::session::identity::LoginAttempt;
use crate::state::app_state::AppState;

/// Issue a session and redirect to `/profile`.
///
/// Login fields come from a form body when one carries a username, otherwise
/// from the query string.
pub async fn login(
    query: web::Query<LoginAttempt>,
    form: Option<web::Form<LoginAttempt>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let attempt = form
        .map(web::Form::into_inner)
        .filter(|attempt| attempt.username.is_some())
        .unwrap_or_else(|| query.into_inner());

    let subject = app_state.identity.authenticate(&attempt).await?;

    Ok(app_state.sessions.login(&subject, SystemTime::now())?)
}

/// Clear the session cookie. Only reachable with a valid session.
pub async fn logout(session: CurrentSession, app_state: web::Data<AppState>) -> HttpResponse {
    app_state.sessions.logout(session.claims())
}
