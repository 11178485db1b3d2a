use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::middleware::session_gate::SessionGate;

pub mod health;
pub mod pages;
pub mod profile;
pub mod session;

/// Register every route of the gateway.
///
/// `/profile` and `/logout` sit behind [`SessionGate`]; the rest are public.
/// Register [`not_found`] as the app's default service alongside this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(pages::landing)))
        .service(web::resource("/health").route(web::get().to(health::health)))
        .service(
            web::resource("/login")
                .route(web::get().to(session::login))
                .route(web::post().to(session::login)),
        )
        .service(
            web::resource("/profile")
                .wrap(SessionGate)
                .route(web::get().to(profile::profile))
                .route(web::post().to(profile::profile)),
        )
        .service(
            web::resource("/logout")
                .wrap(SessionGate)
                .route(web::get().to(session::logout)),
        );
}

pub async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(
        "ROUTE_NOT_FOUND",
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
