use actix_web::HttpResponse;

use crate::pages;

/// Public landing page linking to login and the protected views.
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::LANDING)
}
