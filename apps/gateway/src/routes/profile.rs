use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::extractors::session::CurrentSession;
use crate::pages;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub page: Option<String>,
}

/// Which profile view a request asks for. Both require the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileView {
    Default,
    Alternate,
}

impl ProfileView {
    pub fn from_query(page: Option<&str>) -> Self {
        match page {
            Some("page2") => ProfileView::Alternate,
            _ => ProfileView::Default,
        }
    }

    pub fn render(self, session: &CurrentSession) -> String {
        match self {
            ProfileView::Default => pages::profile(session.subject()),
            ProfileView::Alternate => pages::ALTERNATE_PAGE.to_string(),
        }
    }
}

pub async fn profile(session: CurrentSession, query: web::Query<ProfileQuery>) -> HttpResponse {
    let view = ProfileView::from_query(query.page.as_deref());

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(view.render(&session))
}
