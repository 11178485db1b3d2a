use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use gateway::middleware::request_trace::RequestTrace;
use gateway::middleware::security_headers::SecurityHeaders;
use gateway::middleware::structured_logger::StructuredLogger;
use gateway::middleware::trace_span::TraceSpan;
use gateway::routes;
use gateway::AppState;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig)>;

/// Builder for test Actix services wired like the production server, minus TLS.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Use the production route table
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure));
        self
    }

    /// Use custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + 'static,
    {
        self.route_config = Some(Box::new(config_fn));
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(SecurityHeaders)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                })
                .default_service(web::to(routes::not_found)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
