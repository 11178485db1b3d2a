pub mod app;
pub mod tls;
