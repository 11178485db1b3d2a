use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,rustls=warn";

/// Output shape of the process log, chosen with `GATEWAY_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Install the global subscriber. JSON unless `GATEWAY_LOG_FORMAT=pretty`;
/// the filter comes from `RUST_LOG`.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = LogFormat::from_env_value(std::env::var("GATEWAY_LOG_FORMAT").ok().as_deref());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .json()
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true).pretty()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn test_log_format_selection() {
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some(" Pretty ")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value(Some("yaml")), LogFormat::Json);
    }
}
