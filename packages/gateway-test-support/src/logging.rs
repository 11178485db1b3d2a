//! Test logging shared by the gateway's unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set. Session rejections are
/// warnings, so a failing gate test shows why it rejected.
pub const DEFAULT_TEST_FILTER: &str = "warn,gateway=warn";

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TEST_FILTER))
}

/// Install a test-writer subscriber once per test binary.
///
/// Later calls are no-ops, as is the first one if something else already
/// installed a global subscriber.
pub fn init() {
    SUBSCRIBER.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}
