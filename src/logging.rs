//! Diagnostic logging to stderr.
//!
//! The default level is `warn`, so normal operation prints nothing besides
//! the command's own output. `RUST_LOG` takes precedence over the level
//! passed in:
//! ```bash
//! RUST_LOG=autorun=debug autorun -- make
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter for `level`, unless `RUST_LOG` is set.
///
/// An unparsable directive falls back to `warn`.
pub fn filter_for(level: &str) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the stderr subscriber. Only the first call takes effect.
pub fn init(level: &str) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter_for(level));

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
