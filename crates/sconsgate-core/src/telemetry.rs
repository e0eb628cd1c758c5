//! Tracing setup for the sconsgate binary.
//!
//! Only wrapper diagnostics go through the subscriber; the raw build-tool
//! output is relayed to stdout by the log recorder and must stay uncolored
//! and unprefixed, since CI greps it for sentinel lines.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `json` switches the `--json` wire format
/// for log aggregation; `level` is the default when `RUST_LOG` is unset.
/// Later calls are no-ops, so tests may call this freely.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let base = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_target(false);

    if json {
        base.with(layer.json()).try_init().ok();
    } else {
        base.with(layer).try_init().ok();
    }
}
