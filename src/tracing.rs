//! Log output for the `eighty` binary
//!
//! Two sinks: stderr, filtered by `RUST_LOG` (default `warn`), and a daily
//! rotated `eighty.log` under the config logs directory that always records
//! debug events. Stdout is left to the rendered page.
//!
//! `RUST_LOG=eighty::layout=debug` shows per-stage token and line counts.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE: &str = "eighty.log";
const CONSOLE_DEFAULT: &str = "warn";

fn console_layer() -> BoxedLayer {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT));
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter)
        .boxed()
}

/// `None` when the logs directory cannot be created
fn file_layer() -> Option<BoxedLayer> {
    let dir = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("eighty: file logging disabled: {}", e);
            return None;
        }
    };
    Some(
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE))
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("debug"))
            .boxed(),
    )
}

/// Install the global subscriber. Call once, before any rendering.
pub fn init() {
    let layers: Vec<BoxedLayer> = std::iter::once(console_layer()).chain(file_layer()).collect();
    tracing_subscriber::registry().with(layers).init();
}
