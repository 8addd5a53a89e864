// Chunk: docs/chunks/editor_config - Editor configuration and theme loading
//!
//! Logging setup for quill-render.
//!
//! Logs go to stderr so stdout carries only rendered output.
//!
//! ## Environment Variables
//!
//! 1. **`QUILL_LOG`** (highest priority) - quill-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for quill crates

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Crates whose targets `QUILL_LOG=<level>` applies to.
const QUILL_TARGETS: [&str; 4] = ["quill", "quill_surface", "quill_input", "quill_syntax"];

/// Initialize logging.
///
/// Safe to call more than once; later calls report the error from
/// `try_init` and leave the first subscriber in place.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(create_filter());

    Registry::default().with(stderr_layer).try_init()?;
    Ok(())
}

/// Initialize logging for tests. Will not fail if logging is already set up.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Implements the priority system: `QUILL_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    filter_from(env::var("QUILL_LOG").ok(), env::var("RUST_LOG").ok())
}

fn filter_from(quill_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    if let Some(quill_log) = quill_log {
        return EnvFilter::new(expand_quill_log(&quill_log));
    }
    if let Some(rust_log) = rust_log {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(expand_quill_log("info"))
}

/// Expands `QUILL_LOG` values into full filter directives.
///
/// - `QUILL_LOG=debug` becomes `warn,quill=debug,quill_surface=debug,...`
/// - `QUILL_LOG=quill_syntax=trace` is used as-is
fn expand_quill_log(quill_log: &str) -> String {
    if quill_log.contains('=') || quill_log.contains(',') {
        return quill_log.to_string();
    }
    let mut directives = String::from("warn");
    for target in QUILL_TARGETS {
        directives.push_str(&format!(",{target}={quill_log}"));
    }
    directives
}
