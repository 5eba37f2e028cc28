//! Kiln optimizer driver.
//!
//! Builds one range builtin call from command-line arguments, reports what
//! the analysis knows about it, then runs the optimizer and reports the
//! rewrites.
//!
//! ```text
//! kiln [--python=2.7] [--lazy] [--iterate] [--threshold=256] <arg>...
//! ```
//!
//! Each positional argument is an integer literal, a float literal (`5.0`)
//! or `?` for a value not known at compile time.

mod command;
mod report;

use std::sync::Once;

pub use command::{parse_args, Argument, CliError, Invocation};
pub use report::{run, Report};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the driver.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=kiln_opt=debug` or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
