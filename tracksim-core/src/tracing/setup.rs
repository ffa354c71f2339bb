//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracksim tracing/logging system.
///
/// Reads the `TRACKSIM_LOG` environment variable for per-module log levels.
/// Format: `TRACKSIM_LOG=tracksim_engine=debug,tracksim_storage=warn`
///
/// Falls back to `info` for the tracksim crates if `TRACKSIM_LOG` is not set
/// or is invalid. Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TRACKSIM_LOG").unwrap_or_else(|_| {
            EnvFilter::new(
                "tracksim=info,tracksim_core=info,tracksim_storage=info,tracksim_engine=info",
            )
        });

        // A subscriber installed by the host wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
