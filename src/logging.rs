//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding per-target filter directives.
pub const LOG_ENV: &str = "CHANGE_LABEL_LOG";

static INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// `CHANGE_LABEL_LOG` takes precedence, e.g.
/// `CHANGE_LABEL_LOG=change_label_config=debug,change_label_node=warn`.
/// Otherwise both crates log at `default_level`. Only the first call has
/// any effect.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "change_label_config={0},change_label_node={0}",
                default_level
            ))
        });

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
