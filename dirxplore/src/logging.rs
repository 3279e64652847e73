use std::str::FromStr;
use std::sync::Once;
use tracing::Level;

/// Environment variable naming the log level, e.g. `DIRXPLORE_LOG=debug`
pub const LOG_ENV: &str = "DIRXPLORE_LOG";

static INIT: Once = Once::new();

/// Install a stderr subscriber if `DIRXPLORE_LOG` asks for one.
///
/// Runs at most once per process. A subscriber the host installed first is
/// left in place.
pub fn init() {
    INIT.call_once(|| {
        let Some(level) = level_from_env() else {
            return;
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn level_from_env() -> Option<Level> {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
}

fn parse_level(value: &str) -> Option<Level> {
    Level::from_str(value.trim()).ok()
}
