//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Returns `false` if a
/// subscriber was already installed (tests call this more than once).
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Repository calls and failure classification
/// - `RUST_LOG=info` - Lifecycle transitions and startup
/// - `RUST_LOG=warn` - Rejected transitions and stale writes
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init("debug");
        assert!(!init("debug"));
    }
}
