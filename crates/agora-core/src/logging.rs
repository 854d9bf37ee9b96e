//! Logging setup shared by the binaries.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level for the
//! agora crates while dependencies stay at `warn`.
//!
//! ```ignore
//! agora_core::logging::init_logging(args.verbose);
//! tracing::info!("ready");
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub fn filter_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        2 => "trace",
        // -vvv: everything, dependencies included
        _ => return "trace".to_string(),
    };
    format!("warn,agora={level},agora_core={level},agora_ui={level}")
}

/// Install the global subscriber. Calling it again is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(
            filter_directive(0),
            "warn,agora=info,agora_core=info,agora_ui=info"
        );
        assert!(filter_directive(1).contains("agora_core=debug"));
        assert!(filter_directive(2).contains("agora_core=trace"));
        assert_eq!(filter_directive(3), "trace");
    }

    #[test]
    fn test_directives_parse() {
        for v in 0..4 {
            assert!(EnvFilter::try_new(filter_directive(v)).is_ok());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0);
        init_logging(2);
    }
}
