//! Log output for the `butternut` command.
//!
//! Events are written to stderr without timestamps or targets: one short line
//! per converted file at `info`, discovery details at `debug`.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn level_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the stderr subscriber for `config.log_level`.
///
/// `--log-level` wins over `BUTTERNUT_LOG_LEVEL`, which wins over `info`;
/// both are already folded into `config`. Only the first call installs a
/// subscriber.
pub fn init_logging(config: &CliConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(level_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    // A second installation attempt fails harmlessly.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use rstest::rstest;

    #[rstest]
    #[case(LogLevel::Trace, "trace")]
    #[case(LogLevel::Warn, "warn")]
    #[case(LogLevel::Error, "error")]
    fn filter_follows_the_configured_level(#[case] level: LogLevel, #[case] expected: &str) {
        let config = CliConfig::default().with_log_level(level);
        assert_eq!(level_filter(&config).to_string(), expected);
    }

    #[test]
    fn repeated_initialisation_keeps_the_first_subscriber() {
        init_logging(&CliConfig::default().with_log_level(LogLevel::Debug));
        init_logging(&CliConfig::default());
        assert!(tracing::dispatcher::has_been_set());
    }
}
