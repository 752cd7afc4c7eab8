//! Runtime configuration parsed from environment variables.
//!
//! Settings can be provided through variables prefixed with `BUTTERNUT_` and
//! overridden from the command line.

use std::env;
use std::str::FromStr;

use butternut::render::LineEnding;

use crate::error::ConfigError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "BUTTERNUT_LOG_LEVEL";
/// Environment variable selecting the output line ending.
pub const LINE_ENDING_VAR: &str = "BUTTERNUT_LINE_ENDING";

/// Minimum severity of emitted log events. `Info` unless configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-node rendering decisions, such as skipped rules.
    Trace,
    /// Discovery results and per-file details.
    Debug,
    /// One line per converted file plus the run summary.
    #[default]
    Info,
    /// Cancellation and overwritten outputs.
    Warn,
    /// Only the failure that stopped the run.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => {
                return Err(ConfigError(format!(
                    "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
                )));
            }
        };
        Ok(level)
    }
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Parse a line ending name (`lf`, `crlf`, or `native`).
///
/// # Errors
///
/// Returns [`ConfigError`] for any other value.
pub fn parse_line_ending(s: &str) -> Result<LineEnding, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "lf" | "unix" => Ok(LineEnding::Lf),
        "crlf" | "windows" => Ok(LineEnding::CrLf),
        "native" => Ok(LineEnding::Native),
        _ => Err(ConfigError(format!(
            "unknown line ending '{s}', expected one of: lf, crlf, native"
        ))),
    }
}

/// Configuration for a conversion run.
///
/// # Environment Variables
///
/// - `BUTTERNUT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `BUTTERNUT_LINE_ENDING`: line ending of generated files (lf, crlf,
///   native)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Line ending written to generated files.
    pub line_ending: LineEnding,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|value| value.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let line_ending = lookup(LINE_ENDING_VAR)
            .map(|value| parse_line_ending(&value))
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            log_level,
            line_ending,
        })
    }

    /// Apply command-line overrides, which take precedence over the
    /// environment.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        line_ending: Option<LineEnding>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(ending) = line_ending {
            self.line_ending = ending;
        }
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_valid_values(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(matches!(result, Err(ConfigError(message)) if message.contains("unknown log level")));
    }

    #[rstest]
    #[case("lf", LineEnding::Lf)]
    #[case("CRLF", LineEnding::CrLf)]
    #[case("native", LineEnding::Native)]
    fn line_endings_parse(#[case] input: &str, #[case] expected: LineEnding) {
        assert_eq!(parse_line_ending(input).ok(), Some(expected));
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = CliConfig::from_lookup(lookup_from(&[])).ok();
        assert_eq!(config, Some(CliConfig::default()));
    }

    #[test]
    fn variables_are_read_through_the_lookup() {
        let config = CliConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "debug"),
            (LINE_ENDING_VAR, "crlf"),
        ]))
        .ok();
        assert_eq!(
            config,
            Some(CliConfig {
                log_level: LogLevel::Debug,
                line_ending: LineEnding::CrLf,
            })
        );
    }

    #[test]
    fn invalid_variable_is_reported() {
        let result = CliConfig::from_lookup(lookup_from(&[(LINE_ENDING_VAR, "mac")]));
        assert!(result.is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let config = CliConfig::default()
            .with_log_level(LogLevel::Warn)
            .apply_overrides(Some(LogLevel::Error), Some(LineEnding::Lf));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.line_ending, LineEnding::Lf);

        let untouched = CliConfig::default().apply_overrides(None, None);
        assert_eq!(untouched, CliConfig::default());
    }
}
