//! Error types for the conversion command.
//!
//! Every variant that concerns a file carries its path so a failed batch
//! names the file that stopped it.

use std::path::PathBuf;

use butternut::{ParseError, RenderError};
use thiserror::Error;

/// An invalid configuration value from the environment or the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source directory could not be listed.
    #[error("failed to scan {}: {source}", path.display())]
    Discover {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutput {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A feature file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Feature file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A feature file is not valid Gherkin.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Feature file being parsed.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: ParseError,
    },

    /// A feature file could not be rendered.
    #[error("failed to render {}: {source}", path.display())]
    Render {
        /// Feature file being rendered.
        path: PathBuf,
        /// Renderer failure.
        #[source]
        source: RenderError,
    },

    /// A document could not be serialised as JSON.
    #[error("failed to serialise {} as JSON: {source}", path.display())]
    Json {
        /// Feature file being serialised.
        path: PathBuf,
        /// Serialiser failure.
        #[source]
        source: serde_json::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output file being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure, such as starting the runtime.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_message() {
        let error = CliError::from(ConfigError("unknown log level 'loud'".to_string()));
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level 'loud'"
        );
    }

    #[test]
    fn render_error_names_the_feature_file() {
        let error = CliError::Render {
            path: PathBuf::from("features/pantry.feature"),
            source: RenderError::EmptyTable,
        };
        assert_eq!(
            error.to_string(),
            "failed to render features/pantry.feature: table has no rows"
        );
    }

    #[test]
    fn io_error_converts_from_std_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CliError = io_err.into();
        assert!(error.to_string().contains("file not found"));
    }
}
