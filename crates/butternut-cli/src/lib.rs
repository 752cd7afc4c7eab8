//! Batch conversion of Gherkin feature files to Markdown.
//!
//! This crate backs the `butternut` command. It finds `.feature` files in a
//! source directory, renders each with [`butternut`], and writes
//! `<name>.feature.md` (or `<name>.feature.json` in JSON mode) into an output
//! directory.
//!
//! # Configuration
//!
//! Defaults can be set through environment variables and overridden on the
//! command line:
//!
//! - `BUTTERNUT_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//! - `BUTTERNUT_LINE_ENDING`: line ending of generated files (lf, crlf,
//!   native)
//!
//! # Example
//!
//! ```no_run
//! use butternut_cli::batch::{BatchOptions, convert_features};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), butternut_cli::error::CliError> {
//! let options = BatchOptions::new("features").with_output("docs/features");
//! let report = convert_features(&options, &CancellationToken::new()).await?;
//! assert!(!report.cancelled);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
