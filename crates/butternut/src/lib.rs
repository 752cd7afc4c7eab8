//! Markdown rendering for Gherkin feature documents.
//!
//! `butternut` turns a parsed feature tree (Feature, Background, Scenario,
//! Rule, Step, Examples, data tables, tags) into Markdown meant for humans:
//! headings for features and scenarios, bullet lists for steps, and
//! column-aligned tables nested inside blockquotes.
//!
//! Parsing is delegated to the [`gherkin`] crate. The [`parse`] module adapts
//! its syntax tree into the crate's own [`model`], which can also be built by
//! hand. Rendering is a pure function of the tree and [`RenderOptions`].
//!
//! # Example
//!
//! ```
//! use butternut::model::{Document, Feature, Scenario, Step};
//! use butternut::render::{LineEnding, MarkdownRenderer, RenderOptions};
//!
//! let feature = Feature::new("Login").with_scenario(
//!     Scenario::new("Valid user").with_step(Step::new("Given", "a <user> is logged in")),
//! );
//! let renderer = MarkdownRenderer::new(RenderOptions::default().with_line_ending(LineEnding::Lf));
//! let markdown = renderer.render_document(&Document::new(feature))?;
//! assert!(markdown.starts_with("# Feature: Login\n"));
//! assert!(markdown.contains("- _Given_ a `<user>` is logged in\n"));
//! # Ok::<(), butternut::RenderError>(())
//! ```

pub mod error;
pub mod model;
pub mod parse;
pub mod render;

pub use error::{ParseError, RenderError};
pub use model::Document;
pub use parse::{parse_feature_file, parse_feature_str};
pub use render::{MarkdownRenderer, RenderOptions, convert};
