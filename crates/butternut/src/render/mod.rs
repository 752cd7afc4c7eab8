//! Markdown rendering of feature documents.
//!
//! Output is assembled line by line in a [`MarkdownWriter`]. Tables are
//! column-aligned and nested in blockquotes, steps become bullet items, and
//! features and scenarios become headings. Rendering is pure: the same tree
//! and options always produce the same text.

mod inline;
mod node;
pub mod table;
mod writer;

use tracing::debug;

use crate::error::RenderError;
use crate::model::{Background, Document, Examples, Feature, Rule, Scenario, Step, Table, Tag};

pub use node::{ChildTraversal, traversal_for};
pub use table::{ColumnWidths, TableStyle};
pub(crate) use writer::MarkdownWriter;

/// Line terminator used for every emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`.
    Lf,
    /// `\r\n`.
    CrLf,
    /// The host platform's convention.
    #[default]
    Native,
}

impl LineEnding {
    /// The terminator as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// How `<placeholder>` markers in step text are rewritten.
///
/// Scenario steps and background steps use different rules by default. The
/// two styles are kept distinct so the output stays stable until the
/// difference is settled deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `<name>` becomes `` `<name>` `` (inline code).
    Code,
    /// `<name>` becomes `[name]`.
    Brackets,
}

impl PlaceholderStyle {
    /// Rewrite every `<` and `>` in `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Code => text.replace('<', "`<").replace('>', ">`"),
            Self::Brackets => text.replace('<', "[").replace('>', "]"),
        }
    }
}

/// Options controlling the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Terminator for every line.
    pub line_ending: LineEnding,
    /// Placeholder rewriting for scenario step lists.
    pub scenario_placeholders: PlaceholderStyle,
    /// Placeholder rewriting for background steps.
    pub background_placeholders: PlaceholderStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::default(),
            scenario_placeholders: PlaceholderStyle::Code,
            background_placeholders: PlaceholderStyle::Brackets,
        }
    }
}

impl RenderOptions {
    /// Use the given line terminator.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Use the given placeholder style for scenario steps.
    #[must_use]
    pub fn with_scenario_placeholders(mut self, style: PlaceholderStyle) -> Self {
        self.scenario_placeholders = style;
        self
    }

    /// Use the given placeholder style for background steps.
    #[must_use]
    pub fn with_background_placeholders(mut self, style: PlaceholderStyle) -> Self {
        self.background_placeholders = style;
        self
    }
}

/// Renders document nodes as Markdown text.
///
/// Every method returns a complete fragment or an error; nothing is written
/// anywhere else. The renderer holds only its options and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a whole document, i.e. its root feature.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a table in the document is malformed.
    pub fn render_document(&self, document: &Document) -> Result<String, RenderError> {
        let markdown = self.render_feature(&document.feature)?;
        debug!(
            feature = %document.feature.name,
            bytes = markdown.len(),
            "rendered feature document"
        );
        Ok(markdown)
    }

    /// Render a feature with its traversed children.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a table in the feature is malformed.
    pub fn render_feature(&self, feature: &Feature) -> Result<String, RenderError> {
        self.render_with(|out| node::write_feature(out, feature, &self.options))
    }

    /// Render a scenario block, including its Examples.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a step table or Examples table is
    /// malformed.
    pub fn render_scenario(&self, scenario: &Scenario) -> Result<String, RenderError> {
        self.render_with(|out| node::write_scenario(out, scenario, &self.options))
    }

    /// Render the steps of a background.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a step table is malformed.
    pub fn render_background(&self, background: &Background) -> Result<String, RenderError> {
        self.render_with(|out| node::write_background(out, background, &self.options))
    }

    /// Render a rule heading and description.
    #[must_use]
    pub fn render_rule(&self, rule: &Rule) -> String {
        let mut out = MarkdownWriter::new(self.options.line_ending);
        node::write_rule(&mut out, rule);
        out.finish()
    }

    /// Render a sequence of Examples blocks.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when an Examples table is malformed.
    pub fn render_examples(&self, examples: &[Examples]) -> Result<String, RenderError> {
        self.render_with(|out| examples.iter().try_for_each(|block| node::write_examples(out, block)))
    }

    /// Render a step as an item of a scenario step list.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the step table is malformed.
    pub fn render_step(&self, step: &Step) -> Result<String, RenderError> {
        self.render_with(|out| inline::write_step(out, step, self.options.scenario_placeholders))
    }

    /// Render a step the way backgrounds present it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the step table is malformed.
    pub fn render_background_step(&self, step: &Step) -> Result<String, RenderError> {
        self.render_with(|out| {
            inline::write_background_step(out, step, self.options.background_placeholders)
        })
    }

    /// Render the tag line, or nothing when `tags` is empty.
    #[must_use]
    pub fn render_tags(&self, tags: &[Tag]) -> String {
        let mut out = MarkdownWriter::new(self.options.line_ending);
        inline::write_tags(&mut out, tags);
        out.finish()
    }

    /// Render a description with every line trimmed, or nothing when it is
    /// blank.
    #[must_use]
    pub fn render_description(&self, description: &str) -> String {
        let mut out = MarkdownWriter::new(self.options.line_ending);
        inline::write_description(&mut out, Some(description));
        out.finish()
    }

    /// Render a table in the given style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyTable`] for a table without rows and
    /// [`RenderError::MalformedTable`] for uneven rows.
    pub fn render_table(&self, table: &Table, style: TableStyle) -> Result<String, RenderError> {
        self.render_with(|out| table::write_rows(out, &table.rows, style))
    }

    fn render_with<F>(&self, render: F) -> Result<String, RenderError>
    where
        F: FnOnce(&mut MarkdownWriter) -> Result<(), RenderError>,
    {
        let mut out = MarkdownWriter::new(self.options.line_ending);
        render(&mut out)?;
        Ok(out.finish())
    }
}

/// Convert a document to Markdown with default options.
///
/// # Errors
///
/// Returns [`RenderError`] when a table in the document is malformed.
pub fn convert(document: &Document) -> Result<String, RenderError> {
    MarkdownRenderer::default().render_document(document)
}
