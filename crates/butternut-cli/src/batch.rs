//! Sequential conversion of a directory of feature files.
//!
//! Files are processed one at a time: read, parse, render, write. The
//! cancellation token is checked before each file, never in the middle of
//! one, and files written before a failure or cancellation are left in place.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use butternut::render::{MarkdownRenderer, RenderOptions};
use butternut::{Document, parse_feature_str};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::discovery::find_feature_files;
use crate::error::CliError;

/// Format of the generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown, written as `<name>.feature.md`.
    #[default]
    Markdown,
    /// The parsed document as pretty-printed JSON, written as
    /// `<name>.feature.json`.
    Json,
}

impl OutputFormat {
    /// File extension appended to the source file name.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// Resolved parameters of a conversion run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory searched for `.feature` files.
    pub source: PathBuf,
    /// Directory receiving the generated files.
    pub output: PathBuf,
    /// Search subdirectories of `source` as well.
    pub recursive: bool,
    /// Parse and render but write nothing.
    pub dry_run: bool,
    /// Format of the generated files.
    pub format: OutputFormat,
    /// Options passed to the Markdown renderer.
    pub render: RenderOptions,
}

impl BatchOptions {
    /// Options converting `source` into itself as Markdown.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self {
            output: source.clone(),
            source,
            recursive: false,
            dry_run: false,
            format: OutputFormat::default(),
            render: RenderOptions::default(),
        }
    }

    /// Write generated files to `output`.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Search subdirectories.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Skip writing output files.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Select the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Select renderer options.
    #[must_use]
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output paths written, or that would have been written in a dry run,
    /// in processing order.
    pub outputs: Vec<PathBuf>,
    /// Whether the run stopped early because it was cancelled.
    pub cancelled: bool,
}

/// Convert every feature file selected by `options`.
///
/// Cancellation is a clean stop: the report lists what was written so far
/// and has `cancelled` set.
///
/// # Errors
///
/// The first failure aborts the run. Returns [`CliError`] when discovery,
/// reading, parsing, rendering, serialising, or writing fails.
pub async fn convert_features(
    options: &BatchOptions,
    cancel: &CancellationToken,
) -> Result<BatchReport, CliError> {
    if !options.dry_run {
        tokio::fs::create_dir_all(&options.output)
            .await
            .map_err(|source| CliError::CreateOutput {
                path: options.output.clone(),
                source,
            })?;
    }

    let files = find_feature_files(&options.source, options.recursive)?;
    info!(
        source = %options.source.display(),
        count = files.len(),
        "converting feature files"
    );

    let renderer = MarkdownRenderer::new(options.render);
    let mut report = BatchReport::default();
    let mut targets = HashSet::new();
    for file in files {
        if cancel.is_cancelled() {
            warn!(
                converted = report.outputs.len(),
                "conversion cancelled; remaining files skipped"
            );
            report.cancelled = true;
            return Ok(report);
        }

        let target = output_path(&options.output, &file, options.format);
        if !targets.insert(target.clone()) {
            warn!(
                source = %file.display(),
                target = %target.display(),
                "output path already produced in this run; overwriting"
            );
        }
        let contents = convert_file(&file, &renderer, options.format).await?;

        if options.dry_run {
            info!(source = %file.display(), target = %target.display(), "dry run; not writing");
        } else {
            tokio::fs::write(&target, contents)
                .await
                .map_err(|source| CliError::Write {
                    path: target.clone(),
                    source,
                })?;
            info!(source = %file.display(), target = %target.display(), "wrote output");
        }
        report.outputs.push(target);
    }
    Ok(report)
}

async fn convert_file(
    path: &Path,
    renderer: &MarkdownRenderer,
    format: OutputFormat,
) -> Result<String, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = text.len(), "read feature file");
    let document = parse_feature_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    render_document(path, &document, renderer, format)
}

fn render_document(
    path: &Path,
    document: &Document,
    renderer: &MarkdownRenderer,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Markdown => {
            renderer
                .render_document(document)
                .map_err(|source| CliError::Render {
                    path: path.to_path_buf(),
                    source,
                })
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Output path for `file`: its file name plus the format's extension, placed
/// in `output_dir`.
#[must_use]
pub fn output_path(output_dir: &Path, file: &Path, format: OutputFormat) -> PathBuf {
    let mut name = file
        .file_name()
        .map_or_else(|| file.as_os_str().to_os_string(), OsString::from);
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use butternut::RenderError;
    use butternut::model::{Feature, Scenario, Step, Table};
    use butternut::render::LineEnding;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    const LOGIN: &str = "Feature: Login\n\n  Scenario: Valid user\n    Given a <user>\n";

    #[fixture]
    fn source() -> TempDir {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("login.feature"), LOGIN).expect("failed to write feature");
        fs::write(dir.path().join("readme.txt"), "not a feature").expect("failed to write text");
        dir
    }

    fn options_for(source: &TempDir, output: &Path) -> BatchOptions {
        BatchOptions::new(source.path())
            .with_output(output)
            .with_render_options(RenderOptions::default().with_line_ending(LineEnding::Lf))
    }

    #[rstest]
    #[case::markdown(OutputFormat::Markdown, "out/login.feature.md")]
    #[case::json(OutputFormat::Json, "out/login.feature.json")]
    fn output_path_keeps_the_source_name(#[case] format: OutputFormat, #[case] expected: &str) {
        let path = output_path(Path::new("out"), Path::new("features/nested/login.feature"), format);
        assert_eq!(path, Path::new(expected));
    }

    #[test]
    fn options_default_output_to_source() {
        let options = BatchOptions::new("features");
        assert_eq!(options.output, Path::new("features"));
        assert!(!options.recursive);
        assert!(!options.dry_run);
        assert_eq!(options.format, OutputFormat::Markdown);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_markdown_into_the_output_dir(source: TempDir) {
        let output = source.path().join("docs");
        let report = convert_features(&options_for(&source, &output), &CancellationToken::new())
            .await
            .expect("conversion succeeds");

        let target = output.join("login.feature.md");
        assert_eq!(report.outputs, [target.clone()]);
        assert!(!report.cancelled);
        let markdown = fs::read_to_string(target).expect("output written");
        assert_eq!(
            markdown,
            "# Feature: Login\n\n### Scenario: Valid user\n\n- _Given_ a `<user>`\n\n"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn json_mode_writes_the_parsed_document(source: TempDir) {
        let output = source.path().join("json");
        let options = options_for(&source, &output).with_format(OutputFormat::Json);
        convert_features(&options, &CancellationToken::new())
            .await
            .expect("conversion succeeds");

        let text = fs::read_to_string(output.join("login.feature.json")).expect("output written");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(value.pointer("/feature/name"), Some(&"Login".into()));
        assert_eq!(
            value.pointer("/feature/children/0/kind"),
            Some(&"scenario".into())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn dry_run_writes_nothing(source: TempDir) {
        let output = source.path().join("dry");
        let options = options_for(&source, &output).with_dry_run(true);
        let report = convert_features(&options, &CancellationToken::new())
            .await
            .expect("conversion succeeds");

        assert_eq!(report.outputs, [output.join("login.feature.md")]);
        assert!(!output.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_run_stops_before_the_next_file(source: TempDir) {
        let output = source.path().join("cancelled");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = convert_features(&options_for(&source, &output), &cancel)
            .await
            .expect("cancellation is not an error");

        assert!(report.cancelled);
        assert!(report.outputs.is_empty());
        assert!(!output.join("login.feature.md").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn ragged_table_file_fails_at_parse_time(source: TempDir) {
        fs::write(
            source.path().join("broken.feature"),
            "Feature: Broken\n\n  Scenario: Ragged\n    Given rows\n      | a | b |\n      | 1 |\n",
        )
        .expect("failed to write feature");
        let output = source.path().join("out");
        let result = convert_features(&options_for(&source, &output), &CancellationToken::new()).await;

        assert!(
            matches!(&result, Err(CliError::Parse { path, .. }) if path.ends_with("broken.feature")),
            "unexpected result: {result:?}"
        );
        assert!(!output.join("login.feature.md").exists());
    }

    #[test]
    fn ragged_document_fails_at_render_time() {
        let document = Document::new(Feature::new("Broken").with_scenario(
            Scenario::new("Ragged").with_step(
                Step::new("Given", "rows").with_table(Table::new([vec!["a", "b"], vec!["1"]])),
            ),
        ));
        let renderer = MarkdownRenderer::new(RenderOptions::default());
        let result = render_document(
            Path::new("broken.feature"),
            &document,
            &renderer,
            OutputFormat::Markdown,
        );

        assert!(
            matches!(
                &result,
                Err(CliError::Render {
                    path,
                    source: RenderError::MalformedTable { row_number: 2, .. },
                }) if path == Path::new("broken.feature")
            ),
            "unexpected result: {result:?}"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_gherkin_aborts_the_run(source: TempDir) {
        fs::write(source.path().join("bad.feature"), "this is not gherkin\n")
            .expect("failed to write feature");
        let output = source.path().join("out");
        let result = convert_features(&options_for(&source, &output), &CancellationToken::new()).await;

        assert!(matches!(result, Err(CliError::Parse { .. })), "unexpected result: {result:?}");
    }
}
