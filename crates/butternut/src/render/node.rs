//! Structural nodes: features, scenarios, backgrounds, rules, and Examples.

use tracing::trace;

use super::inline::{write_background_step, write_description, write_step, write_tags};
use super::table::{self, TableStyle};
use super::{MarkdownWriter, RenderOptions};
use crate::error::RenderError;
use crate::model::{Background, Examples, Feature, FeatureChild, Rule, Scenario};

/// Whether the feature renderer emits a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildTraversal {
    /// The child is rendered in place.
    Render,
    /// The child and everything below it are left out.
    Skip,
}

/// Traversal policy for the children of a feature.
///
/// Backgrounds contribute their steps, scenarios their full block. Rules are
/// skipped together with their nested scenarios; render them directly with
/// [`MarkdownRenderer::render_rule`](super::MarkdownRenderer::render_rule)
/// when needed.
#[must_use]
pub fn traversal_for(child: &FeatureChild) -> ChildTraversal {
    match child {
        FeatureChild::Background(_) | FeatureChild::Scenario(_) => ChildTraversal::Render,
        FeatureChild::Rule(_) => ChildTraversal::Skip,
    }
}

pub(super) fn write_feature(
    out: &mut MarkdownWriter,
    feature: &Feature,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    out.line(&format!("# Feature: {}", feature.name));
    out.blank_line();
    if write_tags(out, &feature.tags) {
        out.blank_line();
    }
    if write_description(out, feature.description.as_deref()) {
        out.blank_line();
    }

    for child in &feature.children {
        match traversal_for(child) {
            ChildTraversal::Render => write_child(out, child, options)?,
            ChildTraversal::Skip => {
                trace!(feature = %feature.name, kind = child.kind(), "skipping feature child");
            }
        }
    }
    Ok(())
}

fn write_child(
    out: &mut MarkdownWriter,
    child: &FeatureChild,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    match child {
        FeatureChild::Background(background) => write_background(out, background, options),
        FeatureChild::Scenario(scenario) => write_scenario(out, scenario, options),
        FeatureChild::Rule(rule) => {
            write_rule(out, rule);
            Ok(())
        }
    }
}

pub(super) fn write_scenario(
    out: &mut MarkdownWriter,
    scenario: &Scenario,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    out.line(&format!("### Scenario: {}", scenario.name));
    out.blank_line();
    if write_tags(out, &scenario.tags) {
        out.blank_line();
    }
    write_description(out, scenario.description.as_deref());

    for step in &scenario.steps {
        write_step(out, step, options.scenario_placeholders)?;
    }
    out.blank_line();

    for examples in &scenario.examples {
        write_examples(out, examples)?;
    }
    Ok(())
}

pub(super) fn write_background(
    out: &mut MarkdownWriter,
    background: &Background,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    background
        .steps
        .iter()
        .try_for_each(|step| write_background_step(out, step, options.background_placeholders))
}

pub(super) fn write_rule(out: &mut MarkdownWriter, rule: &Rule) {
    out.blank_line();
    out.line(&format!("## {}", rule.name));
    out.blank_line();
    write_description(out, rule.description.as_deref());
}

pub(super) fn write_examples(
    out: &mut MarkdownWriter,
    examples: &Examples,
) -> Result<(), RenderError> {
    out.line(">");
    out.line(&format!(">### {}", examples.keyword.trim()));
    out.line(">");
    examples.table.as_ref().map_or(Ok(()), |data| {
        table::write_rows(out, &data.rows, TableStyle::Examples)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;
    use crate::render::LineEnding;

    #[test]
    fn rules_are_skipped_and_everything_else_is_rendered() {
        let policy = [
            (FeatureChild::from(Background::new()), ChildTraversal::Render),
            (FeatureChild::from(Scenario::new("s")), ChildTraversal::Render),
            (FeatureChild::from(Rule::new("r")), ChildTraversal::Skip),
        ];
        for (child, expected) in &policy {
            assert_eq!(traversal_for(child), *expected, "policy for {}", child.kind());
        }
    }

    #[test]
    fn rule_renders_heading_and_description() {
        let mut out = MarkdownWriter::new(LineEnding::Lf);
        let rule = Rule::new("Accounts stay balanced")
            .with_description("  Credits equal debits.  ")
            .with_scenario(Scenario::new("hidden").with_step(Step::new("Given", "x")));
        write_rule(&mut out, &rule);
        assert_eq!(
            out.finish(),
            "\n## Accounts stay balanced\n\nCredits equal debits.\n"
        );
    }
}
