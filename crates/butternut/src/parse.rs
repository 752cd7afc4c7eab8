//! Loading `.feature` files through the `gherkin` parser.
//!
//! `gherkin` stores a feature's background, scenarios, and rules in separate
//! collections. The adapter merges them back into a single child list ordered
//! by source line so the renderer sees the document as it was written.

use std::path::Path;

use gherkin::GherkinEnv;
use tracing::debug;

use crate::error::ParseError;
use crate::model::{
    Background, Document, Examples, Feature, FeatureChild, Rule, Scenario, Step, Table, Tag,
};

/// Read and parse a `.feature` file from disk.
///
/// # Errors
///
/// Returns [`ParseError::Read`] when the file cannot be read and
/// [`ParseError::Parse`] when it is not valid Gherkin.
pub fn parse_feature_file(path: &Path) -> Result<Document, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "parsing feature file");
    parse_feature_str(&text)
}

/// Parse feature text into a [`Document`].
///
/// A trailing newline is appended when missing; the grammar requires one.
///
/// # Errors
///
/// Returns [`ParseError::Parse`] when the text is not valid Gherkin.
pub fn parse_feature_str(text: &str) -> Result<Document, ParseError> {
    let mut text = text.to_string();
    normalise_trailing_newline(&mut text);
    let feature = gherkin::Feature::parse(&text, GherkinEnv::default())?;
    Ok(Document::new(feature.into()))
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

impl From<gherkin::Feature> for Feature {
    fn from(feature: gherkin::Feature) -> Self {
        let mut positioned: Vec<(usize, FeatureChild)> = Vec::new();
        if let Some(background) = feature.background {
            positioned.push((background.position.line, background.into()));
        }
        positioned.extend(
            feature
                .scenarios
                .into_iter()
                .map(|scenario| (scenario.position.line, Scenario::from(scenario).into())),
        );
        positioned.extend(
            feature
                .rules
                .into_iter()
                .map(|rule| (rule.position.line, Rule::from(rule).into())),
        );
        positioned.sort_by_key(|(line, _)| *line);

        Self {
            name: feature.name,
            description: feature.description,
            tags: convert_tags(feature.tags),
            children: positioned.into_iter().map(|(_, child)| child).collect(),
        }
    }
}

impl From<gherkin::Background> for FeatureChild {
    fn from(background: gherkin::Background) -> Self {
        Self::Background(background.into())
    }
}

impl From<gherkin::Background> for Background {
    fn from(background: gherkin::Background) -> Self {
        Self {
            steps: convert_steps(background.steps),
        }
    }
}

impl From<gherkin::Scenario> for Scenario {
    fn from(scenario: gherkin::Scenario) -> Self {
        Self {
            name: scenario.name,
            description: scenario.description,
            tags: convert_tags(scenario.tags),
            steps: convert_steps(scenario.steps),
            examples: scenario.examples.into_iter().map(Examples::from).collect(),
        }
    }
}

impl From<gherkin::Rule> for Rule {
    fn from(rule: gherkin::Rule) -> Self {
        Self {
            name: rule.name,
            description: rule.description,
            tags: convert_tags(rule.tags),
            background: rule.background.map(Background::from),
            scenarios: rule.scenarios.into_iter().map(Scenario::from).collect(),
        }
    }
}

impl From<gherkin::Step> for Step {
    fn from(step: gherkin::Step) -> Self {
        Self {
            keyword: step.keyword,
            text: step.value,
            table: step.table.map(Table::from),
        }
    }
}

impl From<gherkin::Examples> for Examples {
    fn from(examples: gherkin::Examples) -> Self {
        Self {
            keyword: examples.keyword.trim_end_matches(':').to_string(),
            table: examples.table.map(Table::from),
        }
    }
}

impl From<gherkin::Table> for Table {
    fn from(table: gherkin::Table) -> Self {
        Self { rows: table.rows }
    }
}

fn convert_steps(steps: Vec<gherkin::Step>) -> Vec<Step> {
    steps.into_iter().map(Step::from).collect()
}

fn convert_tags(tags: Vec<String>) -> Vec<Tag> {
    tags.into_iter().map(Tag::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        parse_feature_str(text).unwrap_or_else(|e| panic!("feature should parse: {e}"))
    }

    #[test]
    fn children_follow_source_order() {
        let document = parse(concat!(
            "Feature: ordering\n",
            "  Background:\n",
            "    Given setup\n",
            "\n",
            "  Scenario: first\n",
            "    Given a step\n",
            "\n",
            "  Rule: grouped\n",
            "    Scenario: nested\n",
            "      Given another step\n",
        ));
        let kinds: Vec<_> = document
            .feature
            .children
            .iter()
            .map(FeatureChild::kind)
            .collect();
        assert_eq!(kinds, ["background", "scenario", "rule"]);
        let Some(FeatureChild::Rule(rule)) = document.feature.children.last() else {
            panic!("expected trailing rule");
        };
        assert_eq!(rule.scenarios.len(), 1);
    }

    #[test]
    fn tags_lose_their_marker() {
        let document = parse(concat!(
            "@billing\n",
            "Feature: tags\n",
            "  @smoke @fast\n",
            "  Scenario: tagged\n",
            "    Given a step\n",
        ));
        assert_eq!(document.feature.tags, [Tag::new("billing")]);
        let Some(FeatureChild::Scenario(scenario)) = document.feature.children.first() else {
            panic!("expected scenario");
        };
        assert_eq!(scenario.tags, [Tag::new("smoke"), Tag::new("fast")]);
    }

    #[test]
    fn step_tables_and_examples_are_kept() {
        let document = parse(concat!(
            "Feature: outline\n",
            "  Scenario Outline: eat\n",
            "    Given the pantry holds\n",
            "      | item  | count |\n",
            "      | apple | 3     |\n",
            "    When I eat <n> apples\n",
            "\n",
            "    Examples:\n",
            "      | n |\n",
            "      | 1 |\n",
            "      | 2 |\n",
        ));
        let Some(FeatureChild::Scenario(scenario)) = document.feature.children.first() else {
            panic!("expected scenario");
        };
        let table = scenario
            .steps
            .first()
            .and_then(|step| step.table.as_ref())
            .unwrap_or_else(|| panic!("expected step table"));
        assert_eq!(table.rows.len(), 2);
        let examples = scenario
            .examples
            .first()
            .and_then(|examples| examples.table.as_ref())
            .unwrap_or_else(|| panic!("expected examples table"));
        assert_eq!(examples.header(), Some(["n".to_string()].as_slice()));
        assert_eq!(examples.body().len(), 2);
    }

    #[test]
    fn missing_trailing_newline_is_tolerated() {
        let document = parse("Feature: terse\n  Scenario: s\n    Given x");
        assert_eq!(document.feature.name, "terse");
    }

    #[test]
    fn invalid_text_is_a_parse_error() {
        let result = parse_feature_str("this is not gherkin\n");
        assert!(matches!(result, Err(ParseError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = parse_feature_file(Path::new("definitely/not/here.feature"));
        assert!(matches!(result, Err(ParseError::Read { .. })));
    }
}
