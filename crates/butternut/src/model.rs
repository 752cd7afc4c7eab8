//! Document tree consumed by the Markdown renderer.
//!
//! The tree mirrors the structure of a Gherkin feature file. It is normally
//! produced by [`crate::parse`], but every node offers builder methods so
//! callers and tests can assemble documents directly.

use serde::Serialize;

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Root feature of the file.
    pub feature: Feature,
}

impl Document {
    /// Wrap a feature into a document.
    #[must_use]
    pub fn new(feature: Feature) -> Self {
        Self { feature }
    }
}

/// Root node of a feature file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Feature title following the `Feature:` keyword.
    pub name: String,
    /// Free text between the title and the first child, if any.
    pub description: Option<String>,
    /// Tags attached to the feature, in source order.
    pub tags: Vec<Tag>,
    /// Backgrounds, scenarios, and rules in document order.
    pub children: Vec<FeatureChild>,
}

impl Feature {
    /// Create an empty feature with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<FeatureChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a background.
    #[must_use]
    pub fn with_background(self, background: Background) -> Self {
        self.with_child(background)
    }

    /// Append a scenario.
    #[must_use]
    pub fn with_scenario(self, scenario: Scenario) -> Self {
        self.with_child(scenario)
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(self, rule: Rule) -> Self {
        self.with_child(rule)
    }
}

/// A node nested directly under a [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureChild {
    /// Steps shared by every scenario of the feature.
    Background(Background),
    /// A concrete example of behaviour.
    Scenario(Scenario),
    /// A business rule grouping scenarios.
    Rule(Rule),
}

impl FeatureChild {
    /// Short lowercase name of the node kind, used in log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::Scenario(_) => "scenario",
            Self::Rule(_) => "rule",
        }
    }
}

impl From<Background> for FeatureChild {
    fn from(background: Background) -> Self {
        Self::Background(background)
    }
}

impl From<Scenario> for FeatureChild {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

impl From<Rule> for FeatureChild {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

/// Steps implicitly run before every scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Background {
    /// Steps in source order.
    pub steps: Vec<Step>,
}

impl Background {
    /// Create a background without steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// A scenario or scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Scenario title.
    pub name: String,
    /// Free text below the title, if any.
    pub description: Option<String>,
    /// Tags attached to the scenario.
    pub tags: Vec<Tag>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// Examples blocks; empty for plain scenarios.
    pub examples: Vec<Examples>,
}

impl Scenario {
    /// Create an empty scenario with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            steps: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append an Examples block.
    #[must_use]
    pub fn with_examples(mut self, examples: Examples) -> Self {
        self.examples.push(examples);
        self
    }
}

/// A business rule. Its scenarios are kept in the tree but the feature
/// renderer does not descend into them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Rule title.
    pub name: String,
    /// Free text below the title, if any.
    pub description: Option<String>,
    /// Tags attached to the rule.
    pub tags: Vec<Tag>,
    /// Background scoped to the rule.
    pub background: Option<Background>,
    /// Scenarios grouped under the rule.
    pub scenarios: Vec<Scenario>,
}

impl Rule {
    /// Create an empty rule with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            background: None,
            scenarios: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }
}

/// A single Given/When/Then line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Keyword as written in the source, e.g. `Given` or `And`.
    pub keyword: String,
    /// Text following the keyword; may contain `<placeholder>` tokens.
    pub text: String,
    /// Data table argument, if any.
    pub table: Option<Table>,
}

impl Step {
    /// Create a step without a table argument.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            table: None,
        }
    }

    /// Attach a data table argument.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }
}

/// Parameter sets attached to a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Examples {
    /// Keyword as written in the source (`Examples` or `Scenarios`).
    pub keyword: String,
    /// Table whose first row is the header.
    pub table: Option<Table>,
}

impl Examples {
    /// Create an Examples block without a table.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            table: None,
        }
    }

    /// Attach the table.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }
}

/// A grid of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Rows in source order; the first row doubles as the header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from any nested iterable of string-like cells.
    #[must_use]
    pub fn new<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.as_ref().to_string()).collect())
                .collect(),
        }
    }

    /// First row, if the table has any rows.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// A tag name without its leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag {
    /// Tag name.
    pub name: String,
}

impl Tag {
    /// Create a tag, stripping a leading `@` when present.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.strip_prefix('@').map(str::to_string).unwrap_or(name);
        Self { name }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
