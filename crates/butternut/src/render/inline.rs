//! Tags, descriptions, and steps.

use super::table::{self, TableStyle};
use super::{MarkdownWriter, PlaceholderStyle};
use crate::error::RenderError;
use crate::model::{Step, Tag};

/// Write the tag line. Returns `false` and writes nothing when there are no
/// tags.
pub(super) fn write_tags(out: &mut MarkdownWriter, tags: &[Tag]) -> bool {
    if tags.is_empty() {
        return false;
    }
    let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
    out.line(&format!("`{}`", names.join("`, `")));
    true
}

/// Write the description with each line trimmed. Returns `false` and writes
/// nothing for a missing or blank description.
pub(super) fn write_description(out: &mut MarkdownWriter, description: Option<&str>) -> bool {
    let Some(description) = description.map(str::trim).filter(|text| !text.is_empty()) else {
        return false;
    };
    let cleaned: Vec<&str> = description.lines().map(str::trim).collect();
    let newline = out.newline();
    out.line(&cleaned.join(newline));
    true
}

/// Write a scenario step-list item: `- _Given_ text`.
pub(super) fn write_step(
    out: &mut MarkdownWriter,
    step: &Step,
    placeholders: PlaceholderStyle,
) -> Result<(), RenderError> {
    out.line(&format!(
        "- _{}_ {}",
        step.keyword.trim(),
        placeholders.apply(&step.text)
    ));
    write_step_table(out, step)
}

/// Write a background step as a blockquoted line ending in a hard break.
pub(super) fn write_background_step(
    out: &mut MarkdownWriter,
    step: &Step,
    placeholders: PlaceholderStyle,
) -> Result<(), RenderError> {
    out.line(&format!(
        ">_{}_ {}  ",
        step.keyword.trim(),
        placeholders.apply(&step.text)
    ));
    write_step_table(out, step)
}

fn write_step_table(out: &mut MarkdownWriter, step: &Step) -> Result<(), RenderError> {
    step.table.as_ref().map_or(Ok(()), |data| {
        table::write_rows(out, &data.rows, TableStyle::StepArgument)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;
    use crate::render::LineEnding;
    use rstest::rstest;

    fn writer() -> MarkdownWriter {
        MarkdownWriter::new(LineEnding::Lf)
    }

    #[test]
    fn tags_are_joined_as_inline_code() {
        let mut out = writer();
        assert!(write_tags(&mut out, &[Tag::new("@smoke"), Tag::new("@fast")]));
        assert_eq!(out.finish(), "`smoke`, `fast`\n");
    }

    #[test]
    fn no_tags_write_nothing() {
        let mut out = writer();
        assert!(!write_tags(&mut out, &[]));
        assert_eq!(out.finish(), "");
    }

    #[rstest]
    #[case::single_line("  Some text  ", "Some text\n")]
    #[case::multi_line("first\n    second  \n  third", "first\nsecond\nthird\n")]
    #[case::crlf_source("first\r\n  second", "first\nsecond\n")]
    fn description_lines_are_trimmed(#[case] input: &str, #[case] expected: &str) {
        let mut out = writer();
        assert!(write_description(&mut out, Some(input)));
        assert_eq!(out.finish(), expected);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some(""))]
    #[case::whitespace(Some("  \n\t  "))]
    fn blank_descriptions_write_nothing(#[case] input: Option<&str>) {
        let mut out = writer();
        assert!(!write_description(&mut out, input));
        assert_eq!(out.finish(), "");
    }

    #[test]
    fn scenario_step_wraps_placeholders_in_code() -> Result<(), RenderError> {
        let mut out = writer();
        write_step(
            &mut out,
            &Step::new("Given ", "a <user> is logged in"),
            PlaceholderStyle::Code,
        )?;
        assert_eq!(out.finish(), "- _Given_ a `<user>` is logged in\n");
        Ok(())
    }

    #[test]
    fn background_step_brackets_placeholders() -> Result<(), RenderError> {
        let mut out = writer();
        write_background_step(
            &mut out,
            &Step::new("Given ", "a <user> is logged in"),
            PlaceholderStyle::Brackets,
        )?;
        assert_eq!(out.finish(), ">_Given_ a [user] is logged in  \n");
        Ok(())
    }

    #[test]
    fn step_table_follows_the_step_line() -> Result<(), RenderError> {
        let mut out = writer();
        let step = Step::new("And", "the users").with_table(Table::new([["name"], ["Bo"]]));
        write_step(&mut out, &step, PlaceholderStyle::Code)?;
        assert_eq!(
            out.finish(),
            concat!(
                "- _And_ the users\n",
                ">\n",
                "> | name |  \n",
                "> | ---- |  \n",
                "> | Bo   |  \n",
                ">\n",
            )
        );
        Ok(())
    }
}
