//! Column-aligned pipe tables nested in blockquotes.
//!
//! Step data tables and Examples tables share one routine. They differ only
//! in how lines are prefixed and how the separator is closed, which
//! [`TableStyle`] captures.

use std::iter;

use super::MarkdownWriter;
use crate::error::RenderError;

/// Narrowest column width; Markdown needs at least three dashes per
/// separator cell.
pub const MIN_COLUMN_WIDTH: usize = 3;

/// Closing text of every content row. The two trailing spaces force a hard
/// line break inside a blockquote.
const ROW_TERMINATOR: &str = "|  ";

/// Placement of a table in the surrounding Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Data table attached to a step: opened and closed with a bare `>`
    /// line, rows prefixed with `"> "`.
    StepArgument,
    /// Examples table below its blockquoted heading: rows prefixed with
    /// `">"`, separator closed with a bare `|`.
    Examples,
}

impl TableStyle {
    fn line_prefix(self) -> &'static str {
        match self {
            Self::StepArgument => "> ",
            Self::Examples => ">",
        }
    }

    fn separator_terminator(self) -> &'static str {
        match self {
            Self::StepArgument => ROW_TERMINATOR,
            Self::Examples => "|",
        }
    }

    fn opens_blockquote(self) -> bool {
        matches!(self, Self::StepArgument)
    }
}

/// Per-column display widths of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    /// Measure every row. The first row fixes the column count.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyTable`] when `rows` yields nothing and
    /// [`RenderError::MalformedTable`] when a row's cell count differs from
    /// the first row's.
    pub fn measure<'a, I>(rows: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut rows = rows.into_iter();
        let first = rows.next().ok_or(RenderError::EmptyTable)?;
        let mut widths: Vec<usize> = first.iter().map(|cell| cell_width(cell)).collect();
        for (index, row) in rows.enumerate() {
            if row.len() != widths.len() {
                return Err(RenderError::MalformedTable {
                    row_number: index + 2,
                    expected: widths.len(),
                    actual: row.len(),
                });
            }
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }
        Ok(Self(widths))
    }

    /// Widths in column order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Format one row: every cell left-aligned and padded to its column.
    #[must_use]
    pub fn format_row(&self, cells: &[String]) -> String {
        let mut line: String = cells
            .iter()
            .zip(&self.0)
            .map(|(cell, &width)| format!("| {cell:<width$} "))
            .collect();
        line.push_str(ROW_TERMINATOR);
        line
    }

    /// Format the header separator, closed with `terminator`.
    #[must_use]
    pub fn format_separator(&self, terminator: &str) -> String {
        let mut line: String = self
            .0
            .iter()
            .map(|&width| format!("| {} ", "-".repeat(width)))
            .collect();
        line.push_str(terminator);
        line
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count().max(MIN_COLUMN_WIDTH)
}

/// Write a header row, its separator, and the body rows.
pub(crate) fn write_table(
    out: &mut MarkdownWriter,
    header: &[String],
    body: &[Vec<String>],
    style: TableStyle,
) -> Result<(), RenderError> {
    let widths = ColumnWidths::measure(iter::once(header).chain(body.iter().map(Vec::as_slice)))?;
    let prefix = style.line_prefix();

    if style.opens_blockquote() {
        out.line(">");
    }
    out.line(&format!("{prefix}{}", widths.format_row(header)));
    out.line(&format!(
        "{prefix}{}",
        widths.format_separator(style.separator_terminator())
    ));
    for row in body {
        out.line(&format!("{prefix}{}", widths.format_row(row)));
    }
    out.line(">");
    Ok(())
}

/// Write `rows`, treating the first one as the header.
pub(crate) fn write_rows(
    out: &mut MarkdownWriter,
    rows: &[Vec<String>],
    style: TableStyle,
) -> Result<(), RenderError> {
    let (header, body) = rows.split_first().ok_or(RenderError::EmptyTable)?;
    write_table(out, header, body, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineEnding;
    use rstest::rstest;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn render(cells: &[&[&str]], style: TableStyle) -> Result<String, RenderError> {
        let mut out = MarkdownWriter::new(LineEnding::Lf);
        write_rows(&mut out, &rows(cells), style)?;
        Ok(out.finish())
    }

    #[rstest]
    #[case::short_cells(&[&["a", "bb"][..]], &[3, 3])]
    #[case::wide_header(&[&["quantity", "x"][..], &["1", "2"][..]], &[8, 3])]
    #[case::wide_body(&[&["n", "name"][..], &["1", "Bartholomew"][..]], &[3, 11])]
    #[case::empty_cells(&[&["", ""][..], &["", "four"][..]], &[3, 4])]
    #[case::multibyte(&[&["naïve café"][..]], &[10])]
    fn widths_are_floored_and_cover_every_cell(
        #[case] cells: &[&[&str]],
        #[case] expected: &[usize],
    ) {
        let table = rows(cells);
        let widths = ColumnWidths::measure(table.iter().map(Vec::as_slice))
            .unwrap_or_else(|e| panic!("table should measure: {e}"));
        assert_eq!(widths.as_slice(), expected);
        for row in &table {
            for (cell, width) in row.iter().zip(widths.as_slice()) {
                assert!(*width >= MIN_COLUMN_WIDTH);
                assert!(*width >= cell.chars().count());
            }
        }
    }

    #[test]
    fn uneven_rows_are_rejected() {
        let result = render(&[&["a", "b"], &["1", "2"], &["3"]], TableStyle::StepArgument);
        assert_eq!(
            result,
            Err(RenderError::MalformedTable {
                row_number: 3,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert_eq!(
            render(&[], TableStyle::Examples),
            Err(RenderError::EmptyTable)
        );
    }

    #[test]
    fn step_argument_tables_open_and_close_a_blockquote() {
        let markdown = render(&[&["name", "role"], &["Ada", "admin"]], TableStyle::StepArgument)
            .unwrap_or_else(|e| panic!("table should render: {e}"));
        assert_eq!(
            markdown,
            concat!(
                ">\n",
                "> | name | role  |  \n",
                "> | ---- | ----- |  \n",
                "> | Ada  | admin |  \n",
                ">\n",
            )
        );
    }

    #[test]
    fn header_only_examples_table_renders_header_and_separator() {
        let markdown = render(&[&["a", "bb"]], TableStyle::Examples)
            .unwrap_or_else(|e| panic!("table should render: {e}"));
        assert_eq!(
            markdown,
            concat!(">| a   | bb  |  \n", ">| --- | --- |\n", ">\n")
        );
    }

    #[test]
    fn separator_dashes_match_widths() {
        let widths = ColumnWidths(vec![3, 5]);
        assert_eq!(widths.format_separator("|"), "| --- | ----- |");
    }
}
