//! Paragraph, cell and table construction shared by form blocks.

use crate::{
    answers::Answers,
    checkbox,
    document::{Alignment, Border, Borders, Cell, Paragraph, Row, Run, Spacing, Table},
};

/// Usable content width on an A4 page with narrow margins.
pub const CONTENT_WIDTH: u32 = 9000;
pub const HALF: u32 = CONTENT_WIDTH / 2;
pub const THIRD: u32 = CONTENT_WIDTH / 3;
/// 9 pt
pub const TEXT_SIZE: u32 = 18;
pub const HEADER_FILL: &str = "D9D9D9";

pub fn run(text: impl Into<String>) -> Run {
    Run {
        text: text.into(),
        bold: false,
        size: TEXT_SIZE,
        color: None,
    }
}

pub fn bold(text: impl Into<String>) -> Run {
    Run {
        bold: true,
        ..run(text)
    }
}

impl Run {
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

pub fn paragraph(runs: Vec<Run>) -> Paragraph {
    Paragraph {
        runs,
        alignment: Alignment::Left,
        spacing: Spacing {
            before: 20,
            after: 20,
        },
    }
}

pub fn text(text: impl Into<String>) -> Paragraph {
    paragraph(vec![run(text)])
}

pub fn empty() -> Paragraph {
    paragraph(Vec::new())
}

impl Paragraph {
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.spacing = Spacing { before, after };
        self
    }
}

pub fn cell(blocks: Vec<Paragraph>, width: u32) -> Cell {
    Cell {
        blocks,
        width,
        shading: None,
        borders: Borders::all(Border::single()),
        column_span: None,
    }
}

impl Cell {
    pub fn shaded(mut self, fill: impl Into<String>) -> Self {
        self.shading = Some(fill.into());
        self
    }
}

pub fn table(column_widths: Vec<u32>, rows: Vec<Row>) -> Table {
    Table {
        width: column_widths.iter().sum(),
        column_widths,
        rows,
    }
}

/// One full-width cell per row.
pub fn full_width(rows: Vec<Vec<Paragraph>>) -> Table {
    table(
        vec![CONTENT_WIDTH],
        rows.into_iter()
            .map(|blocks| Row {
                cells: vec![cell(blocks, CONTENT_WIDTH)],
            })
            .collect(),
    )
}

/// Shaded section header spanning the page.
pub fn header(title: &str) -> Table {
    table(
        vec![CONTENT_WIDTH],
        vec![Row {
            cells: vec![cell(vec![paragraph(vec![bold(title)])], CONTENT_WIDTH).shaded(HEADER_FILL)],
        }],
    )
}

pub fn two_col(left: Vec<Paragraph>, right: Vec<Paragraph>) -> Row {
    Row {
        cells: vec![cell(left, HALF), cell(right, HALF)],
    }
}

pub fn three_col(columns: [Vec<Paragraph>; 3]) -> Row {
    Row {
        cells: columns
            .into_iter()
            .map(|blocks| cell(blocks, THIRD))
            .collect(),
    }
}

pub fn two_col_table(rows: Vec<Row>) -> Table {
    table(vec![HALF, HALF], rows)
}

pub fn three_col_table(rows: Vec<Row>) -> Table {
    table(vec![THIRD, THIRD, THIRD], rows)
}

/// Split a list so that the left column takes the ceiling half.
pub fn split_columns<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len().div_ceil(2))
}

pub fn check_line(answers: &Answers, key: &str, option: &str) -> Paragraph {
    let glyph = checkbox::resolve(answers, key, option);
    paragraph(vec![run(format!("{glyph} {option}"))]).spacing(10, 10)
}

pub fn check_list(answers: &Answers, key: &str, options: &[&str]) -> Vec<Paragraph> {
    options
        .iter()
        .map(|option| check_line(answers, key, option))
        .collect()
}

/// Inline options on one line: `☐ a   ☒ b   `.
pub fn inline_checks(answers: &Answers, key: &str, options: &[&str]) -> Vec<Run> {
    options
        .iter()
        .map(|option| run(format!("{} {option}   ", checkbox::resolve(answers, key, option))))
        .collect()
}

/// Long option list laid out over two balanced columns, one option per row.
pub fn two_col_check_table(answers: &Answers, key: &str, options: &[&str]) -> Table {
    let (left, right) = split_columns(options);
    let rows = (0..left.len())
        .map(|i| {
            let side = |column: &[&str]| match column.get(i) {
                Some(option) => vec![check_line(answers, key, option).spacing(20, 20)],
                None => vec![empty()],
            };
            two_col(side(left), side(right))
        })
        .collect();
    two_col_table(rows)
}
