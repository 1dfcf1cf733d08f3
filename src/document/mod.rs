//! Serializer-independent document model.
//!
//! A [`Document`] is a tree of sections holding paragraphs and tables. Widths
//! and spacing are in twips (1/20 pt), text sizes in half-points.

use serde::Serialize;

pub mod docx;
pub mod layout;

pub const FONT: &str = "Arial";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
}

impl PageSetup {
    pub const A4_NARROW: PageSetup = PageSetup {
        width: 11906,
        height: 16838,
        margin_top: 720,
        margin_bottom: 720,
        margin_left: 850,
        margin_right: 850,
    };
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::A4_NARROW
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub page: PageSetup,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for Block {
    fn from(value: Paragraph) -> Self {
        Self::Paragraph(value)
    }
}

impl From<Table> for Block {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub width: u32,
    pub column_widths: Vec<u32>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub blocks: Vec<Paragraph>,
    pub width: u32,
    pub shading: Option<String>,
    pub borders: Borders,
    pub column_span: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderStyle {
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Border {
    pub style: BorderStyle,
    pub size: u32,
    pub color: String,
}

impl Border {
    pub fn single() -> Self {
        Self {
            style: BorderStyle::Single,
            size: 4,
            color: "000000".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Borders {
    pub top: Border,
    pub bottom: Border,
    pub left: Border,
    pub right: Border,
}

impl Borders {
    pub fn all(border: Border) -> Self {
        Self {
            top: border.clone(),
            bottom: border.clone(),
            left: border.clone(),
            right: border,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub spacing: Spacing,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub size: u32,
    pub color: Option<String>,
}

impl Document {
    /// Plain text of every paragraph in document order, table cells included.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for section in &self.sections {
            for block in &section.blocks {
                match block {
                    Block::Paragraph(paragraph) => out.push(paragraph),
                    Block::Table(table) => out.extend(
                        table
                            .rows
                            .iter()
                            .flat_map(|row| &row.cells)
                            .flat_map(|cell| &cell.blocks),
                    ),
                }
            }
        }
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.paragraphs()
            .iter()
            .any(|paragraph| paragraph.text().contains(needle))
    }
}
