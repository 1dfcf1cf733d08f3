//! WordprocessingML (`.docx`) writer for the document model.
//!
//! The package holds the minimum parts Word needs: content types, the package
//! relationship, the main document and a style part that sets the default
//! font.

use std::{
    fmt::Write as _,
    io::{Cursor, Write as _},
};

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::trace;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::document::{
    Alignment, Block, Border, BorderStyle, Cell, Document, FONT, PageSetup, Paragraph, Run, Table,
};

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXTENSION: &str = "docx";

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const RELS_ENTRY: &str = "_rels/.rels";
const DOCUMENT_ENTRY: &str = "word/document.xml";
const DOCUMENT_RELS_ENTRY: &str = "word/_rels/document.xml.rels";
const STYLES_ENTRY: &str = "word/styles.xml";

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;
const RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;
const DOCUMENT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Cell padding in twips: top, bottom, left, right.
const CELL_MARGINS: [u32; 4] = [60, 60, 100, 100];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write docx package: {0}")]
    Zip(zip::result::ZipError),
    #[error("failed to write docx part: {0}")]
    Io(std::io::Error),
    #[error("failed to format docx part")]
    Format(#[from] std::fmt::Error),
}

/// Serialize a document into `.docx` bytes.
pub fn serialize(document: &Document) -> Result<Vec<u8>, Error> {
    let body = document_xml(document)?;
    trace!(bytes = body.len(), "rendered document.xml");
    let parts = [
        (CONTENT_TYPES_ENTRY, format!("{XML_HEADER}{CONTENT_TYPES}")),
        (RELS_ENTRY, format!("{XML_HEADER}{RELS}")),
        (DOCUMENT_ENTRY, body),
        (DOCUMENT_RELS_ENTRY, format!("{XML_HEADER}{DOCUMENT_RELS}")),
        (STYLES_ENTRY, styles_xml()?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    for (name, content) in parts {
        zip.start_file(name, opts).map_err(Error::Zip)?;
        zip.write_all(content.as_bytes()).map_err(Error::Io)?;
    }
    let cursor = zip.finish().map_err(Error::Zip)?;
    Ok(cursor.into_inner())
}

fn styles_xml() -> Result<String, Error> {
    let mut out = String::from(XML_HEADER);
    let font = encode_double_quoted_attribute(FONT);
    write!(
        out,
        r#"<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="18"/><w:szCs w:val="18"/><w:lang w:val="pl-PL"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#
    )?;
    Ok(out)
}

fn document_xml(document: &Document) -> Result<String, Error> {
    let mut out = String::from(XML_HEADER);
    write!(out, r#"<w:document xmlns:w="{W_NS}"><w:body>"#)?;
    let last = document.sections.len().saturating_sub(1);
    for (index, section) in document.sections.iter().enumerate() {
        for block in &section.blocks {
            match block {
                Block::Paragraph(paragraph) => write_paragraph(&mut out, paragraph)?,
                Block::Table(table) => write_table(&mut out, table)?,
            }
        }
        // earlier sections end with a paragraph carrying their properties
        if index != last {
            out.push_str("<w:p><w:pPr>");
            write_section_properties(&mut out, &document.page)?;
            out.push_str("</w:pPr></w:p>");
        }
    }
    write_section_properties(&mut out, &document.page)?;
    out.push_str("</w:body></w:document>");
    Ok(out)
}

fn write_section_properties(out: &mut String, page: &PageSetup) -> std::fmt::Result {
    write!(
        out,
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
        page.width,
        page.height,
        page.margin_top,
        page.margin_right,
        page.margin_bottom,
        page.margin_left,
    )
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) -> std::fmt::Result {
    out.push_str("<w:p><w:pPr>");
    write!(
        out,
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        paragraph.spacing.before, paragraph.spacing.after
    )?;
    let jc = match paragraph.alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
    };
    write!(out, r#"<w:jc w:val="{jc}"/></w:pPr>"#)?;
    for run in &paragraph.runs {
        write_run(out, run)?;
    }
    out.push_str("</w:p>");
    Ok(())
}

fn write_run(out: &mut String, run: &Run) -> std::fmt::Result {
    let font = encode_double_quoted_attribute(FONT);
    out.push_str("<w:r><w:rPr>");
    write!(
        out,
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
    )?;
    if run.bold {
        out.push_str("<w:b/><w:bCs/>");
    }
    if let Some(color) = &run.color {
        write!(
            out,
            r#"<w:color w:val="{}"/>"#,
            encode_double_quoted_attribute(color)
        )?;
    }
    write!(
        out,
        r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#,
        size = run.size
    )?;
    for (index, line) in run.text.split('\n').enumerate() {
        if index > 0 {
            out.push_str("<w:br/>");
        }
        for (index, piece) in line.split('\t').enumerate() {
            if index > 0 {
                out.push_str("<w:tab/>");
            }
            if !piece.is_empty() {
                write!(
                    out,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    encode_text(&xml_chars(piece))
                )?;
            }
        }
    }
    out.push_str("</w:r>");
    Ok(())
}

/// Drop characters XML 1.0 cannot carry.
fn xml_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .filter(|c| *c != '\r')
        .collect()
}

fn write_border(out: &mut String, side: &str, border: &Border) -> std::fmt::Result {
    let style = match border.style {
        BorderStyle::Single => "single",
    };
    write!(
        out,
        r#"<w:{side} w:val="{style}" w:sz="{}" w:space="0" w:color="{}"/>"#,
        border.size,
        encode_double_quoted_attribute(&border.color)
    )
}

fn write_cell(out: &mut String, cell: &Cell) -> std::fmt::Result {
    out.push_str("<w:tc><w:tcPr>");
    write!(out, r#"<w:tcW w:w="{}" w:type="dxa"/>"#, cell.width)?;
    if let Some(span) = cell.column_span.filter(|span| *span > 1) {
        write!(out, r#"<w:gridSpan w:val="{span}"/>"#)?;
    }
    out.push_str("<w:tcBorders>");
    write_border(out, "top", &cell.borders.top)?;
    write_border(out, "left", &cell.borders.left)?;
    write_border(out, "bottom", &cell.borders.bottom)?;
    write_border(out, "right", &cell.borders.right)?;
    out.push_str("</w:tcBorders>");
    if let Some(fill) = &cell.shading {
        write!(
            out,
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            encode_double_quoted_attribute(fill)
        )?;
    }
    let [top, bottom, left, right] = CELL_MARGINS;
    write!(
        out,
        r#"<w:tcMar><w:top w:w="{top}" w:type="dxa"/><w:left w:w="{left}" w:type="dxa"/><w:bottom w:w="{bottom}" w:type="dxa"/><w:right w:w="{right}" w:type="dxa"/></w:tcMar><w:vAlign w:val="top"/></w:tcPr>"#
    )?;
    if cell.blocks.is_empty() {
        // a cell must hold at least one paragraph
        out.push_str("<w:p/>");
    }
    for paragraph in &cell.blocks {
        write_paragraph(out, paragraph)?;
    }
    out.push_str("</w:tc>");
    Ok(())
}

fn write_table(out: &mut String, table: &Table) -> std::fmt::Result {
    write!(
        out,
        r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>"#,
        table.width
    )?;
    for width in &table.column_widths {
        write!(out, r#"<w:gridCol w:w="{width}"/>"#)?;
    }
    out.push_str("</w:tblGrid>");
    for row in &table.rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            write_cell(out, cell)?;
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read as _};

    use super::{DOCUMENT_ENTRY, serialize};
    use crate::document::{
        Document, Section,
        layout::{bold, header, paragraph, run, text},
    };

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut out = String::new();
        entry.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_package_parts() {
        let bytes = serialize(&Document::default()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names = archive.file_names().collect::<Vec<_>>();
        names.sort();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml"
            ]
        );
    }

    #[test]
    fn test_text_is_escaped_and_line_breaks_kept() {
        let mut section = Section::default();
        section.push(paragraph(vec![
            bold("Q&A <1>"),
            run("line one\nline two").color("999999"),
        ]));
        section.push(header("WSTĘP"));
        let document = Document {
            sections: vec![section],
            ..Default::default()
        };
        let xml = read_entry(&serialize(&document).unwrap(), DOCUMENT_ENTRY);
        assert!(xml.contains("Q&amp;A &lt;1&gt;"));
        assert!(xml.contains(r#"line one</w:t><w:br/><w:t xml:space="preserve">line two"#));
        assert!(xml.contains(r#"<w:color w:val="999999"/>"#));
        assert!(xml.contains(r#"w:fill="D9D9D9""#));
        assert!(xml.contains("WSTĘP"));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut section = Section::default();
        section.push(text("a"));
        let document = Document {
            sections: vec![section],
            ..Default::default()
        };
        assert_eq!(serialize(&document).unwrap(), serialize(&document).unwrap());
    }
}
