use std::sync::LazyLock;

use chrono::NaiveDateTime;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use regex::Regex;

use crate::application::ports::{PdfRenderError, PdfRenderer};

// US Letter, in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const BOTTOM_MARGIN: f32 = 54.0;
const LEADING: f32 = 1.25;

const DOCUMENT_TITLE: &str = "Work Order Document";
const FOOTER: &str =
    "This document was automatically generated by the Work Order Management System.";

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
enum Style {
    Title,
    Heading,
    Subheading,
    Body,
    Footer,
}

impl Style {
    fn font_size(self) -> f32 {
        match self {
            Style::Title => 18.0,
            Style::Heading => 14.0,
            Style::Subheading => 12.0,
            Style::Body | Style::Footer => 10.0,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Style::Title | Style::Heading | Style::Subheading)
    }

    fn centered(self) -> bool {
        matches!(self, Style::Title | Style::Footer)
    }

    /// Extra space before and after the block.
    fn spacing(self) -> (f32, f32) {
        match self {
            Style::Title => (6.0, 18.0),
            Style::Heading => (12.0, 8.0),
            Style::Subheading => (8.0, 4.0),
            Style::Body => (0.0, 2.0),
            Style::Footer => (30.0, 0.0),
        }
    }

    /// Gray level, 0 black to 1 white.
    fn gray(self) -> f32 {
        match self {
            Style::Footer => 0.5,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Text(Style, String),
    Space(f32),
}

/// Renders markdown work orders with the standard Helvetica faces, so the
/// output needs no embedded fonts.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkOrderPdfRenderer;

impl WorkOrderPdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PdfRenderer for WorkOrderPdfRenderer {
    fn render(
        &self,
        markdown: &str,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, PdfRenderError> {
        let blocks = layout_blocks(markdown, generated_at);
        let pages = paginate(&blocks);
        let bytes = write_document(&pages)?;

        tracing::debug!(pages = pages.len(), bytes = bytes.len(), "Work order PDF rendered");
        Ok(bytes)
    }
}

fn layout_blocks(markdown: &str, generated_at: NaiveDateTime) -> Vec<Block> {
    let mut blocks = vec![
        Block::Text(Style::Title, DOCUMENT_TITLE.to_string()),
        Block::Text(
            Style::Body,
            format!(
                "Generated on: {}",
                generated_at.format("%B %d, %Y at %I:%M %p")
            ),
        ),
        Block::Space(20.0),
    ];

    for line in markdown.lines().map(str::trim) {
        if line.is_empty() {
            blocks.push(Block::Space(6.0));
        } else if let Some(text) = line.strip_prefix("### ") {
            blocks.push(Block::Text(Style::Subheading, flatten_inline(text)));
        } else if let Some(text) = line.strip_prefix("## ") {
            blocks.push(Block::Text(Style::Heading, flatten_inline(text)));
        } else if let Some(text) = line.strip_prefix("# ") {
            blocks.push(Block::Text(Style::Title, flatten_inline(text)));
        } else if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            blocks.push(Block::Text(
                Style::Body,
                format!("\u{2022} {}", flatten_inline(text)),
            ));
        } else {
            let text = flatten_inline(line);
            if !text.is_empty() {
                blocks.push(Block::Text(Style::Body, text));
            }
        }
    }

    blocks.push(Block::Text(Style::Footer, FOOTER.to_string()));
    blocks
}

/// Drops bold and italic markers and keeps only the text of links.
pub fn flatten_inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    LINK.replace_all(&text, "$1").trim().to_string()
}

struct PlacedLine {
    style: Style,
    x: f32,
    y: f32,
    text: String,
}

fn paginate(blocks: &[Block]) -> Vec<Vec<PlacedLine>> {
    let usable_width = PAGE_WIDTH - 2.0 * MARGIN;
    let top = PAGE_HEIGHT - MARGIN;

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = top;

    for block in blocks {
        match block {
            Block::Space(height) => y -= height,
            Block::Text(style, text) => {
                let size = style.font_size();
                let (before, after) = style.spacing();
                y -= before;

                for line in wrap(text, size, style.bold(), usable_width) {
                    y -= size * LEADING;
                    if y < BOTTOM_MARGIN {
                        pages.push(Vec::new());
                        y = top - size * LEADING;
                    }

                    let x = if style.centered() {
                        MARGIN + (usable_width - text_width(&line, size, style.bold())) / 2.0
                    } else {
                        MARGIN
                    };

                    if let Some(page) = pages.last_mut() {
                        page.push(PlacedLine {
                            style: *style,
                            x,
                            y,
                            text: line,
                        });
                    }
                }

                y -= after;
            }
        }
    }

    pages
}

fn wrap(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size, bold) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, bold)).sum();
    units as f32 * size / 1000.0
}

/// Approximate Helvetica advance widths in thousandths of an em.
fn glyph_width(c: char, bold: bool) -> u32 {
    let regular = match c {
        ' ' | '.' | ',' | ':' | ';' | '!' | '/' | '\\' | 'f' | 't' => 278,
        'i' | 'j' | 'l' | '\'' | '|' => 222,
        '(' | ')' | '[' | ']' | '-' | 'r' => 333,
        'm' => 833,
        'w' => 722,
        'M' => 833,
        'W' => 944,
        'I' => 278,
        'J' | 's' | 'c' | 'k' | 'v' | 'x' | 'y' | 'z' => 500,
        '0'..='9' | 'a'..='z' => 556,
        'A'..='Z' => 667,
        '\u{2022}' => 350,
        _ => 556,
    };
    if bold { regular + regular / 10 } else { regular }
}

fn write_document(pages: &[Vec<PlacedLine>]) -> Result<Vec<u8>, PdfRenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let page_id = write_page(&mut doc, pages_id, lines)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfRenderError::Write(e.to_string()))?;
    Ok(buffer)
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    lines: &[PlacedLine],
) -> Result<ObjectId, PdfRenderError> {
    let mut operations = Vec::with_capacity(lines.len() * 5);

    for line in lines {
        let font = if line.style.bold() { "F2" } else { "F1" };
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("g", vec![line.style.gray().into()]),
            Operation::new("Tf", vec![font.into(), line.style.font_size().into()]),
            Operation::new("Td", vec![line.x.into(), line.y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(&line.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    let content = Content { operations }
        .encode()
        .map_err(|e| PdfRenderError::Encoding(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Encodes text for the standard fonts' WinAnsi code page. Characters
/// outside it become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}
