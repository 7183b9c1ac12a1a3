//! Core document types
//!
//! Format-agnostic types shared by the loader, the adapters and the viewer.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
}

impl DocumentFormat {
    /// Detect format from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
            Self::Xlsx => "Excel",
        }
    }

    /// Name of the addressable unit: "page", "slide" or "sheet"
    pub fn unit_noun(&self) -> &'static str {
        match self {
            Self::Pdf | Self::Docx => "page",
            Self::Pptx => "slide",
            Self::Xlsx => "sheet",
        }
    }

    /// Capitalized unit noun ("Page", "Slide", "Sheet")
    pub fn unit_title(&self) -> &'static str {
        match self {
            Self::Pdf | Self::Docx => "Page",
            Self::Pptx => "Slide",
            Self::Xlsx => "Sheet",
        }
    }

    pub fn unit_plural(&self) -> &'static str {
        match self {
            Self::Pdf | Self::Docx => "pages",
            Self::Pptx => "slides",
            Self::Xlsx => "sheets",
        }
    }
}

/// Extract the extension of a file name or location.
///
/// Query strings and fragments are ignored so that `/docs/a.pdf?v=2` yields
/// `pdf`. Returns `None` for names without a dot.
pub fn extension_of(name: &str) -> Option<&str> {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Kind of markup produced by a markup-rendering adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkupKind {
    /// Whole word-processing document flattened into one view
    Document,
    /// One presentation slide
    Slide,
}

/// Tabular content of one spreadsheet sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTable {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

/// Displayable artifact produced by `FormatAdapter::render_page`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedView {
    /// Rasterized page, PNG encoded
    Raster {
        png: Vec<u8>,
        width: u32,
        height: u32,
    },
    /// Structured markup (HTML fragment)
    Markup { kind: MarkupKind, html: String },
    /// Tabular view of a sheet
    Table(SheetTable),
}

impl RenderedView {
    /// Short name of the view kind, used as a CSS hook by the display surface
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raster { .. } => "pdf-canvas",
            Self::Markup {
                kind: MarkupKind::Document,
                ..
            } => "docx-content",
            Self::Markup {
                kind: MarkupKind::Slide,
                ..
            } => "pptx-slide",
            Self::Table(_) => "excel-sheet",
        }
    }

    /// Convert the view into an HTML fragment suitable for the viewer container
    pub fn to_html(&self) -> String {
        match self {
            Self::Raster { png, width, height } => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(png);
                format!(
                    r#"<img class="pdf-canvas" width="{}" height="{}" src="data:image/png;base64,{}">"#,
                    width, height, encoded
                )
            }
            Self::Markup { html, .. } => html.clone(),
            Self::Table(table) => table_to_html(table),
        }
    }
}

fn table_to_html(table: &SheetTable) -> String {
    let mut html = format!(
        "<h5>Sheet: {}</h5>\n<table class=\"excel-table table table-striped\">\n",
        html_escape::encode_text(&table.sheet_name)
    );
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&html_escape::encode_text(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}
