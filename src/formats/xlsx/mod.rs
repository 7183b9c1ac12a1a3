//! XLSX format implementation
//!
//! Decode reads the workbook index (sheet names in workbook order) and the
//! shared string table. Worksheet parts are parsed when their sheet is
//! rendered.

mod sheet;
mod workbook;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::{
    DocumentError, DocumentFormat, DocumentResult, FormatAdapter, RenderedView, SheetTable,
};
use crate::formats::ooxml::OoxmlPackage;

use self::workbook::SheetEntry;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const SHARED_STRINGS_REL: &str = "/sharedStrings";

/// Spreadsheet adapter
pub struct XlsxAdapter {
    package: OoxmlPackage,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<String>,
}

impl XlsxAdapter {
    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[async_trait]
impl FormatAdapter for XlsxAdapter {
    fn decode(bytes: Vec<u8>) -> DocumentResult<Self> {
        let package = OoxmlPackage::open(bytes)?;
        let workbook_part = package.main_part(WORKBOOK_PART)?;
        let workbook_xml = package.require_part(&workbook_part)?;

        let relationships = package.relationships(&workbook_part)?;
        let shared_part = relationships
            .iter()
            .find(|rel| rel.kind.ends_with(SHARED_STRINGS_REL))
            .map(|rel| rel.target.clone())
            .unwrap_or_else(|| SHARED_STRINGS_PART.to_string());
        let targets: HashMap<String, String> = relationships
            .into_iter()
            .map(|rel| (rel.id, rel.target))
            .collect();

        let sheets = workbook::parse_sheets(&workbook_xml, &targets)?;
        let shared_strings = match package.read_part(&shared_part)? {
            Some(xml) => workbook::parse_shared_strings(&xml)?,
            None => Vec::new(),
        };

        tracing::debug!(
            "XLSX workbook has {} sheets, {} shared strings",
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            package,
            sheets,
            shared_strings,
        })
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Xlsx
    }

    fn page_count(&self) -> usize {
        self.sheets.len()
    }

    async fn render_page(&self, page: usize) -> DocumentResult<RenderedView> {
        self.check_page(page)?;
        let render_error = |reason: String| DocumentError::render(DocumentFormat::Xlsx, page, reason);

        let entry = &self.sheets[page - 1];
        let part = entry
            .part
            .as_deref()
            .ok_or_else(|| render_error(format!("sheet '{}' has no worksheet part", entry.name)))?;

        let xml = self
            .package
            .read_part(part)
            .map_err(|e| render_error(e.to_string()))?
            .ok_or_else(|| render_error(format!("missing part {}", part)))?;

        let rows = sheet::parse_grid(&xml, &self.shared_strings)
            .map_err(|e| render_error(e.to_string()))?;

        Ok(RenderedView::Table(SheetTable {
            sheet_name: entry.name.clone(),
            rows,
        }))
    }
}
