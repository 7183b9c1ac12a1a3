//! Workbook index and shared string table

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::formats::ooxml::attr;

/// Sheet entry from `xl/workbook.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SheetEntry {
    pub name: String,
    /// Resolved worksheet part, `None` when the relationship is missing
    pub part: Option<String>,
}

/// Sheets in workbook order, with `r:id` resolved through `targets`
pub(super) fn parse_sheets(
    xml: &str,
    targets: &HashMap<String, String>,
) -> quick_xml::Result<Vec<SheetEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut sheets = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr(&e, b"name").unwrap_or_else(|| format!("Sheet{}", sheets.len() + 1));
                let part = attr(&e, b"id").and_then(|id| targets.get(&id).cloned());
                sheets.push(SheetEntry { name, part });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sheets)
}

/// Shared string table (`xl/sharedStrings.xml`)
///
/// Rich-text runs are concatenated; phonetic runs (`rPh`) are skipped.
pub(super) fn parse_shared_strings(xml: &str) -> quick_xml::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_item = false;
    let mut in_phonetic = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_item = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_item && !in_phonetic => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_item = false;
                    strings.push(std::mem::take(&mut current));
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}
