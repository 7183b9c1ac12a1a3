//! Shared OOXML container access
//!
//! DOCX, PPTX and XLSX files are ZIP packages of XML parts tied together by
//! relationship (`.rels`) parts. This module wraps the archive and the few
//! XML helpers the adapters share.

use std::io::{Cursor, Read};
use std::sync::Arc;

use quick_xml::events::BytesStart;
use serde::Deserialize;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::document::{DocumentError, DocumentResult};

/// Relationship type suffix of a package's main part
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Opened OOXML package
///
/// Keeps the raw bytes and re-opens the archive for each part read, so the
/// package can be shared freely between render calls.
#[derive(Clone)]
pub(crate) struct OoxmlPackage {
    bytes: Arc<Vec<u8>>,
    entries: Vec<String>,
}

impl OoxmlPackage {
    /// Open a package, failing with `Decode` if the bytes are not a ZIP archive
    pub fn open(bytes: Vec<u8>) -> DocumentResult<Self> {
        let bytes = Arc::new(bytes);
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice()))?;
        let entries = archive.file_names().map(str::to_string).collect();
        Ok(Self { bytes, entries })
    }

    /// Names of all archive entries
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    /// Read a part as text, `None` if the archive has no such entry
    ///
    /// UTF-8 unless a byte order mark says UTF-16.
    pub fn read_part(&self, name: &str) -> DocumentResult<Option<String>> {
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut file = match archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut raw = Vec::new();
        file.read_to_end(&mut raw)
            .map_err(|e| DocumentError::Decode(format!("Failed to read {}: {}", name, e)))?;

        let (content, encoding, malformed) = encoding_rs::UTF_8.decode(&raw);
        if malformed {
            return Err(DocumentError::Decode(format!(
                "{} is not valid {}",
                name,
                encoding.name()
            )));
        }
        Ok(Some(content.into_owned()))
    }

    /// Read a part that must exist
    pub fn require_part(&self, name: &str) -> DocumentResult<String> {
        self.read_part(name)?
            .ok_or_else(|| DocumentError::Decode(format!("missing part {}", name)))
    }

    /// Relationships declared for `part` (target paths resolved to part names)
    pub fn relationships(&self, part: &str) -> DocumentResult<Vec<Relationship>> {
        let rels_name = rels_path_for(part);
        let Some(xml) = self.read_part(&rels_name)? else {
            return Ok(Vec::new());
        };

        let base_dir = part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let parsed: Relationships = quick_xml::de::from_str(&xml)?;

        Ok(parsed
            .items
            .into_iter()
            .filter(|rel| rel.target_mode.as_deref() != Some("External"))
            .map(|rel| Relationship {
                target: resolve_part(base_dir, &rel.target),
                ..rel
            })
            .collect())
    }

    /// Name of the package's main part, from `_rels/.rels`
    pub fn main_part(&self, fallback: &str) -> DocumentResult<String> {
        let main = self
            .relationships("")?
            .into_iter()
            .find(|rel| rel.kind.ends_with(OFFICE_DOCUMENT_REL))
            .map(|rel| rel.target);
        Ok(main.unwrap_or_else(|| fallback.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Relationships {
    #[serde(rename = "Relationship", default)]
    items: Vec<Relationship>,
}

/// One entry of a `.rels` part
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Relationship {
    #[serde(rename = "@Id")]
    pub id: String,
    #[serde(rename = "@Type", default)]
    pub kind: String,
    #[serde(rename = "@Target")]
    pub target: String,
    #[serde(rename = "@TargetMode", default)]
    pub target_mode: Option<String>,
}

/// `xl/workbook.xml` → `xl/_rels/workbook.xml.rels`; `""` → `_rels/.rels`
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the directory of its source part
///
/// - Absolute targets (`/xl/worksheets/sheet1.xml`) are package-rooted
/// - Relative targets are joined to `base_dir`, with `.` and `..` collapsed
/// - Percent-encoded characters are decoded
pub(crate) fn resolve_part(base_dir: &str, target: &str) -> String {
    let decoded = urlencoding::decode(target).unwrap_or_else(|_| target.into());
    let decoded = decoded.replace('\\', "/");

    let joined = match decoded.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None if base_dir.is_empty() => decoded,
        None => format!("{}/{}", base_dir, decoded),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Value of the attribute with local name `local`, ignoring its namespace prefix
pub(crate) fn attr(element: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fixtures;

    #[test]
    fn test_rels_path_for() {
        assert_eq!(rels_path_for("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
        assert_eq!(rels_path_for(""), "_rels/.rels");
    }

    #[test]
    fn test_resolve_part() {
        assert_eq!(resolve_part("xl", "worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_part("xl", "/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
        assert_eq!(resolve_part("ppt/slides", "../slideLayouts/a.xml"), "ppt/slideLayouts/a.xml");
        assert_eq!(resolve_part("", "word/document.xml"), "word/document.xml");
        assert_eq!(resolve_part("xl", "./sheet%201.xml"), "xl/sheet 1.xml");
    }

    #[test]
    fn test_open_rejects_non_zip() {
        assert!(matches!(
            OoxmlPackage::open(b"definitely not a zip".to_vec()),
            Err(DocumentError::Decode(_))
        ));
    }

    #[test]
    fn test_read_part_missing_is_none() {
        let package =
            OoxmlPackage::open(fixtures::zip_parts(&[("a/b.xml", "<x/>")])).unwrap();
        assert!(package.contains("a/b.xml"));
        assert_eq!(package.read_part("a/b.xml").unwrap().as_deref(), Some("<x/>"));
        assert!(package.read_part("a/c.xml").unwrap().is_none());
        assert!(matches!(
            package.require_part("a/c.xml"),
            Err(DocumentError::Decode(_))
        ));
    }

    #[test]
    fn test_read_part_honors_byte_order_marks() {
        let utf16 = fixtures::utf16le(r#"<?xml version="1.0" encoding="UTF-16"?><x>Größe</x>"#);
        let package = OoxmlPackage::open(fixtures::zip_raw_parts(&[
            ("utf16.xml", utf16.as_slice()),
            ("bom.xml", &b"\xEF\xBB\xBF<y/>"[..]),
            ("latin1.xml", &b"<z>\xE9</z>"[..]),
        ]))
        .unwrap();

        assert_eq!(
            package.read_part("utf16.xml").unwrap().as_deref(),
            Some(r#"<?xml version="1.0" encoding="UTF-16"?><x>Größe</x>"#)
        );
        assert_eq!(package.read_part("bom.xml").unwrap().as_deref(), Some("<y/>"));
        assert!(matches!(
            package.read_part("latin1.xml"),
            Err(DocumentError::Decode(_))
        ));
    }

    #[test]
    fn test_relationships_resolve_targets() {
        let package = OoxmlPackage::open(fixtures::xlsx(&[("Data", &[&["x"]])])).unwrap();
        assert_eq!(package.main_part("fallback.xml").unwrap(), "xl/workbook.xml");

        let rels = package.relationships("xl/workbook.xml").unwrap();
        let sheet = rels.iter().find(|rel| rel.id == "rId1").unwrap();
        assert_eq!(sheet.target, "xl/worksheets/sheet1.xml");
        assert!(sheet.kind.ends_with("/worksheet"));
    }

    #[test]
    fn test_main_part_falls_back_without_package_rels() {
        let package =
            OoxmlPackage::open(fixtures::zip_parts(&[("word/document.xml", "<w/>")])).unwrap();
        assert_eq!(
            package.main_part("word/document.xml").unwrap(),
            "word/document.xml"
        );
    }

    #[test]
    fn test_attr_ignores_prefix() {
        let mut reader = quick_xml::Reader::from_str(r#"<sheet name="Q1" r:id="rId3" sheetId="7"/>"#);
        match reader.read_event().unwrap() {
            quick_xml::events::Event::Empty(e) => {
                assert_eq!(attr(&e, b"name").as_deref(), Some("Q1"));
                assert_eq!(attr(&e, b"id").as_deref(), Some("rId3"));
                assert_eq!(attr(&e, b"sheetId").as_deref(), Some("7"));
                assert_eq!(attr(&e, b"missing"), None);
            }
            other => panic!("Expected empty element, got {:?}", other),
        }
    }
}
