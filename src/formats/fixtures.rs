//! In-memory document builders for tests

use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOC_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// ZIP archive containing `parts` (name, content)
pub(crate) fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let raw: Vec<(&str, &[u8])> = parts
        .iter()
        .map(|(name, content)| (*name, content.as_bytes()))
        .collect();
    zip_raw_parts(&raw)
}

/// ZIP archive of parts given as raw bytes
pub(crate) fn zip_raw_parts(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let cursor = Cursor::new(&mut buffer);
        let mut zip = ZipWriter::new(cursor);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// `text` as UTF-16LE with a byte order mark
pub(crate) fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

fn package_rels(main_part: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="{}"/></Relationships>"#,
        REL_NS, OFFICE_DOC_REL, main_part
    )
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Minimal PDF with `pages` 200x200pt pages and a correct xref table
pub(crate) fn pdf(pages: usize) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", 3 + i * 2)).collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages
    ));
    for i in 0..pages {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] /Contents {} 0 R /Resources << >> >>",
            4 + i * 2
        ));
        let stream = format!("0 0 1 rg {} {} 20 20 re f", 10 + i * 10, 10 + i * 10);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

/// DOCX whose `w:body` contains `body_xml`
pub(crate) fn docx(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body_xml
    );
    let rels = package_rels("word/document.xml");
    zip_parts(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", &rels),
        ("word/document.xml", &document),
    ])
}

/// DOCX with one plain paragraph per entry
pub(crate) fn docx_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", escape(text)))
        .collect();
    docx(&body)
}

/// PPTX with one slide per entry, each slide holding the given text paragraphs
pub(crate) fn pptx(slides: &[&[&str]]) -> Vec<u8> {
    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_string()),
        ("_rels/.rels".to_string(), package_rels("ppt/presentation.xml")),
        (
            "ppt/presentation.xml".to_string(),
            r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#
                .to_string(),
        ),
    ];

    // Written in reverse so archive order differs from slide order
    for (i, paragraphs) in slides.iter().enumerate().rev() {
        let body: String = paragraphs
            .iter()
            .map(|text| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(text)))
            .collect();
        let slide = format!(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody>{}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            body
        );
        parts.push((format!("ppt/slides/slide{}.xml", i + 1), slide));
        parts.push((
            format!("ppt/slides/_rels/slide{}.xml.rels", i + 1),
            format!(r#"<Relationships xmlns="{}"/>"#, REL_NS),
        ));
    }

    let borrowed: Vec<(&str, &str)> = parts
        .iter()
        .map(|(name, content)| (name.as_str(), content.as_str()))
        .collect();
    zip_parts(&borrowed)
}

fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// XLSX with the given sheets (name, rows)
///
/// Numeric-looking values are stored as numbers, everything else goes
/// through the shared string table.
pub(crate) fn xlsx(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    let mut shared: Vec<String> = Vec::new();
    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_string()),
        ("_rels/.rels".to_string(), package_rels("xl/workbook.xml")),
    ];

    let mut sheet_entries = String::new();
    let mut workbook_rels = String::new();

    for (i, (name, rows)) in sheets.iter().enumerate() {
        let n = i + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            n,
            n
        ));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, n
        ));

        let mut sheet_data = String::new();
        for (r, row) in rows.iter().enumerate() {
            sheet_data.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, value) in row.iter().enumerate() {
                let cell_ref = format!("{}{}", column_letter(c), r + 1);
                if value.parse::<f64>().is_ok() {
                    sheet_data.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
                } else {
                    shared.push(value.to_string());
                    sheet_data.push_str(&format!(
                        r#"<c r="{}" t="s"><v>{}</v></c>"#,
                        cell_ref,
                        shared.len() - 1
                    ));
                }
            }
            sheet_data.push_str("</row>");
        }

        parts.push((
            format!("xl/worksheets/sheet{}.xml", n),
            format!(
                r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                sheet_data
            ),
        ));
    }

    workbook_rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheets.len() + 1
    ));

    parts.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
            sheet_entries
        ),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(r#"<Relationships xmlns="{}">{}</Relationships>"#, REL_NS, workbook_rels),
    ));

    let shared_items: String = shared
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", escape(s)))
        .collect();
    parts.push((
        "xl/sharedStrings.xml".to_string(),
        format!(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}">{}</sst>"#,
            shared.len(),
            shared_items
        ),
    ));

    let borrowed: Vec<(&str, &str)> = parts
        .iter()
        .map(|(name, content)| (name.as_str(), content.as_str()))
        .collect();
    zip_parts(&borrowed)
}

/// Spreadsheet with `count` sheets named "Sheet 1".."Sheet N"
pub(crate) fn xlsx_with_sheets(count: usize) -> Vec<u8> {
    let names: Vec<String> = (1..=count).map(|i| format!("Sheet {}", i)).collect();
    let rows: &[&[&str]] = &[&["Region", "Total"], &["North", "42"]];
    let sheets: Vec<(&str, &[&[&str]])> = names.iter().map(|n| (n.as_str(), rows)).collect();
    xlsx(&sheets)
}
