//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use zip::{write::SimpleFileOptions, ZipWriter};

use doc_previewer::config::Config;
use doc_previewer::routes;
use doc_previewer::state::AppState;

fn zip_parts(parts: &[(String, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// PDF with `pages` blank 100x100pt pages
pub fn pdf(pages: usize) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages)
                .map(|i| format!("{} 0 R", 3 + i))
                .collect::<Vec<_>>()
                .join(" "),
            pages
        ),
    ];
    for _ in 0..pages {
        objects.push("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 100 100] /Resources << >> >>".to_string());
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        )
        .as_bytes(),
    );
    out
}

/// DOCX with one paragraph per entry
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    zip_parts(&[(
        "word/document.xml".to_string(),
        format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        ),
    )])
}

/// PPTX with `count` slides titled "Slide title N"
pub fn pptx(count: usize) -> Vec<u8> {
    let mut parts = vec![(
        "ppt/presentation.xml".to_string(),
        "<p:presentation/>".to_string(),
    )];
    for n in 1..=count {
        parts.push((
            format!("ppt/slides/slide{}.xml", n),
            format!(
                r#"<p:sld xmlns:a="a" xmlns:p="p"><p:txBody><a:p><a:r><a:t>Slide title {}</a:t></a:r></a:p></p:txBody></p:sld>"#,
                n
            ),
        ));
    }
    zip_parts(&parts)
}

/// XLSX with `count` sheets named "Sheet 1".."Sheet N", inline-string cells
pub fn xlsx(count: usize) -> Vec<u8> {
    let mut sheets = String::new();
    let mut rels = String::new();
    let mut parts = Vec::new();

    for n in 1..=count {
        sheets.push_str(&format!(r#"<sheet name="Sheet {n}" sheetId="{n}" r:id="rId{n}"/>"#));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
        parts.push((
            format!("xl/worksheets/sheet{}.xml", n),
            format!(
                r#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Sheet {n} data</t></is></c><c r="B1"><v>{n}</v></c></row></sheetData></worksheet>"#
            ),
        ));
    }

    parts.push((
        "xl/workbook.xml".to_string(),
        format!(r#"<workbook xmlns:r="r"><sheets>{}</sheets></workbook>"#, sheets),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(r#"<Relationships>{}</Relationships>"#, rels),
    ));
    zip_parts(&parts)
}

/// Docs directory holding the four default samples
pub fn sample_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "sample_pdf.pdf", &pdf(7));
    write(dir.path(), "sample_docx.docx", &docx(&["Hello", "World"]));
    write(dir.path(), "sample_pptx.pptx", &pptx(5));
    write(dir.path(), "sample_excel.xlsx", &xlsx(5));
    dir
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).unwrap();
}

/// Router over a fresh state serving `docs_dir`
pub fn app(docs_dir: &Path) -> Router {
    let mut config = Config::default();
    config.documents.docs_dir = docs_dir.to_path_buf();
    routes::app(AppState::new(config).unwrap())
}

/// Serve `app` on an ephemeral local port, returning its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}
