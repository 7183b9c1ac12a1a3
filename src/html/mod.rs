//! Server-rendered viewer page
//!
//! Paints a [`ViewModel`] as a complete HTML document. Controls are plain
//! forms posting to `/viewer/*`; disabled controls are rendered disabled.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::viewer::{StatusLevel, ViewContent, ViewModel};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #2c3e50; color: #fff; padding: 12px 24px; }
main { display: flex; gap: 24px; padding: 24px; }
aside { width: 300px; flex-shrink: 0; }
section.viewer { flex: 1; min-width: 0; }
.panel { background: #fff; border-radius: 6px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
#viewerContainer { background: #fff; border-radius: 6px; padding: 16px; min-height: 480px; overflow: auto; }
.pdf-canvas { max-width: 100%; height: auto; box-shadow: 0 2px 8px rgba(0,0,0,.2); }
.excel-table { border-collapse: collapse; }
.excel-table td { border: 1px solid #ccc; padding: 4px 8px; }
.page-link { display: inline-block; margin: 2px; padding: 4px 8px; border: 1px solid #2c3e50; border-radius: 4px; color: #2c3e50; text-decoration: none; }
.page-link.active { background: #2c3e50; color: #fff; }
.error { color: #b00020; }
.status-success { color: #1e7e34; }
.status-error { color: #b00020; }
.status-info { color: #555; }
"#;

/// Render the full viewer page
pub fn viewer_page<'a>(samples: impl IntoIterator<Item = &'a str>, model: &ViewModel) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Document Previewer</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<header><h1>Document Previewer</h1></header>\n<main>\n");

    html.push_str("<aside>\n");
    push_source_forms(&mut html, samples);
    push_document_info(&mut html, model);
    push_controls(&mut html, model);
    push_status(&mut html, model);
    html.push_str("</aside>\n");

    html.push_str("<section class=\"viewer\">\n");
    push_page_links(&mut html, model);
    html.push_str("<div id=\"viewerContainer\">\n");
    html.push_str(&content_html(&model.content));
    html.push_str("\n</div>\n</section>\n</main>\n</body>\n</html>\n");

    html
}

fn push_source_forms<'a>(html: &mut String, samples: impl IntoIterator<Item = &'a str>) {
    html.push_str("<div class=\"panel\">\n<h5>Sample Documents</h5>\n");
    html.push_str("<form method=\"post\" action=\"/viewer/load\">\n<select name=\"doc_name\">\n");
    for name in samples {
        let attr = encode_double_quoted_attribute(name);
        html.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            attr,
            encode_text(name)
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">Load Document</button>\n</form>\n</div>\n");

    html.push_str(concat!(
        "<div class=\"panel\">\n<h5>Upload Your Document</h5>\n",
        "<form method=\"post\" action=\"/viewer/upload\" enctype=\"multipart/form-data\">\n",
        "<input type=\"file\" name=\"file\" accept=\".pdf,.docx,.pptx,.xlsx\">\n",
        "<button type=\"submit\">Upload</button>\n</form>\n</div>\n",
    ));
}

fn push_document_info(html: &mut String, model: &ViewModel) {
    if let Some(info) = &model.document_info {
        html.push_str(&format!(
            "<div class=\"panel\" id=\"documentInfo\"><strong>{}</strong><br><small>{}</small></div>\n",
            encode_text(&info.name),
            encode_text(&info.summary)
        ));
    }
}

fn disabled(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " disabled"
    }
}

fn push_controls(html: &mut String, model: &ViewModel) {
    let controls = &model.controls;

    html.push_str("<div class=\"panel\" id=\"navigation\">\n<h5>Navigation</h5>\n");
    html.push_str(&format!(
        "<form method=\"post\" action=\"/viewer/navigate\"><input type=\"hidden\" name=\"action\" value=\"previous\"><button id=\"prevBtn\" type=\"submit\"{}>Previous</button></form>\n",
        disabled(controls.previous_enabled)
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/viewer/navigate\"><input type=\"hidden\" name=\"action\" value=\"next\"><button id=\"nextBtn\" type=\"submit\"{}>Next</button></form>\n",
        disabled(controls.next_enabled)
    ));

    let max = controls
        .page_input_max
        .map(|max| format!(" max=\"{}\"", max))
        .unwrap_or_default();
    let value = controls
        .page_input_value
        .map(|value| format!(" value=\"{}\"", value))
        .unwrap_or_default();
    html.push_str(&format!(
        "<form method=\"post\" action=\"/viewer/navigate\"><input type=\"hidden\" name=\"action\" value=\"goto\"><input id=\"pageInput\" type=\"number\" name=\"page\" min=\"1\"{}{}{}><button id=\"goBtn\" type=\"submit\"{}>Go</button></form>\n",
        max,
        value,
        disabled(controls.page_input_enabled),
        disabled(controls.page_input_enabled)
    ));
    html.push_str("</div>\n");
}

fn push_status(html: &mut String, model: &ViewModel) {
    if let Some(status) = &model.status {
        let class = match status.level {
            StatusLevel::Info => "status-info",
            StatusLevel::Success => "status-success",
            StatusLevel::Error => "status-error",
        };
        html.push_str(&format!(
            "<div id=\"statusMessage\"><small class=\"{}\">{}</small></div>\n",
            class,
            encode_text(&status.message)
        ));
    }
}

fn push_page_links(html: &mut String, model: &ViewModel) {
    let Some(links) = &model.page_links else {
        return;
    };

    html.push_str("<div class=\"panel\" id=\"pageLinks\">\n");
    html.push_str(&format!("<h6>{}</h6>\n", encode_text(&links.heading)));
    for link in &links.links {
        let class = if link.active {
            "page-link active"
        } else {
            "page-link"
        };
        html.push_str(&format!(
            "<a href=\"/viewer/page/{}\" class=\"{}\" data-page=\"{}\">{}</a>\n",
            link.page,
            class,
            link.page,
            encode_text(&link.label)
        ));
    }
    html.push_str("</div>\n");
}

/// Markup for the viewer container
pub fn content_html(content: &ViewContent) -> String {
    match content {
        ViewContent::Blank => {
            "<div class=\"placeholder\"><p>Select a sample or upload a document to start.</p></div>"
                .to_string()
        }
        ViewContent::Loading { message } => format!(
            "<div class=\"loading\"><h6>{}</h6></div>",
            encode_text(message)
        ),
        ViewContent::Page { html, .. } => html.clone(),
        ViewContent::Error { message } => format!(
            "<div class=\"error\"><h6>Error</h6><p>{}</p></div>",
            encode_text(message)
        ),
    }
}
