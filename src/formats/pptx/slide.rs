//! Slide text extraction
//!
//! Only DrawingML text paragraphs are read; shapes, images and positioning
//! are not rendered.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Text paragraphs of one slide, in document order, blank ones skipped
pub(super) fn slide_paragraphs(xml: &str) -> quick_xml::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" if in_paragraph => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if in_paragraph && e.local_name().as_ref() == b"br" {
                    current.push('\n');
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if in_paragraph => {
                    in_paragraph = false;
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Slide number from an archive entry named `ppt/slides/slide{N}.xml`
pub(super) fn slide_number(entry: &str) -> Option<usize> {
    entry
        .strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Markup for one slide
///
/// The first paragraph is the title. A slide without any text gets the
/// simplified-viewer notice instead.
pub(super) fn slide_html(paragraphs: &[String], slide: usize, slide_count: usize) -> String {
    let mut html = String::from("<div class=\"pptx-slide\">\n");

    match paragraphs.split_first() {
        Some((title, body)) => {
            html.push_str(&format!("<h3>{}</h3>\n", escape_lines(title)));
            for paragraph in body {
                html.push_str(&format!("<p>{}</p>\n", escape_lines(paragraph)));
            }
        }
        None => {
            html.push_str(&format!("<h3>Slide {}</h3>\n", slide));
            html.push_str(&format!(
                "<p>This is a simplified PPTX viewer. Slide {} of {}.</p>\n",
                slide, slide_count
            ));
        }
    }

    html.push_str(&format!(
        "<p class=\"slide-number\">Slide {} of {}</p>\n</div>",
        slide, slide_count
    ));
    html
}

fn escape_lines(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br>")
}
