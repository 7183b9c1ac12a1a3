//! WordprocessingML → HTML conversion
//!
//! Walks `word/document.xml` with a streaming reader and produces one block
//! of markup: headings from paragraph styles, bold/italic/underline runs,
//! line breaks and tables. Empty paragraphs are dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::formats::ooxml::attr;

/// Convert the main document part into an HTML fragment
pub(super) fn document_to_html(xml: &str) -> quick_xml::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut converter = Converter::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => converter.open(&e),
            Event::Empty(e) => {
                converter.open(&e);
                converter.close(e.local_name().as_ref());
            }
            Event::End(e) => converter.close(e.local_name().as_ref()),
            Event::Text(t) if converter.in_text => converter.text(&t.unescape()?),
            Event::CData(t) if converter.in_text => {
                converter.text(&String::from_utf8_lossy(&t.into_inner()))
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(converter.html)
}

#[derive(Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
    underline: bool,
}

#[derive(Default)]
struct Converter {
    html: String,
    /// Paragraph style id (`w:pStyle`)
    style: Option<String>,
    /// Escaped markup of the current paragraph
    paragraph: String,
    /// Escaped text of the current run
    run_text: String,
    run: RunFormat,
    in_run_props: bool,
    in_text: bool,
}

impl Converter {
    fn open(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"p" => {
                self.style = None;
                self.paragraph.clear();
            }
            b"pStyle" => self.style = attr(e, b"val"),
            b"r" => {
                self.run = RunFormat::default();
                self.run_text.clear();
            }
            b"rPr" => self.in_run_props = true,
            b"b" if self.in_run_props => self.run.bold = toggle_enabled(e),
            b"i" if self.in_run_props => self.run.italic = toggle_enabled(e),
            b"u" if self.in_run_props => {
                self.run.underline = attr(e, b"val").map_or(true, |v| v != "none")
            }
            b"t" => self.in_text = true,
            b"br" | b"cr" => self.run_text.push_str("<br>"),
            b"tab" if !self.in_run_props => self.run_text.push(' '),
            b"tbl" => self.html.push_str("<table>\n"),
            b"tr" => self.html.push_str("<tr>"),
            b"tc" => self.html.push_str("<td>"),
            _ => {}
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" => self.flush_run(),
            b"p" => self.flush_paragraph(),
            b"tc" => self.html.push_str("</td>"),
            b"tr" => self.html.push_str("</tr>\n"),
            b"tbl" => self.html.push_str("</table>\n"),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        self.run_text.push_str(&html_escape::encode_text(text));
    }

    fn flush_run(&mut self) {
        if self.run_text.is_empty() {
            return;
        }

        let mut markup = std::mem::take(&mut self.run_text);
        if self.run.underline {
            markup = format!("<u>{}</u>", markup);
        }
        if self.run.italic {
            markup = format!("<em>{}</em>", markup);
        }
        if self.run.bold {
            markup = format!("<strong>{}</strong>", markup);
        }
        self.paragraph.push_str(&markup);
    }

    fn flush_paragraph(&mut self) {
        let content = std::mem::take(&mut self.paragraph);
        if content.trim().is_empty() {
            return;
        }

        let tag = self.style.as_deref().map_or("p", heading_tag);
        self.html.push_str(&format!("<{tag}>{content}</{tag}>\n"));
    }
}

/// `<w:b/>` is on; `<w:b w:val="0"/>` (or false/off) is off
fn toggle_enabled(e: &BytesStart<'_>) -> bool {
    !matches!(attr(e, b"val").as_deref(), Some("0" | "false" | "off"))
}

/// Map a paragraph style id to an HTML tag
fn heading_tag(style: &str) -> &'static str {
    let lower = style.to_lowercase();
    if lower == "title" {
        return "h1";
    }

    match lower.strip_prefix("heading").map(str::trim) {
        Some("1") => "h1",
        Some("2") => "h2",
        Some("3") => "h3",
        Some("4") => "h4",
        Some("5") => "h5",
        Some("6") => "h6",
        _ => "p",
    }
}
