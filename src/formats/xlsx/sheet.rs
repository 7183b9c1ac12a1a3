//! Worksheet grid parsing
//!
//! Cells are placed by their `r` reference (`B3`); cells or rows without a
//! reference follow the previous one. The grid starts at A1 and is padded
//! with empty strings so every row has the same width.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::formats::ooxml::attr;

/// Rows beyond this are not shown
pub(super) const MAX_ROWS: usize = 5000;
/// Columns beyond this are not shown
pub(super) const MAX_COLUMNS: usize = 256;

#[derive(Debug, Error)]
pub(super) enum SheetError {
    #[error("malformed worksheet XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("shared string index {0} out of range")]
    SharedString(usize),
}

/// Cell value type (`t` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Boolean,
    Error,
}

impl CellType {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("s") => Self::SharedString,
            Some("inlineStr") => Self::InlineString,
            Some("str") => Self::FormulaString,
            Some("b") => Self::Boolean,
            Some("e") => Self::Error,
            _ => Self::Number,
        }
    }
}

struct Cell {
    row: usize,
    column: usize,
    kind: CellType,
    raw: String,
}

/// Parse a worksheet part into display rows
pub(super) fn parse_grid(xml: &str, shared: &[String]) -> Result<Vec<Vec<String>>, SheetError> {
    let mut reader = Reader::from_str(xml);
    let mut grid: Vec<Vec<String>> = Vec::new();

    let mut row_index = 0usize;
    let mut next_column = 0usize;
    let mut cell: Option<Cell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row_index = row_number(&e).unwrap_or(row_index + 1);
                    next_column = 0;
                }
                b"c" => {
                    let (row, column) = position(&e, row_index, next_column);
                    cell = Some(Cell {
                        row,
                        column,
                        kind: CellType::from_attr(attr(&e, b"t").as_deref()),
                        raw: String::new(),
                    });
                }
                // `<v>` holds the value; `<t>` inside `<is>` holds inline text
                b"v" | b"t" if cell.is_some() => in_value = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    row_index = row_number(&e).unwrap_or(row_index + 1);
                    next_column = 0;
                }
                b"c" => {
                    let (_, column) = position(&e, row_index, next_column);
                    next_column = column + 1;
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(done) = cell.take() {
                        next_column = done.column + 1;
                        let text = display_value(&done, shared)?;
                        place(&mut grid, done.row, done.column, text);
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_value => {
                if let Some(current) = cell.as_mut() {
                    current.raw.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    Ok(grid)
}

fn row_number(e: &BytesStart<'_>) -> Option<usize> {
    attr(e, b"r")?.parse().ok().filter(|n| *n > 0)
}

/// 1-based row and 0-based column of a cell
fn position(e: &BytesStart<'_>, row_index: usize, next_column: usize) -> (usize, usize) {
    attr(e, b"r")
        .as_deref()
        .and_then(parse_reference)
        .unwrap_or((row_index.max(1), next_column))
}

/// `"AB12"` → `(12, 27)`
fn parse_reference(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let column = column_index(letters)?;
    let row: usize = digits.parse().ok().filter(|n| *n > 0)?;
    Some((row, column))
}

/// `"A"` → 0, `"Z"` → 25, `"AA"` → 26
fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index
            .checked_mul(26)?
            .checked_add((c.to_ascii_uppercase() as u8 - b'A') as usize + 1)?;
    }
    Some(index - 1)
}

fn display_value(cell: &Cell, shared: &[String]) -> Result<String, SheetError> {
    let raw = cell.raw.as_str();
    Ok(match cell.kind {
        CellType::SharedString => {
            let index: usize = raw
                .trim()
                .parse()
                .map_err(|_| SheetError::SharedString(usize::MAX))?;
            shared
                .get(index)
                .cloned()
                .ok_or(SheetError::SharedString(index))?
        }
        CellType::Boolean => match raw.trim() {
            "1" => "TRUE".to_string(),
            "0" => "FALSE".to_string(),
            other => other.to_string(),
        },
        CellType::Number => format_number(raw.trim()),
        CellType::InlineString | CellType::FormulaString | CellType::Error => raw.to_string(),
    })
}

/// Whole numbers lose their trailing `.0`; everything else is kept as stored
fn format_number(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        _ => raw.to_string(),
    }
}

fn place(grid: &mut Vec<Vec<String>>, row: usize, column: usize, text: String) {
    if row == 0 || row > MAX_ROWS || column >= MAX_COLUMNS {
        return;
    }
    if grid.len() < row {
        grid.resize_with(row, Vec::new);
    }
    let cells = &mut grid[row - 1];
    if cells.len() <= column {
        cells.resize(column + 1, String::new());
    }
    cells[column] = text;
}
