//! In-memory workbook model and the calamine-backed `.xlsx` reader
//!
//! Coordinates are 1-based (row 1 / column 1 is cell A1), matching how the
//! sheets are described by the people who maintain them.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use tracing::debug;

use crate::error::{MoneybagsError, MoneybagsResult};

/// Source name used for workbooks that were not read from a file
pub const MEMORY_SOURCE: &str = "<memory>";

/// A single cell as the import pipeline sees it
///
/// Formula cells keep their formula text (with a leading `=`) instead of the
/// cached result, since the addends are what become transactions.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Formula(String),
}

impl CellValue {
    /// Build a formula cell, adding the leading `=` if missing
    pub fn formula(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with('=') {
            Self::Formula(text)
        } else {
            Self::Formula(format!("={}", text))
        }
    }

    /// Whether the cell counts as having no value
    ///
    /// Empty text, numeric zero and `false` are all blank; a formula never is.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => *n == 0.0,
            Self::Bool(b) => !b,
            Self::Formula(_) => false,
        }
    }

    /// Exact text content, for label matching
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as text, the form amount parsing works on
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Formula(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(true) => "TRUE".into(),
            Self::Bool(false) => "FALSE".into(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

/// Convert a 1-based column number to its letter form (1 -> A, 27 -> AA)
pub fn column_letter(column: u32) -> String {
    let mut result = String::new();
    let mut num = column.saturating_sub(1);

    loop {
        let remainder = (num % 26) as u8;
        result.insert(0, (b'A' + remainder) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// One worksheet's populated cells
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: HashMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a cell (1-based row and column)
    pub fn set(&mut self, row: u32, column: u32, value: impl Into<CellValue>) {
        self.cells.insert((row, column), value.into());
    }

    /// Builder form of [`Sheet::set`]
    pub fn with(mut self, row: u32, column: u32, value: impl Into<CellValue>) -> Self {
        self.set(row, column, value);
        self
    }

    /// Get a cell (1-based row and column)
    pub fn cell(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Get a cell only if it holds a value
    pub fn value(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cell(row, column).filter(|c| !c.is_blank())
    }

    /// Exact text of a cell, if it is a text cell
    pub fn text(&self, row: u32, column: u32) -> Option<&str> {
        self.cell(row, column).and_then(CellValue::as_text)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered set of sheets plus where they came from
#[derive(Debug, Clone)]
pub struct Workbook {
    source: String,
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook with a source name for error messages
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Where the workbook came from (a path or `<memory>`)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// The sheet a legacy workbook keeps its data on
    ///
    /// calamine does not expose the saved active tab, so this is the first
    /// sheet in workbook order.
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Read an `.xlsx` file
    pub fn open(path: impl AsRef<Path>) -> MoneybagsResult<Self> {
        let path = path.as_ref();
        let mut xlsx: Xlsx<_> = open_workbook(path).map_err(|e| {
            MoneybagsError::Import(format!("Failed to load Excel file {}: {}", path.display(), e))
        })?;

        read_sheets(&mut xlsx, path.display().to_string())
    }

    /// Read an `.xlsx` document held in memory
    pub fn from_bytes(bytes: &[u8]) -> MoneybagsResult<Self> {
        let mut xlsx: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| MoneybagsError::Import(format!("Failed to load Excel file: {}", e)))?;

        read_sheets(&mut xlsx, MEMORY_SOURCE.to_string())
    }
}

fn read_sheets<RS: Read + Seek>(
    xlsx: &mut Xlsx<RS>,
    source: String,
) -> MoneybagsResult<Workbook> {
    let mut workbook = Workbook::new(source);

    for name in xlsx.sheet_names().to_vec() {
        let values = xlsx.worksheet_range(&name).map_err(|e| {
            MoneybagsError::Import(format!("Failed to read sheet '{}': {}", name, e))
        })?;
        // A sheet without formulas has no formula range
        let formulas = xlsx.worksheet_formula(&name).ok();

        let sheet = build_sheet(&name, &values, formulas.as_ref());
        debug!(sheet = %name, cells = sheet.len(), "Read worksheet");
        workbook.sheets.push(sheet);
    }

    Ok(workbook)
}

fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    if let Some((row0, col0)) = values.start() {
        for (row, col, data) in values.used_cells() {
            if let Some(value) = convert_data(data) {
                sheet.set(row0 + row as u32 + 1, col0 + col as u32 + 1, value);
            }
        }
    }

    // Formula text takes precedence over the cached result
    if let Some(formulas) = formulas {
        if let Some((row0, col0)) = formulas.start() {
            for (row, col, text) in formulas.used_cells() {
                if !text.is_empty() {
                    sheet.set(
                        row0 + row as u32 + 1,
                        col0 + col as u32 + 1,
                        CellValue::formula(text.as_str()),
                    );
                }
            }
        }
    }

    sheet
}

fn convert_data(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        other => Some(CellValue::Text(other.to_string())),
    }
}
