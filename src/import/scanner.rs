//! Section and category scanner for budget workbooks
//!
//! Two physical layouts are supported:
//!
//! - **Hovedark**: a sheet named `Hovedark` with category names in column C,
//!   the label `Budsjett` in column D and months in F..Q. The actual figures
//!   sit on the row below each category.
//! - **Legacy**: the first sheet, category names in column B and months in
//!   C..N. Income blocks are four rows tall starting at row 8; expense blocks
//!   are three rows tall starting just below the `Utgifter` marker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{MoneybagsError, MoneybagsResult};
use crate::models::CategoryType;

use super::formula::extract_amounts;
use super::parsed::{ParsedCategory, ParsedWorkbook};
use super::workbook::{column_letter, Sheet, Workbook};

/// Name of the sheet used by the current layout
pub const HOVEDARK_SHEET: &str = "Hovedark";

const BUDGET_LABEL: &str = "Budsjett";
const EXPENSES_MARKER: &str = "Utgifter";
const INCOME_MARKER: &str = "Inntekter";

/// Rows scanned for markers and categories
const SCAN_ROWS: std::ops::Range<u32> = 1..100;

/// Legacy income blocks start here
const LEGACY_INCOME_START: u32 = 8;
const LEGACY_INCOME_STEP: usize = 4;
const LEGACY_EXPENSE_STEP: usize = 3;
/// Legacy expense blocks stop before this row
const LEGACY_EXPENSE_END: u32 = 60;

/// Row labels in the legacy layout that are never category names
const LEGACY_LABELS: [&str; 6] = [
    "Inntekter",
    "Utgifter",
    "Balanse",
    "Budsjett",
    "Resultat",
    "Differanse",
];

/// Physical layout of a budget workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetLayout {
    Legacy,
    Hovedark,
}

impl SheetLayout {
    /// Column holding category names
    pub fn name_column(self) -> u32 {
        match self {
            Self::Legacy => 2,
            Self::Hovedark => 3,
        }
    }

    /// Column holding January; the other months follow left to right
    pub fn first_month_column(self) -> u32 {
        match self {
            Self::Legacy => 3,
            Self::Hovedark => 6,
        }
    }

    /// (month, column) pairs for January through December
    pub fn month_columns(self) -> impl Iterator<Item = (u32, u32)> {
        let first = self.first_month_column();
        (1..=12).map(move |month| (month, first + month - 1))
    }
}

impl std::fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Hovedark => write!(f, "hovedark"),
        }
    }
}

/// Decide which layout a workbook uses
///
/// Hovedark requires both the sheet and at least one `Budsjett` label in
/// column D; a `Hovedark` sheet without one falls back to the legacy reader.
pub fn detect_layout(workbook: &Workbook) -> SheetLayout {
    let is_hovedark = workbook.sheet(HOVEDARK_SHEET).is_some_and(|sheet| {
        SCAN_ROWS
            .clone()
            .any(|row| sheet.text(row, 4) == Some(BUDGET_LABEL))
    });

    if is_hovedark {
        SheetLayout::Hovedark
    } else {
        SheetLayout::Legacy
    }
}

/// Parse a workbook into per-category budget and actual figures
pub fn parse_workbook(workbook: &Workbook, year: i32) -> MoneybagsResult<ParsedWorkbook> {
    if !(1900..=2100).contains(&year) {
        return Err(MoneybagsError::Validation(format!("Invalid year: {}", year)));
    }

    let layout = detect_layout(workbook);
    info!(source = workbook.source(), %layout, year, "Parsing workbook");

    let categories = match layout {
        SheetLayout::Hovedark => {
            let sheet = workbook.sheet(HOVEDARK_SHEET).ok_or_else(|| {
                MoneybagsError::structure(workbook.source(), "Missing 'Hovedark' sheet")
            })?;
            parse_hovedark(sheet, workbook.source())?
        }
        SheetLayout::Legacy => {
            let sheet = workbook.active_sheet().ok_or_else(|| {
                MoneybagsError::structure(workbook.source(), "Workbook has no sheets")
            })?;
            parse_legacy(sheet, workbook.source())?
        }
    };

    Ok(ParsedWorkbook {
        year,
        layout,
        categories,
    })
}

fn parse_hovedark(sheet: &Sheet, source: &str) -> MoneybagsResult<Vec<ParsedCategory>> {
    let layout = SheetLayout::Hovedark;
    let name_col = layout.name_column();

    let mut expenses_row = None;
    let mut income_row = None;
    for row in SCAN_ROWS {
        let Some(cell) = sheet.value(row, name_col) else {
            continue;
        };
        let text = cell.to_text();
        if text.contains(EXPENSES_MARKER) {
            expenses_row = Some(row);
        } else if text.contains(INCOME_MARKER) {
            income_row = Some(row);
        }
    }

    let expenses_row = expenses_row.ok_or_else(|| {
        MoneybagsError::structure(source, "Could not find 'Utgifter' section in Hovedark sheet")
    })?;
    let income_row = income_row.ok_or_else(|| {
        MoneybagsError::structure(source, "Could not find 'Inntekter' section in Hovedark sheet")
    })?;

    info!(expenses_row, income_row, "Found Hovedark sections");

    let mut categories = Vec::new();
    for row in SCAN_ROWS {
        let Some(cell) = sheet.value(row, name_col) else {
            continue;
        };
        if sheet.text(row, 4) != Some(BUDGET_LABEL) {
            continue;
        }

        let name = cell.to_text().trim().to_string();
        if name.is_empty() {
            continue;
        }
        // Also covers "Totale"
        if name.contains("Total") {
            debug!(category = %name, "Skipping total row");
            continue;
        }

        let in_expenses = row > expenses_row && (row < income_row || income_row < expenses_row);
        let category_type = if in_expenses {
            CategoryType::Expenses
        } else if row > income_row {
            CategoryType::Income
        } else {
            debug!(category = %name, row, "Skipping category before sections");
            continue;
        };

        let mut category = ParsedCategory::new(name, category_type);
        category.budget = read_budget(sheet, layout, row);
        category.actuals = read_actuals(sheet, layout, row + 1, &category.name)?;

        push_category(&mut categories, category);
    }

    if categories.is_empty() {
        return Err(MoneybagsError::structure(
            source,
            "No categories found in Hovedark sheet",
        ));
    }

    Ok(categories)
}

fn parse_legacy(sheet: &Sheet, source: &str) -> MoneybagsResult<Vec<ParsedCategory>> {
    let layout = SheetLayout::Legacy;
    let name_col = layout.name_column();

    let expenses_row = SCAN_ROWS
        .clone()
        .find(|row| {
            sheet
                .value(*row, name_col)
                .is_some_and(|cell| cell.to_text().contains(EXPENSES_MARKER))
        })
        .ok_or_else(|| {
            MoneybagsError::structure(source, "Could not find 'Utgifter' section in Excel file")
        })?;

    info!(sheet = sheet.name(), expenses_row, "Found legacy expenses section");

    let income_rows = (LEGACY_INCOME_START..expenses_row).step_by(LEGACY_INCOME_STEP);
    let expense_rows = (expenses_row + 1..LEGACY_EXPENSE_END).step_by(LEGACY_EXPENSE_STEP);

    let blocks = income_rows
        .map(|row| (row, CategoryType::Income))
        .chain(expense_rows.map(|row| (row, CategoryType::Expenses)));

    let mut categories = Vec::new();
    for (row, category_type) in blocks {
        let Some(cell) = sheet.value(row, name_col) else {
            continue;
        };
        if cell
            .as_text()
            .is_some_and(|text| LEGACY_LABELS.contains(&text))
        {
            continue;
        }

        let name = cell.to_text().trim().to_string();
        if name.is_empty() {
            continue;
        }

        let mut category = ParsedCategory::new(name, category_type);
        category.budget = read_budget(sheet, layout, row + 1);
        category.actuals = read_actuals(sheet, layout, row + 2, &category.name)?;

        push_category(&mut categories, category);
    }

    if categories.is_empty() {
        return Err(MoneybagsError::structure(
            source,
            "No categories found in Excel file",
        ));
    }

    Ok(categories)
}

/// Read one budget row, summing each month's addends
///
/// Malformed budget cells are skipped rather than failing the import. The
/// Hovedark layout also drops months whose total is zero.
fn read_budget(sheet: &Sheet, layout: SheetLayout, row: u32) -> BTreeMap<u32, i64> {
    let drop_zero = layout == SheetLayout::Hovedark;
    let mut budget = BTreeMap::new();

    for (month, column) in layout.month_columns() {
        let Some(cell) = sheet.value(row, column) else {
            continue;
        };

        let letter = column_letter(column);
        let amounts = match extract_amounts(Some(&cell.to_text()), row, &letter) {
            Ok(amounts) => amounts,
            Err(e) => {
                warn!(error = %e, "Skipping unparsable budget cell");
                continue;
            }
        };
        if amounts.is_empty() {
            continue;
        }

        let Some(total) = amounts.iter().try_fold(0i64, |acc, v| acc.checked_add(*v)) else {
            warn!(row, column = %letter, "Skipping budget cell whose total overflows");
            continue;
        };
        if drop_zero && total == 0 {
            continue;
        }
        budget.insert(month, total);
    }

    budget
}

/// Read one actuals row, keeping every addend
fn read_actuals(
    sheet: &Sheet,
    layout: SheetLayout,
    row: u32,
    category: &str,
) -> MoneybagsResult<BTreeMap<u32, Vec<i64>>> {
    let mut actuals = BTreeMap::new();

    for (month, column) in layout.month_columns() {
        let Some(cell) = sheet.value(row, column) else {
            continue;
        };

        let amounts = extract_amounts(Some(&cell.to_text()), row, &column_letter(column))
            .map_err(|source| MoneybagsError::CategoryFormula {
                category: category.to_string(),
                source,
            })?;
        if !amounts.is_empty() {
            actuals.insert(month, amounts);
        }
    }

    Ok(actuals)
}

fn push_category(categories: &mut Vec<ParsedCategory>, category: ParsedCategory) {
    if category.is_empty() {
        debug!(category = %category.name, "Skipping category with no data");
        return;
    }

    info!(
        category = %category.name,
        category_type = %category.category_type,
        budget_months = category.budget.len(),
        actual_months = category.actuals.len(),
        "Found category"
    );
    categories.push(category);
}
