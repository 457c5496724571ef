//! Workbook fixtures shared by the integration tests
//!
//! Rows and columns below are 1-based, as they appear in Excel.

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, Worksheet};

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Formula(&'static str),
}

use Cell::{Formula, Number, Text};

fn fill(worksheet: &mut Worksheet, cells: &[(u32, u16, Cell)]) {
    for (row, col, cell) in cells {
        let (row, col) = (row - 1, col - 1);
        match cell {
            Text(text) => worksheet.write_string(row, col, *text).map(|_| ()),
            Number(value) => worksheet.write_number(row, col, *value).map(|_| ()),
            Formula(formula) => worksheet.write_formula(row, col, *formula).map(|_| ()),
        }
        .unwrap();
    }
}

/// Current layout: `Hovedark` sheet, names in C, months from F
pub fn hovedark_workbook() -> Workbook {
    let mut workbook = Workbook::new();

    // A leading sheet that the reader must ignore
    let notes = workbook.add_worksheet();
    notes.set_name("Notater").unwrap();
    fill(notes, &[(1, 1, Text("Utgifter"))]);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Hovedark").unwrap();
    fill(
        sheet,
        &[
            (2, 3, Text("Budsjett 2024")),
            (4, 3, Text("Inntekter")),
            (5, 3, Text("Lønn")),
            (5, 4, Text("Budsjett")),
            (5, 6, Number(52000.0)),
            (5, 7, Formula("=50000+2000")),
            (6, 4, Text("Resultat")),
            (6, 6, Formula("=55615")),
            (6, 7, Number(55615.0)),
            (9, 3, Text("Totale inntekter")),
            (9, 4, Text("Budsjett")),
            (9, 6, Number(52000.0)),
            (12, 3, Text("Utgifter")),
            (13, 3, Text("Mat")),
            (13, 4, Text("Budsjett")),
            (13, 6, Formula("=3000+3200")),
            (13, 7, Number(6000.0)),
            (14, 4, Text("Resultat")),
            (14, 6, Formula("=575+2182")),
            (14, 7, Formula("=((427+275)+7292)+200")),
        ],
    );

    workbook
}

/// Older layout: first sheet, names in B, months from C
pub fn legacy_workbook() -> Workbook {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Budsjett 2023").unwrap();
    fill(
        sheet,
        &[
            (3, 2, Text("Balanse")),
            (7, 2, Text("Inntekter")),
            (8, 2, Text("Lønn")),
            (9, 2, Text("Budsjett")),
            (9, 3, Number(52000.0)),
            (9, 4, Formula("=50000+2000")),
            (10, 2, Text("Resultat")),
            (10, 3, Formula("=55615")),
            (10, 4, Number(55615.0)),
            (11, 2, Text("Differanse")),
            (16, 2, Text("Utgifter")),
            (17, 2, Text("Mat")),
            (18, 2, Text("Budsjett")),
            (18, 3, Formula("=3000+3200")),
            (18, 4, Number(6000.0)),
            (19, 2, Text("Resultat")),
            (19, 3, Formula("=575+2182")),
            (19, 4, Formula("=((427+275)+7292)+200")),
        ],
    );

    workbook
}

/// A Hovedark workbook whose actuals contain an unsupported formula
pub fn workbook_with_if_formula() -> Workbook {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Hovedark").unwrap();
    fill(
        sheet,
        &[
            (4, 3, Text("Inntekter")),
            (5, 3, Text("Lønn")),
            (5, 4, Text("Budsjett")),
            (5, 6, Number(52000.0)),
            (10, 3, Text("Utgifter")),
            (11, 3, Text("Mat")),
            (11, 4, Text("Budsjett")),
            (11, 6, Number(6000.0)),
            (12, 6, Formula("=IF(F11>0,100,200)")),
        ],
    );

    workbook
}

/// Save a fixture to `dir/name` and return the path
pub fn save(mut workbook: Workbook, dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}
