//! Parsing real `.xlsx` files written with rust_xlsxwriter

mod common;

use std::collections::{BTreeMap, HashMap};

use moneybags::config::paths::MoneybagsPaths;
use moneybags::import::{self, SheetLayout};
use moneybags::models::{Category, CategoryType};
use moneybags::storage::Storage;
use moneybags::MoneybagsError;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn assert_fixture_categories(parsed: &import::ParsedWorkbook) {
    let names: Vec<_> = parsed.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Lønn", "Mat"]);

    let salary = parsed.category("Lønn").unwrap();
    assert_eq!(salary.category_type, CategoryType::Income);
    assert_eq!(salary.budget, BTreeMap::from([(1, 52000), (2, 52000)]));
    assert_eq!(
        salary.actuals,
        BTreeMap::from([(1, vec![55615]), (2, vec![55615])])
    );

    let food = parsed.category("Mat").unwrap();
    assert_eq!(food.category_type, CategoryType::Expenses);
    assert_eq!(food.budget, BTreeMap::from([(1, 6200), (2, 6000)]));
    assert_eq!(
        food.actuals,
        BTreeMap::from([(1, vec![575, 2182]), (2, vec![427, 275, 7292, 200])])
    );
}

#[test]
fn test_parse_hovedark_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::save(common::hovedark_workbook(), temp_dir.path(), "budsjett.xlsx");

    let parsed = import::parse_file(&path, 2024).unwrap();

    assert_eq!(parsed.year, 2024);
    assert_eq!(parsed.layout, SheetLayout::Hovedark);
    assert_fixture_categories(&parsed);
}

#[test]
fn test_parse_legacy_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::save(common::legacy_workbook(), temp_dir.path(), "budsjett.xlsx");

    let parsed = import::parse_file(&path, 2023).unwrap();

    assert_eq!(parsed.layout, SheetLayout::Legacy);
    assert_fixture_categories(&parsed);
}

#[test]
fn test_parse_bytes_matches_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::save(common::hovedark_workbook(), temp_dir.path(), "budsjett.xlsx");
    let bytes = common::hovedark_workbook().save_to_buffer().unwrap();

    assert_eq!(
        import::parse_bytes(&bytes, 2024).unwrap(),
        import::parse_file(&path, 2024).unwrap()
    );
}

#[test]
fn test_unsupported_formula_names_category() {
    let bytes = common::workbook_with_if_formula().save_to_buffer().unwrap();

    let err = import::parse_bytes(&bytes, 2024).unwrap_err();
    match err {
        MoneybagsError::CategoryFormula { category, source } => {
            assert_eq!(category, "Mat");
            assert_eq!(source.row, 12);
            assert_eq!(source.column, "F");
            assert!(source.to_string().contains("IF"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = import::parse_file(temp_dir.path().join("missing.xlsx"), 2024).unwrap_err();
    assert!(matches!(err, MoneybagsError::Import(_)));
}

#[test]
fn test_not_a_workbook() {
    let err = import::parse_bytes(b"not a zip file", 2024).unwrap_err();
    assert!(matches!(err, MoneybagsError::Import(_)));
}

#[test]
fn test_full_import_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::save(common::hovedark_workbook(), temp_dir.path(), "budsjett.xlsx");

    let storage =
        Storage::new(MoneybagsPaths::with_base_dir(temp_dir.path().join("data"))).unwrap();
    storage.load_all().unwrap();
    let salary = Category::new("Salary", CategoryType::Income);
    let food = Category::new("Groceries", CategoryType::Expenses);
    storage.categories.upsert(salary.clone()).unwrap();
    storage.categories.upsert(food.clone()).unwrap();

    let mapping = HashMap::from([
        ("Lønn".to_string(), salary.id.as_uuid().to_string()),
        ("Mat".to_string(), food.id.as_uuid().to_string()),
    ]);

    let parsed = import::parse_file(&path, 2024).unwrap();
    let report = import::validate(&storage, &parsed, &mapping).unwrap();
    assert!(report.valid, "{:?}", report.errors);
    assert!(report.warnings.is_empty());
    assert_eq!(report.summary.budget_count, 4);
    assert_eq!(report.summary.transaction_count, 8);

    let summary = import::execute(&storage, &parsed, &mapping).unwrap();
    assert_eq!(summary.budget_count, 4);
    assert_eq!(summary.transaction_count, 8);
    assert_eq!(summary.template_count, 2);

    let entry = storage.budget.get(food.id, 2024, 1).unwrap().unwrap();
    assert_eq!(entry.amount, 6200);
    assert_eq!(storage.transactions.count().unwrap(), 8);

    // A second run overwrites budgets and warns about it
    let report = import::validate(&storage, &parsed, &mapping).unwrap();
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 4);
}
