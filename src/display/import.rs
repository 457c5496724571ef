//! Import result formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::CurrencyFormat;
use crate::import::{ExecutionSummary, ParsedWorkbook, ValidationReport};

#[derive(Tabled)]
struct ParsedRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
    #[tabled(rename = "Budget months")]
    budget_months: usize,
    #[tabled(rename = "Budget total")]
    budget_total: String,
    #[tabled(rename = "Transactions")]
    transactions: usize,
    #[tabled(rename = "Actual total")]
    actual_total: String,
}

/// Format a parse result as one row per category
pub fn format_parsed_workbook(parsed: &ParsedWorkbook, currency: CurrencyFormat) -> String {
    let rows = parsed.categories.iter().map(|category| ParsedRow {
        name: category.name.clone(),
        category_type: category.category_type.to_string(),
        budget_months: category.budget.len(),
        budget_total: currency.format(
            category
                .budget
                .values()
                .copied()
                .fold(0i64, i64::saturating_add),
        ),
        transactions: category.transaction_count(),
        actual_total: currency.format(
            category
                .actuals
                .values()
                .flatten()
                .copied()
                .fold(0i64, i64::saturating_add),
        ),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    format!(
        "Year {} ({} layout): {} categories, {} budget entries, {} transactions\n{}\n",
        parsed.year,
        parsed.layout,
        parsed.categories.len(),
        parsed.budget_count(),
        parsed.transaction_count(),
        table
    )
}

/// Format a validation report
pub fn format_validation_report(report: &ValidationReport) -> String {
    let mut output = String::new();

    if report.valid {
        output.push_str("Validation passed\n");
    } else {
        output.push_str(&format!(
            "Validation failed with {} error(s)\n",
            report.errors.len()
        ));
    }

    for error in &report.errors {
        output.push_str(&format!("  error:   {}\n", error));
    }
    for warning in &report.warnings {
        output.push_str(&format!("  warning: {}\n", warning));
    }

    output.push_str(&format!(
        "Would import {} budget entries and {} transactions\n",
        report.summary.budget_count, report.summary.transaction_count
    ));
    output
}

/// Format the result of an import run
pub fn format_execution_summary(summary: &ExecutionSummary) -> String {
    format!(
        "Imported {} budget entries and {} transactions\n\
         Added {} categories to the budget template\n",
        summary.budget_count, summary.transaction_count, summary.template_count
    )
}
