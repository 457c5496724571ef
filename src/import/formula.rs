//! Restricted formula evaluator for amount cells
//!
//! Household sheets often bundle several purchases into one cell as
//! `=575+2182`. Only flat addition of non-negative numbers is accepted; any
//! other spreadsheet function or operator is rejected so that nothing is
//! silently mis-imported.

use crate::error::{FormulaError, FormulaErrorKind};

/// Tokens rejected as spreadsheet functions, checked in this order
const FUNCTIONS: [&str; 6] = ["IF", "SUM", "AVERAGE", "COUNT", "MIN", "MAX"];

/// Operators rejected outright, checked after the functions
const OPERATORS: [char; 2] = ['*', '/'];

/// Extract the individual amounts from a cell's text
///
/// `row` and `column` only label error messages. A blank cell yields an
/// empty list.
///
/// ```
/// use moneybags::import::extract_amounts;
///
/// assert_eq!(extract_amounts(Some("=575+2182"), 12, "F").unwrap(), vec![575, 2182]);
/// assert_eq!(extract_amounts(Some("55615.0"), 12, "F").unwrap(), vec![55615]);
/// assert!(extract_amounts(None, 12, "F").unwrap().is_empty());
/// ```
pub fn extract_amounts(
    cell_value: Option<&str>,
    row: u32,
    column: &str,
) -> Result<Vec<i64>, FormulaError> {
    let text = match cell_value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Vec::new()),
    };

    let expression: String = text
        .strip_prefix('=')
        .unwrap_or(text)
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();

    let fail = |kind| FormulaError::new(row, column, kind);

    if let Some(function) = FUNCTIONS.iter().copied().find(|f| expression.contains(f)) {
        return Err(fail(FormulaErrorKind::ComplexFormula(function)));
    }
    if expression.contains(&OPERATORS[..]) {
        return Err(fail(FormulaErrorKind::OnlyAddition));
    }

    let mut amounts = Vec::new();
    for part in expression.split('+').map(str::trim) {
        if part.is_empty() {
            continue;
        }

        let value = parse_addend(part).ok_or_else(|| {
            fail(FormulaErrorKind::InvalidNumber(part.to_string()))
        })?;
        if value < 0 {
            return Err(fail(FormulaErrorKind::NegativeValue(value)));
        }
        amounts.push(value);
    }

    Ok(amounts)
}

/// Parse one addend as a decimal and truncate it toward zero
fn parse_addend(part: &str) -> Option<i64> {
    let value: f64 = part.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    // i64::MAX is not exactly representable; 2^63 is the first value past it
    if truncated < i64::MIN as f64 || truncated >= 9_223_372_036_854_775_808.0 {
        return None;
    }
    Some(truncated as i64)
}
