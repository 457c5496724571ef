//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, Transaction};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            category_type: category.category_type.to_string(),
        }
    }
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'moneybags init' to create default categories.\n"
            .to_string();
    }

    let mut table = Table::new(categories.iter().map(CategoryRow::from));
    table.with(Style::sharp());
    format!("{}\n", table)
}

/// Format a single category's details and a summary of its actuals
pub fn format_category_details(category: &Category, transactions: &[Transaction]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id.as_uuid()));
    output.push_str(&format!("  Type:    {}\n", category.category_type));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d")
    ));

    match transactions.last() {
        Some(latest) => {
            let total: i64 = transactions.iter().map(|t| t.amount).sum();
            output.push_str(&format!(
                "  Actuals: {} transactions totalling {}, latest {}\n",
                transactions.len(),
                total,
                latest.date.format("%Y-%m-%d")
            ));
        }
        None => output.push_str("  Actuals: none\n"),
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[]).starts_with("No categories found."));
    }

    #[test]
    fn test_list_has_rows() {
        let categories = vec![
            Category::new("Lønn", CategoryType::Income),
            Category::new("Mat", CategoryType::Expenses),
        ];
        let output = format_category_list(&categories);

        assert!(output.contains("Name"));
        assert!(output.contains("Lønn"));
        assert!(output.contains("expenses"));
        assert!(output.contains(&categories[1].id.to_string()));
    }

    #[test]
    fn test_details() {
        let category = Category::new("Mat", CategoryType::Expenses);
        let output = format_category_details(&category, &[]);

        assert!(output.starts_with("Category: Mat"));
        assert!(output.contains(&category.id.as_uuid().to_string()));
        assert!(output.contains("Actuals: none"));
    }

    #[test]
    fn test_details_summarize_actuals() {
        let category = Category::new("Mat", CategoryType::Expenses);
        let date = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let transactions = vec![
            Transaction::new(category.id, date(1), 575),
            Transaction::new(category.id, date(2), 2182),
        ];

        let output = format_category_details(&category, &transactions);
        assert!(output.contains("Actuals: 2 transactions totalling 2757, latest 2024-02-01"));
    }
}
