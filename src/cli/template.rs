//! Budget template CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::services::{CategoryService, TemplateService};
use crate::storage::Storage;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List the categories in a year's template
    List {
        /// Budget year
        year: i32,
    },

    /// Add a category to a year's template
    Add {
        /// Budget year
        year: i32,
        /// Category name or ID
        category: String,
    },

    /// Copy one year's template into another
    Copy {
        /// Source year
        from: i32,
        /// Target year
        to: i32,
    },
}

/// Handle a template command
pub fn handle_template_command(storage: &Storage, cmd: TemplateCommands) -> MoneybagsResult<()> {
    let service = TemplateService::new(storage);

    match cmd {
        TemplateCommands::List { year } => {
            let categories = service.list_categories(year)?;
            if categories.is_empty() {
                println!("No template for {}.", year);
                let years = service.years()?;
                if !years.is_empty() {
                    let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
                    println!("Years with a template: {}", years.join(", "));
                }
            } else {
                println!("Budget template {}", year);
                print!("{}", format_category_list(&categories));
            }
        }

        TemplateCommands::Add { year, category } => {
            let cat = CategoryService::new(storage)
                .find_category(&category)?
                .ok_or_else(|| MoneybagsError::category_not_found(&category))?;

            if service.add_category(year, cat.id)? {
                println!("Added '{}' to the {} template", cat.name, year);
            } else {
                println!("'{}' is already in the {} template", cat.name, year);
            }
        }

        TemplateCommands::Copy { from, to } => {
            let added = service.copy_year(from, to)?;
            println!("Copied {} categories from {} to {}", added, from, to);
        }
    }

    Ok(())
}
