//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::models::CategoryType;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category type (income or expenses)
        #[arg(short = 't', long = "type")]
        category_type: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> MoneybagsResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list_categories()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create {
            name,
            category_type,
        } => {
            let category_type = category_type
                .parse::<CategoryType>()
                .map_err(|e| MoneybagsError::Validation(e.to_string()))?;

            let category = service.create_category(&name, category_type)?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id.as_uuid());
        }

        CategoryCommands::Show { category } => {
            let cat = service
                .find_category(&category)?
                .ok_or_else(|| MoneybagsError::category_not_found(&category))?;
            let transactions = service.transactions(cat.id)?;
            print!("{}", format_category_details(&cat, &transactions));
        }
    }

    Ok(())
}
