//! Storage initialization
//!
//! Handles first-run setup: default settings, starter categories and payees,
//! and a budget template for the current year.

use tracing::info;

use crate::config::settings::Settings;
use crate::error::MoneybagsError;
use crate::models::{BudgetTemplate, Category, CategoryType, Payee, PayeeType};

use super::Storage;

const DEFAULT_CATEGORIES: &[(&str, CategoryType)] = &[
    ("Salary", CategoryType::Income),
    ("Other income", CategoryType::Income),
    ("Housing & utilities", CategoryType::Expenses),
    ("Repairs & maintenance", CategoryType::Expenses),
    ("Digital services", CategoryType::Expenses),
    ("Cars", CategoryType::Expenses),
    ("Clothing & travel", CategoryType::Expenses),
    ("Sports", CategoryType::Expenses),
    ("Travel", CategoryType::Expenses),
    ("Savings", CategoryType::Expenses),
];

const DEFAULT_PAYEES: &[(&str, PayeeType)] = &[
    ("Employer", PayeeType::Actual),
    ("Landlord", PayeeType::Generic),
    ("Power Company", PayeeType::Generic),
    ("Netflix", PayeeType::Actual),
    ("Spotify", PayeeType::Actual),
];

/// What a first-run seed created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub payees: usize,
    pub templates: usize,
}

/// Initialize storage for a fresh installation
///
/// Seeds starter data once; later calls only make sure the settings file
/// exists. Existing categories and payees with the same names are left alone.
pub fn initialize_storage(storage: &Storage, year: i32) -> Result<SeedSummary, MoneybagsError> {
    let paths = storage.paths();
    paths.ensure_directories()?;

    let mut settings = Settings::load_or_create(paths)?;
    if settings.database_seeded {
        if !paths.settings_file().exists() {
            settings.save(paths)?;
        }
        return Ok(SeedSummary::default());
    }

    storage.load_all()?;
    let mut summary = SeedSummary::default();

    for (name, category_type) in DEFAULT_CATEGORIES {
        if storage.categories.get_by_name(name)?.is_none() {
            storage
                .categories
                .upsert(Category::new(*name, *category_type))?;
            summary.categories += 1;
        }
    }

    for (name, payee_type) in DEFAULT_PAYEES {
        if storage.payees.get_by_name(name)?.is_none() {
            storage.payees.upsert(Payee::with_type(*name, *payee_type))?;
            summary.payees += 1;
        }
    }

    for category in storage.categories.get_all()? {
        if storage
            .templates
            .insert(BudgetTemplate::new(year, category.id))?
        {
            summary.templates += 1;
        }
    }

    storage.save_all()?;

    settings.database_seeded = true;
    settings.save(paths)?;

    info!(
        categories = summary.categories,
        payees = summary.payees,
        templates = summary.templates,
        year,
        "Seeded initial data"
    );

    Ok(summary)
}

/// Check if storage needs initialization
pub fn needs_initialization(storage: &Storage) -> bool {
    !storage.is_initialized()
}
