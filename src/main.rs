use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};

use moneybags::cli::{
    handle_category_command, handle_config_command, handle_import_command,
    handle_template_command,
};
use moneybags::config::{paths::MoneybagsPaths, SettingsCache};
use moneybags::storage::init::{initialize_storage, needs_initialization};
use moneybags::storage::Storage;

#[derive(Parser)]
#[command(
    name = "moneybags",
    version,
    about = "Household budget with spreadsheet import",
    long_about = "Moneybags keeps a yearly household budget of income and expense \
                  categories. Budgets and actual spending can be imported from \
                  the family's Excel workbook, one year at a time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directories and starter data
    Init,

    /// Show configuration and paths, or change settings
    Config(moneybags::cli::ConfigArgs),

    /// Category management commands
    #[command(subcommand)]
    Category(moneybags::cli::CategoryCommands),

    /// Budget template commands
    #[command(subcommand)]
    Template(moneybags::cli::TemplateCommands),

    /// Spreadsheet import commands
    #[command(subcommand)]
    Import(moneybags::cli::ImportCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MoneybagsPaths::new()?;
    let settings = SettingsCache::from_settings_file(paths.clone())?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Moneybags at: {}", paths.base_dir().display());
            let summary = initialize_storage(&storage, Local::now().year())?;
            settings.invalidate()?;
            println!("Initialization complete!");
            if summary.categories + summary.payees + summary.templates > 0 {
                println!();
                println!("Created {} categories", summary.categories);
                println!("Created {} payees", summary.payees);
                println!("Added {} categories to this year's template", summary.templates);
            }
            println!();
            println!("Run 'moneybags category list' to see all categories.");
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &settings, args)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Template(cmd)) => {
            handle_template_command(&storage, cmd)?;
        }
        Some(Commands::Import(cmd)) => {
            handle_import_command(&storage, &settings, cmd)?;
        }
        None => {
            println!("Moneybags - household budget with spreadsheet import");
            println!();
            if needs_initialization(&storage) {
                println!("Run 'moneybags init' to get started.");
            }
            println!("Run 'moneybags --help' for usage information.");
        }
    }

    Ok(())
}
