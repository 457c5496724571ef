//! Spreadsheet import CLI commands
//!
//! `parse` reads a workbook and can save the result as JSON. `validate` and
//! `execute` accept either a workbook or such a saved JSON file, plus a
//! mapping from sheet category labels to stored categories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tracing::info;

use crate::config::SettingsCache;
use crate::display::{format_execution_summary, format_parsed_workbook, format_validation_report};
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::import::{self, ImportExecutor, ParsedWorkbook};
use crate::services::CategoryService;
use crate::storage::file_io::read_json_required;
use crate::storage::{write_json_atomic, Storage};

/// Input and mapping arguments shared by `validate` and `execute`
#[derive(Args)]
pub struct MappingArgs {
    /// Workbook (.xlsx) or parsed JSON file
    pub input: PathBuf,

    /// Budget year
    #[arg(short, long)]
    pub year: i32,

    /// Map a sheet category to a stored one (NAME=CATEGORY, repeatable)
    #[arg(short, long = "map", value_name = "NAME=CATEGORY")]
    pub map: Vec<String>,

    /// JSON file with a sheet name to category object
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

/// Import subcommands
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Parse a workbook and show what it contains
    Parse {
        /// Workbook (.xlsx)
        file: PathBuf,
        /// Budget year
        #[arg(short, long)]
        year: i32,
        /// Save the parse result as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check an import against stored categories without writing anything
    Validate {
        #[command(flatten)]
        args: MappingArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write budget entries and transactions
    Execute {
        #[command(flatten)]
        args: MappingArgs,
        /// Import even if validation reports errors
        #[arg(long)]
        force: bool,
    },
}

/// Handle an import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &SettingsCache,
    cmd: ImportCommands,
) -> MoneybagsResult<()> {
    match cmd {
        ImportCommands::Parse { file, year, output } => {
            let parsed = import::parse_file(&file, year)?;
            let currency = settings.get()?.currency_format;
            print!("{}", format_parsed_workbook(&parsed, currency));

            if let Some(output) = output {
                write_json_atomic(&output, &parsed)?;
                println!("Saved parse result to {}", output.display());
            }
        }

        ImportCommands::Validate { args, json } => {
            let parsed = load_input(&args.input, args.year)?;
            let mapping = build_mapping(storage, &args)?;
            let report = import::validate(storage, &parsed, &mapping)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_validation_report(&report));
            }
        }

        ImportCommands::Execute { args, force } => {
            let parsed = load_input(&args.input, args.year)?;
            let mapping = build_mapping(storage, &args)?;
            let report = import::validate(storage, &parsed, &mapping)?;
            print!("{}", format_validation_report(&report));

            if !report.valid && !force {
                return Err(MoneybagsError::Validation(
                    "Import not run; fix the errors above or pass --force".into(),
                ));
            }

            let payee_name = settings.get()?.import_payee_name;
            let summary = ImportExecutor::with_payee_name(storage, payee_name)
                .execute(&parsed, &mapping)?;
            print!("{}", format_execution_summary(&summary));
        }
    }

    Ok(())
}

/// Read a workbook or a saved parse result
fn load_input(path: &Path, year: i32) -> MoneybagsResult<ParsedWorkbook> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if !is_json {
        return import::parse_file(path, year);
    }

    let parsed: ParsedWorkbook = read_json_required(path)?;
    if parsed.year != year {
        return Err(MoneybagsError::Validation(format!(
            "{} was parsed for {}, not {}",
            path.display(),
            parsed.year,
            year
        )));
    }
    info!(path = %path.display(), "Loaded parsed workbook");
    Ok(parsed)
}

/// Merge `--mapping` and `--map` (the latter wins) and resolve category names
fn build_mapping(
    storage: &Storage,
    args: &MappingArgs,
) -> MoneybagsResult<HashMap<String, String>> {
    let mut mapping: HashMap<String, String> = match &args.mapping {
        Some(path) => read_json_required(path)?,
        None => HashMap::new(),
    };

    for pair in &args.map {
        let (name, category) = parse_map_pair(pair)?;
        mapping.insert(name, category);
    }

    CategoryService::new(storage).resolve_mapping(&mapping)
}

fn parse_map_pair(pair: &str) -> MoneybagsResult<(String, String)> {
    match pair.split_once('=') {
        Some((name, category)) if !name.trim().is_empty() && !category.trim().is_empty() => {
            Ok((name.trim().to_string(), category.trim().to_string()))
        }
        _ => Err(MoneybagsError::Validation(format!(
            "Invalid mapping '{}': expected NAME=CATEGORY",
            pair
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MoneybagsPaths;
    use crate::import::{ParsedCategory, SheetLayout};
    use crate::models::CategoryType;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneybagsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn args(input: PathBuf, map: &[&str], mapping: Option<PathBuf>) -> MappingArgs {
        MappingArgs {
            input,
            year: 2024,
            map: map.iter().map(|s| s.to_string()).collect(),
            mapping,
        }
    }

    #[test]
    fn test_parse_map_pair() {
        assert_eq!(
            parse_map_pair("Lønn = Salary").unwrap(),
            ("Lønn".to_string(), "Salary".to_string())
        );
        assert!(parse_map_pair("Lønn").unwrap_err().is_validation());
        assert!(parse_map_pair("=Salary").unwrap_err().is_validation());
    }

    #[test]
    fn test_build_mapping_resolves_names() {
        let (temp_dir, storage) = create_test_storage();
        let salary = CategoryService::new(&storage)
            .create_category("Salary", CategoryType::Income)
            .unwrap();

        let file = temp_dir.path().join("mapping.json");
        write_json_atomic(
            &file,
            &HashMap::from([("Lønn", "Other"), ("Mat", "Groceries")]),
        )
        .unwrap();

        let mapping = build_mapping(
            &storage,
            &args(PathBuf::from("x.json"), &["Lønn=salary"], Some(file)),
        )
        .unwrap();

        assert_eq!(mapping["Lønn"], salary.id.as_uuid().to_string());
        assert_eq!(mapping["Mat"], "Groceries");
    }

    #[test]
    fn test_load_input_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("parsed.json");
        let parsed = ParsedWorkbook {
            year: 2024,
            layout: SheetLayout::Legacy,
            categories: vec![ParsedCategory::new("Mat", CategoryType::Expenses)],
        };
        write_json_atomic(&file, &parsed).unwrap();

        assert_eq!(load_input(&file, 2024).unwrap(), parsed);
        assert!(load_input(&file, 2025).unwrap_err().is_validation());
    }
}
