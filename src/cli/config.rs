//! `moneybags config`: show paths and settings, or change settings

use clap::Args;

use crate::config::settings::CurrencyFormat;
use crate::config::{MoneybagsPaths, SettingsCache};
use crate::error::{MoneybagsError, MoneybagsResult};

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Display currency (nok, usd or eur)
    #[arg(long)]
    pub currency: Option<CurrencyFormat>,

    /// Payee that imported transactions are booked to
    #[arg(long, value_name = "NAME")]
    pub import_payee: Option<String>,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.currency.is_some() || self.import_payee.is_some()
    }
}

/// Apply any requested changes, then print the configuration
pub fn handle_config_command(
    paths: &MoneybagsPaths,
    settings: &SettingsCache,
    args: ConfigArgs,
) -> MoneybagsResult<()> {
    if args.has_changes() {
        let mut updated = settings.get()?;
        if let Some(currency) = args.currency {
            updated.currency_format = currency;
        }
        if let Some(name) = args.import_payee {
            let name = name.trim();
            if name.is_empty() {
                return Err(MoneybagsError::Validation(
                    "Import payee name cannot be empty".into(),
                ));
            }
            updated.import_payee_name = name.to_string();
        }
        settings.update(&updated)?;
        println!("Settings updated.");
        println!();
    }

    let current = settings.get()?;
    println!("Moneybags Configuration");
    println!("=======================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency:        {}", current.currency_format);
    println!("  Import payee:    {}", current.import_payee_name);
    println!("  Cache TTL:       {}s", current.cache_ttl_secs);
    println!("  Seeded:          {}", current.database_seeded);

    Ok(())
}
