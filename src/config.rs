//! Booking configuration

use std::path::PathBuf;

use clap::Parser;
use rusty_money::iso::Currency;

use crate::{
    catalog::{Catalog, CatalogError},
    pricing::{PriceParseError, currency_from_code},
};

/// Grandstand booking configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "grandstand", about = "Grand Prix ticket booking", long_about = None)]
pub struct BookingConfig {
    /// YAML catalog of ticket types; the standard Grand Prix line-up when unset
    #[arg(long, env = "GRANDSTAND_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// File orders and users are stored in
    #[arg(long, env = "GRANDSTAND_DATA_FILE", default_value = "grandstand.yml")]
    pub data_file: PathBuf,

    /// Directory sales reports are exported to
    #[arg(long, env = "GRANDSTAND_REPORT_DIR", default_value = ".")]
    pub report_dir: PathBuf,

    /// Currency of the standard catalog (AUD, EUR, GBP, USD)
    #[arg(long, env = "GRANDSTAND_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GRANDSTAND_LOG", default_value = "info")]
    pub log_level: String,
}

impl BookingConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceParseError::UnknownCurrency`] for an unsupported code.
    pub fn currency(&self) -> Result<&'static Currency, PriceParseError> {
        currency_from_code(&self.currency)
    }

    /// Load the configured catalog, or build the standard one.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog file cannot be loaded or the
    /// currency is not supported.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Catalog::grand_prix(self.currency()?),
        }
    }
}
