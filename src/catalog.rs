//! Catalog
//!
//! The ticket types on sale, keyed by a short name ("RacePass", "Group", ...).
//! A catalog is built once by the embedding program and handed to whatever
//! needs it; the only runtime mutation is the group discount percentage.

use std::{fs, path::Path};

use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    discounts::DiscountPercentage,
    errors::ErrorKind,
    pricing::{PriceParseError, major, parse_price},
    ticket_types::{
        GroupDiscount, PricingError, SeasonMembership, SingleRacePass, TicketType,
        TicketTypeDetails, WeekendPackage,
    },
};

/// Catalog key of the single race pass.
pub const RACE_PASS: &str = "RacePass";

/// Catalog key of the weekend package.
pub const WEEKEND: &str = "Weekend";

/// Catalog key of the season membership.
pub const SEASON: &str = "Season";

/// Catalog key of the group discount.
pub const GROUP: &str = "Group";

/// Catalog Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or unknown currency
    #[error(transparent)]
    Price(#[from] PriceParseError),

    /// Invalid percentage format
    #[error("invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// The ticket type definition is invalid
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// No ticket type under this key
    #[error("ticket type not found: {0}")]
    UnknownTicketType(String),

    /// Ticket types priced in different currencies
    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

impl CatalogError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Io(_) | CatalogError::Yaml(_) => ErrorKind::Storage,
            CatalogError::Pricing(error) => error.kind(),
            CatalogError::Price(_)
            | CatalogError::InvalidPercentage(_)
            | CatalogError::UnknownTicketType(_)
            | CatalogError::CurrencyMismatch(_, _) => ErrorKind::Validation,
        }
    }
}

/// Wrapper for ticket types in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Map of catalog key -> ticket type definition
    pub ticket_types: FxHashMap<String, TicketTypeFile>,
}

/// Ticket type definition from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TicketTypeFile {
    /// Single race pass
    SingleRacePass {
        /// Display name
        name: String,

        /// Base price (e.g., "120 USD")
        base_price: String,

        /// What the ticket includes
        #[serde(default)]
        description: String,

        /// Race day
        race_day: String,

        /// Seat section
        seat_section: String,
    },

    /// Weekend package
    WeekendPackage {
        /// Display name
        name: String,

        /// Base price (e.g., "300 USD")
        base_price: String,

        /// What the ticket includes
        #[serde(default)]
        description: String,

        /// First day of the weekend
        start_date: Date,

        /// Last day of the weekend
        end_date: Date,

        /// Events included, in running order
        #[serde(default)]
        included_events: Vec<String>,
    },

    /// Season membership
    SeasonMembership {
        /// Display name
        name: String,

        /// Base price (e.g., "1000 USD")
        base_price: String,

        /// What the ticket includes
        #[serde(default)]
        description: String,

        /// Season covered
        season: String,

        /// Membership tier
        membership_level: String,

        /// Extra benefits
        #[serde(default)]
        perks: Vec<String>,
    },

    /// Group discount over an inline base ticket type
    GroupDiscount {
        /// Display name
        name: String,

        /// Base price (e.g., "0 USD")
        base_price: String,

        /// What the ticket includes
        #[serde(default)]
        description: String,

        /// Minimum qualifying quantity
        group_size: u32,

        /// Discount in percentage points (e.g., "15%" or "15")
        discount: String,

        /// Ticket type the discount applies to
        base: Box<TicketTypeFile>,
    },
}

impl TryFrom<TicketTypeFile> for TicketType {
    type Error = CatalogError;

    fn try_from(file: TicketTypeFile) -> Result<Self, Self::Error> {
        let ticket_type = match file {
            TicketTypeFile::SingleRacePass {
                name,
                base_price,
                description,
                race_day,
                seat_section,
            } => SingleRacePass::new(
                details(name, &base_price, description)?,
                race_day,
                seat_section,
            )
            .into(),
            TicketTypeFile::WeekendPackage {
                name,
                base_price,
                description,
                start_date,
                end_date,
                included_events,
            } => WeekendPackage::new(
                details(name, &base_price, description)?,
                start_date,
                end_date,
                included_events,
            )
            .into(),
            TicketTypeFile::SeasonMembership {
                name,
                base_price,
                description,
                season,
                membership_level,
                perks,
            } => SeasonMembership::new(
                details(name, &base_price, description)?,
                season,
                membership_level,
                perks,
            )
            .into(),
            TicketTypeFile::GroupDiscount {
                name,
                base_price,
                description,
                group_size,
                discount,
                base,
            } => GroupDiscount::new(
                details(name, &base_price, description)?,
                group_size,
                DiscountPercentage::new(parse_percentage_points(&discount)?)
                    .map_err(PricingError::from)?
                    .points(),
                TicketType::try_from(*base)?,
            )?
            .into(),
        };

        Ok(ticket_type)
    }
}

fn details(
    name: String,
    base_price: &str,
    description: String,
) -> Result<TicketTypeDetails, CatalogError> {
    let (minor_units, currency) = parse_price(base_price)?;

    Ok(TicketTypeDetails::new(
        name,
        Money::from_minor(minor_units, currency),
        description,
    )?)
}

/// Parse percentage points, with or without a trailing `%` ("15%" and "15" are both 15%).
///
/// # Errors
///
/// Returns [`CatalogError::InvalidPercentage`] if the number cannot be parsed.
pub fn parse_percentage_points(s: &str) -> Result<Decimal, CatalogError> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPercentage(s.to_string()))
}

/// The ticket types on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ticket_types: FxHashMap<String, TicketType>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard Grand Prix line-up, priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error only if one of the built-in definitions is invalid.
    pub fn grand_prix(currency: &'static Currency) -> Result<Self, CatalogError> {
        let race_pass = SingleRacePass::new(
            TicketTypeDetails::new(
                "Single Race",
                major(120, currency),
                "Access to one race day",
            )?,
            "Friday",
            "Main Grandstand",
        );

        let weekend = WeekendPackage::new(
            TicketTypeDetails::new("Weekend Pass", major(300, currency), "All weekend events")?,
            date(2025, 11, 10),
            date(2025, 11, 12),
            vec!["Practice".into(), "Qualifying".into(), "Race".into()],
        );

        let season = SeasonMembership::new(
            TicketTypeDetails::new("Season Ticket", major(1000, currency), "All-season access")?,
            "2025",
            "Gold",
            vec!["VIP Lounge".into(), "Pit Access".into(), "Free Merch".into()],
        );

        let group_race = SingleRacePass::new(
            TicketTypeDetails::new("Group Race", major(120, currency), "Group race day")?,
            "Friday",
            "South Zone",
        );

        let group = GroupDiscount::new(
            TicketTypeDetails::new("Group Deal", major(0, currency), "Discounted for groups")?,
            5,
            Decimal::from(15),
            group_race.into(),
        )?;

        let mut catalog = Self::new();

        catalog.insert(RACE_PASS, race_pass.into())?;
        catalog.insert(WEEKEND, weekend.into())?;
        catalog.insert(SEASON, season.into())?;
        catalog.insert(GROUP, group.into())?;

        Ok(catalog)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a definition is invalid, or
    /// the ticket types are priced in more than one currency.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;
        let mut catalog = Self::new();

        for (key, definition) in file.ticket_types {
            catalog.insert(key, TicketType::try_from(definition)?)?;
        }

        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading catalog");

        let catalog = Self::from_yaml_str(&fs::read_to_string(path)?)?;

        info!(ticket_types = catalog.len(), "catalog loaded");

        Ok(catalog)
    }

    /// Add or replace a ticket type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if the ticket type is priced in
    /// a different currency from the rest of the catalog.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        ticket_type: TicketType,
    ) -> Result<(), CatalogError> {
        if let Some(existing) = self.currency()
            && existing != ticket_type.currency()
        {
            return Err(CatalogError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                ticket_type.currency().iso_alpha_code.to_string(),
            ));
        }

        self.ticket_types.insert(key.into(), ticket_type);

        Ok(())
    }

    /// Get a ticket type by its key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTicketType`] if the key is not in the catalog.
    pub fn get(&self, key: &str) -> Result<&TicketType, CatalogError> {
        self.ticket_types
            .get(key)
            .ok_or_else(|| CatalogError::UnknownTicketType(key.to_string()))
    }

    /// Change the discount of the group discount stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the percentage is outside
    /// `0..=100`, or the ticket type is not a group discount.
    pub fn set_group_discount(&mut self, key: &str, points: Decimal) -> Result<(), CatalogError> {
        let ticket_type = self
            .ticket_types
            .get_mut(key)
            .ok_or_else(|| CatalogError::UnknownTicketType(key.to_string()))?;

        ticket_type.apply_discount(points)?;

        info!(key, discount = %points, "group discount updated");

        Ok(())
    }

    /// Catalog keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.ticket_types.keys().map(String::as_str).collect();
        keys.sort_unstable();

        keys
    }

    /// Currency of the catalog, if it has any ticket types.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.ticket_types.values().next().map(TicketType::currency)
    }

    /// Number of ticket types.
    pub fn len(&self) -> usize {
        self.ticket_types.len()
    }

    /// Whether the catalog has no ticket types.
    pub fn is_empty(&self) -> bool {
        self.ticket_types.is_empty()
    }
}
