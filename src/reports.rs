//! Sales Reports
//!
//! Per-day tallies of tickets sold, rebuilt from stored orders for every
//! reporting run.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use jiff::civil::Date;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    errors::ErrorKind,
    orders::{Order, OrderError, OrderStatus},
    pricing::Price,
};

/// Errors raised while building or exporting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// An order total could not be computed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Order totals could not be added up.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl ReportError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Io(_) => ErrorKind::Storage,
            ReportError::Order(error) => error.kind(),
            ReportError::Money(_) => ErrorKind::Validation,
        }
    }
}

/// Destination for exported report text.
pub trait ReportSink {
    /// Store `contents` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the contents cannot be stored.
    fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ReportError>;
}

/// Writes reports as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Write reports into `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory reports are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for DirectorySink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ReportError> {
        fs::write(self.dir.join(file_name), contents)?;

        Ok(())
    }
}

/// Tickets sold per day over a reporting period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReport {
    id: String,
    start_date: Date,
    end_date: Date,
    sales_data: BTreeMap<Date, u32>,
}

impl SalesReport {
    /// Create an empty report for `start_date..=end_date`.
    pub fn new(id: impl Into<String>, start_date: Date, end_date: Date) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date,
            sales_data: BTreeMap::new(),
        }
    }

    /// Tally one sale per confirmed order placed within the period.
    pub fn from_orders<'a>(
        id: impl Into<String>,
        start_date: Date,
        end_date: Date,
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Self {
        let mut report = Self::new(id, start_date, end_date);

        for order in orders {
            if report.covers(order) {
                report.record_sale(order.order_date());
            }
        }

        report
    }

    /// Report ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// First day of the period
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Last day of the period
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Tickets sold per day
    pub fn sales_data(&self) -> &BTreeMap<Date, u32> {
        &self.sales_data
    }

    /// Whether `order` is confirmed and was placed within the period.
    pub fn covers(&self, order: &Order) -> bool {
        order.status() == OrderStatus::Confirmed
            && (self.start_date..=self.end_date).contains(&order.order_date())
    }

    /// Count one sale on `date`.
    pub fn record_sale(&mut self, date: Date) {
        let count = self.sales_data.entry(date).or_insert(0);

        *count = count.saturating_add(1);
    }

    /// Count one sale on a `YYYY-MM-DD` date; anything else is logged and ignored.
    pub fn record_sale_str(&mut self, date: &str) {
        match date.parse::<Date>() {
            Ok(date) => self.record_sale(date),
            Err(error) => {
                warn!(report = %self.id, input = date, %error, "ignoring sale with invalid date");
            }
        }
    }

    /// Header line followed by one line per day, oldest first.
    pub fn generate_report(&self) -> String {
        let header = format!(
            "Sales Report: {} from {} to {}",
            self.id, self.start_date, self.end_date
        );

        let lines: Vec<String> = self
            .sales_data
            .iter()
            .map(|(date, count)| format!("{date}: {count} ticket(s) sold"))
            .collect();

        format!("{header}\n{}", lines.join("\n"))
    }

    /// File name the report is exported under.
    pub fn file_name(&self) -> String {
        format!("{}_sales_report.txt", self.id)
    }

    /// Write the generated report to `sink`, returning the file name used.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the sink fails.
    pub fn export_report(&self, sink: &impl ReportSink) -> Result<String, ReportError> {
        let file_name = self.file_name();

        sink.write_report(&file_name, &self.generate_report())?;

        info!(report = %self.id, file = %file_name, "sales report exported");

        Ok(file_name)
    }
}

impl fmt::Display for SalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate_report())
    }
}

/// Order count and revenue for a set of orders.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    orders: usize,
    revenue: Price,
}

impl SalesSummary {
    /// Sum up `orders`.
    ///
    /// # Errors
    ///
    /// Returns an error if an order total cannot be computed or added.
    pub fn from_orders<'a>(
        currency: &'static Currency,
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Result<Self, ReportError> {
        let mut count = 0;
        let mut revenue = Money::from_minor(0, currency);

        for order in orders {
            count += 1;
            revenue = revenue.add(order.total()?)?;
        }

        Ok(Self {
            orders: count,
            revenue,
        })
    }

    /// Number of orders
    pub fn orders(&self) -> usize {
        self.orders
    }

    /// Sum of order totals
    pub fn revenue(&self) -> Price {
        self.revenue
    }
}

impl fmt::Display for SalesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total orders: {}\nTotal Sales: {}", self.orders, self.revenue)
    }
}
