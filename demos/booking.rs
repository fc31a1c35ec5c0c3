//! Booking Example
//!
//! Books a few Grand Prix tickets, stores them in a YAML data file and exports
//! a sales report.
//!
//! Use `--catalog` to load ticket types from a YAML file
//! Use `--data-file` to choose where orders and users are stored
//! Use `--report-dir` to choose where the sales report is written

use anyhow::Result;
use clap::Parser;
use grandstand::{
    booking::{BookingDesk, BookingRequest, render_orders},
    catalog::{GROUP, RACE_PASS, WEEKEND},
    config::BookingConfig,
    events::{Event, EventRegistry},
    observability::init_logging,
    payments::PaymentMethod,
    reports::DirectorySink,
    repository::{StoredRepository, YamlFileStore},
    users::User,
};
use jiff::{Zoned, civil::date};

/// Booking Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let config = BookingConfig::parse();

    init_logging(&config.log_level)?;

    let catalog = config.catalog()?;

    for key in catalog.keys() {
        println!("{key}: {}\n", catalog.get(key)?.summary()?);
    }

    let events = EventRegistry::new();
    let race = events.register(Event::new(
        "Grand Prix",
        date(2025, 11, 12),
        "Main Grandstand",
        200,
    ));

    let repository = StoredRepository::new(YamlFileStore::new(&config.data_file));
    let desk = BookingDesk::new(catalog, events, repository);

    let user = desk.register_user(User::new(
        "fangio",
        "Juan Manuel Fangio",
        "fangio@example.com",
        "",
        "Balcarce",
    ))?;

    let today = Zoned::now().date();

    for (key, quantity, method) in [
        (RACE_PASS, 2, PaymentMethod::CreditCard),
        (WEEKEND, 1, PaymentMethod::PayPal),
        (GROUP, 6, PaymentMethod::Cash),
    ] {
        let booking = desk.book(&BookingRequest {
            user,
            ticket_type: key.to_string(),
            quantity,
            event: race,
            method,
            order_date: today,
        })?;

        println!(
            "Booked {quantity} x {key}: {} (payment {})",
            booking.total(),
            booking.payment().status()
        );
    }

    println!("\n{}", render_orders(&desk.orders_for_user(user)?)?);
    println!("Seats left: {}\n", desk.events().available_seats(race)?);

    let report_id = format!("R{}", today.strftime("%Y%m%d"));
    let (report, summary) = desk.sales_report(report_id, today, today)?;

    println!("{summary}\n\n{report}\n");

    let file_name = report.export_report(&DirectorySink::new(&config.report_dir))?;

    println!("Report written to {}", config.report_dir.join(file_name).display());

    Ok(())
}
