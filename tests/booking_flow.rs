//! Integration test for a full booking run against a YAML data file.
//!
//! Books a race pass (card), a weekend package (PayPal) and a group deal
//! (cash) for one purchaser, then checks:
//!
//! - Seats: 2 + 1 + 6 tickets leave 91 of 100 seats.
//! - Totals: 2 x 130 = 260, 1 x 360 = 360, 6 x 130 less 15% = 663.
//! - Persistence: a desk reopened on the same file sees the same orders.
//! - Reporting: three orders on one day, and the exported report file reads
//!   back as the generated text.

use std::fs;

use jiff::civil::date;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use grandstand::{
    booking::{BookingDesk, BookingRequest},
    catalog::{Catalog, GROUP, RACE_PASS, WEEKEND},
    events::{Event, EventId, EventRegistry},
    orders::{Order, OrderStatus},
    payments::{PaymentMethod, PaymentStatus},
    pricing::major,
    reports::DirectorySink,
    repository::{Repository, StoredRepository, YamlFileStore},
    users::{User, UserId},
};

fn request(
    user: UserId,
    event: EventId,
    key: &str,
    quantity: u32,
    method: PaymentMethod,
) -> BookingRequest {
    BookingRequest {
        user,
        ticket_type: key.to_string(),
        quantity,
        event,
        method,
        order_date: date(2025, 5, 1),
    }
}

#[test]
fn test_booking_run_is_stored_and_reported() -> TestResult {
    let dir = tempfile::tempdir()?;
    let data_file = dir.path().join("grandstand.yml");

    let events = EventRegistry::new();
    let race = events.register(Event::new(
        "Grand Prix",
        date(2025, 11, 12),
        "Main Grandstand",
        100,
    ));

    let desk = BookingDesk::new(
        Catalog::grand_prix(USD)?,
        events,
        StoredRepository::new(YamlFileStore::new(&data_file)),
    );

    let user = desk.register_user(User::new(
        "graham",
        "Graham Hill",
        "graham@example.com",
        "",
        "",
    ))?;

    let race_pass = desk.book(&request(user, race, RACE_PASS, 2, PaymentMethod::CreditCard))?;
    let weekend = desk.book(&request(user, race, WEEKEND, 1, PaymentMethod::PayPal))?;
    let group = desk.book(&request(user, race, GROUP, 6, PaymentMethod::Cash))?;

    assert_eq!(race_pass.total(), major(260, USD));
    assert_eq!(weekend.total(), major(360, USD));
    assert_eq!(group.total(), Money::from_minor(66_300, USD));
    assert_eq!(group.payment().status(), PaymentStatus::Pending);
    assert_eq!(desk.events().available_seats(race)?, 91);

    // A second desk over the same file sees everything the first one stored.
    let reopened = StoredRepository::new(YamlFileStore::new(&data_file));
    let stored: Vec<Order> = Repository::<Order>::list(&reopened)?;

    assert_eq!(stored.len(), 3);
    assert!(
        stored
            .iter()
            .all(|order| order.status() == OrderStatus::Confirmed)
    );
    assert_eq!(
        Repository::<User>::get(&reopened, user)?.map(|u| u.purchase_history().len()),
        Some(3)
    );

    let (report, summary) =
        desk.sales_report("R2025", date(2025, 5, 1), date(2025, 5, 31))?;

    assert_eq!(
        report.generate_report(),
        "Sales Report: R2025 from 2025-05-01 to 2025-05-31\n2025-05-01: 3 ticket(s) sold"
    );
    assert_eq!(summary.orders(), 3);
    assert_eq!(summary.revenue(), Money::from_minor(128_300, USD));

    let file_name = report.export_report(&DirectorySink::new(dir.path()))?;

    assert_eq!(file_name, "R2025_sales_report.txt");
    assert_eq!(
        fs::read_to_string(dir.path().join(file_name))?,
        report.generate_report()
    );

    Ok(())
}

#[test]
fn test_deleting_a_user_removes_their_stored_orders() -> TestResult {
    let dir = tempfile::tempdir()?;
    let events = EventRegistry::new();
    let race = events.register(Event::new(
        "Grand Prix",
        date(2025, 11, 12),
        "Main Grandstand",
        10,
    ));

    let desk = BookingDesk::new(
        Catalog::grand_prix(USD)?,
        events,
        StoredRepository::new(YamlFileStore::new(dir.path().join("data.yml"))),
    );

    let leaving = desk.register_user(User::new(
        "james",
        "James Hunt",
        "james@example.com",
        "",
        "",
    ))?;
    let staying = desk.register_user(User::new(
        "niki",
        "Niki Lauda",
        "niki@example.com",
        "",
        "",
    ))?;

    desk.book(&request(leaving, race, RACE_PASS, 1, PaymentMethod::Cash))?;
    desk.book(&request(staying, race, RACE_PASS, 1, PaymentMethod::Cash))?;

    assert!(desk.delete_user(leaving)?);

    let remaining: Vec<Order> = Repository::<Order>::list(desk.repository())?;

    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.first().and_then(Order::user), Some(staying));

    Ok(())
}
