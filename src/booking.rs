//! Booking Desk
//!
//! Ties the catalog, seat inventory and storage together: a booking quotes
//! a ticket type, issues the tickets, confirms the order against the events,
//! takes the payment and stores the result.

use jiff::civil::Date;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    catalog::{Catalog, CatalogError},
    errors::ErrorKind,
    events::{EventError, EventId, EventRegistry},
    orders::{Order, OrderError, OrderId},
    payments::{Payment, PaymentError, PaymentMethod},
    pricing::Price,
    reports::{ReportError, SalesReport, SalesSummary},
    repository::{Repository, RepositoryError},
    ticket_types::{CalculatePrice, PricingError, TicketType},
    tickets::Ticket,
    users::{User, UserId},
};

/// Errors raised while booking or managing bookings.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Catalog lookup or update failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The ticket type could not be priced
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The event could not supply seats
    #[error(transparent)]
    Event(#[from] EventError),

    /// The order could not be built or confirmed
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The payment could not be taken
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Storage failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Report building failed
    #[error(transparent)]
    Report(#[from] ReportError),

    /// No user with this id
    #[error("user not found: {0}")]
    UnknownUser(UserId),
}

impl BookingError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Catalog(error) => error.kind(),
            BookingError::Pricing(error) => error.kind(),
            BookingError::Event(error) => error.kind(),
            BookingError::Order(error) => error.kind(),
            BookingError::Payment(error) => error.kind(),
            BookingError::Repository(error) => error.kind(),
            BookingError::Report(error) => error.kind(),
            BookingError::UnknownUser(_) => ErrorKind::Validation,
        }
    }
}

/// A purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Purchaser
    pub user: UserId,

    /// Catalog key of the ticket type
    pub ticket_type: String,

    /// Number of tickets
    pub quantity: u32,

    /// Event the tickets admit to
    pub event: EventId,

    /// How the purchaser pays
    pub method: PaymentMethod,

    /// Day the order is placed
    pub order_date: Date,
}

/// A completed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    order: Order,
    payment: Payment,
}

impl Booking {
    /// The confirmed order
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The payment taken for it
    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    /// Total charged, as quoted by the ticket type.
    pub fn total(&self) -> Price {
        self.payment.amount()
    }
}

/// Sells tickets from a catalog against a set of events.
#[derive(Debug)]
pub struct BookingDesk<R> {
    catalog: RwLock<Catalog>,
    events: EventRegistry,
    repository: R,
    records: Mutex<()>,
}

impl<R> BookingDesk<R>
where
    R: Repository<Order> + Repository<User>,
{
    /// Create a desk selling from `catalog`.
    pub fn new(catalog: Catalog, events: EventRegistry, repository: R) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            events,
            repository,
            records: Mutex::new(()),
        }
    }

    /// Events on sale
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Underlying storage
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// A copy of the ticket type stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTicketType`] if the key is not in the catalog.
    pub fn ticket_type(&self, key: &str) -> Result<TicketType, BookingError> {
        Ok(self.catalog.read().get(key)?.clone())
    }

    /// Catalog keys, sorted.
    pub fn ticket_type_keys(&self) -> Vec<String> {
        self.catalog
            .read()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Price of `quantity` tickets of the type stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the price cannot be calculated.
    pub fn quote(&self, key: &str, quantity: u32) -> Result<Price, BookingError> {
        Ok(self.catalog.read().get(key)?.calculate_price(quantity)?)
    }

    /// Store a new or changed user.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Repository`] if the user cannot be stored.
    pub fn register_user(&self, user: User) -> Result<UserId, BookingError> {
        let id = user.id();

        Repository::<User>::put(&self.repository, user)?;

        Ok(id)
    }

    /// Look up a user.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownUser`] if there is no such user.
    pub fn user(&self, id: UserId) -> Result<User, BookingError> {
        Repository::<User>::get(&self.repository, id)?.ok_or(BookingError::UnknownUser(id))
    }

    /// Book tickets.
    ///
    /// The tickets' prices add up to the quoted total. Seats are taken for
    /// every ticket or none; card and online payments are processed straight
    /// away while cash is left pending until delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the user or ticket type is unknown, the quantity
    /// cannot be priced, the event cannot supply the seats, or storage fails.
    /// A rejected booking stores nothing and takes no seats.
    pub fn book(&self, request: &BookingRequest) -> Result<Booking, BookingError> {
        let user = self.user(request.user)?;
        let ticket_type = self.ticket_type(&request.ticket_type)?;
        let quoted = ticket_type.calculate_price(request.quantity)?;
        let event = self.events.get(request.event)?;

        if event.available_seats() < request.quantity {
            return Err(EventError::InsufficientSeats {
                requested: request.quantity,
                available: event.available_seats(),
            }
            .into());
        }

        let mut payment = Payment::new(quoted, request.method)?;

        let validity = validity_period(&ticket_type, event.date());
        let mut order = Order::new(request.order_date, quoted.currency()).with_user(user.id());

        for price in split_total(&quoted, request.quantity) {
            order.add_ticket(
                Ticket::new(price, validity.0, validity.1)
                    .with_type_name(ticket_type.type_name())
                    .with_event(event.id()),
            )?;
        }

        let demand = order.seat_demand()?;

        order.confirm(&self.events)?;

        if let Err(error) = self.settle(&order, &mut payment, request.method) {
            if let Err(release) = self.events.release_seats(&demand) {
                warn!(order = %order.id(), %release, "failed to return seats");
            }

            warn!(order = %order.id(), %error, "booking rolled back");

            return Err(error);
        }

        info!(
            order = %order.id(),
            ticket_type = ticket_type.type_name(),
            quantity = request.quantity,
            total = %quoted,
            "booking confirmed"
        );

        Ok(Booking { order, payment })
    }

    /// Take the payment and store a confirmed order, storing nothing on failure.
    fn settle(
        &self,
        order: &Order,
        payment: &mut Payment,
        method: PaymentMethod,
    ) -> Result<(), BookingError> {
        if method.settles_immediately() {
            payment.process_payment()?;
        }

        let _records = self.records.lock();

        Repository::<Order>::put(&self.repository, order.clone())?;

        let purchase: Result<(), BookingError> = order.user().map_or(Ok(()), |user_id| {
            let mut user = self.user(user_id)?;
            user.add_purchase(order.id());

            Ok(Repository::<User>::put(&self.repository, user)?)
        });

        if purchase.is_err()
            && let Err(cleanup) = Repository::<Order>::delete(&self.repository, order.id())
        {
            warn!(order = %order.id(), %cleanup, "failed to remove stored order");
        }

        purchase
    }

    /// Orders placed by `user`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Repository`] if orders cannot be loaded.
    pub fn orders_for_user(&self, user: UserId) -> Result<Vec<Order>, BookingError> {
        let orders = Repository::<Order>::list(&self.repository)?;

        Ok(orders
            .into_iter()
            .filter(|order| order.user() == Some(user))
            .collect())
    }

    /// Delete an order and drop it from its purchaser's history.
    ///
    /// Seats taken by the order are not returned.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Repository`] if storage fails.
    pub fn delete_order(&self, id: OrderId) -> Result<bool, BookingError> {
        let _records = self.records.lock();

        let Some(order) = Repository::<Order>::get(&self.repository, id)? else {
            return Ok(false);
        };

        if let Some(user_id) = order.user()
            && let Some(mut user) = Repository::<User>::get(&self.repository, user_id)?
        {
            user.remove_purchase(id);
            Repository::<User>::put(&self.repository, user)?;
        }

        Ok(Repository::<Order>::delete(&self.repository, id)?)
    }

    /// Delete a user together with every order they placed.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Repository`] if storage fails.
    pub fn delete_user(&self, id: UserId) -> Result<bool, BookingError> {
        let orders = self.orders_for_user(id)?;
        let _records = self.records.lock();

        for order in &orders {
            Repository::<Order>::delete(&self.repository, order.id())?;
        }

        let deleted = Repository::<User>::delete(&self.repository, id)?;

        if deleted {
            info!(user = %id, orders = orders.len(), "user deleted");
        }

        Ok(deleted)
    }

    /// Change the discount of the group ticket type stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the percentage is outside
    /// `0..=100`, or the ticket type is not a group discount.
    pub fn update_group_discount(&self, key: &str, points: Decimal) -> Result<(), BookingError> {
        self.catalog.write().set_group_discount(key, points)?;

        Ok(())
    }

    /// Tickets sold per day and totals for confirmed orders placed within `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if orders cannot be loaded or totalled.
    pub fn sales_report(
        &self,
        id: impl Into<String>,
        start: Date,
        end: Date,
    ) -> Result<(SalesReport, SalesSummary), BookingError> {
        let orders = Repository::<Order>::list(&self.repository)?;
        let report = SalesReport::from_orders(id, start, end, &orders);

        let currency = self
            .catalog
            .read()
            .currency()
            .or_else(|| orders.first().map(Order::currency))
            .unwrap_or(USD);

        let summary = SalesSummary::from_orders(
            currency,
            orders.iter().filter(|order| report.covers(order)),
        )?;

        Ok((report, summary))
    }
}

/// Days a ticket of `ticket_type` for an event held on `event_date` is valid.
fn validity_period(ticket_type: &TicketType, event_date: Date) -> (Date, Date) {
    match ticket_type {
        TicketType::WeekendPackage(package) => (package.start_date(), package.end_date()),
        TicketType::GroupDiscount(group) => validity_period(group.base_ticket_type(), event_date),
        TicketType::SingleRacePass(_) | TicketType::SeasonMembership(_) => {
            (event_date, event_date)
        }
    }
}

/// Split `total` into `quantity` ticket prices that add back up to `total`.
///
/// Minor units that do not divide evenly go on the first ticket.
fn split_total(total: &Price, quantity: u32) -> Vec<Price> {
    let currency = total.currency();
    let minor = total.to_minor_units();
    let count = i64::from(quantity.max(1));

    let unit = minor / count;
    let remainder = minor % count;

    (0..count)
        .map(|index| {
            let extra = if index == 0 { remainder } else { 0 };

            Money::from_minor(unit + extra, currency)
        })
        .collect()
}

/// Render orders as a table: id, date, status, ticket type, quantity and total.
///
/// # Errors
///
/// Returns [`BookingError::Order`] if an order total cannot be computed.
pub fn render_orders(orders: &[Order]) -> Result<String, BookingError> {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Status", "Ticket Type", "Qty", "Total"]);

    for order in orders {
        builder.push_record([
            order.id().to_string(),
            order.order_date().to_string(),
            order.status().to_string(),
            order.ticket_type().to_string(),
            order.len().to_string(),
            order.total()?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(4..6), Alignment::right());

    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        catalog::{GROUP, RACE_PASS, SEASON, WEEKEND},
        events::Event,
        orders::OrderStatus,
        payments::PaymentStatus,
        pricing::{Priced, major, total_price},
        repository::InMemoryRepository,
        ticket_types::{GroupDiscount, SingleRacePass, TicketTypeDetails},
    };

    use super::*;

    #[derive(Debug, Default)]
    struct Memory {
        orders: InMemoryRepository<Order>,
        users: InMemoryRepository<User>,
    }

    impl Repository<Order> for Memory {
        fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
            self.orders.get(id)
        }

        fn put(&self, entity: Order) -> Result<(), RepositoryError> {
            self.orders.put(entity)
        }

        fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
            self.orders.delete(id)
        }

        fn list(&self) -> Result<Vec<Order>, RepositoryError> {
            self.orders.list()
        }
    }

    impl Repository<User> for Memory {
        fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
            self.users.get(id)
        }

        fn put(&self, entity: User) -> Result<(), RepositoryError> {
            self.users.put(entity)
        }

        fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
            self.users.delete(id)
        }

        fn list(&self) -> Result<Vec<User>, RepositoryError> {
            self.users.list()
        }
    }

    /// Keeps users but fails to store any order.
    #[derive(Debug, Default)]
    struct FullDisk {
        users: InMemoryRepository<User>,
    }

    impl Repository<Order> for FullDisk {
        fn get(&self, _id: OrderId) -> Result<Option<Order>, RepositoryError> {
            Ok(None)
        }

        fn put(&self, _entity: Order) -> Result<(), RepositoryError> {
            Err(std::io::Error::other("no space left on device").into())
        }

        fn delete(&self, _id: OrderId) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        fn list(&self) -> Result<Vec<Order>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    impl Repository<User> for FullDisk {
        fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
            self.users.get(id)
        }

        fn put(&self, entity: User) -> Result<(), RepositoryError> {
            self.users.put(entity)
        }

        fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
            self.users.delete(id)
        }

        fn list(&self) -> Result<Vec<User>, RepositoryError> {
            self.users.list()
        }
    }

    struct Fixture {
        desk: BookingDesk<Memory>,
        user: UserId,
        race: EventId,
    }

    fn fixture(capacity: u32) -> Result<Fixture, BookingError> {
        let events = EventRegistry::new();
        let race = events.register(Event::new(
            "Grand Prix",
            date(2025, 11, 12),
            "Main Grandstand",
            capacity,
        ));

        let desk = BookingDesk::new(Catalog::grand_prix(USD)?, events, Memory::default());
        let user = desk.register_user(User::new(
            "kimi",
            "Kimi Raikkonen",
            "kimi@example.com",
            "",
            "",
        ))?;

        Ok(Fixture { desk, user, race })
    }

    fn request(
        fixture: &Fixture,
        key: &str,
        quantity: u32,
        method: PaymentMethod,
    ) -> BookingRequest {
        BookingRequest {
            user: fixture.user,
            ticket_type: key.to_string(),
            quantity,
            event: fixture.race,
            method,
            order_date: date(2025, 5, 1),
        }
    }

    #[test]
    fn booking_confirms_order_and_takes_seats() -> TestResult {
        let fixture = fixture(100)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 2, PaymentMethod::CreditCard))?;

        assert_eq!(booking.order().status(), OrderStatus::Confirmed);
        assert_eq!(booking.order().len(), 2);
        assert_eq!(booking.total(), major(260, USD));
        assert_eq!(booking.order().total()?, booking.total());
        assert!(booking.payment().verify_payment());
        assert_eq!(fixture.desk.events().available_seats(fixture.race)?, 98);

        let user = fixture.desk.user(fixture.user)?;

        assert_eq!(user.purchase_history(), &[booking.order().id()]);

        Ok(())
    }

    #[test]
    fn group_tickets_add_up_to_the_discounted_quote() -> TestResult {
        let fixture = fixture(100)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, GROUP, 6, PaymentMethod::PayPal))?;

        // 6 * 130 less 15%
        let expected = Money::from_minor(66_300, USD);

        assert_eq!(booking.total(), expected);
        assert_eq!(total_price(USD, booking.order().tickets())?, expected);
        assert_eq!(booking.order().ticket_type(), "Group Deal");

        Ok(())
    }

    #[test]
    fn uneven_totals_put_the_remainder_on_the_first_ticket() {
        let prices = split_total(&Money::from_minor(1_000, USD), 3);

        assert_eq!(
            prices,
            vec![
                Money::from_minor(334, USD),
                Money::from_minor(333, USD),
                Money::from_minor(333, USD)
            ]
        );
    }

    #[test]
    fn weekend_tickets_are_valid_for_the_whole_weekend() -> TestResult {
        let fixture = fixture(100)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, WEEKEND, 1, PaymentMethod::DebitCard))?;

        let ticket = booking.order().tickets().first();

        assert_eq!(
            ticket.map(Ticket::validity_period),
            Some((date(2025, 11, 10), date(2025, 11, 12)))
        );
        assert_eq!(ticket.map(Priced::price), Some(major(360, USD)));

        Ok(())
    }

    #[test]
    fn cash_payments_stay_pending() -> TestResult {
        let fixture = fixture(100)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, SEASON, 1, PaymentMethod::Cash))?;

        assert_eq!(booking.payment().status(), PaymentStatus::Pending);
        assert!(!booking.payment().verify_payment());

        Ok(())
    }

    #[test]
    fn sold_out_bookings_store_nothing() -> TestResult {
        let fixture = fixture(3)?;

        let result = fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 4, PaymentMethod::CreditCard));

        assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ErrorKind::Capacity)
        );
        assert_eq!(fixture.desk.events().available_seats(fixture.race)?, 3);
        assert!(fixture.desk.orders_for_user(fixture.user)?.is_empty());

        Ok(())
    }

    #[test]
    fn oversized_requests_fail_before_issuing_tickets() -> TestResult {
        let fixture = fixture(10)?;

        let result = fixture.desk.book(&request(
            &fixture,
            RACE_PASS,
            1_000_000_000,
            PaymentMethod::CreditCard,
        ));

        assert!(matches!(
            result,
            Err(BookingError::Event(EventError::InsufficientSeats {
                requested: 1_000_000_000,
                available: 10,
            }))
        ));
        assert_eq!(fixture.desk.events().available_seats(fixture.race)?, 10);

        Ok(())
    }

    #[test]
    fn negative_quotes_are_rejected_without_taking_seats() -> TestResult {
        let fixture = fixture(10)?;

        let group = GroupDiscount::new(
            TicketTypeDetails::new("Group Deal", major(0, USD), "Discounted for groups")?,
            5,
            Decimal::from(150),
            SingleRacePass::new(
                TicketTypeDetails::new("Group Race", major(120, USD), "Group race day")?,
                "Friday",
                "South Zone",
            )
            .into(),
        )?;

        fixture.desk.catalog.write().insert(GROUP, group.into())?;

        let result = fixture
            .desk
            .book(&request(&fixture, GROUP, 5, PaymentMethod::CreditCard));

        assert!(matches!(
            result,
            Err(BookingError::Payment(PaymentError::NegativeAmount(_)))
        ));
        assert_eq!(fixture.desk.events().available_seats(fixture.race)?, 10);
        assert!(fixture.desk.orders_for_user(fixture.user)?.is_empty());

        Ok(())
    }

    #[test]
    fn storage_failures_return_the_seats() -> TestResult {
        let events = EventRegistry::new();
        let race = events.register(Event::new(
            "Grand Prix",
            date(2025, 11, 12),
            "Main Grandstand",
            10,
        ));

        let desk = BookingDesk::new(Catalog::grand_prix(USD)?, events, FullDisk::default());
        let user = desk.register_user(User::new(
            "mika",
            "Mika Hakkinen",
            "mika@example.com",
            "",
            "",
        ))?;

        let result = desk.book(&BookingRequest {
            user,
            ticket_type: RACE_PASS.to_string(),
            quantity: 4,
            event: race,
            method: PaymentMethod::CreditCard,
            order_date: date(2025, 5, 1),
        });

        assert_eq!(result.map_err(|error| error.kind()), Err(ErrorKind::Storage));
        assert_eq!(desk.events().available_seats(race)?, 10);
        assert!(desk.user(user)?.purchase_history().is_empty());

        Ok(())
    }

    #[test]
    fn unknown_users_cannot_book() -> TestResult {
        let fixture = fixture(10)?;
        let mut request = request(&fixture, RACE_PASS, 1, PaymentMethod::Cash);
        request.user = UserId::new();

        assert!(matches!(
            fixture.desk.book(&request),
            Err(BookingError::UnknownUser(_))
        ));

        Ok(())
    }

    #[test]
    fn deleting_a_user_deletes_their_orders() -> TestResult {
        let fixture = fixture(10)?;

        fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 1, PaymentMethod::Cash))?;
        fixture
            .desk
            .book(&request(&fixture, SEASON, 1, PaymentMethod::Cash))?;

        assert_eq!(fixture.desk.orders_for_user(fixture.user)?.len(), 2);
        assert!(fixture.desk.delete_user(fixture.user)?);
        assert!(fixture.desk.orders_for_user(fixture.user)?.is_empty());
        assert!(matches!(
            fixture.desk.user(fixture.user),
            Err(BookingError::UnknownUser(_))
        ));

        Ok(())
    }

    #[test]
    fn deleting_an_order_updates_purchase_history() -> TestResult {
        let fixture = fixture(10)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 1, PaymentMethod::Cash))?;

        assert!(fixture.desk.delete_order(booking.order().id())?);
        assert!(!fixture.desk.delete_order(booking.order().id())?);
        assert!(fixture.desk.user(fixture.user)?.purchase_history().is_empty());

        Ok(())
    }

    #[test]
    fn group_discount_updates_future_quotes() -> TestResult {
        let fixture = fixture(10)?;

        fixture.desk.update_group_discount(GROUP, Decimal::from(50))?;

        assert_eq!(fixture.desk.quote(GROUP, 5)?, major(325, USD));

        Ok(())
    }

    #[test]
    fn sales_report_covers_confirmed_orders() -> TestResult {
        let fixture = fixture(10)?;

        fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 2, PaymentMethod::CreditCard))?;

        let (report, summary) =
            fixture
                .desk
                .sales_report("R1", date(2025, 5, 1), date(2025, 5, 31))?;

        assert_eq!(report.sales_data().get(&date(2025, 5, 1)), Some(&1));
        assert_eq!(summary.orders(), 1);
        assert_eq!(summary.revenue(), major(260, USD));

        Ok(())
    }

    #[test]
    fn render_orders_lists_each_order() -> TestResult {
        let fixture = fixture(10)?;

        let booking = fixture
            .desk
            .book(&request(&fixture, RACE_PASS, 2, PaymentMethod::CreditCard))?;

        let table = render_orders(&fixture.desk.orders_for_user(fixture.user)?)?;

        assert!(table.contains(&booking.order().id().to_string()));
        assert!(table.contains("Single Race"));
        assert!(table.contains("confirmed"));

        Ok(())
    }
}
