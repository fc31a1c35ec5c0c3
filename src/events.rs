//! Events
//!
//! Seat inventory for race events. Seats are fungible counts bounded by the
//! venue capacity; the registry serializes every seat movement per event.

use std::{collections::BTreeMap, sync::Arc};

use jiff::civil::Date;
use parking_lot::{Mutex, MutexGuard, RwLock};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{errors::ErrorKind, uuids::TypedUuid};

/// Event ID
pub type EventId = TypedUuid<Event>;

/// Errors raised by seat bookkeeping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// More seats requested than remain.
    #[error("not enough seats available: requested {requested}, available {available}")]
    InsufficientSeats {
        /// Seats requested
        requested: u32,

        /// Seats remaining
        available: u32,
    },

    /// Restocking would push available seats past capacity.
    #[error("exceeds maximum capacity: {available} available + {requested} > {capacity}")]
    ExceedsCapacity {
        /// Seats returned
        requested: u32,

        /// Seats remaining before the return
        available: u32,

        /// Venue capacity
        capacity: u32,
    },

    /// Available seats set outside `0..=capacity`.
    #[error("available seats must be between 0 and {capacity}, got {seats}")]
    SeatsOutOfRange {
        /// Requested seat count
        seats: u32,

        /// Venue capacity
        capacity: u32,
    },

    /// The event is not in the registry.
    #[error("event not found: {0}")]
    UnknownEvent(EventId),
}

impl EventError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::InsufficientSeats { .. } | EventError::ExceedsCapacity { .. } => {
                ErrorKind::Capacity
            }
            EventError::SeatsOutOfRange { .. } => ErrorKind::Validation,
            EventError::UnknownEvent(_) => ErrorKind::State,
        }
    }
}

/// A race event held at a venue with a fixed number of seats.
///
/// `available_seats` never exceeds `capacity`; every mutator either keeps
/// that true or fails without changing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    name: String,
    date: Date,
    venue: String,
    capacity: u32,
    available_seats: u32,
}

impl Event {
    /// Create a new event with every seat available.
    pub fn new(
        name: impl Into<String>,
        date: Date,
        venue: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            date,
            venue: venue.into(),
            capacity,
            available_seats: capacity,
        }
    }

    /// Event ID
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Event name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Day the event is held
    pub fn date(&self) -> Date {
        self.date
    }

    /// Venue
    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Maximum number of seats
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Seats still on sale
    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Number of seats still on sale.
    pub fn check_availability(&self) -> u32 {
        self.available_seats
    }

    /// Rename the event
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Move the event to another day
    pub fn set_date(&mut self, date: Date) {
        self.date = date;
    }

    /// Move the event to another venue
    pub fn set_venue(&mut self, venue: impl Into<String>) {
        self.venue = venue.into();
    }

    /// Change the capacity, clamping available seats down if they no longer fit.
    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;

        if self.available_seats > capacity {
            debug!(event = %self.id, capacity, "clamping available seats to new capacity");

            self.available_seats = capacity;
        }
    }

    /// Set the available seats directly.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::SeatsOutOfRange`] if `seats` exceeds the capacity.
    pub fn set_available_seats(&mut self, seats: u32) -> Result<(), EventError> {
        if seats > self.capacity {
            return Err(EventError::SeatsOutOfRange {
                seats,
                capacity: self.capacity,
            });
        }

        self.available_seats = seats;

        Ok(())
    }

    /// Take `quantity` seats off sale.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InsufficientSeats`] if fewer than `quantity` seats remain.
    /// Nothing is reduced in that case.
    pub fn reduce_seats(&mut self, quantity: u32) -> Result<(), EventError> {
        let remaining =
            self.available_seats
                .checked_sub(quantity)
                .ok_or(EventError::InsufficientSeats {
                    requested: quantity,
                    available: self.available_seats,
                })?;

        debug!(event = %self.id, quantity, remaining, "reduced seats");

        self.available_seats = remaining;

        Ok(())
    }

    /// Put `quantity` seats back on sale.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::ExceedsCapacity`] if the seats would not fit in the venue.
    pub fn increase_seats(&mut self, quantity: u32) -> Result<(), EventError> {
        let available = self
            .available_seats
            .checked_add(quantity)
            .filter(|seats| *seats <= self.capacity)
            .ok_or(EventError::ExceedsCapacity {
                requested: quantity,
                available: self.available_seats,
                capacity: self.capacity,
            })?;

        debug!(event = %self.id, quantity, available, "increased seats");

        self.available_seats = available;

        Ok(())
    }
}

/// Seats each event must give up, keyed (and therefore ordered) by event id.
pub type SeatDemand = BTreeMap<EventId, u32>;

/// Where confirmed orders take their seats from.
pub trait SeatInventory {
    /// Take seats off sale for every event in `demand`, or for none of them.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if an event is not known, and
    /// [`EventError::InsufficientSeats`] if any event cannot cover its demand.
    fn consume_seats(&self, demand: &SeatDemand) -> Result<(), EventError>;
}

/// The events on sale, each behind its own lock.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: RwLock<FxHashMap<EventId, Arc<Mutex<Event>>>>,
}

impl EventRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event, returning its id.
    pub fn register(&self, event: Event) -> EventId {
        let id = event.id();

        self.events.write().insert(id, Arc::new(Mutex::new(event)));

        id
    }

    /// Snapshot of an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if the event is not registered.
    pub fn get(&self, id: EventId) -> Result<Event, EventError> {
        Ok(self.handle(id)?.lock().clone())
    }

    /// Run `f` against an event while holding its lock.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if the event is not registered, or
    /// whatever `f` returns.
    pub fn with_event<R>(
        &self,
        id: EventId,
        f: impl FnOnce(&mut Event) -> Result<R, EventError>,
    ) -> Result<R, EventError> {
        let handle = self.handle(id)?;
        let mut event = handle.lock();

        f(&mut event)
    }

    /// Seats still on sale for an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if the event is not registered.
    pub fn available_seats(&self, id: EventId) -> Result<u32, EventError> {
        Ok(self.handle(id)?.lock().check_availability())
    }

    /// Snapshots of every event, ordered by date then name.
    pub fn events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .values()
            .map(|event| event.lock().clone())
            .collect();

        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

        events
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether no events are registered.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Put seats taken by `demand` back on sale, for every event or for none.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if an event is not registered, and
    /// [`EventError::ExceedsCapacity`] if any event would go over capacity.
    pub fn release_seats(&self, demand: &SeatDemand) -> Result<(), EventError> {
        let handles = self.handles(demand)?;

        let mut guards: SmallVec<[(MutexGuard<'_, Event>, u32); 2]> = handles
            .iter()
            .map(|(handle, seats)| (handle.lock(), *seats))
            .collect();

        for (event, seats) in &guards {
            if event.available_seats().saturating_add(*seats) > event.capacity() {
                return Err(EventError::ExceedsCapacity {
                    requested: *seats,
                    available: event.available_seats(),
                    capacity: event.capacity(),
                });
            }
        }

        for (event, seats) in &mut guards {
            event.increase_seats(*seats)?;
        }

        Ok(())
    }

    // Locks are always taken in ascending event id order.
    fn handles(
        &self,
        demand: &SeatDemand,
    ) -> Result<SmallVec<[(Arc<Mutex<Event>>, u32); 2]>, EventError> {
        demand
            .iter()
            .map(|(id, seats)| self.handle(*id).map(|handle| (handle, *seats)))
            .collect()
    }

    fn handle(&self, id: EventId) -> Result<Arc<Mutex<Event>>, EventError> {
        self.events
            .read()
            .get(&id)
            .cloned()
            .ok_or(EventError::UnknownEvent(id))
    }
}

impl SeatInventory for EventRegistry {
    fn consume_seats(&self, demand: &SeatDemand) -> Result<(), EventError> {
        let handles = self.handles(demand)?;

        let mut guards: SmallVec<[(MutexGuard<'_, Event>, u32); 2]> = handles
            .iter()
            .map(|(handle, seats)| (handle.lock(), *seats))
            .collect();

        for (event, seats) in &guards {
            if event.available_seats() < *seats {
                return Err(EventError::InsufficientSeats {
                    requested: *seats,
                    available: event.available_seats(),
                });
            }
        }

        for (event, seats) in &mut guards {
            for _ in 0..*seats {
                event.reduce_seats(1)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn race(capacity: u32) -> Event {
        Event::new("Main Race", date(2025, 11, 12), "Main Grandstand", capacity)
    }

    #[test]
    fn new_event_is_fully_available() {
        let event = race(100);

        assert_eq!(event.available_seats(), 100);
        assert_eq!(event.check_availability(), 100);
    }

    #[test]
    fn reducing_every_seat_empties_the_event() -> TestResult {
        let mut event = race(100);

        event.reduce_seats(100)?;

        assert_eq!(event.available_seats(), 0);

        Ok(())
    }

    #[test]
    fn reducing_past_availability_fails_without_change() {
        let mut event = race(100);

        let result = event.reduce_seats(101);

        assert_eq!(
            result,
            Err(EventError::InsufficientSeats {
                requested: 101,
                available: 100
            })
        );
        assert_eq!(result.map_err(|error| error.kind()), Err(ErrorKind::Capacity));
        assert_eq!(event.available_seats(), 100);
    }

    #[test]
    fn increasing_past_capacity_fails() -> TestResult {
        let mut event = race(100);
        event.reduce_seats(10)?;

        assert!(matches!(
            event.increase_seats(11),
            Err(EventError::ExceedsCapacity { .. })
        ));

        event.increase_seats(10)?;

        assert_eq!(event.available_seats(), 100);

        Ok(())
    }

    #[test]
    fn increase_does_not_overflow() {
        let mut event = race(u32::MAX);

        assert!(event.increase_seats(1).is_err());
    }

    #[test]
    fn shrinking_capacity_clamps_available_seats() -> TestResult {
        let mut event = race(100);
        event.reduce_seats(20)?;

        event.set_capacity(50);

        assert_eq!(event.capacity(), 50);
        assert_eq!(event.available_seats(), 50);

        event.set_capacity(200);

        assert_eq!(event.available_seats(), 50);

        Ok(())
    }

    #[test]
    fn set_available_seats_is_bounded_by_capacity() -> TestResult {
        let mut event = race(100);

        event.set_available_seats(0)?;
        event.set_available_seats(100)?;

        let result = event.set_available_seats(101);

        assert_eq!(
            result,
            Err(EventError::SeatsOutOfRange {
                seats: 101,
                capacity: 100
            })
        );
        assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ErrorKind::Validation)
        );

        Ok(())
    }

    #[test]
    fn registry_consumes_all_or_nothing() -> TestResult {
        let registry = EventRegistry::new();
        let plenty = registry.register(race(10));
        let scarce = registry.register(race(1));

        let demand = SeatDemand::from([(plenty, 3), (scarce, 2)]);

        assert!(registry.consume_seats(&demand).is_err());
        assert_eq!(registry.available_seats(plenty)?, 10);
        assert_eq!(registry.available_seats(scarce)?, 1);

        let demand = SeatDemand::from([(plenty, 3), (scarce, 1)]);
        registry.consume_seats(&demand)?;

        assert_eq!(registry.available_seats(plenty)?, 7);
        assert_eq!(registry.available_seats(scarce)?, 0);

        Ok(())
    }

    #[test]
    fn unknown_event_is_a_state_error() {
        let registry = EventRegistry::new();
        let missing = EventId::new();

        let result = registry.consume_seats(&SeatDemand::from([(missing, 1)]));

        assert_eq!(result, Err(EventError::UnknownEvent(missing)));
        assert_eq!(result.map_err(|error| error.kind()), Err(ErrorKind::State));
    }

    #[test]
    fn with_event_mutates_in_place() -> TestResult {
        let registry = EventRegistry::new();
        let id = registry.register(race(10));

        registry.with_event(id, |event| {
            event.set_venue("Pit Straight");
            event.reduce_seats(4)
        })?;

        let event = registry.get(id)?;

        assert_eq!(event.venue(), "Pit Straight");
        assert_eq!(event.available_seats(), 6);

        Ok(())
    }

    #[test]
    fn released_seats_go_back_on_sale() -> TestResult {
        let registry = EventRegistry::new();
        let first = registry.register(race(10));
        let second = registry.register(race(4));
        let demand = SeatDemand::from([(first, 3), (second, 4)]);

        registry.consume_seats(&demand)?;
        registry.release_seats(&demand)?;

        assert_eq!(registry.available_seats(first)?, 10);
        assert_eq!(registry.available_seats(second)?, 4);

        Ok(())
    }

    #[test]
    fn releasing_past_capacity_changes_nothing() -> TestResult {
        let registry = EventRegistry::new();
        let sold = registry.register(race(10));
        let unsold = registry.register(race(5));

        registry.consume_seats(&SeatDemand::from([(sold, 2)]))?;

        let result = registry.release_seats(&SeatDemand::from([(sold, 2), (unsold, 1)]));

        assert!(matches!(result, Err(EventError::ExceedsCapacity { .. })));
        assert_eq!(registry.available_seats(sold)?, 8);
        assert_eq!(registry.available_seats(unsold)?, 5);

        Ok(())
    }
}
