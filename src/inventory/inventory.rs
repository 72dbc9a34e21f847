use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CategorySpec;

use super::category::{Category, CategorySummary};
use super::seat::{Seat, SeatKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("No available seats in category: {0}")]
    NoAvailableSeats(String),
    #[error("Seat {0} not found.")]
    SeatNotFound(u32),
    #[error("Seat {0} is not reserved.")]
    NotReserved(u32),
}

/// Result of a successful cancellation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub seat: SeatKey,
    /// Holder at the moment of cancellation, kept for undo
    pub holder: String,
}

/// Owns every seat and category record.
///
/// Seats live in a single arena addressed by [`SeatKey`]. Two derived views sit
/// on top of it: `ordered`, the keys sorted by (category name, seat number),
/// and `by_number`, a point index. Neither view copies a seat.
#[derive(Debug, Clone)]
pub struct Inventory {
    categories: Vec<Category>,
    seats: Vec<Seat>,
    ordered: Vec<SeatKey>,
    by_number: HashMap<u32, SeatKey>,
}

impl Inventory {
    /// Build the initial inventory from a catalog. Seats are numbered from 1
    /// upwards across categories in catalog order.
    pub fn new(catalog: &[CategorySpec]) -> Self {
        let mut inventory = Self {
            categories: catalog
                .iter()
                .map(|spec| Category::new(spec.name.clone(), spec.price, spec.capacity))
                .collect(),
            seats: Vec::new(),
            ordered: Vec::new(),
            by_number: HashMap::new(),
        };

        let mut number = 1;
        for spec in catalog {
            for _ in 0..spec.capacity {
                inventory.insert_seat(Seat::new(number, spec.name.clone()));
                number += 1;
            }
        }
        inventory
    }

    /// Add a seat to the arena and both views
    fn insert_seat(&mut self, seat: Seat) -> SeatKey {
        let key = SeatKey(self.seats.len());
        let pos = self
            .ordered
            .binary_search_by(|k| {
                let other = &self.seats[k.0];
                (other.category(), other.number()).cmp(&(seat.category(), seat.number()))
            })
            .unwrap_or_else(|p| p);
        self.ordered.insert(pos, key);
        self.by_number.insert(seat.number(), key);
        self.seats.push(seat);
        key
    }

    /// Replace the whole seat set, rebuilding both views and every cached
    /// counter from the new seats. Catalog categories absent from `seats`
    /// end up with zero availability; prices are untouched.
    pub fn replace_seats(&mut self, seats: Vec<Seat>) {
        self.ordered.clear();
        self.by_number.clear();
        self.seats = Vec::with_capacity(seats.len());

        for seat in seats {
            self.insert_seat(seat);
        }

        self.recount();
    }

    /// Recompute each category's cached counter from the seats
    pub fn recount(&mut self) {
        let counts: Vec<i64> = self
            .categories
            .iter()
            .map(|c| self.scan_available(c.name()) as i64)
            .collect();
        for (category, count) in self.categories.iter_mut().zip(counts) {
            category.set_available(count);
        }
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name() == name)
    }

    /// Reserve the lowest-numbered free seat of `category` for `customer`
    pub fn reserve(&mut self, customer: &str, category: &str) -> Result<SeatKey, InventoryError> {
        let key = self
            .ordered
            .iter()
            .copied()
            .find(|k| {
                let seat = &self.seats[k.0];
                seat.category() == category && !seat.is_reserved()
            })
            .ok_or_else(|| InventoryError::NoAvailableSeats(category.to_string()))?;

        self.force_hold(key, customer.to_string());
        debug!(seat = self.seats[key.0].number(), category, customer, "seat reserved");
        Ok(key)
    }

    /// Cancel the reservation on seat `number`
    pub fn cancel(&mut self, number: u32) -> Result<Cancellation, InventoryError> {
        let key = self.key_of(number).ok_or(InventoryError::SeatNotFound(number))?;
        if !self.seats[key.0].is_reserved() {
            return Err(InventoryError::NotReserved(number));
        }

        let holder = self.force_release(key).unwrap_or_default();
        debug!(seat = number, holder = %holder, "reservation cancelled");
        Ok(Cancellation { seat: key, holder })
    }

    /// Mark the seat as held by `holder` and take one from its category's
    /// counter, whatever state the seat was in. Returns `false` for a stale key.
    pub(crate) fn force_hold(&mut self, key: SeatKey, holder: String) -> bool {
        let Some(seat) = self.seats.get_mut(key.0) else {
            return false;
        };
        seat.hold(holder);
        let category = seat.category().to_string();
        match self.category_mut(&category) {
            Some(c) => c.decrement_available(),
            None => warn!(category = %category, "seat category is not in the catalog"),
        }
        true
    }

    /// Clear the seat's holder and give one back to its category's counter,
    /// whatever state the seat was in. Returns the previous holder.
    pub(crate) fn force_release(&mut self, key: SeatKey) -> Option<String> {
        let seat = self.seats.get_mut(key.0)?;
        let previous = seat.release();
        let category = seat.category().to_string();
        match self.category_mut(&category) {
            Some(c) => c.increment_available(),
            None => warn!(category = %category, "seat category is not in the catalog"),
        }
        previous
    }

    pub fn key_of(&self, number: u32) -> Option<SeatKey> {
        self.by_number.get(&number).copied()
    }

    pub fn seat(&self, key: SeatKey) -> Option<&Seat> {
        self.seats.get(key.0)
    }

    pub fn lookup(&self, number: u32) -> Result<&Seat, InventoryError> {
        self.key_of(number)
            .and_then(|key| self.seat(key))
            .ok_or(InventoryError::SeatNotFound(number))
    }

    /// All seats ordered by (category name, seat number)
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.ordered.iter().map(|k| &self.seats[k.0])
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Cached counter for a catalog category
    #[cfg(test)]
    pub fn cached_available(&self, category: &str) -> Option<i64> {
        self.categories
            .iter()
            .find(|c| c.name() == category)
            .map(|c| c.available())
    }

    /// Count the unreserved seats of `category` by walking the seat set
    pub fn scan_available(&self, category: &str) -> usize {
        self.seats
            .iter()
            .filter(|s| s.category() == category && !s.is_reserved())
            .count()
    }

    /// Catalog categories in catalog order, availability from a fresh scan
    pub fn category_summary(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                name: c.name().to_string(),
                price: c.price(),
                available: self.scan_available(c.name()),
            })
            .collect()
    }

    /// True when every cached counter agrees with a scan of the seats
    pub fn counters_consistent(&self) -> bool {
        self.categories
            .iter()
            .all(|c| c.available() == self.scan_available(c.name()) as i64)
    }
}
