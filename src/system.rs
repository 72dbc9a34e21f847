use thiserror::Error;
use tracing::{info, warn};

use crate::config::CategorySpec;
use crate::fileio::{FileError, FileIO};
use crate::inventory::{CategorySummary, Inventory, InventoryError, Seat};
use crate::transaction::{History, HistoryError, Undone};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Customer name cannot be empty.")]
    EmptyCustomer,
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    File(#[from] FileError),
}

/// A confirmed reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub seat_number: u32,
    pub category: String,
    pub customer: String,
}

/// Inventory plus its undo histories.
///
/// Every mutating call updates the seat, the category counter and the
/// matching history as one step; nothing is half-applied on error.
#[derive(Debug)]
pub struct BookingSystem {
    inventory: Inventory,
    history: History,
}

impl BookingSystem {
    pub fn new(catalog: &[CategorySpec]) -> Self {
        Self {
            inventory: Inventory::new(catalog),
            history: History::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reserve a seat and record it for undo
    pub fn reserve(&mut self, customer: &str, category: &str) -> Result<Booking, SystemError> {
        // an empty holder would be written as an unreserved seat
        if customer.is_empty() {
            return Err(SystemError::EmptyCustomer);
        }
        let key = self.inventory.reserve(customer, category)?;
        self.history.record_reservation(key, customer);

        let seat_number = self.inventory.seat(key).map_or(0, Seat::number);
        info!(seat = seat_number, category, customer, "reserved");
        Ok(Booking {
            seat_number,
            category: category.to_string(),
            customer: customer.to_string(),
        })
    }

    /// Cancel a reservation, returning the holder it had
    pub fn cancel(&mut self, number: u32) -> Result<String, SystemError> {
        let cancellation = self.inventory.cancel(number)?;
        self.history
            .record_cancellation(cancellation.seat, cancellation.holder.clone());
        info!(seat = number, holder = %cancellation.holder, "cancelled");
        Ok(cancellation.holder)
    }

    pub fn undo_last_reservation(&mut self) -> Result<Undone, SystemError> {
        let undone = self.history.undo_last_reservation(&mut self.inventory)?;
        self.check_counters();
        Ok(undone)
    }

    pub fn undo_last_cancellation(&mut self) -> Result<Undone, SystemError> {
        let undone = self.history.undo_last_cancellation(&mut self.inventory)?;
        self.check_counters();
        Ok(undone)
    }

    // Undo does not look at the seat's current state, so replaying it over a
    // conflicting change can leave the cached counters off by one.
    fn check_counters(&self) {
        if !self.inventory.counters_consistent() {
            warn!("cached availability no longer matches the seat scan");
        }
    }

    pub fn lookup(&self, number: u32) -> Result<&Seat, SystemError> {
        Ok(self.inventory.lookup(number)?)
    }

    pub fn list_seats(&self) -> Vec<&Seat> {
        self.inventory.seats().collect()
    }

    pub fn category_summary(&self) -> Vec<CategorySummary> {
        self.inventory.category_summary()
    }

    /// Replace the seat set with `seats` and forget all undo history
    pub fn restore(&mut self, seats: Vec<Seat>) -> usize {
        let count = seats.len();
        self.inventory.replace_seats(seats);
        self.history.clear();
        count
    }

    /// Write the seat file, returning the number of seats written
    pub fn save(&self, file_io: &FileIO) -> Result<usize, SystemError> {
        file_io.write(self.inventory.seats())?;
        info!(path = %file_io.file_name(), seats = self.inventory.seat_count(), "saved");
        Ok(self.inventory.seat_count())
    }

    /// Read the seat file and replace the current state with it
    pub fn load(&mut self, file_io: &FileIO) -> Result<usize, SystemError> {
        let seats = file_io.read()?;
        let count = self.restore(seats);
        info!(path = %file_io.file_name(), seats = count, "loaded");
        Ok(count)
    }
}
