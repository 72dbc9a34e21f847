use thiserror::Error;
use tracing::info;

use crate::inventory::{Inventory, SeatKey};

use super::action::{Action, ActionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("No {0} to undo.")]
    NothingToUndo(ActionKind),
    #[error("Recorded seat {0:?} no longer exists.")]
    SeatMissing(SeatKey),
}

/// What an undo changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undone {
    pub seat_number: u32,
    pub customer: String,
}

/// Two independent LIFO histories: bookings and cancellations.
///
/// Undo never records a counter-action, so an undone step is gone for good.
#[derive(Debug, Default)]
pub struct History {
    booking_stack: Vec<Action>,
    cancellation_stack: Vec<Action>,
}

impl History {
    pub fn new() -> Self {
        Self {
            booking_stack: Vec::new(),
            cancellation_stack: Vec::new(),
        }
    }

    pub fn record_reservation(&mut self, seat: SeatKey, customer: impl Into<String>) {
        self.booking_stack.push(Action::reserve(seat, customer));
    }

    /// `customer` must be the holder from before the cancellation
    pub fn record_cancellation(&mut self, seat: SeatKey, customer: impl Into<String>) {
        self.cancellation_stack.push(Action::cancel(seat, customer));
    }

    /// Pop the newest booking and release its seat
    pub fn undo_last_reservation(&mut self, inventory: &mut Inventory) -> Result<Undone, HistoryError> {
        let action = self
            .booking_stack
            .pop()
            .ok_or(HistoryError::NothingToUndo(ActionKind::Reserve))?;
        Self::revert(action, inventory)
    }

    /// Pop the newest cancellation and give the seat back to its old holder
    pub fn undo_last_cancellation(&mut self, inventory: &mut Inventory) -> Result<Undone, HistoryError> {
        let action = self
            .cancellation_stack
            .pop()
            .ok_or(HistoryError::NothingToUndo(ActionKind::Cancel))?;
        Self::revert(action, inventory)
    }

    fn revert(action: Action, inventory: &mut Inventory) -> Result<Undone, HistoryError> {
        let seat_number = action.revert(inventory)?;
        info!(kind = %action.kind, seat = seat_number, customer = %action.customer, "undo applied");
        Ok(Undone { seat_number, customer: action.customer })
    }

    #[cfg(test)]
    /// Peek at the next booking to undo without removing it
    pub fn peek_booking(&self) -> Option<&Action> {
        self.booking_stack.last()
    }

    #[cfg(test)]
    /// Peek at the next cancellation to undo without removing it
    pub fn peek_cancellation(&self) -> Option<&Action> {
        self.cancellation_stack.last()
    }

    pub fn booking_len(&self) -> usize {
        self.booking_stack.len()
    }

    pub fn cancellation_len(&self) -> usize {
        self.cancellation_stack.len()
    }

    pub fn clear(&mut self) {
        self.booking_stack.clear();
        self.cancellation_stack.clear();
    }
}
