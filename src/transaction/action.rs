use std::fmt;

use crate::inventory::{Inventory, SeatKey};

use super::history::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Reserve,
    Cancel,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Reserve => write!(f, "booking"),
            ActionKind::Cancel => write!(f, "cancellation"),
        }
    }
}

/// A reversible event on one seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub seat: SeatKey,
    /// Customer name as it was when the event happened
    pub customer: String,
}

impl Action {
    pub fn reserve(seat: SeatKey, customer: impl Into<String>) -> Self {
        Self { kind: ActionKind::Reserve, seat, customer: customer.into() }
    }

    pub fn cancel(seat: SeatKey, customer: impl Into<String>) -> Self {
        Self { kind: ActionKind::Cancel, seat, customer: customer.into() }
    }

    /// Undo this action against the inventory and return the seat number.
    ///
    /// The seat is forced into the pre-action state without checking what
    /// happened to it since: a reservation is released, a cancellation is
    /// restored to the recorded customer.
    pub fn revert(&self, inventory: &mut Inventory) -> Result<u32, HistoryError> {
        let number = inventory
            .seat(self.seat)
            .map(|s| s.number())
            .ok_or(HistoryError::SeatMissing(self.seat))?;

        match self.kind {
            ActionKind::Reserve => {
                inventory.force_release(self.seat);
            }
            ActionKind::Cancel => {
                inventory.force_hold(self.seat, self.customer.clone());
            }
        }
        Ok(number)
    }
}
