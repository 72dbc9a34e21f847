pub mod category;
pub mod inventory;
pub mod seat;

pub use category::CategorySummary;
pub use inventory::{Inventory, InventoryError};
pub use seat::{Seat, SeatKey};

#[cfg(test)]
mod test;
