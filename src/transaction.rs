pub mod action;
pub mod history;

pub use history::{History, HistoryError, Undone};
