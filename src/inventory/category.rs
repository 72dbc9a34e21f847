use std::fmt;

/// A pricing tier with a cached count of its unreserved seats.
///
/// The count is signed: forced undo replays exactly one step per action and
/// may take it below zero on the way back to the true count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    price: u64,
    available: i64,
}

impl Category {
    pub fn new(name: impl Into<String>, price: u64, capacity: usize) -> Self {
        Self {
            name: name.into(),
            price,
            available: capacity as i64,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    /// Cached available count. Bookkeeping only; displays should scan the seats.
    pub fn available(&self) -> i64 {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: i64) {
        self.available = available;
    }

    pub(crate) fn increment_available(&mut self) {
        self.available += 1;
    }

    pub(crate) fn decrement_available(&mut self) {
        self.available -= 1;
    }
}

/// One row of the category summary, with availability taken from a seat scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub price: u64,
    pub available: usize,
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Category: {}, Price: {}, Available: {}",
            self.name, self.price, self.available
        )
    }
}
