use std::fmt;

/// Stable handle to a seat record inside an [`Inventory`](super::Inventory).
///
/// Keys stay valid until the seat set is replaced by a load, at which point
/// the undo history that could still refer to them is cleared as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatKey(pub(crate) usize);

/// A single reservable seat.
///
/// The reservation flag is derived from the holder, so a seat is reserved
/// exactly when it has a holder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    number: u32,
    category: String,
    reserved_by: Option<String>,
}

impl Seat {
    pub fn new(number: u32, category: impl Into<String>) -> Self {
        Self {
            number,
            category: category.into(),
            reserved_by: None,
        }
    }

    /// Build a seat that is already held by `holder`
    pub fn reserved(number: u32, category: impl Into<String>, holder: impl Into<String>) -> Self {
        Self {
            number,
            category: category.into(),
            reserved_by: Some(holder.into()),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn reserved_by(&self) -> Option<&str> {
        self.reserved_by.as_deref()
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved_by.is_some()
    }

    /// Put the seat on hold for `holder`, returning the previous holder if any
    pub(crate) fn hold(&mut self, holder: String) -> Option<String> {
        self.reserved_by.replace(holder)
    }

    /// Clear the holder, returning it
    pub(crate) fn release(&mut self) -> Option<String> {
        self.reserved_by.take()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seat Number: {}", self.number)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "ReservedBy: {}", self.reserved_by().unwrap_or("null"))?;
        write!(f, "Reservation Status: {}", self.is_reserved())
    }
}
