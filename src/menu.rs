#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Reserve,
    Cancel,
    UndoBooking,
    UndoCancellation,
    Lookup,
    ListSeats,
    CategorySummary,
    Save,
    Load,
    Exit,
}

pub const MENU: &str = "\
 ===== Ticket Reservation Menu =====
1. Reserve Seat
2. Cancel Seat
3. Undo Booking
4. Undo Cancellation
5. Lookup Seat
6. View All Seats
7. View Category Summary
8. Save Data
9. Load Data
0. Exit";

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Reserve),
            "2" => Some(MenuChoice::Cancel),
            "3" => Some(MenuChoice::UndoBooking),
            "4" => Some(MenuChoice::UndoCancellation),
            "5" => Some(MenuChoice::Lookup),
            "6" => Some(MenuChoice::ListSeats),
            "7" => Some(MenuChoice::CategorySummary),
            "8" => Some(MenuChoice::Save),
            "9" => Some(MenuChoice::Load),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Parse a seat number typed at a prompt
pub fn parse_seat_number(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Reserve));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::UndoCancellation));
        assert_eq!(MenuChoice::parse("9"), Some(MenuChoice::Load));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(MenuChoice::parse("  2  "), Some(MenuChoice::Cancel));
        assert_eq!(MenuChoice::parse("\t7\n"), Some(MenuChoice::CategorySummary));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::parse("reserve"), None);
    }

    #[test]
    fn test_parse_seat_number() {
        assert_eq!(parse_seat_number(" 42 "), Some(42));
        assert_eq!(parse_seat_number("0"), None);
        assert_eq!(parse_seat_number("-3"), None);
        assert_eq!(parse_seat_number("seven"), None);
    }
}
