use super::inventory::*;
use super::seat::*;

use crate::config::CategorySpec;

fn default_catalog() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("VIP", 1000, 100),
        CategorySpec::new("Economy", 500, 400),
    ]
}

fn small_catalog() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("VIP", 1000, 2),
        CategorySpec::new("Economy", 500, 3),
    ]
}

/// Helper: every cached counter matches the scan and every flag matches its holder
fn assert_consistent(inv: &Inventory) {
    assert!(inv.counters_consistent(), "cached counters drifted from seat scan");
    for seat in inv.seats() {
        assert_eq!(seat.is_reserved(), seat.reserved_by().is_some());
    }
}

fn number(inv: &Inventory, key: SeatKey) -> u32 {
    inv.seat(key).unwrap().number()
}

// === Construction ===

#[test]
fn test_seats_numbered_in_catalog_order() {
    let inv = Inventory::new(&default_catalog());

    assert_eq!(inv.seat_count(), 500);
    assert_eq!(inv.lookup(1).unwrap().category(), "VIP");
    assert_eq!(inv.lookup(100).unwrap().category(), "VIP");
    assert_eq!(inv.lookup(101).unwrap().category(), "Economy");
    assert_eq!(inv.lookup(500).unwrap().category(), "Economy");
    assert_eq!(inv.lookup(501), Err(InventoryError::SeatNotFound(501)));

    assert_eq!(inv.cached_available("VIP"), Some(100));
    assert_eq!(inv.cached_available("Economy"), Some(400));
    assert_consistent(&inv);
}

#[test]
fn test_ordered_view_sorts_by_category_then_number() {
    let inv = Inventory::new(&small_catalog());
    let order: Vec<(String, u32)> = inv
        .seats()
        .map(|s| (s.category().to_string(), s.number()))
        .collect();

    assert_eq!(
        order,
        vec![
            ("Economy".to_string(), 3),
            ("Economy".to_string(), 4),
            ("Economy".to_string(), 5),
            ("VIP".to_string(), 1),
            ("VIP".to_string(), 2),
        ]
    );
}

#[test]
fn test_zero_capacity_category() {
    let inv = Inventory::new(&[CategorySpec::new("Box", 5000, 0), CategorySpec::new("Floor", 50, 1)]);
    assert_eq!(inv.seat_count(), 1);
    assert_eq!(inv.lookup(1).unwrap().category(), "Floor");
    assert_eq!(inv.cached_available("Box"), Some(0));
}

// === Reserve ===

#[test]
fn test_reserve_takes_lowest_free_number() {
    let mut inv = Inventory::new(&default_catalog());

    let alice = inv.reserve("Alice", "VIP").unwrap();
    assert_eq!(number(&inv, alice), 1);
    assert_consistent(&inv);

    let bob = inv.reserve("Bob", "VIP").unwrap();
    assert_eq!(number(&inv, bob), 2);
    assert_eq!(inv.lookup(2).unwrap().reserved_by(), Some("Bob"));
    assert_eq!(inv.cached_available("VIP"), Some(98));
    assert_consistent(&inv);

    let carol = inv.reserve("Carol", "Economy").unwrap();
    assert_eq!(number(&inv, carol), 101);
    assert_eq!(inv.cached_available("Economy"), Some(399));
    assert_consistent(&inv);
}

#[test]
fn test_reserve_reuses_freed_seat() {
    let mut inv = Inventory::new(&default_catalog());
    inv.reserve("Alice", "VIP").unwrap();
    inv.reserve("Bob", "VIP").unwrap();
    inv.cancel(1).unwrap();

    let key = inv.reserve("Carol", "VIP").unwrap();
    assert_eq!(number(&inv, key), 1);
    assert_eq!(inv.lookup(1).unwrap().reserved_by(), Some("Carol"));
    assert_consistent(&inv);
}

#[test]
fn test_reserve_sold_out_category_changes_nothing() {
    let mut inv = Inventory::new(&small_catalog());
    inv.reserve("Alice", "VIP").unwrap();
    inv.reserve("Bob", "VIP").unwrap();
    let before: Vec<Seat> = inv.seats().cloned().collect();

    assert_eq!(
        inv.reserve("Carol", "VIP"),
        Err(InventoryError::NoAvailableSeats("VIP".to_string()))
    );

    let after: Vec<Seat> = inv.seats().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(inv.cached_available("VIP"), Some(0));
    assert_eq!(inv.cached_available("Economy"), Some(3));
    assert_consistent(&inv);
}

#[test]
fn test_reserve_unknown_category() {
    let mut inv = Inventory::new(&small_catalog());
    assert_eq!(
        inv.reserve("Alice", "Balcony"),
        Err(InventoryError::NoAvailableSeats("Balcony".to_string()))
    );
    // names are matched exactly
    assert!(inv.reserve("Alice", "vip").is_err());
    assert_consistent(&inv);
}

// === Cancel ===

#[test]
fn test_cancel_returns_previous_holder() {
    let mut inv = Inventory::new(&small_catalog());
    let key = inv.reserve("Alice", "VIP").unwrap();

    let cancellation = inv.cancel(1).unwrap();
    assert_eq!(cancellation.seat, key);
    assert_eq!(cancellation.holder, "Alice");

    let seat = inv.lookup(1).unwrap();
    assert!(!seat.is_reserved());
    assert_eq!(seat.reserved_by(), None);
    assert_eq!(inv.cached_available("VIP"), Some(2));
    assert_consistent(&inv);
}

#[test]
fn test_cancel_errors_leave_state_alone() {
    let mut inv = Inventory::new(&small_catalog());
    inv.reserve("Alice", "VIP").unwrap();

    assert_eq!(inv.cancel(42), Err(InventoryError::SeatNotFound(42)));
    assert_eq!(inv.cancel(2), Err(InventoryError::NotReserved(2)));

    assert_eq!(inv.lookup(1).unwrap().reserved_by(), Some("Alice"));
    assert_eq!(inv.cached_available("VIP"), Some(1));
    assert_consistent(&inv);
}

// === Summary ===

#[test]
fn test_category_summary_follows_catalog_order() {
    let mut inv = Inventory::new(&small_catalog());
    inv.reserve("Alice", "Economy").unwrap();

    let summary = inv.category_summary();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].name, "VIP");
    assert_eq!(summary[0].price, 1000);
    assert_eq!(summary[0].available, 2);
    assert_eq!(summary[1].name, "Economy");
    assert_eq!(summary[1].price, 500);
    assert_eq!(summary[1].available, 2);
}

// === Replace (load) ===

#[test]
fn test_replace_seats_rebuilds_views_and_counters() {
    let mut inv = Inventory::new(&small_catalog());
    inv.reserve("Alice", "VIP").unwrap();

    inv.replace_seats(vec![
        Seat::new(20, "VIP"),
        Seat::reserved(10, "VIP", "Dana"),
        Seat::new(30, "Mezzanine"),
    ]);

    assert_eq!(inv.seat_count(), 3);
    assert!(inv.lookup(1).is_err());
    assert_eq!(inv.lookup(10).unwrap().reserved_by(), Some("Dana"));

    let order: Vec<u32> = inv.seats().map(|s| s.number()).collect();
    assert_eq!(order, vec![30, 10, 20]);

    // categories missing from the new seats drop to zero, prices stay
    assert_eq!(inv.cached_available("VIP"), Some(1));
    assert_eq!(inv.cached_available("Economy"), Some(0));
    assert_eq!(inv.cached_available("Mezzanine"), None);
    assert_eq!(inv.category_summary()[1].price, 500);
    assert_consistent(&inv);
}

#[test]
fn test_seats_outside_catalog_can_be_booked() {
    let mut inv = Inventory::new(&small_catalog());
    inv.replace_seats(vec![Seat::new(1, "Mezzanine"), Seat::new(2, "VIP")]);

    let key = inv.reserve("Eve", "Mezzanine").unwrap();
    assert_eq!(number(&inv, key), 1);
    assert_eq!(inv.cancel(1).unwrap().holder, "Eve");

    assert_eq!(inv.cached_available("VIP"), Some(1));
    assert_consistent(&inv);
}

#[test]
fn test_both_views_see_the_same_record() {
    let mut inv = Inventory::new(&small_catalog());
    let key = inv.reserve("Alice", "VIP").unwrap();

    let via_index = inv.lookup(1).unwrap();
    let via_order = inv.seats().find(|s| s.number() == 1).unwrap();
    assert!(std::ptr::eq(via_index, via_order));
    assert!(std::ptr::eq(via_index, inv.seat(key).unwrap()));
}
