use calendar_core::{
    build_month_grid, DayCell, Event, EventInput, EventStore, GridError, InMemoryKeyValueStore,
    MonthRef,
};
use chrono::{Datelike, NaiveDate};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn today_count(cells: &[DayCell]) -> usize {
    cells.iter().filter(|cell| cell.is_today).count()
}

#[test]
fn every_month_fills_whole_weeks_with_all_days_in_month() {
    let empty: Vec<Event> = Vec::new();
    for year in [1999, 2000, 2023, 2024, 2100] {
        for month in 1..=12 {
            let month_ref = MonthRef::new(year, month).unwrap();
            let cells = build_month_grid(month_ref, ymd(1970, 1, 1), &empty);

            assert_eq!(cells.len() % 7, 0, "{month_ref}");
            assert!(cells.len() <= 42, "{month_ref}");
            let in_month = cells
                .iter()
                .filter(|cell| !cell.is_other_month)
                .map(|cell| cell.day_number)
                .collect::<Vec<_>>();
            let expected = (1..=month_ref.days_in_month()).collect::<Vec<_>>();
            assert_eq!(in_month, expected, "{month_ref}");

            let first = NaiveDate::parse_from_str(&cells[0].date, "%Y-%m-%d").unwrap();
            assert_eq!(first.weekday().num_days_from_sunday(), 0, "{month_ref}");
            assert!(cells[6].date.as_str() < cells[7].date.as_str());
        }
    }
}

#[test]
fn leap_february_has_29_in_month_days() {
    let empty: Vec<Event> = Vec::new();
    let cells = build_month_grid(MonthRef::new(2024, 2).unwrap(), ymd(2024, 2, 29), &empty);

    let last_in_month = cells.iter().rev().find(|cell| !cell.is_other_month).unwrap();
    assert_eq!(last_in_month.date, "2024-02-29");
    assert!(last_in_month.is_today);
    // 2024-02-01 is a Thursday: Jan 28..31 lead, Mar 1..2 trail.
    assert_eq!(cells.first().unwrap().date, "2024-01-28");
    assert_eq!(cells.last().unwrap().date, "2024-03-02");
}

#[test]
fn today_is_marked_only_inside_displayed_month() {
    let empty: Vec<Event> = Vec::new();
    let march = MonthRef::new(2024, 3).unwrap();

    assert_eq!(today_count(&build_month_grid(march, ymd(2024, 3, 10), &empty)), 1);
    // 2024-02-29 and 2024-04-01 are both visible as padding in the March grid.
    assert_eq!(today_count(&build_month_grid(march, ymd(2024, 2, 29), &empty)), 0);
    assert_eq!(today_count(&build_month_grid(march, ymd(2024, 4, 1), &empty)), 0);
    assert_eq!(today_count(&build_month_grid(march, ymd(2023, 3, 10), &empty)), 0);
}

#[test]
fn building_twice_yields_identical_cells() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = EventStore::open(&storage);
    store.create(&EventInput::new("A", "2024-03-10")).unwrap();
    let march = MonthRef::new(2024, 3).unwrap();

    let first = build_month_grid(march, ymd(2024, 3, 5), &store);
    let second = build_month_grid(march, ymd(2024, 3, 5), &store);

    assert_eq!(first, second);
}

#[test]
fn same_day_events_land_in_cell_in_creation_order() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = EventStore::open(&storage);
    let a = store.create(&EventInput::new("A", "2024-03-10")).unwrap();
    let b = store.create(&EventInput::new("B", "2024-03-10")).unwrap();

    assert_eq!(store.query("2024-03-10"), vec![a.clone(), b.clone()]);

    let cells = build_month_grid(MonthRef::new(2024, 3).unwrap(), ymd(2024, 3, 1), &store);
    let cell = cells
        .iter()
        .find(|cell| cell.date == "2024-03-10")
        .unwrap();
    assert!(!cell.is_other_month);
    assert_eq!(cell.day_number, 10);
    assert_eq!(cell.events, vec![a, b]);
    assert_eq!(
        cells.iter().map(|cell| cell.events.len()).sum::<usize>(),
        2
    );
}

#[test]
fn padding_cells_carry_their_own_events() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = EventStore::open(&storage);
    let spill = store.create(&EventInput::new("NYE", "2023-12-31")).unwrap();

    // 2024-01-01 is a Monday, so Dec 31 is the single leading cell.
    let cells = build_month_grid(MonthRef::new(2024, 1).unwrap(), ymd(2024, 1, 1), &store);

    assert_eq!(cells[0].date, "2023-12-31");
    assert!(cells[0].is_other_month);
    assert_eq!(cells[0].events, vec![spill]);
}

#[test]
fn grid_accepts_plain_event_slices() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = EventStore::open(&storage);
    store.create(&EventInput::new("A", "2024-03-10")).unwrap();
    let snapshot = store.events().to_vec();

    let from_store = build_month_grid(MonthRef::new(2024, 3).unwrap(), ymd(2024, 3, 1), &store);
    let from_slice =
        build_month_grid(MonthRef::new(2024, 3).unwrap(), ymd(2024, 3, 1), snapshot.as_slice());

    assert_eq!(from_store, from_slice);
}

#[test]
fn last_displayable_month_keeps_four_digit_dates() {
    let empty: Vec<Event> = Vec::new();
    let november = MonthRef::new(9999, 11).unwrap();

    let cells = build_month_grid(november, ymd(2024, 1, 1), &empty);

    let malformed = cells
        .iter()
        .filter(|cell| cell.date.len() != 10)
        .map(|cell| cell.date.as_str())
        .collect::<Vec<_>>();
    assert!(malformed.is_empty(), "{malformed:?}");
    assert_eq!(cells.last().unwrap().date, "9999-12-04");
}

#[test]
fn month_padding_into_year_10000_is_rejected() {
    assert_eq!(
        MonthRef::new(9999, 12),
        Err(GridError::BeyondLastMonth {
            year: 9999,
            month: 12
        })
    );
    assert!(MonthRef::new(9999, 11).unwrap().next().is_none());
}

#[test]
fn first_displayable_month_keeps_four_digit_dates() {
    let empty: Vec<Event> = Vec::new();
    // 0001-01-01 is a Monday, so one padding day from year 0 leads the grid.
    let cells = build_month_grid(MonthRef::new(1, 1).unwrap(), ymd(2024, 1, 1), &empty);

    assert_eq!(cells[0].date, "0000-12-31");
    assert!(cells.iter().all(|cell| cell.date.len() == 10));
}
