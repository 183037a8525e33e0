use super::month::MonthRef;
use crate::model::event::Event;
use crate::repo::kv_store::KeyValueStore;
use crate::service::event_store::EventStore;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: usize = 7;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of events for a given `YYYY-MM-DD` date, in insertion order.
pub trait EventLookup {
    fn events_on(&self, date: &str) -> Vec<Event>;
}

impl EventLookup for [Event] {
    fn events_on(&self, date: &str) -> Vec<Event> {
        self.iter()
            .filter(|event| event.date == date)
            .cloned()
            .collect()
    }
}

impl EventLookup for Vec<Event> {
    fn events_on(&self, date: &str) -> Vec<Event> {
        self.as_slice().events_on(date)
    }
}

impl<S: KeyValueStore> EventLookup for EventStore<S> {
    fn events_on(&self, date: &str) -> Vec<Event> {
        self.query(date)
    }
}

/// One rendered day of the month grid. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    /// Day of month, `1..=31`.
    pub day_number: u32,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Padding day from the previous or next month.
    pub is_other_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

/// Expands `month` into whole Sunday-first weeks.
///
/// Leading cells are the trailing days of the previous month, trailing
/// cells the leading days of the next one; the cell count is the smallest
/// multiple of 7 that fits the month. Every cell, padding included, carries
/// the events `lookup` reports for its date. At most one in-month cell is
/// marked `is_today`.
pub fn build_month_grid<L: EventLookup + ?Sized>(
    month: MonthRef,
    today: NaiveDate,
    lookup: &L,
) -> Vec<DayCell> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as usize;
    let cell_count = (leading + month.days_in_month() as usize).div_ceil(DAYS_PER_WEEK)
        * DAYS_PER_WEEK;
    let grid_start = first - Days::new(leading as u64);

    grid_start
        .iter_days()
        .take(cell_count)
        .map(|day| {
            let is_other_month = !month.contains(day);
            let date = day.format(DATE_FORMAT).to_string();
            DayCell {
                day_number: day.day(),
                is_other_month,
                is_today: !is_other_month && day == today,
                events: lookup.events_on(&date),
                date,
            }
        })
        .collect()
}

/// Date pre-filled when adding an event while viewing `month`.
///
/// Today when `month` is the current month, otherwise the 1st.
pub fn default_event_date(month: MonthRef, today: NaiveDate) -> NaiveDate {
    if month.contains(today) {
        today
    } else {
        month.first_day()
    }
}

#[cfg(test)]
mod tests {
    use super::{build_month_grid, default_event_date, DayCell};
    use crate::grid::MonthRef;
    use crate::model::event::Event;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn in_month_days(cells: &[DayCell]) -> Vec<u32> {
        cells
            .iter()
            .filter(|cell| !cell.is_other_month)
            .map(|cell| cell.day_number)
            .collect()
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        // 2024-09-01 is a Sunday.
        let empty: Vec<Event> = Vec::new();
        let cells = build_month_grid(MonthRef::new(2024, 9).unwrap(), ymd(2000, 1, 1), &empty);
        assert_eq!(cells[0].date, "2024-09-01");
        assert!(!cells[0].is_other_month);
        assert_eq!(cells.len(), 35);
    }

    #[test]
    fn february_2015_fits_exactly_four_weeks() {
        // 2015-02-01 is a Sunday and 2015 is not a leap year.
        let empty: Vec<Event> = Vec::new();
        let cells = build_month_grid(MonthRef::new(2015, 2).unwrap(), ymd(2015, 2, 14), &empty);
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|cell| !cell.is_other_month));
        assert_eq!(cells.iter().filter(|cell| cell.is_today).count(), 1);
    }

    #[test]
    fn january_pads_with_previous_december() {
        // 2025-01-01 is a Wednesday.
        let empty: Vec<Event> = Vec::new();
        let cells = build_month_grid(MonthRef::new(2025, 1).unwrap(), ymd(2025, 6, 1), &empty);
        let leading = cells
            .iter()
            .take_while(|cell| cell.is_other_month)
            .map(|cell| cell.date.as_str())
            .collect::<Vec<_>>();
        assert_eq!(leading, vec!["2024-12-29", "2024-12-30", "2024-12-31"]);
        assert_eq!(in_month_days(&cells), (1..=31).collect::<Vec<_>>());
    }

    #[test]
    fn december_pads_with_next_january() {
        let empty: Vec<Event> = Vec::new();
        let cells = build_month_grid(MonthRef::new(2024, 12).unwrap(), ymd(2024, 12, 31), &empty);
        let last = cells.last().unwrap();
        assert!(last.is_other_month);
        assert!(last.date.starts_with("2025-01-"));
        assert_eq!(cells.len() % 7, 0);
        let today = cells.iter().filter(|cell| cell.is_today).collect::<Vec<_>>();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, "2024-12-31");
    }

    #[test]
    fn default_event_date_prefers_today_in_current_month() {
        let today = ymd(2024, 3, 17);
        assert_eq!(default_event_date(MonthRef::new(2024, 3).unwrap(), today), today);
        assert_eq!(
            default_event_date(MonthRef::new(2024, 4).unwrap(), today),
            ymd(2024, 4, 1)
        );
    }
}
