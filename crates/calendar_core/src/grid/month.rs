use chrono::{Datelike, Months, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest displayable year; dates are rendered with four-digit years.
pub const MIN_YEAR: i32 = 1;
/// Largest displayable year.
pub const MAX_YEAR: i32 = 9999;
/// Last displayable month of `MAX_YEAR`; the December grid would pad into
/// year 10000, which no longer renders as `YYYY-MM-DD`.
pub const MAX_YEAR_LAST_MONTH: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Month number outside `1..=12`.
    InvalidMonth(u32),
    /// Year outside `MIN_YEAR..=MAX_YEAR`.
    YearOutOfRange(i32),
    /// Month whose grid would include days past `MAX_YEAR`.
    BeyondLastMonth { year: i32, month: u32 },
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be in 1..=12, got {month}"),
            Self::YearOutOfRange(year) => {
                write!(f, "year must be in {MIN_YEAR}..={MAX_YEAR}, got {year}")
            }
            Self::BeyondLastMonth { year, month } => write!(
                f,
                "{year:04}-{month:02} is past the last displayable month \
                 {MAX_YEAR:04}-{MAX_YEAR_LAST_MONTH:02}"
            ),
        }
    }
}

impl Error for GridError {}

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    first: NaiveDate,
}

impl MonthRef {
    /// Builds a month reference; `month` is 1-indexed.
    pub fn new(year: i32, month: u32) -> Result<Self, GridError> {
        if !(1..=12).contains(&month) {
            return Err(GridError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(GridError::YearOutOfRange(year));
        }
        if !is_displayable(year, month) {
            return Err(GridError::BeyondLastMonth { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(GridError::YearOutOfRange(year))
    }

    /// Month containing `date`, subject to the same range checks as `new`.
    pub fn containing(date: NaiveDate) -> Result<Self, GridError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-indexed month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        let count = self
            .first
            .iter_days()
            .take_while(|day| day.month() == self.first.month())
            .count();
        count as u32
    }

    /// Previous month, rolling January back to December of the prior year.
    pub fn previous(&self) -> Option<Self> {
        self.shift(|first| first.checked_sub_months(Months::new(1)))
    }

    /// Next month, rolling December over to January of the next year.
    pub fn next(&self) -> Option<Self> {
        self.shift(|first| first.checked_add_months(Months::new(1)))
    }

    /// Header label, e.g. `March 2024`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    fn shift(&self, step: impl FnOnce(NaiveDate) -> Option<NaiveDate>) -> Option<Self> {
        step(self.first)
            .filter(|first| {
                (MIN_YEAR..=MAX_YEAR).contains(&first.year())
                    && is_displayable(first.year(), first.month())
            })
            .map(|first| Self { first })
    }
}

fn is_displayable(year: i32, month: u32) -> bool {
    year < MAX_YEAR || month <= MAX_YEAR_LAST_MONTH
}

impl Display for MonthRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::{GridError, MonthRef};
    use chrono::NaiveDate;

    #[test]
    fn new_rejects_out_of_range_month_and_year() {
        assert_eq!(MonthRef::new(2024, 0), Err(GridError::InvalidMonth(0)));
        assert_eq!(MonthRef::new(2024, 13), Err(GridError::InvalidMonth(13)));
        assert_eq!(MonthRef::new(0, 1), Err(GridError::YearOutOfRange(0)));
        assert_eq!(MonthRef::new(10_000, 1), Err(GridError::YearOutOfRange(10_000)));
        assert_eq!(
            MonthRef::new(9999, 12),
            Err(GridError::BeyondLastMonth {
                year: 9999,
                month: 12
            })
        );
    }

    #[test]
    fn days_in_month_follows_leap_years() {
        assert_eq!(MonthRef::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthRef::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthRef::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthRef::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthRef::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthRef::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        let december = MonthRef::new(2023, 12).unwrap();
        let january = december.next().unwrap();
        assert_eq!((january.year(), january.month()), (2024, 1));
        assert_eq!(january.previous().unwrap(), december);

        assert!(MonthRef::new(9999, 11).unwrap().next().is_none());
        assert!(MonthRef::new(9999, 10).unwrap().next().is_some());
        assert!(MonthRef::new(1, 1).unwrap().previous().is_none());
    }

    #[test]
    fn label_and_display() {
        let march = MonthRef::new(2024, 3).unwrap();
        assert_eq!(march.label(), "March 2024");
        assert_eq!(march.to_string(), "2024-03");
    }

    #[test]
    fn containing_maps_any_day_to_its_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let month = MonthRef::containing(date).unwrap();
        assert_eq!(month, MonthRef::new(2024, 2).unwrap());
        assert!(month.contains(date));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));

        let last_day = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(MonthRef::containing(last_day).is_err());
    }
}
