use chrono::{Days, Local, NaiveDate};

/// The first APOD.
pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(x) => x,
    None => unreachable!(),
};

pub const DEFAULT_SPAN_DAYS: u64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("start and end dates are both required")]
    Incomplete,

    #[error("start {0} is after end {1}")]
    Reversed(NaiveDate, NaiveDate),

    #[error("{0} is outside {1}..={2}")]
    OutOfBounds(NaiveDate, NaiveDate, NaiveDate),

    #[error("can't parse date: {0}")]
    Parse(String),
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| RangeError::Parse(s.to_owned()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(RangeError::Reversed(start, end))
        }
    }

    /// The week ending `today`.
    pub fn default_for(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS))
            .unwrap_or(MIN_DATE);

        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Rejects ranges reaching before the first APOD or past `today`.
    pub fn within_bounds(self, today: NaiveDate) -> Result<Self, RangeError> {
        for date in [self.start, self.end] {
            if date < MIN_DATE || date > today {
                return Err(RangeError::OutOfBounds(date, MIN_DATE, today));
            }
        }

        Ok(self)
    }
}

pub fn validate(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange, RangeError> {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => Err(RangeError::Incomplete),
    }
}

pub fn is_valid(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    validate(start, end).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn same_day_is_valid() {
        let d = date("2024-02-29");

        assert!(is_valid(Some(d), Some(d)));
    }

    #[test]
    fn ordered_is_valid() {
        let range = validate(Some(date("2024-01-01")), Some(date("2024-01-07"))).unwrap();

        assert_eq!(range.start(), date("2024-01-01"));
        assert_eq!(range.end(), date("2024-01-07"));
    }

    #[test]
    fn reversed_is_invalid() {
        assert_eq!(
            validate(Some(date("2024-01-07")), Some(date("2024-01-01"))),
            Err(RangeError::Reversed(date("2024-01-07"), date("2024-01-01")))
        );
    }

    #[test]
    fn missing_is_invalid() {
        let d = date("2024-01-01");

        assert_eq!(validate(None, Some(d)), Err(RangeError::Incomplete));
        assert_eq!(validate(Some(d), None), Err(RangeError::Incomplete));
        assert_eq!(validate(None, None), Err(RangeError::Incomplete));
    }

    #[test]
    fn default_is_past_week() {
        let range = DateRange::default_for(date("2024-03-03"));

        assert_eq!(range.start(), date("2024-02-25"));
        assert_eq!(range.end(), date("2024-03-03"));
    }

    #[test]
    fn bounds() {
        let today = date("2024-03-03");

        assert!(DateRange::new(MIN_DATE, today)
            .unwrap()
            .within_bounds(today)
            .is_ok());

        let early = date("1995-06-15");
        assert_eq!(
            DateRange::new(early, today).unwrap().within_bounds(today),
            Err(RangeError::OutOfBounds(early, MIN_DATE, today))
        );

        let late = date("2024-03-04");
        assert!(DateRange::new(today, late)
            .unwrap()
            .within_bounds(today)
            .is_err());
    }

    #[test]
    fn parse_and_format() {
        assert_eq!(format_date(date(" 2001-09-11 ")), "2001-09-11");
        assert!(matches!(parse_date("09/11/2001"), Err(RangeError::Parse(_))));
    }
}
