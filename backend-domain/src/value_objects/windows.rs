// Time window value objects
// Conflicting date parameters are rejected at construction

use chrono::{Local, NaiveDate, TimeZone};

use crate::value_objects::{normalize_optional_text, InvalidArgument};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Change-log timestamps are stored as text, so windows compare as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChangeLogWindow {
    #[default]
    Any,
    /// `timestamp LIKE '<date>%'`
    SingleDate(String),
    Range {
        start: Option<String>,
        end: Option<String>,
    },
}

impl ChangeLogWindow {
    pub fn from_parts(
        single_date: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<Self, InvalidArgument> {
        let single_date = normalize_optional_text(single_date);
        let start = normalize_optional_text(start_date);
        let end = normalize_optional_text(end_date);

        match (single_date, start, end) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(InvalidArgument::new(
                "Provide either singleDate or startDate/endDate, not both",
            )),
            (Some(date), None, None) => Ok(ChangeLogWindow::SingleDate(date)),
            (None, None, None) => Ok(ChangeLogWindow::Any),
            (None, start, end) => Ok(ChangeLogWindow::Range { start, end }),
        }
    }
}

/// Session occurrence window in epoch milliseconds, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionWindow {
    start_at: Option<i64>,
    end_at: Option<i64>,
}

impl SessionWindow {
    /// Accepts exactly one of: a single local date, a local date range, or an epoch range.
    pub fn from_parts(
        single_date: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
        start_at: Option<i64>,
        end_at: Option<i64>,
    ) -> Result<Self, InvalidArgument> {
        let single_date = normalize_optional_text(single_date);
        let start_date = normalize_optional_text(start_date);
        let end_date = normalize_optional_text(end_date);

        let has_range_dates = start_date.is_some() || end_date.is_some();
        let has_epoch = start_at.is_some() || end_at.is_some();

        if single_date.is_some() && has_range_dates {
            return Err(InvalidArgument::new(
                "Provide either singleDate or startDate/endDate, not both",
            ));
        }
        if (single_date.is_some() || has_range_dates) && has_epoch {
            return Err(InvalidArgument::new(
                "Provide either date strings or epoch millis, not both",
            ));
        }

        if let Some(date) = single_date {
            let day = parse_date(&date)?;
            return Ok(Self {
                start_at: Some(local_day_start(day)?),
                end_at: Some(local_day_end(day)?),
            });
        }
        if has_range_dates {
            let start_at = match start_date {
                Some(date) => Some(local_day_start(parse_date(&date)?)?),
                None => None,
            };
            let end_at = match end_date {
                Some(date) => Some(local_day_end(parse_date(&date)?)?),
                None => None,
            };
            return Ok(Self { start_at, end_at });
        }
        Ok(Self { start_at, end_at })
    }

    pub fn start_at(&self) -> Option<i64> {
        self.start_at
    }

    pub fn end_at(&self) -> Option<i64> {
        self.end_at
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, InvalidArgument> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| InvalidArgument::new(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

fn local_day_start(day: NaiveDate) -> Result<i64, InvalidArgument> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| InvalidArgument::new(format!("invalid date '{}'", day)))?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| InvalidArgument::new(format!("date '{}' has no local midnight", day)))
}

fn local_day_end(day: NaiveDate) -> Result<i64, InvalidArgument> {
    let next = day
        .succ_opt()
        .ok_or_else(|| InvalidArgument::new(format!("date '{}' out of range", day)))?;
    Ok(local_day_start(next)? - 1)
}
