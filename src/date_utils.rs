use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::DailyRecord;

/// An inclusive calendar-date window over the record list. `None` bounds mean
/// unbounded; the empty filter passes everything through. Transient UI state,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub label: String,
}

impl DateFilter {
    pub fn all() -> Self {
        Self {
            start_date: None,
            end_date: None,
            label: "All time".into(),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
}

impl FromStr for DatePreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last7days" => Ok(Self::Last7Days),
            "last30days" => Ok(Self::Last30Days),
            "thisMonth" => Ok(Self::ThisMonth),
            "lastMonth" => Ok(Self::LastMonth),
            _ => Err(()),
        }
    }
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
        }
    }

    pub fn all() -> &'static [DatePreset] {
        &[
            Self::Last7Days,
            Self::Last30Days,
            Self::ThisMonth,
            Self::LastMonth,
        ]
    }

    /// Resolve relative to an explicit `today` so tests can pin the clock.
    pub fn resolve_at(&self, today: NaiveDate) -> DateFilter {
        let (start, end) = match self {
            Self::Last7Days => (today - Duration::days(6), today),
            Self::Last30Days => (today - Duration::days(29), today),
            Self::ThisMonth => (month_start(today), today),
            Self::LastMonth => {
                let last_of_previous = month_start(today) - Duration::days(1);
                (month_start(last_of_previous), last_of_previous)
            }
        };
        DateFilter {
            start_date: Some(start),
            end_date: Some(end),
            label: self.label().to_string(),
        }
    }

    pub fn resolve(&self) -> DateFilter {
        self.resolve_at(Local::now().date_naive())
    }
}

/// `[first, last]` day of an explicit `YYYY-MM` month key.
pub fn month_range(month_key: &str) -> Option<DateFilter> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month_key), "%Y-%m-%d").ok()?;
    Some(DateFilter {
        start_date: Some(start),
        end_date: Some(month_end(start)),
        label: start.format("%B %Y").to_string(),
    })
}

/// A caller-supplied range, bounds taken verbatim.
pub fn custom_range(start: NaiveDate, end: NaiveDate) -> DateFilter {
    DateFilter {
        start_date: Some(start),
        end_date: Some(end),
        label: format!(
            "{} – {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        ),
    }
}

/// A selectable month: machine key plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub value: String,
    pub label: String,
}

/// The trailing `count` months ending at `today`'s month, newest first.
pub fn month_options_at(count: usize, today: NaiveDate) -> Vec<MonthOption> {
    (0..count)
        .map(|i| {
            let month = shift_months(month_start(today), -(i as i32));
            MonthOption {
                value: month.format("%Y-%m").to_string(),
                label: month.format("%B %Y").to_string(),
            }
        })
        .collect()
}

pub fn month_options(count: usize) -> Vec<MonthOption> {
    month_options_at(count, Local::now().date_naive())
}

/// Keep records whose date falls inside the window, inclusive on both ends.
/// An unbounded filter returns the input unchanged; a record date that does
/// not parse is excluded from a bounded window.
pub fn filter_records(records: &[DailyRecord], filter: &DateFilter) -> Vec<DailyRecord> {
    let (Some(start), Some(end)) = (filter.start_date, filter.end_date) else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|record| {
            record
                .parsed_date()
                .map(|date| date >= start && date <= end)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

fn month_end(date: NaiveDate) -> NaiveDate {
    shift_months(month_start(date), 1) - Duration::days(1)
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month() as i32 - 1 + months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(new_year, new_month, 1).unwrap()
}
