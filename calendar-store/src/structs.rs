use chrono::{NaiveDate, NaiveTime};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::codec;
use crate::error::ValidationError;

#[cfg(feature = "serde")]
fn serialize_naive_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&codec::format_time(*time))
}

/// A wall-clock time range without a date.
///
/// Nothing checks that `start` is before `end` here; [`crate::validate`] does
/// that for events entered by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeInterval {
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_naive_time"))]
    start: NaiveTime,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_naive_time"))]
    end: NaiveTime,
}

impl TimeInterval {
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Strict overlap test. Intervals that only touch (`a.end == b.start`)
    /// do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// When an event happens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Schedule {
    Once(NaiveDate),
    /// Chronological, deduplicated and never empty.
    Recurring(Vec<NaiveDate>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Event {
    name: String,
    interval: TimeInterval,
    schedule: Schedule,
}

impl Event {
    pub fn one_time<S: Into<String>>(name: S, interval: TimeInterval, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            interval,
            schedule: Schedule::Once(date),
        }
    }

    /// Builds a recurring event from its materialized occurrence dates.
    ///
    /// The dates are sorted and deduplicated. An empty set is rejected since a
    /// recurring event must have a first and last occurrence.
    pub fn recurring<S: Into<String>>(
        name: S,
        interval: TimeInterval,
        mut occurrences: Vec<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        occurrences.sort_unstable();
        occurrences.dedup();

        if occurrences.is_empty() {
            return Err(ValidationError::NoOccurrences);
        }

        Ok(Self {
            name: name.into(),
            interval,
            schedule: Schedule::Recurring(occurrences),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    #[must_use]
    pub fn start_time(&self) -> NaiveTime {
        self.interval.start
    }

    #[must_use]
    pub fn end_time(&self) -> NaiveTime {
        self.interval.end
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        matches!(self.schedule, Schedule::Recurring(_))
    }

    /// The single date of a one-time event, or the first occurrence of a
    /// recurring one.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match &self.schedule {
            Schedule::Once(date) => *date,
            Schedule::Recurring(dates) => dates[0],
        }
    }

    /// Empty for one-time events.
    #[must_use]
    pub fn occurrences(&self) -> &[NaiveDate] {
        match &self.schedule {
            Schedule::Once(_) => &[],
            Schedule::Recurring(dates) => dates,
        }
    }

    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        match &self.schedule {
            Schedule::Once(date) => *date,
            Schedule::Recurring(dates) => dates[dates.len() - 1],
        }
    }

    /// Every date this event occupies, one-time or not.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        match &self.schedule {
            Schedule::Once(date) => std::slice::from_ref(date),
            Schedule::Recurring(dates) => dates,
        }
    }

    #[must_use]
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.schedule {
            Schedule::Once(once) => *once == date,
            Schedule::Recurring(dates) => dates.binary_search(&date).is_ok(),
        }
    }

    /// The human readable line written to the save report.
    #[must_use]
    pub fn to_save_line(&self) -> String {
        codec::save_line(self)
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            codec::format_time(self.start),
            codec::format_time(self.end)
        )
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.interval)
    }
}
