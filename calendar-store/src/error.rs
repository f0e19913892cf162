//! Error types for loading, validating and saving events.

use std::io;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Malformed event file content. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: event `{name}` has no detail line")]
    MissingDetail { line: usize, name: String },

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: unexpected token `{token}`")]
    UnexpectedToken { line: usize, token: String },

    #[error("line {line}: invalid date `{token}`, expected M/d/yy")]
    InvalidDate { line: usize, token: String },

    #[error("line {line}: invalid time `{token}`, expected H:mm")]
    InvalidTime { line: usize, token: String },

    #[error("line {line}: recurrence range has no matching days")]
    NoOccurrences { line: usize },
}

/// A candidate event that must not be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: NaiveTime, end: NaiveTime },

    #[error("time conflict with `{existing}` on {date}")]
    Conflict { existing: String, date: NaiveDate },

    #[error("recurring event has no occurrences")]
    NoOccurrences,
}

/// An event the load format cannot express without changing its dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("`{name}` occurs on {date}, outside the two digit years 2000-2099")]
    YearOutOfRange { name: String, date: NaiveDate },

    #[error("`{name}` does not repeat on every matching weekday of its range")]
    NotWeekly { name: String },
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CalendarError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CalendarError> = std::result::Result<T, E>;
