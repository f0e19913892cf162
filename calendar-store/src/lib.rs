mod codec;
mod error;
mod store;
mod structs;
mod validate;

#[cfg(feature = "ics")]
mod ics;

pub use codec::{
    day_letter, day_letters, expand_occurrences, format_date, format_time, has_short_year, parse_date,
    parse_day_letters, parse_events, parse_time,
};
pub use error::{CalendarError, FormatError, ParseError, Result, ValidationError};
pub use store::EventStore;
pub use structs::{Event, Schedule, TimeInterval};
pub use validate::validate;
