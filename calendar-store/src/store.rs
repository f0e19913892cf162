use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::codec;
use crate::error::{CalendarError, FormatError, ParseError, Result, ValidationError};
use crate::structs::Event;
use crate::validate::validate;

const ONE_TIME_HEADER: &str = "One-Time Events:";
const RECURRING_HEADER: &str = "Recurring Events:";

/// All events of one calendar, split by kind.
///
/// `one_time` only ever holds one-time events and `recurring` only recurring
/// ones. Names are not unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EventStore {
    one_time: Vec<Event>,
    recurring: Vec<Event>,
}

impl EventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without any conflict check, see [`EventStore::try_add`].
    pub fn add(&mut self, event: Event) {
        if event.is_recurring() {
            self.recurring.push(event);
        } else {
            self.one_time.push(event);
        }
    }

    /// Runs [`validate`] against this store, then adds.
    pub fn try_add(&mut self, event: Event) -> Result<(), ValidationError> {
        validate(&event, self)?;
        self.add(event);
        Ok(())
    }

    /// Removes `event` and returns how many events were removed.
    ///
    /// A recurring event is treated as a series: every recurring event with
    /// the same name goes. A one-time event only removes the first equal
    /// entry.
    pub fn remove(&mut self, event: &Event) -> usize {
        if event.is_recurring() {
            let before = self.recurring.len();
            self.recurring.retain(|e| e.name() != event.name());
            before - self.recurring.len()
        } else if let Some(idx) = self.one_time.iter().position(|e| e == event) {
            self.one_time.remove(idx);
            1
        } else {
            0
        }
    }

    /// One-time events on `date` followed by recurring events occurring on
    /// `date`, both in insertion order.
    #[must_use]
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.one_time
            .iter()
            .filter(|event| event.date() == date)
            .chain(self.recurring.iter().filter(|event| event.occurs_on(date)))
            .collect()
    }

    #[must_use]
    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.one_time.iter().any(|event| event.date() == date)
            || self.recurring.iter().any(|event| event.occurs_on(date))
    }

    /// A copy of the one-time events. Changing it leaves the store alone.
    #[must_use]
    pub fn one_time_events(&self) -> Vec<Event> {
        self.one_time.clone()
    }

    /// A copy of the recurring events. Changing it leaves the store alone.
    #[must_use]
    pub fn recurring_events(&self) -> Vec<Event> {
        self.recurring.clone()
    }

    /// Borrows every event, one-time ones first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.one_time.iter().chain(&self.recurring)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.one_time.len() + self.recurring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.one_time.is_empty() && self.recurring.is_empty()
    }

    /// Adds every event in `source`. Nothing is added if any record is
    /// malformed.
    pub fn load_from_text<S: AsRef<str>>(&mut self, source: S) -> Result<usize, ParseError> {
        let events = codec::parse_events(source)?;
        let count = events.len();
        for event in events {
            self.add(event);
        }
        debug!("Loaded {count} events");
        Ok(count)
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| CalendarError::io(path, err))?;
        let count = self.load_from_text(source)?;
        info!("Loaded {count} events from {}", path.display());
        Ok(count)
    }

    /// The human readable report of all events.
    #[must_use]
    pub fn serialize_all(&self) -> String {
        let mut out = String::new();

        out.push_str(ONE_TIME_HEADER);
        out.push('\n');
        for event in &self.one_time {
            out.push_str(&event.to_save_line());
            out.push('\n');
        }

        out.push('\n');
        out.push_str(RECURRING_HEADER);
        out.push('\n');
        for event in &self.recurring {
            out.push_str(&event.to_save_line());
            out.push('\n');
        }

        out
    }

    /// All events in the load format, so the result can be read back with
    /// [`EventStore::load_from_text`]. Fails rather than write an event that
    /// would reload with different dates.
    pub fn to_load_text(&self) -> Result<String, FormatError> {
        let mut out = String::new();
        for event in self.iter() {
            out.push_str(event.name());
            out.push('\n');
            out.push_str(&codec::detail_line(event)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Writes `contents` next to `path` first and renames it into place, so a
    /// failed write never leaves a truncated file behind.
    pub fn save_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
        let path = path.as_ref();
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");

        if let Err(err) = fs::write(&tmp, contents) {
            let _ = fs::remove_file(&tmp);
            return Err(CalendarError::io(path, err));
        }

        fs::rename(&tmp, path).map_err(|err| CalendarError::io(path, err))?;
        info!("Saved events to {}", path.display());
        Ok(())
    }
}
