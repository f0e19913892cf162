//! Text views over an [`EventStore`].

use calendar_store::{day_letters, format_time, Event, EventStore};
use chrono::{Datelike, NaiveDate};

const WEEK_HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa";
const LIST_DATE_FORMAT: &str = "%m/%d/%Y";

/// Month grid of `date`'s month. Today is drawn as `[dd]`, days with events
/// as `{dd}`.
pub fn month(date: NaiveDate, store: &EventStore, today: NaiveDate) -> String {
    let mut out = format!("{}\n{WEEK_HEADER}\n", date.format("%B %Y"));

    let Some(first) = date.with_day(1) else {
        return out;
    };

    let mut row = "    ".repeat(first.weekday().num_days_from_sunday() as usize);

    let days = first
        .iter_days()
        .take_while(|day| day.month() == first.month());

    for day in days {
        let number = day.day();
        let cell = if day == today {
            format!("[{number:>2}]")
        } else if store.has_events_on(day) {
            format!("{{{number:>2}}}")
        } else {
            format!(" {number:>2} ")
        };
        row.push_str(&cell);

        if day.weekday().num_days_from_sunday() == 6 {
            out.push_str(row.trim_end());
            out.push('\n');
            row.clear();
        }
    }

    if !row.is_empty() {
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

/// Events on `date` ordered by start time.
pub fn day(date: NaiveDate, store: &EventStore) -> String {
    let mut out = format!("{}\n", date.format("%a, %b %-d %Y"));

    let mut events = store.events_on(date);
    if events.is_empty() {
        out.push_str("No events.\n");
        return out;
    }

    events.sort_by_key(|event| event.start_time());
    for event in events {
        out.push_str(&format!("{event}\n"));
    }

    out
}

/// Every event, one-time ones by date and start time, recurring ones by
/// first occurrence.
pub fn event_list(store: &EventStore) -> String {
    let mut out = String::from("One-Time Events:\n");

    let mut one_time: Vec<Event> = store.one_time_events();
    one_time.sort_by_key(|event| (event.date(), event.start_time()));
    for event in &one_time {
        out.push_str(&format!(
            "{} on {} from {} to {}\n",
            event.name(),
            event.date().format(LIST_DATE_FORMAT),
            format_time(event.start_time()),
            format_time(event.end_time())
        ));
    }

    out.push_str("\nRecurring Events:\n");

    let mut recurring: Vec<Event> = store.recurring_events();
    recurring.sort_by_key(Event::date);
    for event in &recurring {
        out.push_str(&format!(
            "{} on {} from {} to {}, {} until {}\n",
            event.name(),
            day_letters(event.occurrences()),
            format_time(event.start_time()),
            format_time(event.end_time()),
            event.date().format(LIST_DATE_FORMAT),
            event.last_date().format(LIST_DATE_FORMAT)
        ));
    }

    out
}
