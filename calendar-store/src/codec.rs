//! Text formats for event files.
//!
//! The load format is a sequence of line pairs: an event name followed by a
//! detail line. One-time details are `M/d/yy H:mm H:mm`, recurring details
//! are `<days> H:mm H:mm M/d/yy M/d/yy` where `<days>` is a run of the day
//! letters `SMTWRFA` (Sunday to Saturday, R for Thursday, A for Saturday).

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FormatError, ParseError};
use crate::structs::{Event, Schedule, TimeInterval};

/// Two digit years always mean 2000-2099.
const CENTURY: i32 = 2000;
const DATE_OUTPUT_FORMAT: &str = "%-m/%-d/%y";
const TIME_FORMAT: &str = "%H:%M";

static SHORT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").expect("static regex is valid"));

static RECURRING_DETAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[SMTWRFA]+ .*").expect("static regex is valid"));

/// Parses `M/d/yy`, reading `yy` as 2000 + yy.
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let captures = SHORT_DATE.captures(token)?;
    let month = captures[1].parse().ok()?;
    let day = captures[2].parse().ok()?;
    let year = captures[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(CENTURY + year, month, day)
}

/// Whether `date` survives a `format_date`/`parse_date` round trip.
#[must_use]
pub fn has_short_year(date: NaiveDate) -> bool {
    (CENTURY..CENTURY + 100).contains(&date.year())
}

pub fn parse_time(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token, TIME_FORMAT).ok()
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_OUTPUT_FORMAT).to_string()
}

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[must_use]
pub fn day_letter(weekday: Weekday) -> char {
    match weekday {
        Weekday::Sun => 'S',
        Weekday::Mon => 'M',
        Weekday::Tue => 'T',
        Weekday::Wed => 'W',
        Weekday::Thu => 'R',
        Weekday::Fri => 'F',
        Weekday::Sat => 'A',
    }
}

/// Returns `None` if any character is not one of `SMTWRFA`.
pub fn parse_day_letters(letters: &str) -> Option<Vec<Weekday>> {
    letters
        .chars()
        .map(|letter| match letter {
            'S' => Some(Weekday::Sun),
            'M' => Some(Weekday::Mon),
            'T' => Some(Weekday::Tue),
            'W' => Some(Weekday::Wed),
            'R' => Some(Weekday::Thu),
            'F' => Some(Weekday::Fri),
            'A' => Some(Weekday::Sat),
            _ => None,
        })
        .collect()
}

/// Distinct day letters of `dates`, in order of first appearance.
#[must_use]
pub fn day_letters(dates: &[NaiveDate]) -> String {
    let mut letters = String::with_capacity(7);
    for date in dates {
        let letter = day_letter(date.weekday());
        if !letters.contains(letter) {
            letters.push(letter);
        }
    }
    letters
}

#[must_use]
pub fn is_recurring_detail(line: &str) -> bool {
    RECURRING_DETAIL.is_match(line)
}

/// Every date from `start` to `end` inclusive whose weekday is in `days`.
#[must_use]
pub fn expand_occurrences(days: &[Weekday], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| days.contains(&date.weekday()))
        .collect()
}

/// `<name> on <date> from <start> to <end>` for one-time events,
/// `<name> on <days> from <start> to <end> starting on <first> until <last>`
/// for recurring ones.
#[must_use]
pub fn save_line(event: &Event) -> String {
    let start = format_time(event.start_time());
    let end = format_time(event.end_time());

    match event.schedule() {
        Schedule::Once(date) => format!(
            "{} on {} from {start} to {end}",
            event.name(),
            format_date(*date)
        ),
        Schedule::Recurring(dates) => format!(
            "{} on {} from {start} to {end} starting on {} until {}",
            event.name(),
            day_letters(dates),
            format_date(event.date()),
            format_date(event.last_date())
        ),
    }
}

/// The load-format detail line that reproduces `event`.
///
/// Fails when reading the line back would give different dates: a date
/// outside 2000-2099, or a recurring event whose occurrences are not every
/// matching weekday between its first and last date.
pub fn detail_line(event: &Event) -> Result<String, FormatError> {
    if let Some(&date) = event.dates().iter().find(|date| !has_short_year(**date)) {
        return Err(FormatError::YearOutOfRange {
            name: event.name().to_string(),
            date,
        });
    }

    let start = format_time(event.start_time());
    let end = format_time(event.end_time());

    match event.schedule() {
        Schedule::Once(date) => Ok(format!("{} {start} {end}", format_date(*date))),
        Schedule::Recurring(dates) => {
            let letters = day_letters(dates);
            let days = parse_day_letters(&letters).unwrap_or_default();
            if expand_occurrences(&days, event.date(), event.last_date()) != *dates {
                return Err(FormatError::NotWeekly {
                    name: event.name().to_string(),
                });
            }

            Ok(format!(
                "{letters} {start} {end} {} {}",
                format_date(event.date()),
                format_date(event.last_date())
            ))
        }
    }
}

/// Parses a whole event file. Blank lines between records are skipped.
pub fn parse_events<S: AsRef<str>>(source: S) -> Result<Vec<Event>, ParseError> {
    let mut lines = source
        .as_ref()
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()));

    let mut events = Vec::new();

    while let Some((name_line, name)) = lines.find(|(_, line)| !line.is_empty()) {
        let (line, detail) = match lines.next() {
            Some((line, detail)) if !detail.is_empty() => (line, detail),
            _ => {
                return Err(ParseError::MissingDetail {
                    line: name_line,
                    name: name.to_string(),
                })
            }
        };

        let event = if is_recurring_detail(detail) {
            parse_recurring(name, detail, line)?
        } else {
            parse_one_time(name, detail, line)?
        };

        events.push(event);
    }

    Ok(events)
}

struct Fields<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(detail: &'a str, line: usize) -> Self {
        Self {
            tokens: detail.split_whitespace(),
            line,
        }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::MissingField {
            line: self.line,
            field,
        })
    }

    fn date(&mut self, field: &'static str) -> Result<NaiveDate, ParseError> {
        let token = self.next(field)?;
        parse_date(token).ok_or_else(|| ParseError::InvalidDate {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn time(&mut self, field: &'static str) -> Result<NaiveTime, ParseError> {
        let token = self.next(field)?;
        parse_time(token).ok_or_else(|| ParseError::InvalidTime {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) => Err(ParseError::UnexpectedToken {
                line: self.line,
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn parse_one_time(name: &str, detail: &str, line: usize) -> Result<Event, ParseError> {
    let mut fields = Fields::new(detail, line);
    let date = fields.date("date")?;
    let start = fields.time("start time")?;
    let end = fields.time("end time")?;
    fields.finish()?;

    Ok(Event::one_time(name, TimeInterval::new(start, end), date))
}

fn parse_recurring(name: &str, detail: &str, line: usize) -> Result<Event, ParseError> {
    let mut fields = Fields::new(detail, line);
    let letters = fields.next("recurrence days")?;
    let days = parse_day_letters(letters).ok_or_else(|| ParseError::UnexpectedToken {
        line,
        token: letters.to_string(),
    })?;
    let start = fields.time("start time")?;
    let end = fields.time("end time")?;
    let first = fields.date("start date")?;
    let last = fields.date("end date")?;
    fields.finish()?;

    let occurrences = expand_occurrences(&days, first, last);
    Event::recurring(name, TimeInterval::new(start, end), occurrences)
        .map_err(|_| ParseError::NoOccurrences { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_short_dates_and_times() {
        assert_eq!(parse_date("1/1/24"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("12/31/23"), Some(date(2023, 12, 31)));
        assert_eq!(parse_date("2/30/24"), None);
        assert_eq!(parse_date("2024-01-01"), None);
        assert_eq!(parse_time("9:00"), Some(time(9, 0)));
        assert_eq!(parse_time("17:45"), Some(time(17, 45)));
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn two_digit_years_are_in_this_century() {
        assert_eq!(parse_date("1/1/70"), Some(date(2070, 1, 1)));
        assert_eq!(parse_date("12/31/99"), Some(date(2099, 12, 31)));
        assert_eq!(parse_date("1/5/00"), Some(date(2000, 1, 5)));
        assert_eq!(parse_date("1/5/2024"), None);
        assert_eq!(parse_date("1/5/4"), None);
        assert_eq!(parse_date("001/5/24"), None);
    }

    #[test]
    fn detail_line_refuses_years_it_cannot_round_trip() {
        let interval = TimeInterval::new(time(9, 0), time(10, 0));
        let future = Event::one_time("Future", interval, date(2100, 1, 5));
        assert_eq!(
            detail_line(&future),
            Err(FormatError::YearOutOfRange {
                name: "Future".to_string(),
                date: date(2100, 1, 5)
            })
        );

        let past = Event::recurring("Past", interval, vec![date(1999, 12, 27), date(2000, 1, 3)])
            .unwrap();
        assert!(matches!(
            detail_line(&past),
            Err(FormatError::YearOutOfRange { .. })
        ));

        let late = Event::one_time("Late", interval, date(2080, 1, 5));
        assert_eq!(detail_line(&late).unwrap(), "1/5/80 09:00 10:00");
        assert_eq!(parse_date("1/5/80"), Some(date(2080, 1, 5)));
    }

    #[test]
    fn detail_line_refuses_gapped_series() {
        let interval = TimeInterval::new(time(9, 0), time(10, 0));
        // two Mondays with the one in between missing
        let gapped =
            Event::recurring("Gapped", interval, vec![date(2024, 1, 1), date(2024, 1, 15)])
                .unwrap();
        assert_eq!(
            detail_line(&gapped),
            Err(FormatError::NotWeekly {
                name: "Gapped".to_string()
            })
        );
    }

    #[test]
    fn formats_dates_without_padding() {
        assert_eq!(format_date(date(2024, 3, 5)), "3/5/24");
        assert_eq!(format_date(date(2024, 11, 15)), "11/15/24");
        assert_eq!(format_time(time(9, 5)), "09:05");
    }

    #[test]
    fn detects_recurring_details() {
        assert!(is_recurring_detail("MW 09:00 10:15 1/1/24 1/31/24"));
        assert!(is_recurring_detail("A 9:00 10:00 1/1/24 1/31/24"));
        assert!(!is_recurring_detail("1/5/24 9:00 10:00"));
        assert!(!is_recurring_detail("MW"));
        assert!(!is_recurring_detail("mw 9:00 10:00 1/1/24 1/2/24"));
    }

    #[test]
    fn expands_mondays_and_wednesdays() {
        let days = parse_day_letters("MW").unwrap();
        let dates = expand_occurrences(&days, date(2024, 1, 1), date(2024, 1, 14));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 3),
                date(2024, 1, 8),
                date(2024, 1, 10)
            ]
        );
    }

    #[test]
    fn expansion_includes_both_range_ends() {
        let days = parse_day_letters("RA").unwrap();
        // 2024-01-04 is a Thursday, 2024-01-13 a Saturday
        let dates = expand_occurrences(&days, date(2024, 1, 4), date(2024, 1, 13));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 4),
                date(2024, 1, 6),
                date(2024, 1, 11),
                date(2024, 1, 13)
            ]
        );
        assert!(expand_occurrences(&days, date(2024, 1, 13), date(2024, 1, 4)).is_empty());
    }

    #[test]
    fn rejects_unknown_day_letters() {
        assert_eq!(parse_day_letters("MX"), None);
        assert_eq!(
            parse_day_letters("SA"),
            Some(vec![Weekday::Sun, Weekday::Sat])
        );
    }

    #[test]
    fn day_letters_keep_first_appearance_order() {
        // Wednesday, Monday, Wednesday, Thursday
        let dates = [
            date(2024, 1, 3),
            date(2024, 1, 8),
            date(2024, 1, 10),
            date(2024, 1, 11),
        ];
        assert_eq!(day_letters(&dates), "WMR");
    }

    #[test]
    fn save_lines() {
        let interval = TimeInterval::new(time(9, 0), time(10, 15));
        let one_time = Event::one_time("Dentist", interval, date(2024, 3, 5));
        assert_eq!(save_line(&one_time), "Dentist on 3/5/24 from 09:00 to 10:15");

        let days = parse_day_letters("MW").unwrap();
        let occurrences = expand_occurrences(&days, date(2024, 1, 1), date(2024, 1, 31));
        let lecture = Event::recurring("Lecture", interval, occurrences).unwrap();
        assert_eq!(
            save_line(&lecture),
            "Lecture on MW from 09:00 to 10:15 starting on 1/1/24 until 1/31/24"
        );
        assert_eq!(
            detail_line(&lecture).unwrap(),
            "MW 09:00 10:15 1/1/24 1/31/24"
        );
    }

    #[test]
    fn parses_both_record_kinds() {
        let events = parse_events(
            "Lecture\nMW 09:00 10:15 1/1/24 1/31/24\n\n  Dentist  \n 3/5/24 13:00 14:00 \n",
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "Lecture");
        assert!(events[0].is_recurring());
        assert_eq!(events[0].occurrences().len(), 10);
        assert_eq!(events[1].name(), "Dentist");
        assert_eq!(events[1].date(), date(2024, 3, 5));
        assert_eq!(events[1].interval(), TimeInterval::new(time(13, 0), time(14, 0)));
    }

    #[test]
    fn reports_missing_detail_line() {
        assert_eq!(
            parse_events("Lecture\nMW 09:00 10:15 1/1/24 1/31/24\nOrphan\n"),
            Err(ParseError::MissingDetail {
                line: 3,
                name: "Orphan".to_string()
            })
        );
    }

    #[test]
    fn reports_bad_tokens() {
        assert_eq!(
            parse_events("Dentist\n3/5/24 1pm 14:00"),
            Err(ParseError::InvalidTime {
                line: 2,
                token: "1pm".to_string()
            })
        );
        assert_eq!(
            parse_events("Dentist\n13/5/24 13:00 14:00"),
            Err(ParseError::InvalidDate {
                line: 2,
                token: "13/5/24".to_string()
            })
        );
        assert_eq!(
            parse_events("Dentist\n3/5/24 13:00"),
            Err(ParseError::MissingField {
                line: 2,
                field: "end time"
            })
        );
        assert_eq!(
            parse_events("Dentist\n3/5/24 13:00 14:00 extra"),
            Err(ParseError::UnexpectedToken {
                line: 2,
                token: "extra".to_string()
            })
        );
    }

    #[test]
    fn reports_empty_recurrence() {
        // 2024-01-02 is a Tuesday, there is no Monday in range
        assert_eq!(
            parse_events("Lecture\nM 09:00 10:00 1/2/24 1/3/24"),
            Err(ParseError::NoOccurrences { line: 2 })
        );
    }
}
