use ics::properties::{DtEnd, DtStart, Summary};

use crate::{Event, EventStore};

impl EventStore {
    /// Every occurrence of every event as a VEVENT. Times are floating local
    /// times without a timezone.
    #[must_use]
    pub fn to_ics<'a>(&'a self, name: &'a str) -> ics::ICalendar<'a> {
        let mut icalendar = ics::ICalendar::new("2.0", name);

        for event in self.iter() {
            for ics_event in event.to_ics() {
                icalendar.add_event(ics_event);
            }
        }

        icalendar
    }
}

impl Event {
    /// One VEVENT per date the event occupies.
    #[must_use]
    pub fn to_ics(&self) -> Vec<ics::Event<'_>> {
        self.dates()
            .iter()
            .map(|date| {
                let start = format!(
                    "{}T{}00",
                    date.format("%Y%m%d"),
                    self.start_time().format("%H%M")
                );

                let end = format!(
                    "{}T{}00",
                    date.format("%Y%m%d"),
                    self.end_time().format("%H%M")
                );

                let id = format!("{}_{}", start, self.name().replace(' ', "-"));

                let mut ics_event = ics::Event::new(id, start.clone());

                ics_event.push(DtStart::new(start));
                ics_event.push(DtEnd::new(end));
                ics_event.push(Summary::new(self.name()));

                ics_event
            })
            .collect()
    }
}
