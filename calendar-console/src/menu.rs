use std::io::{self, BufRead, Write};

use calendar_store::{validate, Event, EventStore, TimeInterval};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info};

use crate::render;
use crate::session::{Session, View};

const INPUT_DATE_FORMAT: &str = "%m/%d/%Y";
const INPUT_TIME_FORMAT: &str = "%H:%M";

/// The interactive main menu. Returns from [`Console::run`] on quit or end
/// of input.
pub struct Console<R, W> {
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, session: Session) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    pub fn run(&mut self, store: &mut EventStore) -> io::Result<()> {
        self.print_current(store)?;

        loop {
            writeln!(self.output, "\nSelect one of the following main menu options:")?;
            writeln!(
                self.output,
                "[V]iew by  [C]reate, [G]o to [E]vent list [D]elete  [Q]uit"
            )?;

            let Some(choice) = self.read_line()? else {
                return Ok(());
            };

            match choice.to_uppercase().as_str() {
                "V" => self.view(store)?,
                "C" => self.create(store)?,
                "G" => self.go_to(store)?,
                "E" => write!(self.output, "{}", render::event_list(store))?,
                "D" => self.delete(store)?,
                "Q" => {
                    writeln!(self.output, "Good Bye")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, please try again.")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.read_line()
    }

    fn prompt_date(&mut self) -> io::Result<Option<NaiveDate>> {
        let Some(raw) = self.prompt("Enter the date [MM/DD/YYYY]: ")? else {
            return Ok(None);
        };
        match NaiveDate::parse_from_str(&raw, INPUT_DATE_FORMAT) {
            Ok(date) => Ok(Some(date)),
            Err(_) => {
                writeln!(self.output, "Invalid date `{raw}`, expected MM/DD/YYYY.")?;
                Ok(None)
            }
        }
    }

    fn prompt_time(&mut self, message: &str) -> io::Result<Option<NaiveTime>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match NaiveTime::parse_from_str(&raw, INPUT_TIME_FORMAT) {
            Ok(time) => Ok(Some(time)),
            Err(_) => {
                writeln!(self.output, "Invalid time `{raw}`, expected HH:mm.")?;
                Ok(None)
            }
        }
    }

    fn print_current(&mut self, store: &EventStore) -> io::Result<()> {
        let text = match self.session.view {
            View::Day => render::day(self.session.current, store),
            View::Month => render::month(self.session.current, store, self.session.today),
        };
        write!(self.output, "{text}")
    }

    fn view(&mut self, store: &EventStore) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt("[D]ay view or [M]onth view ?")? else {
                return Ok(());
            };
            match choice.to_uppercase().as_str() {
                "D" => self.session.show(View::Day),
                "M" => self.session.show(View::Month),
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    continue;
                }
            }
            break;
        }

        self.print_current(store)?;

        loop {
            let Some(choice) = self.prompt("[P]revious or [N]ext or [G]o back to the main menu ?")?
            else {
                return Ok(());
            };
            match choice.to_uppercase().as_str() {
                "P" => self.session.previous(),
                "N" => self.session.next(),
                "G" => return Ok(()),
                _ => {
                    writeln!(self.output, "Invalid option, please try again.")?;
                    continue;
                }
            }
            self.print_current(store)?;
        }
    }

    fn create(&mut self, store: &mut EventStore) -> io::Result<()> {
        let Some(name) = self.prompt("Enter the event's name: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };
        let Some(start) = self.prompt_time("Enter the start time (HH:mm): ")? else {
            return Ok(());
        };
        let Some(end) = self.prompt_time("Enter the end time (HH:mm): ")? else {
            return Ok(());
        };

        let event = Event::one_time(name, TimeInterval::new(start, end), date);
        if let Err(err) = validate(&event, store) {
            debug!("Rejected `{}`: {err}", event.name());
            writeln!(self.output, "Cannot create this event: {err}")?;
            return Ok(());
        }

        info!("Created `{}` on {date}", event.name());
        store.add(event);
        writeln!(self.output, "Event was created successfully.")
    }

    fn go_to(&mut self, store: &EventStore) -> io::Result<()> {
        if let Some(date) = self.prompt_date()? {
            self.session.go_to(date);
            self.print_current(store)?;
        }
        Ok(())
    }

    fn delete(&mut self, store: &mut EventStore) -> io::Result<()> {
        writeln!(self.output, "Choose the deletion type:")?;
        writeln!(self.output, "[S]elected: Delete a specific one-time event.")?;
        writeln!(self.output, "[A]ll: Delete all one-time events on a specific date.")?;
        let Some(choice) = self.prompt("[DR]: Delete all occurrences of a recurring event.")?
        else {
            return Ok(());
        };

        match choice.to_uppercase().as_str() {
            "S" => self.delete_selected(store),
            "A" => self.delete_all_on_date(store),
            "DR" => self.delete_recurring(store),
            _ => writeln!(self.output, "Invalid option. Please choose S, A, or DR."),
        }
    }

    fn delete_selected(&mut self, store: &mut EventStore) -> io::Result<()> {
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };

        let events = store.events_on(date);
        if events.is_empty() {
            return writeln!(self.output, "No events found on this date.");
        }

        writeln!(self.output, "Events on this date:")?;
        for event in &events {
            writeln!(self.output, "{}", event.name())?;
        }

        let Some(name) = self.prompt("Enter the name of the event to delete: ")? else {
            return Ok(());
        };

        let target = events
            .into_iter()
            .find(|event| !event.is_recurring() && event.name() == name)
            .cloned();

        match target {
            Some(event) => {
                store.remove(&event);
                info!("Deleted `{name}` on {date}");
                writeln!(self.output, "Event '{name}' is deleted.")
            }
            None => writeln!(
                self.output,
                "Event not found or cannot delete recurring events."
            ),
        }
    }

    fn delete_all_on_date(&mut self, store: &mut EventStore) -> io::Result<()> {
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };

        let targets: Vec<Event> = store
            .events_on(date)
            .into_iter()
            .filter(|event| !event.is_recurring())
            .cloned()
            .collect();

        if targets.is_empty() {
            return writeln!(self.output, "No events found on this date.");
        }

        for event in &targets {
            store.remove(event);
        }

        info!("Deleted {} one-time events on {date}", targets.len());
        writeln!(
            self.output,
            "All one-time events on {} are deleted.",
            date.format(INPUT_DATE_FORMAT)
        )
    }

    fn delete_recurring(&mut self, store: &mut EventStore) -> io::Result<()> {
        let Some(name) = self.prompt("Enter the name of the recurring event to delete: ")? else {
            return Ok(());
        };

        let target = store
            .recurring_events()
            .iter()
            .find(|event| event.name() == name)
            .cloned();

        let Some(event) = target else {
            return writeln!(
                self.output,
                "No recurring event with the name '{name}' found."
            );
        };

        let removed = store.remove(&event);
        info!("Deleted {removed} recurring events named `{name}`");
        writeln!(self.output, "Recurring event '{name}' is deleted.")
    }
}
