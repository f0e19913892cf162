mod cli;
mod menu;
mod render;
mod session;

use std::{env, io};

use anyhow::{Context, Result};
use calendar_store::{CalendarError, EventStore};
use chrono::Local;
use log::{info, warn};

use menu::Console;
use session::Session;

const ICS_NAME: &str = "calendar";

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "calendar=info,calendar_store=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let mut store = EventStore::new();

    // A missing or broken event file starts an empty calendar.
    match store.load_file(&args.events) {
        Ok(_) => {}
        Err(CalendarError::Io { path, source }) if source.kind() == io::ErrorKind::NotFound => {
            info!("No event file at {}, starting empty", path.display());
        }
        Err(err) => warn!("Could not load events: {err}"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&store)?);
        return Ok(());
    }

    if let Some(path) = &args.ics {
        EventStore::save_file(path, &store.to_ics(ICS_NAME).to_string())
            .context("Failed to export iCalendar")?;
        return Ok(());
    }

    let today = Local::now().date_naive();
    let stdin = io::stdin();
    Console::new(stdin.lock(), io::stdout().lock(), Session::new(today)).run(&mut store)?;

    EventStore::save_file(&args.output, &store.serialize_all())
        .context("Failed to save events")?;
    println!("Events saved to {}", args.output.display());

    if args.write_back {
        let text = store.to_load_text().context("Failed to write back events")?;
        EventStore::save_file(&args.events, &text).context("Failed to write back events")?;
    }

    Ok(())
}
