use std::env;
use std::path::PathBuf;
use std::process;

use getopts::Options;

pub struct Args {
    pub events: PathBuf,
    pub output: PathBuf,
    pub write_back: bool,
    pub json: bool,
    pub ics: Option<PathBuf>,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "f",
        "events",
        "Event file to load on start [Default: events.txt]",
        "FILE",
    );
    opts.optopt(
        "o",
        "output",
        "File the event report is saved to on quit [Default: output.txt]",
        "FILE",
    );
    opts.optflag(
        "w",
        "write-back",
        "Also rewrite the event file with all events on quit [Default: false]",
    );
    opts.optflag("", "json", "Print the loaded events as JSON and exit");
    opts.optopt(
        "",
        "ics",
        "Export every occurrence as iCalendar to FILE and exit",
        "FILE",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    if let Some(extra) = matches.free.first() {
        eprintln!("Unexpected argument '{extra}'");
        process::exit(1);
    }

    let events = matches
        .opt_str("events")
        .map_or_else(|| PathBuf::from("events.txt"), PathBuf::from);

    let output = matches
        .opt_str("output")
        .map_or_else(|| PathBuf::from("output.txt"), PathBuf::from);

    Args {
        events,
        output,
        write_back: matches.opt_present("write-back"),
        json: matches.opt_present("json"),
        ics: matches.opt_str("ics").map(PathBuf::from),
    }
}
