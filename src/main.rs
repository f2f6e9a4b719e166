mod app;
mod calendar;
mod help;
mod listener;
mod names;
mod theme;
use crate::app::App;
use crate::calendar::{CalendarState, LocalClock, PickerOptions};
use crate::names::NameTable;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::cell::Cell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use time::{format_description::FormatItem, macros::format_description, Date};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    picker: PickerOptions,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("label") => {
                    opts.picker.label = parser.value()?.string()?;
                }
                Arg::Long("id") => opts.picker.id = parser.value()?.string()?,
                Arg::Long("lang") => {
                    opts.picker.names = parser.value()?.parse_with(NameTable::for_language)?;
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.picker.initial_date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.picker.initial_date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // Must happen before anything has a chance to spawn a thread
                let clock = LocalClock::new().context("failed to determine local time zone")?;
                if let Some(path) = opts.log_file.as_deref() {
                    init_logging(path)?;
                }
                let chosen = Rc::new(Cell::new(None));
                let sink = Rc::clone(&chosen);
                let picker = CalendarState::new(opts.picker, clock).on_change(move |date| {
                    tracing::info!(%date, "date selected");
                    sink.set(Some(date));
                });
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker).run(terminal)?;
                    Ok(())
                })?;
                if let Some(date) = chosen.get() {
                    println!("{}", date.format(&YMD_FMT)?);
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a calendar in the terminal and print it");
                println!();
                println!("Options:");
                println!("  -l, --label <TEXT>     Caption shown above the date field [default: Date]");
                println!("      --id <ID>          Identifier used in log output [default: datepicker]");
                println!("      --lang <en|de>     Language of month and weekday names [default: en]");
                println!("      --log-file <PATH>  Write diagnostic logs to PATH");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// Logs go to a file, as anything written to the terminal would be drawn over
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cmd = parse(&[]).unwrap();
        assert_eq!(cmd, Command::Run(RunOptions::default()));
        let Command::Run(opts) = cmd else {
            unreachable!()
        };
        assert_eq!(opts.picker.label, "Date");
        assert_eq!(opts.picker.id, "datepicker");
        assert_eq!(opts.picker.initial_date, None);
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--label",
            "Due date",
            "--id=due",
            "--lang",
            "de",
            "--log-file",
            "picker.log",
            "2024-02-15",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(RunOptions {
                picker: PickerOptions {
                    initial_date: Some(date!(2024 - 02 - 15)),
                    label: String::from("Due date"),
                    id: String::from("due"),
                    names: NameTable::GERMAN,
                },
                log_file: Some(PathBuf::from("picker.log")),
            })
        );
    }

    #[test]
    fn test_short_label() {
        let Command::Run(opts) = parse(&["-l", "When"]).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(opts.picker.label, "When");
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["2024-02-15", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            parse(&["2023-02-29"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["tomorrow"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            parse(&["--lang", "fr"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_extra_arguments() {
        assert!(parse(&["2024-02-15", "2024-02-16"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--label"]).is_err());
    }
}
