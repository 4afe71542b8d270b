mod app;
mod calendar;
mod config;
mod daylist;
mod dialog;
mod help;
mod theme;
mod yearpick;
use crate::app::App;
use crate::config::{PickerConfig, DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

static WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        week_start: Option<u8>,
        years: Option<(i32, i32)>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut week_start = None;
        let mut years = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    week_start = Some(parser.value()?.parse_with(parse_week_start)?);
                }
                Arg::Short('y') | Arg::Long("years") => {
                    years = Some(parser.value()?.parse_with(parse_year_range)?);
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
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
        Ok(Command::Run {
            date,
            week_start,
            years,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                week_start,
                years,
                log_file,
            } => {
                let mut config = PickerConfig::default();
                if let Some(day) = week_start {
                    config
                        .set_first_day_of_week(day)
                        .context("invalid --week-start")?;
                }
                if let Some((start, end)) = years {
                    config
                        .set_year_range(start, end)
                        .context("invalid --years")?;
                }
                // Determine the local date before the logger starts any
                // threads
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = log_file.as_deref().map(init_logging).transpose()?;
                let mut app = App::new(config, today);
                if let Some(date) = date {
                    app = app.start_date(date);
                }
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(app.run(terminal)?)
                })?;
                if let Some(date) = picked {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: calpick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal calendar date picker with scrollable month grids");
                println!();
                println!("Options:");
                println!("  -w, --week-start DAY   First day of the week, as a weekday name or");
                println!("                         a number from 1 (Sunday) to 7 (Saturday)");
                println!(
                    "  -y, --years START:END  Range of selectable years [default: {DEFAULT_START_YEAR}:{DEFAULT_END_YEAR}]"
                );
                println!("      --log-file PATH    Write log messages to PATH");
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

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
enum ArgError {
    #[error("expected a weekday name or a number from 1 to 7")]
    InvalidWeekday,
    #[error("expected a year range of the form START:END")]
    InvalidYearRange,
}

/// Parses a weekday name (or any unambiguous prefix of one) or number into
/// the 1 (Sunday) through 7 (Saturday) numbering.  Numbers are range-checked
/// later, when they are applied to the configuration.
fn parse_week_start(s: &str) -> Result<u8, ArgError> {
    if let Ok(n) = s.parse::<u8>() {
        return Ok(n);
    }
    let s = s.to_ascii_lowercase();
    if s.is_empty() {
        return Err(ArgError::InvalidWeekday);
    }
    let mut matches = WEEKDAY_NAMES
        .iter()
        .zip(1u8..)
        .filter(|(name, _)| name.starts_with(&s));
    match (matches.next(), matches.next()) {
        (Some((_, n)), None) => Ok(n),
        _ => Err(ArgError::InvalidWeekday),
    }
}

fn parse_year_range(s: &str) -> Result<(i32, i32), ArgError> {
    let (start, end) = s.split_once(':').ok_or(ArgError::InvalidYearRange)?;
    let start = start
        .trim()
        .parse::<i32>()
        .map_err(|_| ArgError::InvalidYearRange)?;
    let end = end
        .trim()
        .parse::<i32>()
        .map_err(|_| ArgError::InvalidYearRange)?;
    Ok((start, end))
}

fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}
