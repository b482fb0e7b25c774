mod app;
mod help;
use crate::app::App;
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use datepick::{DateFormat, DatePickerState, DateRange, PickerConfig};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    format: Option<String>,
    min: Option<Date>,
    max: Option<Date>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("format") => {
                    opts.format = Some(parser.value()?.string()?);
                }
                Arg::Long("min") => opts.min = Some(parse_ymd(parser.value()?.string()?)?),
                Arg::Long("max") => opts.max = Some(parse_ymd(parser.value()?.string()?)?),
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(parse_ymd(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let config = match &opts.format {
                    Some(fmt) => PickerConfig::new(DateFormat::new(fmt)?),
                    None => PickerConfig::default(),
                };
                let date = opts.date.unwrap_or(today);
                let picker = DatePickerState::new(date, config, DateRange::new(opts.min, opts.max))
                    .id("demo")
                    .name("Date")
                    .today(today);
                let chosen = with_terminal(|terminal| {
                    App::new(date, picker)
                        .run(terminal)
                        .context("failed to run picker")
                })?;
                println!("{chosen}");
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [options] [YYYY-MM-DD]");
                println!();
                println!("Pick a date in the terminal, then print it");
                println!();
                println!("Options:");
                println!("  -f, --format <FMT>    Date format description [default: \"[year]-[month]-[day]\"]");
                println!("      --min <DATE>      Earliest selectable date (YYYY-MM-DD)");
                println!("      --max <DATE>      Latest selectable date (YYYY-MM-DD)");
                println!("      --log-file <PATH> Write debug logs to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn parse_ymd(value: String) -> Result<Date, lexopt::Error> {
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

// Logs go to a file, as anything written to stderr would land on top of the
// calendar
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Ignore errors, as the terminal is being torn down either way
    let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let args = std::iter::once("datepick")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect::<Vec<_>>();
        Command::from_parser(Parser::from_iter(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--format",
            "[day]/[month]/[year]",
            "--min",
            "2024-01-01",
            "--max=2024-12-31",
            "--log-file",
            "picker.log",
            "2024-06-15",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(RunOptions {
                date: Some(date!(2024 - 06 - 15)),
                format: Some(String::from("[day]/[month]/[year]")),
                min: Some(date!(2024 - 01 - 01)),
                max: Some(date!(2024 - 12 - 31)),
                log_file: Some(PathBuf::from("picker.log")),
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["2024-06-15", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["--min", "soon"]).is_err());
    }

    #[test]
    fn test_extra_positional() {
        assert!(parse(&["2024-06-15", "2024-06-16"]).is_err());
    }
}
