//! Interactive logging session.
//!
//! A session owns one fresh [`EmotionLogStore`] and reads commands line by
//! line from stdin or a script file. Nothing is persisted: when the session
//! ends, its logs are gone.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use emotilog_core::{
    CategoryTable, Config, Emotion, EmotionLogStore, EntryId, LogEntry, Rgb, ZoneSetting,
};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
commands:
  log <emotion> [YYYY-MM-DDTHH:MM[:SS]]  log an emotion (now by default)
  list                                   all logs, newest first
  day [YYYY-MM-DD]                       logs of one day (today by default)
  summary [YYYY-MM-DD]                   ranked counts for one day
  dates                                  days that have logs
  delete <id>                            delete one log
  clear                                  delete every log
  count                                  number of logs
  help                                   this text
  quit                                   end the session";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Log {
        emotion: Emotion,
        at: Option<NaiveDateTime>,
    },
    List,
    Day(Option<NaiveDate>),
    Summary(Option<NaiveDate>),
    Dates,
    Delete(EntryId),
    Clear,
    Count,
    Help,
    Quit,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("invalid time '{s}', expected YYYY-MM-DDTHH:MM[:SS]"))
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?;
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument '{extra}'"));
        }

        let command = match (name.to_ascii_lowercase().as_str(), arg) {
            ("log", Some(emotion)) => SessionCommand::Log {
                emotion: emotion.parse().map_err(|e| format!("{e}"))?,
                at: None,
            },
            ("log", None) => return Err("usage: log <emotion> [time]".to_string()),
            ("list", None) => SessionCommand::List,
            ("day", date) => SessionCommand::Day(date.map(parse_date).transpose()?),
            ("summary", date) => SessionCommand::Summary(date.map(parse_date).transpose()?),
            ("dates", None) => SessionCommand::Dates,
            ("delete", Some(id)) => SessionCommand::Delete(EntryId(
                id.trim_start_matches('#')
                    .parse()
                    .map_err(|_| format!("invalid id '{id}'"))?,
            )),
            ("delete", None) => return Err("usage: delete <id>".to_string()),
            ("clear", None) => SessionCommand::Clear,
            ("count", None) => SessionCommand::Count,
            ("help", None) => SessionCommand::Help,
            ("quit" | "exit", None) => SessionCommand::Quit,
            (_, Some(extra)) if is_known(name) => {
                return Err(format!("unexpected argument '{extra}'"))
            }
            _ => return Err(format!("unknown command '{name}', try 'help'")),
        };
        Ok(command)
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "list" | "dates" | "clear" | "count" | "help" | "quit" | "exit"
    )
}

/// Parse a full line, including the optional time of `log`.
pub fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let is_log = words
        .next()
        .is_some_and(|w| w.eq_ignore_ascii_case("log"));
    if is_log {
        let rest: Vec<&str> = words.collect();
        return match rest.as_slice() {
            [emotion] => format!("log {emotion}").parse(),
            [emotion, at] => Ok(SessionCommand::Log {
                emotion: emotion.parse().map_err(|e| format!("{e}"))?,
                at: Some(parse_datetime(at)?),
            }),
            [] => Err("usage: log <emotion> [time]".to_string()),
            _ => Err(format!("unexpected argument '{}'", rest[2])),
        };
    }
    line.parse()
}

/// A running session over one store.
pub struct Session<'a, Tz: TimeZone> {
    store: EmotionLogStore<Tz>,
    table: CategoryTable,
    config: &'a Config,
    neutral: Rgb,
    json: bool,
}

impl<'a, Tz> Session<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(store: EmotionLogStore<Tz>, table: CategoryTable, config: &'a Config, json: bool) -> Self {
        Self {
            store,
            table,
            config,
            neutral: config.neutral_color(),
            json,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &EmotionLogStore<Tz> {
        &self.store
    }

    /// Read and execute commands until end of input or `quit`.
    ///
    /// Bad lines are reported on stderr and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let command = match parse_line(line) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("error: {e}");
                    continue;
                }
            };
            if command == SessionCommand::Quit {
                break;
            }
            if let Err(e) = self.execute(command, out) {
                eprintln!("error: {e}");
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn execute<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match command {
            SessionCommand::Log { emotion, at } => {
                let timestamp = match at {
                    Some(naive) => Some(
                        self.store
                            .timezone()
                            .from_local_datetime(&naive)
                            .earliest()
                            .ok_or_else(|| format!("{naive} does not exist in the configured time zone"))?
                            .with_timezone(&Utc),
                    ),
                    None => None,
                };
                let entry = self.store.append(emotion, timestamp);
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&entry)?)?;
                } else {
                    writeln!(out, "logged {}", self.entry_line(&entry)?)?;
                }
            }
            SessionCommand::List => {
                let entries = self.store.all();
                self.write_entries(&entries, "no logs", out)?;
            }
            SessionCommand::Day(date) => {
                let day = date.unwrap_or_else(|| self.today());
                let entries = self.store.for_day(day);
                self.write_entries(&entries, "No logs for this date", out)?;
            }
            SessionCommand::Summary(date) => {
                let day = date.unwrap_or_else(|| self.today());
                let summary = self.store.daily_summary(day);
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&summary)?)?;
                    return Ok(());
                }
                writeln!(out, "{}", day.format("%A, %b %d, %Y"))?;
                writeln!(out, "Total Logs: {}", summary.total)?;
                if summary.is_empty() {
                    writeln!(out, "No logs for this date")?;
                }
                for row in &summary.rows {
                    let category = self.table.get(row.emotion);
                    writeln!(
                        out,
                        "{}  {}  {}  {}",
                        category.formatted_display(),
                        row.count,
                        row.percentage_label(),
                        category.color_or(self.neutral)
                    )?;
                }
            }
            SessionCommand::Dates => {
                let days = self.store.unique_days();
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&days)?)?;
                } else if days.is_empty() {
                    writeln!(out, "no logs")?;
                } else {
                    for day in days {
                        writeln!(out, "{}", render(day.format(&self.config.display.date_format))?)?;
                    }
                }
            }
            SessionCommand::Delete(id) => {
                let removed = self
                    .store
                    .remove_by_id(id)
                    .ok_or_else(|| format!("no log with id {id}"))?;
                if self.json {
                    writeln!(out, "{}", serde_json::json!({ "deleted": removed }))?;
                } else {
                    writeln!(out, "deleted {}", self.entry_line(&removed)?)?;
                }
            }
            SessionCommand::Clear => {
                let count = self.store.count();
                self.store.clear();
                if self.json {
                    writeln!(out, "{}", serde_json::json!({ "cleared": count }))?;
                } else {
                    writeln!(out, "cleared {count} logs")?;
                }
            }
            SessionCommand::Count => {
                if self.json {
                    writeln!(out, "{}", serde_json::json!({ "count": self.store.count() }))?;
                } else {
                    writeln!(out, "{}", self.store.count())?;
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.store.day_of(Utc::now())
    }

    fn entry_line(&self, entry: &LogEntry) -> Result<String, DisplayPatternError> {
        let pattern = format!(
            "{} {}",
            self.config.display.date_format, self.config.display.time_format
        );
        let when = entry
            .format_in(self.store.timezone(), &pattern)
            .map_err(|_| DisplayPatternError(pattern))?;
        Ok(format!(
            "#{}  {}  {}",
            entry.id(),
            self.table.get(entry.emotion()).formatted_display(),
            when
        ))
    }

    fn write_entries<W: Write>(
        &self,
        entries: &[LogEntry],
        empty: &str,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(entries)?)?;
        } else if entries.is_empty() {
            writeln!(out, "{empty}")?;
        } else {
            for entry in entries {
                writeln!(out, "{}", self.entry_line(entry)?)?;
            }
        }
        Ok(())
    }
}

/// A configured date/time pattern chrono could not render.
#[derive(Debug)]
pub struct DisplayPatternError(String);

impl fmt::Display for DisplayPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot render date/time pattern '{}'", self.0)
    }
}

impl std::error::Error for DisplayPatternError {}

/// Render into a string first; `io::Write` panics on a failing `Display`.
fn render(value: impl Display) -> Result<String, fmt::Error> {
    let mut s = String::new();
    fmt::write(&mut s, format_args!("{value}"))?;
    Ok(s)
}

pub fn run(script: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let table = config.category_table()?;
    tracing::debug!(zone = %config.display.time_zone, json, "starting session");

    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.zone()? {
        ZoneSetting::Local => {
            Session::new(EmotionLogStore::new(), table, &config, json).run(input, &mut out)?
        }
        ZoneSetting::Fixed(offset) => Session::new(
            EmotionLogStore::with_timezone(offset),
            table,
            &config,
            json,
        )
        .run(input, &mut out)?,
    }
    Ok(())
}
