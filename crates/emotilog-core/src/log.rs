//! A single logged emotion.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

use crate::emotion::Emotion;

pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";
pub const TIME_FORMAT: &str = "%I:%M:%S %p";
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// Identifier of a log entry, unique within the store that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One emotion logged at one instant. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    id: EntryId,
    emotion: Emotion,
    timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub(crate) fn new(id: EntryId, emotion: Emotion, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            emotion,
            timestamp,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// e.g. `Feb 14, 2026 10:30:45 AM` in `tz`.
    pub fn formatted_timestamp<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.local(tz).format(TIMESTAMP_FORMAT).to_string()
    }

    /// e.g. `10:30:45 AM` in `tz`.
    pub fn formatted_time<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.local(tz).format(TIME_FORMAT).to_string()
    }

    /// e.g. `Feb 14, 2026` in `tz`.
    pub fn formatted_date<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.local(tz).format(DATE_FORMAT).to_string()
    }

    /// Render the timestamp in `tz` with a user-supplied strftime pattern.
    ///
    /// Fails instead of panicking when `pattern` has an unknown specifier.
    pub fn format_in<Tz: TimeZone>(&self, tz: &Tz, pattern: &str) -> Result<String, fmt::Error>
    where
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        write!(out, "{}", self.local(tz).format(pattern))?;
        Ok(out)
    }

    fn local<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.timestamp.with_timezone(tz)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.emotion.builtin_category().formatted_display(),
            self.formatted_timestamp(&Utc)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn entry() -> LogEntry {
        let ts = Utc.with_ymd_and_hms(2026, 2, 14, 10, 30, 45).unwrap();
        LogEntry::new(EntryId(7), Emotion::Happy, ts)
    }

    #[test]
    fn formats_timestamp_in_twelve_hour_clock() {
        let e = entry();
        assert_eq!(e.formatted_timestamp(&Utc), "Feb 14, 2026 10:30:45 AM");
        assert_eq!(e.formatted_time(&Utc), "10:30:45 AM");
        assert_eq!(e.formatted_date(&Utc), "Feb 14, 2026");
    }

    #[test]
    fn formatting_follows_the_given_zone() {
        let e = entry();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(e.formatted_time(&tokyo), "07:30:45 PM");
    }

    #[test]
    fn format_in_uses_the_given_pattern() {
        let e = entry();
        assert_eq!(e.format_in(&Utc, "%Y/%m/%d %H:%M").unwrap(), "2026/02/14 10:30");
    }

    #[test]
    fn format_in_reports_unknown_specifiers() {
        assert!(entry().format_in(&Utc, "%Q").is_err());
    }

    #[test]
    fn display_includes_glyph_name_and_time() {
        assert_eq!(entry().to_string(), "😊 Happy - Feb 14, 2026 10:30:45 AM");
    }

    #[test]
    fn serializes_with_plain_numeric_id() {
        let json = serde_json::to_value(entry()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["emotion"], "HAPPY");
    }
}
