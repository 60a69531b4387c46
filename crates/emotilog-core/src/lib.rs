//! # Emotilog Core Library
//!
//! This library provides the core logic for the Emotilog emotion journal.
//! The CLI binary is a thin layer over it: it owns one [`EmotionLogStore`],
//! feeds it user commands and renders what comes back.
//!
//! ## Architecture
//!
//! - **Emotions**: a closed set of categories ([`Emotion`]) with display
//!   attributes held in a [`CategoryTable`]
//! - **Store**: process-lifetime, newest-first collection of [`LogEntry`]
//!   values with per-day filtering and counting
//! - **Summary**: ranks a day's counts into [`DailySummaryRow`]s
//! - **Storage**: TOML-based configuration ([`Config`])
//!
//! Logs are not persisted; a restart starts from an empty store.

pub mod emotion;
pub mod error;
pub mod log;
pub mod storage;
pub mod store;
pub mod summary;

pub use emotion::{CategoryTable, Emotion, EmotionCategory, Rgb};
pub use error::{ConfigError, ParseEmotionError};
pub use log::{EntryId, LogEntry};
pub use storage::{CategoryOverride, Config, ZoneSetting};
pub use store::{EmotionCounts, EmotionLogStore};
pub use summary::{DailySummary, DailySummaryRow};
