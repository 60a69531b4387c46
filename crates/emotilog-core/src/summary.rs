//! Daily summary ranking.
//!
//! Turns the per-emotion counts of one day into display rows: zero counts
//! dropped, percentage of the day's total attached, most frequent first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;
use crate::store::EmotionCounts;

/// One ranked row of a daily summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryRow {
    pub emotion: Emotion,
    pub count: usize,
    /// Share of the day's total, 0.0 to 100.0
    pub percentage: f64,
}

impl DailySummaryRow {
    /// One decimal place, e.g. `33.3%`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Summary of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    /// Number of entries logged on `day`
    pub total: usize,
    /// Non-zero emotions, highest count first
    pub rows: Vec<DailySummaryRow>,
}

impl DailySummary {
    /// Rank `counts`. Equal counts keep enumeration order.
    pub fn from_counts(day: NaiveDate, counts: &EmotionCounts) -> Self {
        let total: usize = counts.values().sum();
        Self {
            day,
            total,
            rows: rank(counts, total),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn rank(counts: &EmotionCounts, total: usize) -> Vec<DailySummaryRow> {
    let mut rows: Vec<DailySummaryRow> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(emotion, count)| DailySummaryRow {
            emotion: *emotion,
            count: *count,
            percentage: percentage(*count, total),
        })
        .collect();
    // sort_by is stable and `counts` iterates in enumeration order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
