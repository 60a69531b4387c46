//! Property tests for the log store invariants.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use emotilog_core::{DailySummary, Emotion, EmotionLogStore};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn emotion() -> impl Strategy<Value = Emotion> {
    prop::sample::select(Emotion::ALL.to_vec())
}

/// Instants spread over ten days, with plenty of collisions.
fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..10 * 24 * 60).prop_map(|minutes| base() + Duration::minutes(minutes))
}

#[derive(Debug, Clone)]
enum Op {
    Append(Emotion, DateTime<Utc>),
    RemoveAt(usize),
    RemoveStranger(Emotion, DateTime<Utc>),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (emotion(), timestamp()).prop_map(|(e, t)| Op::Append(e, t)),
        2 => any::<usize>().prop_map(Op::RemoveAt),
        1 => (emotion(), timestamp()).prop_map(|(e, t)| Op::RemoveStranger(e, t)),
        1 => Just(Op::Clear),
    ]
}

fn ten_days() -> Vec<NaiveDate> {
    (0..10).map(|d| (base() + Duration::days(d)).date_naive()).collect()
}

proptest! {
    #[test]
    fn all_stays_sorted_newest_first(ops in prop::collection::vec(op(), 0..80)) {
        let mut store = EmotionLogStore::with_timezone(Utc);
        let mut strangers = EmotionLogStore::with_timezone(Utc);
        for op in ops {
            match op {
                Op::Append(e, t) => { store.append(e, Some(t)); }
                Op::RemoveAt(i) => {
                    let all = store.all();
                    if !all.is_empty() {
                        store.remove(&all[i % all.len()]);
                    }
                }
                Op::RemoveStranger(e, t) => {
                    let stranger = strangers.append(e, Some(t));
                    store.remove(&stranger);
                }
                Op::Clear => store.clear(),
            }
            let all = store.all();
            prop_assert!(all.windows(2).all(|w| w[0].timestamp() >= w[1].timestamp()));
        }
    }

    #[test]
    fn count_tracks_appends_removes_and_clears(ops in prop::collection::vec(op(), 0..80)) {
        let mut store = EmotionLogStore::with_timezone(Utc);
        let mut strangers = EmotionLogStore::with_timezone(Utc);
        let mut expected = 0usize;
        for op in ops {
            match op {
                Op::Append(e, t) => {
                    store.append(e, Some(t));
                    expected += 1;
                }
                Op::RemoveAt(i) => {
                    let all = store.all();
                    if !all.is_empty() && store.remove(&all[i % all.len()]) {
                        expected -= 1;
                    }
                }
                Op::RemoveStranger(e, t) => {
                    // Ids from another store may coincide, so only count real removals.
                    let stranger = strangers.append(e, Some(t));
                    if store.remove(&stranger) {
                        expected -= 1;
                    }
                }
                Op::Clear => {
                    store.clear();
                    expected = 0;
                }
            }
            prop_assert_eq!(store.count(), expected);
            prop_assert_eq!(store.all().len(), expected);
        }
    }

    #[test]
    fn summary_counts_match_day_filter(
        logs in prop::collection::vec((emotion(), timestamp()), 0..60)
    ) {
        let mut store = EmotionLogStore::with_timezone(Utc);
        for (e, t) in &logs {
            store.append(*e, Some(*t));
        }
        let mut grand_total = 0;
        for day in ten_days() {
            let counts = store.summarize(day);
            prop_assert_eq!(counts.len(), Emotion::ALL.len());
            let sum: usize = counts.values().sum();
            prop_assert_eq!(sum, store.for_day(day).len());
            grand_total += sum;
        }
        prop_assert_eq!(grand_total, logs.len());
    }

    #[test]
    fn percentages_sum_to_one_hundred_or_are_all_zero(
        logs in prop::collection::vec((emotion(), timestamp()), 0..60)
    ) {
        let mut store = EmotionLogStore::with_timezone(Utc);
        for (e, t) in &logs {
            store.append(*e, Some(*t));
        }
        for day in ten_days() {
            let summary: DailySummary = store.daily_summary(day);
            let sum: f64 = summary.rows.iter().map(|r| r.percentage).sum();
            if summary.total > 0 {
                prop_assert!((sum - 100.0).abs() < 1e-6);
            } else {
                prop_assert!(summary.rows.iter().all(|r| r.percentage == 0.0));
            }
            prop_assert!(summary.rows.windows(2).all(|w| w[0].count >= w[1].count));
            prop_assert!(summary.rows.iter().all(|r| r.count > 0));
        }
    }
}
