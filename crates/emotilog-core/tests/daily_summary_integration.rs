//! Integration tests for logging emotions and summarizing a day.
//!
//! Drives the store the way the CLI does: categories from configuration,
//! entries appended in arbitrary order, then per-day views and ranking.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use emotilog_core::{CategoryOverride, Config, Emotion, EmotionLogStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_three_log_scenario() {
    let mut store = EmotionLogStore::with_timezone(Utc);
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();
    let t3 = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();

    store.append(Emotion::Happy, Some(t1));
    store.append(Emotion::Sad, Some(t2));
    store.append(Emotion::Happy, Some(t3));

    let counts = store.summarize(day(2024, 1, 1));
    for (emotion, count) in &counts {
        let expected = match emotion {
            Emotion::Happy | Emotion::Sad => 1,
            _ => 0,
        };
        assert_eq!(*count, expected, "{emotion}");
    }
    assert_eq!(store.for_day(day(2024, 1, 1)).len(), 2);

    let all: Vec<_> = store
        .all()
        .into_iter()
        .map(|e| (e.emotion(), e.timestamp()))
        .collect();
    assert_eq!(
        all,
        vec![(Emotion::Happy, t3), (Emotion::Sad, t2), (Emotion::Happy, t1)]
    );
}

#[test]
fn test_local_calendar_day_of_local_noon() {
    let mut store = EmotionLogStore::new();
    let noon = Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc);
    store.append(Emotion::Grateful, Some(noon));

    assert_eq!(store.day_of(noon), day(2024, 6, 15));
    assert_eq!(store.for_day(day(2024, 6, 15)).len(), 1);
    assert!(store.for_day(day(2024, 6, 14)).is_empty());
}

#[test]
fn test_summary_rendered_with_configured_categories() {
    let config = Config {
        categories: vec![CategoryOverride {
            identifier: "ANXIOUS".to_string(),
            display_name: Some("Nervous".to_string()),
            glyph: None,
            color_code: Some("#12".to_string()),
        }],
        ..Config::default()
    };
    let table = config.category_table().unwrap();

    let mut store = EmotionLogStore::with_timezone(Utc);
    let base = Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();
    for (i, emotion) in [Emotion::Anxious, Emotion::Calm, Emotion::Anxious]
        .into_iter()
        .enumerate()
    {
        store.append(emotion, Some(base + chrono::Duration::hours(i as i64)));
    }

    let summary = store.daily_summary(day(2024, 2, 2));
    let lines: Vec<String> = summary
        .rows
        .iter()
        .map(|row| {
            let category = table.get(row.emotion);
            format!(
                "{} {} {} {}",
                category.formatted_display(),
                row.count,
                row.percentage_label(),
                category.color_or(config.neutral_color())
            )
        })
        .collect();

    assert_eq!(
        lines,
        vec![
            "😰 Nervous 2 66.7% #808080".to_string(),
            "😌 Calm 1 33.3% #20B2AA".to_string(),
        ]
    );
}

#[test]
fn test_unique_days_and_delete_flow() {
    let mut store = EmotionLogStore::with_timezone(Utc);
    let a = store.append(
        Emotion::Tired,
        Some(Utc.with_ymd_and_hms(2024, 4, 1, 22, 0, 0).unwrap()),
    );
    store.append(
        Emotion::Excited,
        Some(Utc.with_ymd_and_hms(2024, 4, 3, 7, 0, 0).unwrap()),
    );

    assert_eq!(store.unique_days(), vec![day(2024, 4, 3), day(2024, 4, 1)]);
    assert!(store.remove(&a));
    assert_eq!(store.unique_days(), vec![day(2024, 4, 3)]);
    assert_eq!(store.count(), 1);
}
