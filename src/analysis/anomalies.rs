use crate::models::health_log::{HealthEntry, HealthLog, Metric};

use super::Report;

/// Entries needed before anomalies are reported. Larger than the streak
/// window on purpose; existing logs are judged against this threshold.
pub const MIN_ENTRIES: usize = 7;

const STREAK_DAYS: usize = 3;
const LOW_SLEEP_HOURS: f64 = 6.0;
const HIGH_STRESS: f64 = 7.0;
const MOOD_SWING: f64 = 3.0;

pub const INSUFFICIENT_DATA: &str = "Need more data to detect anomalies.";
pub const NO_ANOMALIES: &str = "No anomalies detected.";

/// Scan the most recent entries for streaks and sudden mood swings.
///
/// Checks run in a fixed order: low sleep, high stress, mood swing.
pub fn detect(log: &HealthLog) -> Report {
    if log.len() < MIN_ENTRIES {
        return Report::InsufficientData {
            message: INSUFFICIENT_DATA,
        };
    }

    let recent = log.tail(STREAK_DAYS);
    let mut anomalies = Vec::new();

    if streak(recent, Metric::SleepHours, |hours| hours < LOW_SLEEP_HOURS) {
        anomalies.push("You've had consistently low sleep for the past 3 days.".to_string());
    }

    if streak(recent, Metric::Stress, |level| level > HIGH_STRESS) {
        anomalies.push("Your stress levels have been high for the past 3 days.".to_string());
    }

    if let Some(direction) = mood_swing(log.entries()) {
        anomalies.push(format!(
            "Your mood changed significantly {direction} in your last entry."
        ));
    }

    Report::from_findings(anomalies, NO_ANOMALIES)
}

/// True when every entry in the window has a value that satisfies `pred`.
/// A missing value breaks the streak.
fn streak(window: &[HealthEntry], metric: Metric, pred: impl Fn(f64) -> bool) -> bool {
    window.len() == STREAK_DAYS && window.iter().all(|e| metric.of(e).is_some_and(&pred))
}

fn mood_swing(entries: &[HealthEntry]) -> Option<&'static str> {
    let [.., previous, latest] = entries else {
        return None;
    };
    // Stored moods are unbounded, so compare as f64
    let (previous, latest) = (Metric::Mood.of(previous)?, Metric::Mood.of(latest)?);
    if (latest - previous).abs() >= MOOD_SWING {
        Some(if latest > previous { "up" } else { "down" })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{benign, log};

    const LOW_SLEEP: &str = "You've had consistently low sleep for the past 3 days.";
    const HIGH_STRESS_MSG: &str = "Your stress levels have been high for the past 3 days.";
    const SWING_UP: &str = "Your mood changed significantly up in your last entry.";
    const SWING_DOWN: &str = "Your mood changed significantly down in your last entry.";

    #[test]
    fn test_short_log_is_insufficient() {
        for len in 0..MIN_ENTRIES {
            assert_eq!(
                detect(&benign(len).build()),
                Report::InsufficientData {
                    message: INSUFFICIENT_DATA
                },
                "length {len}"
            );
        }
    }

    #[test]
    fn test_guard_holds_even_when_window_would_fire() {
        // Six entries are enough for every window, but the guard is seven
        let log = benign(6)
            .sleep(&[7.0, 7.0, 7.0, 4.0, 4.0, 4.0])
            .stress(&[4, 4, 4, 9, 9, 9])
            .mood(&[5, 5, 5, 5, 1, 9])
            .build();
        assert!(detect(&log).is_insufficient());
    }

    #[test]
    fn test_benign_week_is_clear() {
        assert_eq!(
            detect(&benign(7).build()),
            Report::Clear {
                message: NO_ANOMALIES
            }
        );
    }

    #[test]
    fn test_low_sleep_streak() {
        let log = benign(7)
            .sleep(&[7.0, 7.0, 7.0, 7.0, 5.0, 4.0, 5.0])
            .build();
        assert_eq!(detect(&log).items(), [LOW_SLEEP.to_string()]);
    }

    #[test]
    fn test_low_sleep_is_strict() {
        let log = benign(7)
            .sleep(&[7.0, 7.0, 7.0, 7.0, 5.0, 6.0, 5.0])
            .build();
        assert!(detect(&log).items().is_empty());
    }

    #[test]
    fn test_high_stress_streak() {
        let log = benign(7).stress(&[4, 4, 4, 4, 8, 9, 8]).build();
        assert_eq!(detect(&log).items(), [HIGH_STRESS_MSG.to_string()]);
    }

    #[test]
    fn test_high_stress_is_strict() {
        let log = benign(7).stress(&[4, 4, 4, 4, 8, 7, 8]).build();
        assert!(detect(&log).items().is_empty());
    }

    #[test]
    fn test_streak_broken_by_earlier_day() {
        let log = benign(7).stress(&[4, 4, 4, 9, 9, 4, 9]).build();
        assert!(detect(&log).items().is_empty());
    }

    #[test]
    fn test_mood_swing_up() {
        let log = benign(7).mood(&[5, 5, 5, 5, 5, 2, 6]).build();
        assert_eq!(detect(&log).items(), [SWING_UP.to_string()]);
    }

    #[test]
    fn test_mood_swing_down() {
        let log = benign(7).mood(&[5, 5, 5, 5, 5, 8, 3]).build();
        assert_eq!(detect(&log).items(), [SWING_DOWN.to_string()]);
    }

    #[test]
    fn test_mood_swing_threshold() {
        let small = benign(7).mood(&[5, 5, 5, 5, 5, 5, 6]).build();
        assert!(detect(&small).items().is_empty());

        let exact = benign(7).mood(&[5, 5, 5, 5, 5, 5, 8]).build();
        assert_eq!(detect(&exact).items(), [SWING_UP.to_string()]);
    }

    #[test]
    fn test_all_checks_in_order() {
        let log = benign(8)
            .sleep(&[7.0, 7.0, 7.0, 7.0, 7.0, 3.0, 2.0, 4.0])
            .stress(&[3, 3, 3, 3, 3, 9, 10, 8])
            .mood(&[5, 5, 5, 5, 5, 5, 9, 2])
            .build();
        assert_eq!(
            detect(&log).items(),
            [
                LOW_SLEEP.to_string(),
                HIGH_STRESS_MSG.to_string(),
                SWING_DOWN.to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_columns_are_not_errors() {
        let log = log(7).sleep(&[4.0; 7]).build();
        assert_eq!(detect(&log).items(), [LOW_SLEEP.to_string()]);

        let empty_columns = log_with_gap_in_window();
        assert_eq!(
            detect(&empty_columns),
            Report::Clear {
                message: NO_ANOMALIES
            }
        );
    }

    fn log_with_gap_in_window() -> HealthLog {
        let mut entries = benign(7)
            .sleep(&[4.0; 7])
            .stress(&[9; 7])
            .build()
            .entries()
            .to_vec();
        entries[5].sleep_hours = None;
        entries[5].stress = None;
        entries[6].mood = None;
        HealthLog::from_entries(entries)
    }

    #[test]
    fn test_detect_is_idempotent() {
        let log = benign(7).mood(&[5, 5, 5, 5, 5, 2, 6]).build();
        assert_eq!(detect(&log), detect(&log));
    }

    #[test]
    fn test_mood_swing_with_extreme_stored_values() {
        let mut text = String::from("date,mood,stress,sleep_hours,activity_minutes,symptoms\n");
        for (day, mood) in [5, 5, 5, 5, 5, -10, i32::MAX].iter().enumerate() {
            text.push_str(&format!("2026-04-{:02},{mood},4,7.0,30.0,\n", day + 1));
        }
        let log = crate::store::decode(text.as_bytes()).unwrap();
        assert_eq!(detect(&log).items(), [SWING_UP.to_string()]);

        let log = benign(7).mood(&[5, 5, 5, 5, 5, i32::MAX, i32::MIN]).build();
        assert_eq!(detect(&log).items(), [SWING_DOWN.to_string()]);
    }
}
