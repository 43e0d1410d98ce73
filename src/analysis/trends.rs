use crate::models::health_log::{HealthLog, Metric};

use super::{stats, Report};

/// Entries needed before any trend is reported.
pub const MIN_ENTRIES: usize = 5;
/// Size of the "past week" window for the mood shift check.
pub const RECENT_WINDOW: usize = 7;

const CORRELATION_THRESHOLD: f64 = 0.5;
const MOOD_SHIFT_THRESHOLD: f64 = 0.5;

pub const INSUFFICIENT_DATA: &str = "Need more data to generate insights.";
pub const NO_TRENDS: &str = "No significant trends detected yet.";

/// Scan the log for correlations and a recent mood shift.
///
/// Checks run in a fixed order: mood vs. sleep, stress vs. activity, then
/// the last week's mood against the whole log.
pub fn analyze(log: &HealthLog) -> Report {
    if log.len() < MIN_ENTRIES {
        return Report::InsufficientData {
            message: INSUFFICIENT_DATA,
        };
    }

    let mut insights = Vec::new();

    if let Some(r) = strong_correlation(log, Metric::Mood, Metric::SleepHours) {
        let direction = if r > 0.0 { "positively" } else { "negatively" };
        insights.push(format!(
            "Your mood appears to be {direction} correlated with your sleep."
        ));
    }

    if let Some(r) = strong_correlation(log, Metric::Stress, Metric::ActivityMinutes) {
        let direction = if r > 0.0 { "increase" } else { "decrease" };
        insights.push(format!(
            "Your stress levels tend to {direction} with more physical activity."
        ));
    }

    if let Some(shift) = mood_shift(log) {
        insights.push(shift.to_string());
    }

    Report::from_findings(insights, NO_TRENDS)
}

fn strong_correlation(log: &HealthLog, a: Metric, b: Metric) -> Option<f64> {
    stats::pearson(&log.column(a), &log.column(b)).filter(|r| r.abs() > CORRELATION_THRESHOLD)
}

fn mood_shift(log: &HealthLog) -> Option<&'static str> {
    if log.len() < RECENT_WINDOW {
        return None;
    }
    let moods = log.column(Metric::Mood);
    let recent = stats::mean(&moods[moods.len() - RECENT_WINDOW..])?;
    let overall = stats::mean(&moods)?;

    if recent - overall > MOOD_SHIFT_THRESHOLD {
        Some("Your mood has been better than usual in the past week.")
    } else if overall - recent > MOOD_SHIFT_THRESHOLD {
        Some("Your mood has been lower than usual in the past week.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{benign, log};

    const POSITIVE_MOOD_SLEEP: &str = "Your mood appears to be positively correlated with your sleep.";
    const NEGATIVE_MOOD_SLEEP: &str = "Your mood appears to be negatively correlated with your sleep.";
    const STRESS_UP: &str = "Your stress levels tend to increase with more physical activity.";
    const STRESS_DOWN: &str = "Your stress levels tend to decrease with more physical activity.";
    const MOOD_BETTER: &str = "Your mood has been better than usual in the past week.";
    const MOOD_LOWER: &str = "Your mood has been lower than usual in the past week.";

    #[test]
    fn test_short_log_is_insufficient() {
        for len in 0..MIN_ENTRIES {
            assert_eq!(
                analyze(&benign(len).build()),
                Report::InsufficientData {
                    message: INSUFFICIENT_DATA
                },
                "length {len}"
            );
        }
    }

    #[test]
    fn test_short_log_ignores_column_content() {
        let log = log(4)
            .mood(&[1, 2, 3, 4])
            .stress(&[1, 2, 3, 4])
            .sleep(&[1.0, 2.0, 3.0, 4.0])
            .activity(&[10.0, 20.0, 30.0, 40.0])
            .build();
        assert!(analyze(&log).is_insufficient());
    }

    #[test]
    fn test_perfect_mood_sleep_correlation() {
        let log = benign(10)
            .mood(&[4, 5, 6, 7, 8, 4, 5, 6, 7, 8])
            .sleep(&[4.0, 5.0, 6.0, 7.0, 8.0, 4.0, 5.0, 6.0, 7.0, 8.0])
            .build();
        assert_eq!(
            analyze(&log),
            Report::Findings {
                items: vec![POSITIVE_MOOD_SLEEP.to_string()]
            }
        );
    }

    #[test]
    fn test_uncorrelated_mood_sleep_reports_nothing() {
        let log = benign(10)
            .mood(&[6, 4, 5, 4, 6, 6, 4, 5, 4, 6])
            .sleep(&[4.0, 5.0, 6.0, 7.0, 8.0, 4.0, 5.0, 6.0, 7.0, 8.0])
            .build();
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_negative_mood_sleep_correlation() {
        let log = log(5)
            .mood(&[3, 4, 5, 6, 7])
            .sleep(&[8.0, 7.0, 6.0, 5.0, 4.0])
            .build();
        assert_eq!(analyze(&log).items(), [NEGATIVE_MOOD_SLEEP.to_string()]);
    }

    #[test]
    fn test_stress_activity_directions() {
        let activity = [0.0, 30.0, 60.0, 90.0, 120.0];
        let up = log(5).stress(&[2, 3, 5, 6, 8]).activity(&activity).build();
        assert_eq!(analyze(&up).items(), [STRESS_UP.to_string()]);

        let down = log(5).stress(&[8, 6, 5, 3, 2]).activity(&activity).build();
        assert_eq!(analyze(&down).items(), [STRESS_DOWN.to_string()]);
    }

    #[test]
    fn test_weak_correlation_is_ignored() {
        let log = log(5)
            .mood(&[1, 3, 1, 3, 2])
            .sleep(&[1.0, 2.0, 3.0, 4.0, 2.5])
            .build();
        let r = stats::pearson(&log.column(Metric::Mood), &log.column(Metric::SleepHours)).unwrap();
        assert!(r > 0.0 && r < CORRELATION_THRESHOLD);
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_mood_shift_better() {
        // last 7 average 3.71, whole log 3.2
        let log = log(10).mood(&[2, 2, 2, 2, 2, 2, 2, 6, 6, 6]).build();
        assert_eq!(analyze(&log).items(), [MOOD_BETTER.to_string()]);
    }

    #[test]
    fn test_mood_shift_lower() {
        let log = log(10).mood(&[8, 8, 8, 2, 2, 2, 2, 2, 2, 2]).build();
        assert_eq!(analyze(&log).items(), [MOOD_LOWER.to_string()]);
    }

    #[test]
    fn test_small_mood_shift_is_ignored() {
        // last 7 average 5.43, whole log 5.0
        let log = log(10).mood(&[4, 4, 4, 5, 5, 5, 6, 6, 6, 5]).build();
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_mood_shift_needs_a_full_week() {
        let log = log(6).mood(&[1, 1, 1, 1, 9, 9]).build();
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_exactly_seven_entries_has_no_shift() {
        let log = log(7).mood(&[1, 2, 3, 4, 5, 6, 7]).build();
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_findings_follow_check_order() {
        let mood = [1, 1, 1, 2, 3, 4, 5, 6, 7, 8];
        let sleep: Vec<f64> = mood.iter().map(|&m| 10.0 - f64::from(m)).collect();
        let stress: Vec<i32> = (1..=10).collect();
        let activity: Vec<f64> = (1..=10).map(|i| f64::from(i) * 10.0).collect();
        let log = log(10)
            .mood(&mood)
            .sleep(&sleep)
            .stress(&stress)
            .activity(&activity)
            .build();
        assert_eq!(
            analyze(&log).items(),
            [
                NEGATIVE_MOOD_SLEEP.to_string(),
                STRESS_UP.to_string(),
                MOOD_BETTER.to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_columns_are_not_errors() {
        let log = log(8).activity(&[10.0; 8]).build();
        assert_eq!(analyze(&log), Report::Clear { message: NO_TRENDS });
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let mood = [1, 1, 1, 2, 3, 4, 5, 6, 7, 8];
        let sleep: Vec<f64> = mood.iter().map(|&m| f64::from(m)).collect();
        let log = log(10).mood(&mood).sleep(&sleep).build();
        let before = log.clone();
        assert_eq!(analyze(&log), analyze(&log));
        assert_eq!(log, before);
    }
}
