use axum::{Extension, Json};

use crate::analysis::{self, stats};
use crate::auth::middleware::AuthSession;
use crate::dto::{ChartSeries, DashboardResponse, LatestStats, Meter, SymptomNote};
use crate::models::health_log::{HealthEntry, HealthLog, Metric};

const MOOD_SCALE: f64 = 10.0;
const STRESS_SCALE: f64 = 10.0;
const SLEEP_SCALE: f64 = 12.0;
const ACTIVITY_SCALE: f64 = 120.0;
const ROLLING_WINDOW: usize = 7;

pub async fn get_dashboard(Extension(auth): Extension<AuthSession>) -> Json<DashboardResponse> {
    let session = auth.handle.lock().await;
    Json(build_dashboard(session.username.as_str(), &session.log))
}

pub fn build_dashboard(username: &str, log: &HealthLog) -> DashboardResponse {
    let mood = log.column(Metric::Mood);
    DashboardResponse {
        username: username.to_string(),
        entries: log.len(),
        latest: log.latest().map(latest_stats),
        series: ChartSeries {
            dates: log.entries().iter().map(|e| e.date).collect(),
            mood_rolling: stats::rolling_mean(&mood, ROLLING_WINDOW),
            mood,
            stress: log.column(Metric::Stress),
            sleep_hours: log.column(Metric::SleepHours),
            activity_minutes: log.column(Metric::ActivityMinutes),
        },
        symptoms: log
            .entries()
            .iter()
            .filter(|e| !e.symptoms.trim().is_empty())
            .map(|e| SymptomNote {
                date: e.date,
                symptoms: e.symptoms.clone(),
            })
            .collect(),
        insights: analysis::analyze(log),
    }
}

fn latest_stats(entry: &HealthEntry) -> LatestStats {
    LatestStats {
        date: entry.date,
        mood: meter(Metric::Mood.of(entry), MOOD_SCALE),
        stress: meter(Metric::Stress.of(entry), STRESS_SCALE),
        sleep_hours: meter(Metric::SleepHours.of(entry), SLEEP_SCALE),
        activity_minutes: meter(Metric::ActivityMinutes.of(entry), ACTIVITY_SCALE),
    }
}

/// A missing value reads as zero; the percentage is truncated, not rounded.
fn meter(value: Option<f64>, scale: f64) -> Meter {
    let value = value.unwrap_or(0.0);
    Meter {
        value,
        percent: (value / scale * 100.0) as i64,
    }
}
