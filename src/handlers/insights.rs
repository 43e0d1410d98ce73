use axum::{Extension, Json};

use crate::analysis::{self, stats, trends};
use crate::auth::middleware::AuthSession;
use crate::dto::{CorrelationPanel, InsightsResponse};
use crate::models::health_log::{HealthLog, Metric};

/// Entries needed before a fitted trend line is drawn.
const MIN_ENTRIES_FOR_FIT: usize = 3;
const TREND_LINE_POINTS: usize = 100;

struct PanelSpec {
    title: &'static str,
    x: Metric,
    y: Metric,
    /// Lower bound for the right end of the x range
    x_floor: f64,
}

const PANELS: [PanelSpec; 2] = [
    PanelSpec {
        title: "Sleep vs. Mood",
        x: Metric::SleepHours,
        y: Metric::Mood,
        x_floor: 12.0,
    },
    PanelSpec {
        title: "Activity vs. Stress",
        x: Metric::ActivityMinutes,
        y: Metric::Stress,
        x_floor: 120.0,
    },
];

pub async fn get_insights(Extension(auth): Extension<AuthSession>) -> Json<InsightsResponse> {
    let session = auth.handle.lock().await;
    let response = build_insights(&session.log);
    tracing::debug!(
        username = %session.username,
        trends = response.trends.items().len(),
        anomalies = response.anomalies.items().len(),
        "Insights computed"
    );
    Json(response)
}

pub fn build_insights(log: &HealthLog) -> InsightsResponse {
    // Scatter panels share the trend analysis threshold
    let correlations = if log.len() >= trends::MIN_ENTRIES {
        PANELS.iter().map(|spec| correlation_panel(log, spec)).collect()
    } else {
        Vec::new()
    };

    InsightsResponse {
        trends: analysis::analyze(log),
        anomalies: analysis::detect(log),
        correlations,
    }
}

fn correlation_panel(log: &HealthLog, spec: &PanelSpec) -> CorrelationPanel {
    let xs = log.column(spec.x);
    let ys = log.column(spec.y);
    let points: Vec<[f64; 2]> = stats::paired(&xs, &ys)
        .into_iter()
        .map(|(x, y)| [x, y])
        .collect();

    let trend_line = if log.len() >= MIN_ENTRIES_FOR_FIT {
        stats::linear_fit(&xs, &ys).map(|fit| {
            let x_max = points
                .iter()
                .map(|[x, _]| *x)
                .fold(spec.x_floor, f64::max);
            fit.sample(0.0, x_max, TREND_LINE_POINTS)
        })
    } else {
        None
    };

    CorrelationPanel {
        title: spec.title,
        x: spec.x,
        y: spec.y,
        correlation: stats::pearson(&xs, &ys),
        points,
        trend_line,
    }
}
