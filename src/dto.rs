//! # Synapse — Request/Response DTOs
//!
//! API contract types that are not domain models.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Chart points are `[x, y]` pairs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::Report;
use crate::models::health_log::{HealthEntry, Metric};
use crate::session::{SessionSummary, View};

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub session: SessionSummary,
}

/// PUT /api/session/view
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

// ============================================================================
// Entries
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub entry: HealthEntry,
    pub entries: usize,
}

/// POST /api/log/reset
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

// ============================================================================
// Dashboard
// ============================================================================

/// One gauge on the dashboard: the raw value and its share of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Meter {
    pub value: f64,
    pub percent: i64,
}

#[derive(Debug, Serialize)]
pub struct LatestStats {
    pub date: Option<NaiveDate>,
    pub mood: Meter,
    pub stress: Meter,
    pub sleep_hours: Meter,
    pub activity_minutes: Meter,
}

/// Column-oriented series for the history charts, aligned by index.
#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub dates: Vec<Option<NaiveDate>>,
    pub mood: Vec<Option<f64>>,
    /// Trailing 7-entry mean of mood
    pub mood_rolling: Vec<Option<f64>>,
    pub stress: Vec<Option<f64>>,
    pub sleep_hours: Vec<Option<f64>>,
    pub activity_minutes: Vec<Option<f64>>,
}

#[derive(Debug, Serialize)]
pub struct SymptomNote {
    pub date: Option<NaiveDate>,
    pub symptoms: String,
}

/// GET /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub entries: usize,
    /// None for an empty log
    pub latest: Option<LatestStats>,
    pub series: ChartSeries,
    pub symptoms: Vec<SymptomNote>,
    pub insights: Report,
}

// ============================================================================
// Insights
// ============================================================================

/// Scatter of one metric against another with its fitted trend line.
#[derive(Debug, Serialize)]
pub struct CorrelationPanel {
    pub title: &'static str,
    pub x: Metric,
    pub y: Metric,
    pub points: Vec<[f64; 2]>,
    /// Pearson r; None when undefined
    pub correlation: Option<f64>,
    pub trend_line: Option<Vec<[f64; 2]>>,
}

/// GET /api/insights
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub trends: Report,
    pub anomalies: Report,
    pub correlations: Vec<CorrelationPanel>,
}
