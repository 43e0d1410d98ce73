use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Column order of a stored log file.
pub const COLUMNS: [&str; 6] = [
    "date",
    "mood",
    "stress",
    "sleep_hours",
    "activity_minutes",
    "symptoms",
];

/// One day of self-reported health data.
///
/// Every numeric column is optional so a stored file that lacks a column,
/// or leaves a cell empty, still loads. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub mood: Option<i32>,
    #[serde(default)]
    pub stress: Option<i32>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub activity_minutes: Option<f64>,
    #[serde(default)]
    pub symptoms: String,
}

/// The numeric columns of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Mood,
    Stress,
    SleepHours,
    ActivityMinutes,
}

impl Metric {
    pub fn of(self, entry: &HealthEntry) -> Option<f64> {
        match self {
            Metric::Mood => entry.mood.map(f64::from),
            Metric::Stress => entry.stress.map(f64::from),
            Metric::SleepHours => entry.sleep_hours,
            Metric::ActivityMinutes => entry.activity_minutes,
        }
    }
}

/// A user's entries in the order they were added.
///
/// Insertion order is treated as chronological; the log is never re-sorted
/// by date, merged, or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HealthLog {
    entries: Vec<HealthEntry>,
}

impl HealthLog {
    pub fn from_entries(entries: Vec<HealthEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HealthEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HealthEntry> {
        self.entries.last()
    }

    /// The last `n` entries, or the whole log when it is shorter.
    pub fn tail(&self, n: usize) -> &[HealthEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn push(&mut self, entry: HealthEntry) {
        self.entries.push(entry);
    }

    /// One column of the log, `None` where the entry has no value.
    pub fn column(&self, metric: Metric) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| metric.of(e)).collect()
    }
}

fn default_mood() -> i32 {
    5
}

fn default_stress() -> i32 {
    5
}

fn default_sleep_hours() -> f64 {
    7.0
}

fn default_activity_minutes() -> f64 {
    30.0
}

/// POST /api/entries
#[derive(Debug, Deserialize, Validate)]
pub struct NewEntryRequest {
    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,

    #[serde(default = "default_mood")]
    #[validate(range(min = 0, max = 10, message = "Mood must be between 0 and 10"))]
    pub mood: i32,

    #[serde(default = "default_stress")]
    #[validate(range(min = 0, max = 10, message = "Stress must be between 0 and 10"))]
    pub stress: i32,

    #[serde(default = "default_sleep_hours")]
    #[validate(range(min = 0.0, max = 12.0, message = "Sleep hours must be between 0 and 12"))]
    pub sleep_hours: f64,

    #[serde(default = "default_activity_minutes")]
    #[validate(range(
        min = 0.0,
        max = 180.0,
        message = "Activity minutes must be between 0 and 180"
    ))]
    pub activity_minutes: f64,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Symptoms must be at most 2000 characters"))]
    pub symptoms: String,
}

impl NewEntryRequest {
    pub fn into_entry(self, today: NaiveDate) -> HealthEntry {
        HealthEntry {
            date: Some(self.date.unwrap_or(today)),
            mood: Some(self.mood),
            stress: Some(self.stress),
            sleep_hours: Some(self.sleep_hours),
            activity_minutes: Some(self.activity_minutes),
            symptoms: self.symptoms,
        }
    }
}
