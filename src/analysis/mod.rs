//! Insight and anomaly derivation over a user's health log.
//!
//! Both analyses are pure functions of the log: no I/O, no hidden state,
//! and the same log always yields the same [`Report`].

pub mod anomalies;
pub mod stats;
pub mod trends;

pub use anomalies::detect;
pub use trends::analyze;

use serde::Serialize;

/// Outcome of one analysis pass.
///
/// Serialized with a `status` tag so clients can tell "not enough data"
/// apart from "nothing found" apart from actual findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// The log is too short for this analysis.
    InsufficientData { message: &'static str },
    /// Enough data, but no check fired.
    Clear { message: &'static str },
    /// Human-readable findings in check order.
    Findings { items: Vec<String> },
}

impl Report {
    fn from_findings(items: Vec<String>, clear: &'static str) -> Self {
        if items.is_empty() {
            Report::Clear { message: clear }
        } else {
            Report::Findings { items }
        }
    }

    /// Findings, or an empty slice for either sentinel.
    pub fn items(&self) -> &[String] {
        match self {
            Report::Findings { items } => items,
            _ => &[],
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Report::InsufficientData { .. })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_with_status_tag() {
        let insufficient = serde_json::to_value(Report::InsufficientData { message: "x" }).unwrap();
        assert_eq!(insufficient["status"], "insufficient_data");
        assert_eq!(insufficient["message"], "x");

        let findings = serde_json::to_value(Report::Findings {
            items: vec!["a".into()],
        })
        .unwrap();
        assert_eq!(findings["status"], "findings");
        assert_eq!(findings["items"][0], "a");
    }

    #[test]
    fn test_from_findings_empty_is_clear() {
        assert_eq!(
            Report::from_findings(vec![], "none"),
            Report::Clear { message: "none" }
        );
        assert!(Report::Clear { message: "none" }.items().is_empty());
    }
}
