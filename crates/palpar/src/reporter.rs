//! Scenario run reporting.
//!
//! Phase results accumulate into a [`RunReport`] that an external report
//! generator consumes; error strings carry the failing selector or phase so
//! they read meaningfully outside this process.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// Outcome of one scenario phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    /// Phase completed
    Passed,
    /// Phase failed; the remaining phases of the run were skipped
    Failed,
    /// Phase was not executed because an earlier phase failed
    Skipped,
}

impl PhaseStatus {
    /// Check if the phase passed
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if the phase failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Result of one scenario phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    /// Phase name
    pub name: String,
    /// Outcome
    pub status: PhaseStatus,
    /// Execution time (zero for skipped phases)
    pub duration: Duration,
    /// Error message if the phase failed
    pub error: Option<String>,
    /// Diagnostic screenshot stem, if one was captured on failure
    pub screenshot: Option<String>,
    /// Timestamp when the phase was recorded
    pub timestamp: SystemTime,
}

impl PhaseResult {
    /// Record a passed phase
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Passed,
            duration,
            error: None,
            screenshot: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Record a failed phase
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Failed,
            duration,
            error: Some(error.into()),
            screenshot: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Record a skipped phase
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
            screenshot: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Attach a diagnostic screenshot stem
    #[must_use]
    pub fn with_screenshot(mut self, stem: impl Into<String>) -> Self {
        self.screenshot = Some(stem.into());
        self
    }
}

/// Accumulated report for one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Scenario name
    pub scenario: String,
    /// Phase results in execution order
    pub phases: Vec<PhaseResult>,
    /// Timestamp when the run started
    pub started: SystemTime,
}

impl RunReport {
    /// Create an empty report for a scenario
    #[must_use]
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            scenario: scenario.into(),
            phases: Vec::new(),
            started: SystemTime::now(),
        }
    }

    /// Record a phase result
    pub fn record(&mut self, result: PhaseResult) {
        self.phases.push(result);
    }

    /// Whether every executed phase passed and none were skipped
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.phases.is_empty() && self.phases.iter().all(|p| p.status.is_passed())
    }

    /// Number of passed phases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(PhaseStatus::Passed)
    }

    /// Number of failed phases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(PhaseStatus::Failed)
    }

    /// Number of skipped phases
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(PhaseStatus::Skipped)
    }

    fn count(&self, status: PhaseStatus) -> usize {
        self.phases.iter().filter(|p| p.status == status).count()
    }

    /// One-line summary for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} passed, {} failed, {} skipped",
            self.scenario,
            self.passed_count(),
            self.failed_count(),
            self.skipped_count()
        )
    }

    /// Serialize the report to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::result::PalparResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_result_constructors() {
        let passed = PhaseResult::passed("navigate", Duration::from_millis(12));
        assert!(passed.status.is_passed());
        assert!(passed.error.is_none());

        let failed = PhaseResult::failed("drag", Duration::from_millis(40), "driver error");
        assert!(failed.status.is_failed());
        assert_eq!(failed.error.as_deref(), Some("driver error"));

        let skipped = PhaseResult::skipped("verify");
        assert_eq!(skipped.status, PhaseStatus::Skipped);
        assert_eq!(skipped.duration, Duration::ZERO);
    }

    #[test]
    fn test_report_passed_requires_all_phases_green() {
        let mut report = RunReport::new("drag-puzzle");
        assert!(!report.passed());

        report.record(PhaseResult::passed("navigate", Duration::ZERO));
        assert!(report.passed());

        report.record(PhaseResult::failed("drag", Duration::ZERO, "boom"));
        report.record(PhaseResult::skipped("verify"));
        assert!(!report.passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_summary_line() {
        let mut report = RunReport::new("drag-puzzle");
        report.record(PhaseResult::passed("navigate", Duration::ZERO));
        assert_eq!(report.summary(), "drag-puzzle: 1 passed, 0 failed, 0 skipped");
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let mut report = RunReport::new("drag-puzzle");
        report.record(
            PhaseResult::failed("drag", Duration::from_millis(5), "injected")
                .with_screenshot("drag_2026-08-25T10-00-00-000Z"),
        );
        let json = report.to_json().unwrap();
        assert!(json.contains("drag-puzzle"));
        assert!(json.contains("injected"));

        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scenario, report.scenario);
        assert_eq!(parsed.phases.len(), 1);
    }
}
