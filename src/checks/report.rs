//! Per-case outcomes and the aggregated suite report.

use crate::error::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one (estimator, rule) case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    /// The rule's contract was violated.
    Failed { message: String },
    /// The estimator raised an unexpected error or panicked.
    Errored { message: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed { message } | Outcome::Errored { message } => Some(message),
        }
    }
}

impl From<CheckResult> for Outcome {
    fn from(result: CheckResult) -> Self {
        match result {
            Ok(()) => Outcome::Passed,
            Err(CheckError::Violation(message)) => Outcome::Failed { message },
            Err(err @ CheckError::Estimator(_)) => Outcome::Errored {
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "PASSED"),
            Outcome::Failed { message } => write!(f, "FAILED: {}", message),
            Outcome::Errored { message } => write!(f, "ERROR: {}", message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// `Name::rule` for class rules, `Name-i::rule` for instance rules on
    /// types with several test instances.
    pub id: String,
    /// Name of the estimator type.
    pub estimator: String,
    pub rule: String,
    pub outcome: Outcome,
}

impl CaseReport {
    pub fn new(
        subject: &str,
        estimator: &str,
        rule: &str,
        outcome: impl Into<Outcome>,
    ) -> Self {
        Self {
            id: format!("{}::{}", subject, rule),
            estimator: estimator.to_string(),
            rule: rule.to_string(),
            outcome: outcome.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub cases: Vec<CaseReport>,
}

impl ConformanceReport {
    pub fn push(&mut self, case: CaseReport) {
        self.cases.push(case);
    }

    pub fn extend(&mut self, other: ConformanceReport) {
        self.cases.extend(other.cases);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| matches!(c.outcome, Outcome::Failed { .. }))
            .count()
    }

    pub fn errored(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| matches!(c.outcome, Outcome::Errored { .. }))
            .count()
    }

    /// True when every case passed.
    pub fn is_success(&self) -> bool {
        self.cases.iter().all(|c| c.outcome.is_passed())
    }

    /// Cases that failed or errored.
    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.outcome.is_passed())
    }

    pub fn get(&self, id: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in self.failures() {
            writeln!(f, "{} {}", case.id, case.outcome)?;
        }
        write!(
            f,
            "{} cases: {} passed, {} failed, {} errored",
            self.len(),
            self.passed(),
            self.failed(),
            self.errored()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;

    fn sample() -> ConformanceReport {
        let mut report = ConformanceReport::default();
        report.push(CaseReport::new("A", "A", "repr-succeeds", Outcome::Passed));
        report.push(CaseReport::new(
            "B-1",
            "B",
            "fit-returns-self",
            Err::<(), _>(CheckError::Violation("not self".to_string())),
        ));
        report.push(CaseReport::new(
            "C",
            "C",
            "pickle-roundtrip",
            Err::<(), _>(CheckError::Estimator(EstimatorError::EmptyData(
                "x".to_string(),
            ))),
        ));
        report
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.len(), 3);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.errored(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn test_case_ids() {
        let report = sample();
        let case = report.get("B-1::fit-returns-self").unwrap();
        assert_eq!(case.estimator, "B");
        assert_eq!(case.outcome.message(), Some("not self"));
    }

    #[test]
    fn test_json_export() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"status\": \"failed\""));
        let back: ConformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_display_summary() {
        let text = sample().to_string();
        assert!(text.contains("B-1::fit-returns-self FAILED: not self"));
        assert!(text.ends_with("3 cases: 1 passed, 1 failed, 1 errored"));
    }
}
