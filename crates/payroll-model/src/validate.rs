//! Optional cross-field consistency checks.
//!
//! Upstream figures are authoritative by default. These checks only run when a
//! deployment opts in through [`ValidationMode`], and they never drop a row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Employee;

/// Largest absolute difference still treated as rounding noise.
pub const CONSISTENCY_TOLERANCE: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    Off,
    /// Collect and log findings.
    Report,
    /// Report, and replace a mismatching base payment with `hours * rate`.
    Repair,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// `finalTotal` differs from base + commission + bonus.
    FinalTotalMismatch { expected: f64, actual: f64 },
    /// `basePayment` differs from worked hours times hourly rate.
    BasePaymentMismatch { expected: f64, actual: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIssue {
    pub employee: String,
    pub period: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::FinalTotalMismatch { expected, actual } => write!(
                f,
                "{} ({}): final total {actual:.2} differs from base + commission + bonus {expected:.2}",
                self.employee, self.period
            ),
            IssueKind::BasePaymentMismatch { expected, actual } => write!(
                f,
                "{} ({}): base payment {actual:.2} differs from hours x rate {expected:.2}",
                self.employee, self.period
            ),
        }
    }
}

/// Run every consistency check against one record.
pub fn check_employee(emp: &Employee) -> Vec<DataIssue> {
    let mut issues = Vec::new();
    let issue = |kind| DataIssue {
        employee: emp.name.clone(),
        period: emp.period.clone(),
        kind,
    };

    let expected = emp.expected_final_total();
    if (expected - emp.final_total).abs() > CONSISTENCY_TOLERANCE {
        issues.push(issue(IssueKind::FinalTotalMismatch {
            expected,
            actual: emp.final_total,
        }));
    }

    if let Some(expected) = expected_base_payment(emp) {
        if (expected - emp.base_payment).abs() > CONSISTENCY_TOLERANCE {
            issues.push(issue(IssueKind::BasePaymentMismatch {
                expected,
                actual: emp.base_payment,
            }));
        }
    }

    issues
}

/// `hours * rate` when both are known.
pub fn expected_base_payment(emp: &Employee) -> Option<f64> {
    (emp.worked_hours > 0.0 && emp.hourly_rate > 0.0).then(|| emp.worked_hours * emp.hourly_rate)
}

/// Apply `mode` to a batch, returning every finding.
pub fn validate_employees(employees: &mut [Employee], mode: ValidationMode) -> Vec<DataIssue> {
    if mode == ValidationMode::Off {
        return Vec::new();
    }

    let mut all = Vec::new();
    for emp in employees.iter_mut() {
        let issues = check_employee(emp);
        for issue in &issues {
            log::warn!("data issue: {issue}");
            if mode == ValidationMode::Repair {
                if let IssueKind::BasePaymentMismatch { expected, .. } = issue.kind {
                    emp.base_payment = (expected * 100.0).round() / 100.0;
                }
            }
        }
        all.extend(issues);
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanonicalRow;

    fn employee(hours: &str, rate: &str, base: &str, final_total: &str) -> Employee {
        let mut row = CanonicalRow::new();
        row.insert("Employee", Some("Aisha".to_string()));
        row.insert("Period", Some("2025-07".to_string()));
        row.insert("WorkedHours", Some(hours.to_string()));
        row.insert("HourlyRate", Some(rate.to_string()));
        row.insert("BasePayment", Some(base.to_string()));
        row.insert("FinalTotal", Some(final_total.to_string()));
        Employee::from_row(&row)
    }

    #[test]
    fn consistent_record_has_no_issues() {
        let emp = employee("79.82", "£12.21", "£974.60", "£974.60");
        assert!(check_employee(&emp).is_empty());
    }

    #[test]
    fn mismatches_are_reported_not_corrected() {
        let mut employees = vec![employee("10", "£12.00", "£1.00", "£500.00")];
        let issues = validate_employees(&mut employees, ValidationMode::Report);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0].kind, IssueKind::FinalTotalMismatch { .. }));
        assert!(matches!(issues[1].kind, IssueKind::BasePaymentMismatch { .. }));
        assert_eq!(employees[0].base_payment, 1.0);
    }

    #[test]
    fn repair_recomputes_base_payment() {
        let mut employees = vec![employee("10", "£12.00", "£1.00", "£120.00")];
        validate_employees(&mut employees, ValidationMode::Repair);
        assert_eq!(employees[0].base_payment, 120.0);
        // Final total is never rewritten.
        assert_eq!(employees[0].final_total, 120.0);
    }

    #[test]
    fn off_mode_skips_checks() {
        let mut employees = vec![employee("10", "£12.00", "£1.00", "£500.00")];
        assert!(validate_employees(&mut employees, ValidationMode::Off).is_empty());
    }
}
