//! Row classification.
//!
//! Upstream sheets interleave real employee rows with re-embedded header rows,
//! per-day breakdown sub-reports, stale totals, and one shop-wide aggregate
//! row. [`classify_row`] sorts a normalized row into exactly one of those
//! buckets; anything that does not look like an employee row is noise and is
//! dropped without an error.

use std::collections::HashSet;

use crate::{CanonicalRow, Field};

/// `Employee` value of a header row embedded in the data.
pub const HEADER_ROW_LABEL: &str = "Employee";
/// Marker carried by per-day breakdown sub-report rows.
pub const DAILY_BREAKDOWN_MARKER: &str = " - Daily Breakdown";
/// `Employee` value of the stale grand-total row.
pub const TOTAL_SUMMARY_LABEL: &str = "TOTAL_SUMMARY";
/// `Employee` value of the shop-wide aggregate row.
pub const SHOP_METRICS_LABEL: &str = "SHOP_METRICS";
/// Employee names containing this are sub-rows, not people.
pub const SUB_ROW_SEPARATOR: &str = " - ";

/// Why a row was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseReason {
    NotARow,
    HeaderRow,
    DailyBreakdown,
    TotalSummary,
    MissingName,
    Incomplete,
    UnknownEmployee,
}

impl NoiseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NoiseReason::NotARow => "not a row",
            NoiseReason::HeaderRow => "header row",
            NoiseReason::DailyBreakdown => "daily breakdown row",
            NoiseReason::TotalSummary => "total summary row",
            NoiseReason::MissingName => "no employee name",
            NoiseReason::Incomplete => "incomplete employee row",
            NoiseReason::UnknownEmployee => "employee not in allow-list",
        }
    }
}

/// Result of classifying one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowClass<'a> {
    Noise(NoiseReason),
    Employee(&'a CanonicalRow),
    ShopAggregate(&'a CanonicalRow),
}

/// Optional allow-list of employee names.
///
/// Matching is exact and case-sensitive once surrounding whitespace is
/// trimmed from both the list entries and the row's name. An empty list is
/// still a list: it rejects every name. Use `None` at the call site to
/// disable the filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownEmployees {
    names: HashSet<String>,
}

impl KnownEmployees {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| Into::<String>::into(name).trim().to_string())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name.trim())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Classify one row. Rules are evaluated in order; the first match wins.
pub fn classify_row<'a>(
    row: Option<&'a CanonicalRow>,
    known: Option<&KnownEmployees>,
) -> RowClass<'a> {
    let Some(row) = row else {
        return RowClass::Noise(NoiseReason::NotARow);
    };

    let name = row.get(Field::Employee);
    match name {
        Some(HEADER_ROW_LABEL) => return RowClass::Noise(NoiseReason::HeaderRow),
        Some(n) if n.contains(DAILY_BREAKDOWN_MARKER) => {
            return RowClass::Noise(NoiseReason::DailyBreakdown)
        }
        Some(TOTAL_SUMMARY_LABEL) => return RowClass::Noise(NoiseReason::TotalSummary),
        Some(SHOP_METRICS_LABEL) => return RowClass::ShopAggregate(row),
        _ => {}
    }

    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return RowClass::Noise(NoiseReason::MissingName);
    };

    let complete = row.non_empty(Field::Period).is_some()
        && row.non_empty(Field::WorkedDays).is_some()
        && row.non_empty(Field::FinalTotal).is_some()
        && !name.contains(SUB_ROW_SEPARATOR);
    if !complete {
        return RowClass::Noise(NoiseReason::Incomplete);
    }

    if let Some(known) = known {
        if !known.contains(name) {
            return RowClass::Noise(NoiseReason::UnknownEmployee);
        }
    }

    RowClass::Employee(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CanonicalRow {
        let mut row = CanonicalRow::new();
        for (k, v) in pairs {
            row.insert(*k, Some(v.to_string()));
        }
        row
    }

    fn employee(name: &str) -> CanonicalRow {
        row(&[
            ("Employee", name),
            ("Period", "2025-07"),
            ("WorkedDays", "14"),
            ("FinalTotal", "£974.62"),
        ])
    }

    #[test]
    fn missing_row_is_noise() {
        assert_eq!(classify_row(None, None), RowClass::Noise(NoiseReason::NotARow));
    }

    #[test]
    fn header_breakdown_and_totals_are_noise() {
        let header = employee("Employee");
        assert_eq!(
            classify_row(Some(&header), None),
            RowClass::Noise(NoiseReason::HeaderRow)
        );
        let breakdown = employee("Aisha - Daily Breakdown");
        assert_eq!(
            classify_row(Some(&breakdown), None),
            RowClass::Noise(NoiseReason::DailyBreakdown)
        );
        let totals = employee("TOTAL_SUMMARY");
        assert_eq!(
            classify_row(Some(&totals), None),
            RowClass::Noise(NoiseReason::TotalSummary)
        );
    }

    #[test]
    fn shop_metrics_never_falls_through_to_employee() {
        let shop = employee("SHOP_METRICS");
        let known = KnownEmployees::new(["SHOP_METRICS"]);
        assert!(matches!(
            classify_row(Some(&shop), Some(&known)),
            RowClass::ShopAggregate(_)
        ));
    }

    #[test]
    fn incomplete_rows_are_noise() {
        let no_days = row(&[("Employee", "Aisha"), ("Period", "2025-07"), ("FinalTotal", "1")]);
        assert_eq!(
            classify_row(Some(&no_days), None),
            RowClass::Noise(NoiseReason::Incomplete)
        );
        let sub_row = employee("Aisha - Week 1");
        assert_eq!(
            classify_row(Some(&sub_row), None),
            RowClass::Noise(NoiseReason::Incomplete)
        );
        let nameless = row(&[("Employee", ""), ("Period", "2025-07")]);
        assert_eq!(
            classify_row(Some(&nameless), None),
            RowClass::Noise(NoiseReason::MissingName)
        );
    }

    #[test]
    fn allow_list_filters_only_when_present() {
        let aisha = employee("Aisha");
        let known = KnownEmployees::new(["Bea"]);
        assert_eq!(
            classify_row(Some(&aisha), Some(&known)),
            RowClass::Noise(NoiseReason::UnknownEmployee)
        );
        assert!(matches!(
            classify_row(Some(&aisha), None),
            RowClass::Employee(_)
        ));
    }

    #[test]
    fn allow_list_ignores_surrounding_whitespace() {
        let padded = employee("Aisha ");
        let known = KnownEmployees::new([" Aisha"]);
        assert!(known.contains("Aisha"));
        assert!(matches!(
            classify_row(Some(&padded), Some(&known)),
            RowClass::Employee(_)
        ));
        // Case still matters.
        assert_eq!(
            classify_row(Some(&employee("aisha")), Some(&known)),
            RowClass::Noise(NoiseReason::UnknownEmployee)
        );
    }
}
