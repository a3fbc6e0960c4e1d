//! Side-by-side comparison of two ingested periods (e.g. two sheet tabs).

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{Dataset, Employee, ShopMetrics};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Currency,
    Percent,
    Hours,
}

/// One metric on both sides.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub label: &'static str,
    pub unit: MetricUnit,
    pub left: Option<f64>,
    pub right: Option<f64>,
    /// `left - right` when both sides exist.
    pub difference: Option<f64>,
    /// `difference / right * 100`, `0` when `right` is zero.
    pub change_pct: Option<f64>,
}

impl MetricDelta {
    pub fn new(label: &'static str, unit: MetricUnit, left: Option<f64>, right: Option<f64>) -> Self {
        let (difference, change_pct) = match (left, right) {
            (Some(l), Some(r)) => {
                let diff = l - r;
                let change = if r != 0.0 { diff / r * 100.0 } else { 0.0 };
                (Some(diff), Some(change))
            }
            _ => (None, None),
        };
        Self {
            label,
            unit,
            left,
            right,
            difference,
            change_pct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeComparison {
    pub name: String,
    pub metrics: Vec<MetricDelta>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetComparison {
    /// Empty unless both sides carry shop metrics.
    pub shop: Vec<MetricDelta>,
    /// Sorted by employee name.
    pub employees: Vec<EmployeeComparison>,
}

type ShopMetric = (&'static str, MetricUnit, fn(&ShopMetrics) -> f64);
type EmployeeMetric = (&'static str, MetricUnit, fn(&Employee) -> f64);

const SHOP_METRICS: [ShopMetric; 3] = [
    ("Total Sales", MetricUnit::Currency, |s| s.total_sales),
    ("Total Payroll", MetricUnit::Currency, |s| s.total_salaries),
    ("Shop Efficiency", MetricUnit::Percent, |s| s.shop_efficiency),
];

const EMPLOYEE_METRICS: [EmployeeMetric; 4] = [
    ("Sales", MetricUnit::Currency, |e| e.adjusted_sales),
    ("Salary", MetricUnit::Currency, |e| e.final_total),
    ("Hours Worked", MetricUnit::Hours, |e| e.worked_hours),
    ("Avg Sales/Day", MetricUnit::Currency, |e| e.avg_sales_per_day),
];

pub fn compare_datasets(left: &Dataset, right: &Dataset) -> DatasetComparison {
    let shop = match (&left.shop_metrics, &right.shop_metrics) {
        (Some(l), Some(r)) => SHOP_METRICS
            .iter()
            .map(|(label, unit, get)| MetricDelta::new(*label, *unit, Some(get(l)), Some(get(r))))
            .collect(),
        _ => Vec::new(),
    };

    let names: BTreeSet<&str> = left
        .employees
        .iter()
        .chain(&right.employees)
        .map(|e| e.name.as_str())
        .collect();

    let employees = names
        .into_iter()
        .map(|name| {
            let l = left.employee(name);
            let r = right.employee(name);
            EmployeeComparison {
                name: name.to_string(),
                metrics: EMPLOYEE_METRICS
                    .iter()
                    .map(|(label, unit, get)| MetricDelta::new(*label, *unit, l.map(get), r.map(get)))
                    .collect(),
            }
        })
        .collect();

    DatasetComparison { shop, employees }
}
