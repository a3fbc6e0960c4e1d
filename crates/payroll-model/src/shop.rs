use serde::{Deserialize, Serialize};

use crate::value::{currency_or_zero, percent_of, percent_or_zero};
use crate::{CanonicalRow, Employee, Field};

pub const DEFAULT_SHOP_DESCRIPTION: &str = "Shop efficiency metrics";
pub const COMPUTED_SHOP_DESCRIPTION: &str = "Shop efficiency metrics (computed)";
pub const UNKNOWN_PERIOD: &str = "unknown";

/// A supplied aggregate whose sales or payroll total is at or below this is
/// treated as missing when employee rows are available to sum instead.
pub const PLAUSIBLE_TOTAL_MIN: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopMetricsSource {
    /// Parsed from the upstream `SHOP_METRICS` row.
    Supplied,
    /// Summed over the employee records.
    Computed,
}

/// Shop-wide totals for one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopMetrics {
    pub period: String,
    pub total_days: f64,
    pub total_hours: f64,
    pub total_sales: f64,
    pub total_salaries: f64,
    /// Payroll as percent of sales.
    pub shop_efficiency: f64,
    pub description: String,
    pub source: ShopMetricsSource,
}

impl ShopMetrics {
    /// Read the upstream aggregate row as-is.
    pub fn from_aggregate_row(row: &CanonicalRow) -> ShopMetrics {
        ShopMetrics {
            period: row
                .non_empty(Field::Period)
                .unwrap_or(UNKNOWN_PERIOD)
                .to_string(),
            total_days: currency_or_zero(row.get(Field::WorkedDays)),
            total_hours: currency_or_zero(row.get(Field::WorkedHours)),
            total_sales: currency_or_zero(row.get(Field::AdjustedSales)),
            total_salaries: currency_or_zero(row.get(Field::FinalTotal)),
            shop_efficiency: percent_or_zero(row.get(Field::SalaryToSalesPct)),
            description: row
                .non_empty(Field::Description)
                .unwrap_or(DEFAULT_SHOP_DESCRIPTION)
                .to_string(),
            source: ShopMetricsSource::Supplied,
        }
    }

    /// Sum the employee records in input order.
    ///
    /// Returns `None` for an empty list.
    pub fn from_employees(employees: &[Employee]) -> Option<ShopMetrics> {
        let first = employees.first()?;

        let mut total_days = 0.0;
        let mut total_hours = 0.0;
        let mut total_sales = 0.0;
        let mut total_salaries = 0.0;
        for emp in employees {
            total_days += emp.worked_days;
            total_hours += emp.worked_hours;
            total_sales += emp.adjusted_sales;
            total_salaries += emp.final_total;
        }

        let period = if first.period.is_empty() {
            UNKNOWN_PERIOD.to_string()
        } else {
            first.period.clone()
        };

        Some(ShopMetrics {
            period,
            total_days,
            total_hours,
            total_sales,
            total_salaries,
            shop_efficiency: percent_of(total_salaries, total_sales),
            description: COMPUTED_SHOP_DESCRIPTION.to_string(),
            source: ShopMetricsSource::Computed,
        })
    }

    /// Whether a supplied aggregate carries usable totals.
    pub fn is_plausible(&self) -> bool {
        self.total_sales.abs() > PLAUSIBLE_TOTAL_MIN
            && self.total_salaries.abs() > PLAUSIBLE_TOTAL_MIN
    }

    /// Sales generated per hour worked across the shop.
    pub fn avg_sales_per_hour(&self) -> f64 {
        if self.total_hours == 0.0 {
            return 0.0;
        }
        self.total_sales / self.total_hours
    }

    /// Gross margin left after salary costs, in percent points.
    pub fn estimated_margin(&self) -> f64 {
        100.0 - self.shop_efficiency
    }
}

/// Pick the final shop metrics for a batch.
///
/// A supplied aggregate wins unless it is implausible and there are employees
/// to sum over; with no usable aggregate the totals are computed. `None` only
/// when there is neither an aggregate nor an employee.
pub fn resolve_shop_metrics(
    supplied: Option<ShopMetrics>,
    employees: &[Employee],
) -> Option<ShopMetrics> {
    match supplied {
        Some(metrics) if employees.is_empty() || metrics.is_plausible() => Some(metrics),
        Some(metrics) => {
            log::warn!(
                "ignoring implausible shop aggregate for {} (sales {:.2}, salaries {:.2}); summing {} employees instead",
                metrics.period,
                metrics.total_sales,
                metrics.total_salaries,
                employees.len()
            );
            ShopMetrics::from_employees(employees)
        }
        None => ShopMetrics::from_employees(employees),
    }
}

/// Back-fill each employee's share of shop sales and payroll.
///
/// Overwrites whatever share values came from upstream. Idempotent.
pub fn apply_shop_shares(shop: &ShopMetrics, employees: &mut [Employee]) {
    for emp in employees {
        emp.sales_share_of_shop = percent_of(emp.adjusted_sales, shop.total_sales);
        emp.salary_share_of_shop = percent_of(emp.final_total, shop.total_salaries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(sales: &str, salaries: &str) -> CanonicalRow {
        let mut row = CanonicalRow::new();
        row.insert("Employee", Some("SHOP_METRICS".to_string()));
        row.insert("Period", Some("2025-07".to_string()));
        row.insert("WorkedDays", Some("318".to_string()));
        row.insert("WorkedHours", Some("1587.45".to_string()));
        row.insert("AdjustedSales", Some(sales.to_string()));
        row.insert("FinalTotal", Some(salaries.to_string()));
        row.insert("SalaryToSalesPct", Some("27.42%".to_string()));
        row
    }

    fn employee(name: &str, sales: f64, total: f64) -> Employee {
        let mut row = CanonicalRow::new();
        row.insert("Employee", Some(name.to_string()));
        row.insert("Period", Some("2025-07".to_string()));
        let mut emp = Employee::from_row(&row);
        emp.adjusted_sales = sales;
        emp.final_total = total;
        emp.worked_days = 1.0;
        emp.worked_hours = 8.0;
        emp
    }

    #[test]
    fn aggregate_row_parses_with_coercers() {
        let metrics = ShopMetrics::from_aggregate_row(&aggregate("£31,245.87", "£8567.42"));
        assert_eq!(metrics.total_sales, 31245.87);
        assert_eq!(metrics.total_salaries, 8567.42);
        assert_eq!(metrics.shop_efficiency, 27.42);
        assert_eq!(metrics.total_days, 318.0);
        assert_eq!(metrics.description, DEFAULT_SHOP_DESCRIPTION);
        assert_eq!(metrics.source, ShopMetricsSource::Supplied);
    }

    #[test]
    fn empty_employee_list_has_no_computed_metrics() {
        assert_eq!(ShopMetrics::from_employees(&[]), None);
        assert_eq!(resolve_shop_metrics(None, &[]), None);
    }

    #[test]
    fn implausible_aggregate_falls_back_to_sum() {
        let supplied = ShopMetrics::from_aggregate_row(&aggregate("£0.00", "£0.00"));
        let employees = vec![employee("A", 100.0, 30.0), employee("B", 300.0, 70.0)];
        let resolved = resolve_shop_metrics(Some(supplied.clone()), &employees).unwrap();
        assert_eq!(resolved.source, ShopMetricsSource::Computed);
        assert_eq!(resolved.total_sales, 400.0);
        assert_eq!(resolved.shop_efficiency, 25.0);

        // Nothing to sum: keep what was supplied.
        assert_eq!(resolve_shop_metrics(Some(supplied.clone()), &[]), Some(supplied));
    }

    #[test]
    fn shares_handle_zero_totals() {
        let mut employees = vec![employee("A", 0.0, 0.0)];
        let shop = ShopMetrics::from_employees(&employees).unwrap();
        apply_shop_shares(&shop, &mut employees);
        assert_eq!(employees[0].sales_share_of_shop, 0.0);
        assert_eq!(employees[0].salary_share_of_shop, 0.0);
        assert_eq!(shop.avg_sales_per_hour(), 0.0);
    }
}
