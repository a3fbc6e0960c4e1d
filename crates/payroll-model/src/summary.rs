use serde::Serialize;

use crate::Employee;

/// Totals and per-head averages across the employees of one dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub count: usize,
    pub total_hours: f64,
    pub total_sales: f64,
    pub total_commission: f64,
    pub total_payments: f64,
}

impl EmployeeSummary {
    pub fn from_employees(employees: &[Employee]) -> Self {
        employees.iter().fold(Self::default(), |mut acc, emp| {
            acc.count += 1;
            acc.total_hours += emp.worked_hours;
            acc.total_sales += emp.adjusted_sales;
            acc.total_commission += emp.sales_commission;
            acc.total_payments += emp.final_total;
            acc
        })
    }

    fn per_head(&self, total: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            total / self.count as f64
        }
    }

    pub fn avg_hours(&self) -> f64 {
        self.per_head(self.total_hours)
    }

    pub fn avg_sales(&self) -> f64 {
        self.per_head(self.total_sales)
    }

    pub fn avg_commission(&self) -> f64 {
        self.per_head(self.total_commission)
    }

    pub fn avg_payment(&self) -> f64 {
        self.per_head(self.total_payments)
    }
}
