//! Column layout of the `Payment Summary` sheet.

use payroll_model::{Employee, RatingThresholds};

/// How a column's cells are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Text,
    /// Plain count, general number format.
    Count,
    /// Two decimals, no symbol.
    Decimal,
    /// Currency amount, two decimals.
    Currency,
    /// Commission rate: tag text, or a fraction shown as a percentage.
    SalesRate,
    /// Percent points (`41.13` renders as `41.13%`).
    PercentPoints,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub kind: CellKind,
    pub width: f64,
}

const fn col(header: &'static str, kind: CellKind, width: f64) -> Column {
    Column {
        header,
        kind,
        width,
    }
}

pub const COLUMNS: [Column; 20] = [
    col("Employee", CellKind::Text, 18.0),
    col("Period", CellKind::Text, 12.0),
    col("Payment Type", CellKind::Text, 14.0),
    col("Worked Days", CellKind::Count, 12.0),
    col("Worked Hours", CellKind::Decimal, 13.0),
    col("Hourly Rate", CellKind::Currency, 12.0),
    col("Sales %", CellKind::SalesRate, 10.0),
    col("Base Payment", CellKind::Currency, 14.0),
    col("Total Sales", CellKind::Currency, 14.0),
    col("Addl Sales", CellKind::Currency, 12.0),
    col("Adjusted Sales", CellKind::Currency, 15.0),
    col("Sales Commission", CellKind::Currency, 17.0),
    col("Bonus Payment", CellKind::Currency, 14.0),
    col("Final Total", CellKind::Currency, 14.0),
    col("Avg Sales/Day", CellKind::Currency, 14.0),
    col("Avg Sales/Hour", CellKind::Currency, 15.0),
    col("Cost Efficiency %", CellKind::PercentPoints, 17.0),
    col("Sales Share %", CellKind::PercentPoints, 14.0),
    col("Salary Share %", CellKind::PercentPoints, 14.0),
    col("Efficiency Rating", CellKind::Text, 18.0),
];

pub const ADJUSTED_SALES_COL: u16 = 10;
pub const FINAL_TOTAL_COL: u16 = 13;
pub const COST_EFFICIENCY_COL: u16 = 16;

/// One employee cell before formatting.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// Cells of one employee row, in [`COLUMNS`] order.
pub fn employee_cells(emp: &Employee, thresholds: &RatingThresholds) -> [CellValue; 20] {
    use CellValue::{Number, Text};

    let sales_rate = match emp.sales_percentage.tag() {
        Some(tag) => Text(tag.as_str().to_string()),
        None => Number(emp.sales_percentage.as_fraction().unwrap_or_default()),
    };

    [
        Text(emp.name.clone()),
        Text(emp.period.clone()),
        Text(emp.payment_type.clone()),
        Number(emp.worked_days),
        Number(emp.worked_hours),
        Number(emp.hourly_rate),
        sales_rate,
        Number(emp.base_payment),
        Number(emp.total_sales),
        Number(emp.addl_sales),
        Number(emp.adjusted_sales),
        Number(emp.sales_commission),
        Number(emp.bonus_payment),
        Number(emp.final_total),
        Number(emp.avg_sales_per_day),
        Number(emp.avg_sales_per_hour),
        Number(emp.salary_to_sales_pct),
        Number(emp.sales_share_of_shop),
        Number(emp.salary_share_of_shop),
        Text(emp.efficiency_rating(thresholds).label().to_string()),
    ]
}
