use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use payroll_model::{Dataset, RatingThresholds, ShopMetrics, DEFAULT_CURRENCY_SYMBOL};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::columns::{
    employee_cells, CellKind, CellValue, ADJUSTED_SALES_COL, COLUMNS, COST_EFFICIENCY_COL,
    FINAL_TOTAL_COL,
};

pub const SHEET_NAME: &str = "Payment Summary";
pub const REPORT_TITLE: &str = "Employee Payment Report";
pub const SHOP_SUMMARY_LABEL: &str = "SHOP SUMMARY";

const TITLE_ROW: u32 = 0;
const GENERATED_ROW: u32 = 1;
const HEADER_ROW: u32 = 3;
const FIRST_EMPLOYEE_ROW: u32 = 4;

/// Whole counts render without a trailing separator; half days keep their decimals.
const COUNT_NUM_FORMAT: &str = "General";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("dataset has no employees to export")]
    NoEmployees,
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub currency_symbol: char,
    pub thresholds: RatingThresholds,
    /// Stamped into the `Generated:` row.
    pub generated_at: DateTime<Utc>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL,
            thresholds: RatingThresholds::default(),
            generated_at: Utc::now(),
        }
    }
}

/// `Employee_Payments_YYYY-MM-DD.xlsx`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("Employee_Payments_{}.xlsx", date.format("%Y-%m-%d"))
}

struct Formats {
    bold: Format,
    count: Format,
    decimal: Format,
    currency: Format,
    fraction_percent: Format,
    percent_points: Format,
}

impl Formats {
    fn new(currency_symbol: char) -> Self {
        Self {
            bold: Format::new().set_bold(),
            count: Format::new().set_num_format(COUNT_NUM_FORMAT),
            decimal: Format::new().set_num_format("0.00"),
            currency: Format::new().set_num_format(format!("\"{currency_symbol}\"#,##0.00")),
            fraction_percent: Format::new().set_num_format("0.0%"),
            percent_points: Format::new().set_num_format("0.00\"%\""),
        }
    }

    fn for_kind(&self, kind: CellKind) -> Option<&Format> {
        match kind {
            CellKind::Text => None,
            CellKind::Count => Some(&self.count),
            CellKind::Decimal => Some(&self.decimal),
            CellKind::Currency => Some(&self.currency),
            CellKind::SalesRate => Some(&self.fraction_percent),
            CellKind::PercentPoints => Some(&self.percent_points),
        }
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (value, format) {
        (CellValue::Text(text), _) => {
            sheet.write_string(row, col, text)?;
        }
        (CellValue::Number(n), Some(format)) => {
            sheet.write_number_with_format(row, col, *n, format)?;
        }
        (CellValue::Number(n), None) => {
            sheet.write_number(row, col, *n)?;
        }
    }
    Ok(())
}

fn write_shop_summary(
    sheet: &mut Worksheet,
    start_row: u32,
    shop: &ShopMetrics,
    formats: &Formats,
) -> Result<(), XlsxError> {
    sheet.write_string_with_format(start_row, 0, SHOP_SUMMARY_LABEL, &formats.bold)?;

    let lines = [
        ("Total Sales", ADJUSTED_SALES_COL, shop.total_sales, &formats.currency),
        ("Total Payroll", FINAL_TOTAL_COL, shop.total_salaries, &formats.currency),
        (
            "Shop Efficiency",
            COST_EFFICIENCY_COL,
            shop.shop_efficiency,
            &formats.percent_points,
        ),
    ];
    for (offset, (label, col, value, format)) in (1u32..).zip(lines) {
        let row = start_row + offset;
        sheet.write_string(row, 0, label)?;
        sheet.write_number_with_format(row, col, value, format)?;
    }
    Ok(())
}

fn build_workbook(dataset: &Dataset, options: &ExportOptions) -> Result<Workbook, ExportError> {
    if dataset.employees.is_empty() {
        return Err(ExportError::NoEmployees);
    }

    let formats = Formats::new(options.currency_symbol);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    sheet.write_string_with_format(TITLE_ROW, 0, REPORT_TITLE, &formats.bold)?;
    sheet.write_string(GENERATED_ROW, 0, "Generated:")?;
    sheet.write_string(
        GENERATED_ROW,
        1,
        options
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
    )?;

    for (col, column) in (0u16..).zip(COLUMNS.iter()) {
        sheet.write_string_with_format(HEADER_ROW, col, column.header, &formats.bold)?;
        sheet.set_column_width(col, column.width)?;
    }

    let mut row = FIRST_EMPLOYEE_ROW;
    for emp in &dataset.employees {
        let cells = employee_cells(emp, &options.thresholds);
        for (col, (value, column)) in (0u16..).zip(cells.iter().zip(COLUMNS.iter())) {
            write_cell(sheet, row, col, value, formats.for_kind(column.kind))?;
        }
        row += 1;
    }

    if let Some(shop) = &dataset.shop_metrics {
        // One blank row between the employees and the summary block.
        write_shop_summary(sheet, row + 1, shop, &formats)?;
    }

    log::info!(
        "built workbook with {} employee rows",
        dataset.employees.len()
    );
    Ok(workbook)
}

/// Serialize the `Payment Summary` workbook into memory.
pub fn dataset_to_xlsx_bytes(
    dataset: &Dataset,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(dataset, options)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the `Payment Summary` workbook to `path`.
pub fn write_dataset_xlsx(
    path: impl AsRef<Path>,
    dataset: &Dataset,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let bytes = dataset_to_xlsx_bytes(dataset, options)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_days_use_general_format() {
        let formats = Formats::new('£');
        assert_eq!(
            formats.for_kind(CellKind::Count),
            Some(&Format::new().set_num_format("General"))
        );
        assert_ne!(formats.count, Format::new().set_num_format("0.##"));
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        assert_eq!(default_file_name(date), "Employee_Payments_2025-07-03.xlsx");
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = dataset_to_xlsx_bytes(&Dataset::default(), &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::NoEmployees));
    }
}
