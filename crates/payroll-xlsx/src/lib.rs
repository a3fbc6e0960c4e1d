//! Excel export of a normalized payroll [`Dataset`](payroll_model::Dataset).
//!
//! The workbook has a single `Payment Summary` sheet: a title block, one row
//! per employee, and a shop summary block when shop metrics are available.

mod columns;
mod export;

pub use columns::{CellKind, Column, COLUMNS};
pub use export::{
    dataset_to_xlsx_bytes, default_file_name, write_dataset_xlsx, ExportError, ExportOptions,
    REPORT_TITLE, SHEET_NAME, SHOP_SUMMARY_LABEL,
};
