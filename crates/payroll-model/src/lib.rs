//! `payroll-model` turns loosely formatted shop payroll rows into a consistent
//! set of employee and shop-wide efficiency records.
//!
//! The pipeline is:
//! - header aliasing ([`HeaderMap`]) so every upstream spelling lands on one
//!   canonical [`Field`],
//! - row classification ([`classify_row`]) into employee rows, the shop
//!   aggregate row, and noise,
//! - record building ([`Employee::from_row`]) with tolerant currency and
//!   percentage coercion,
//! - shop totals ([`resolve_shop_metrics`]) with a computed fallback, then
//!   share-of-shop back-fill ([`apply_shop_shares`]).
//!
//! [`Pipeline`] runs all of it in one synchronous call and returns a fresh
//! [`Dataset`]. The format adapters in [`import`] feed it from CSV, JSON and
//! URL payloads. A service embedding the pipeline can park incoming webhook
//! bodies in an [`inbox::PayloadInbox`] and render them later through
//! [`Pipeline::ingest_latest`].

pub mod classify;
pub mod compare;
mod config;
mod employee;
mod field;
mod header;
pub mod import;
pub mod inbox;
mod pipeline;
pub mod rating;
mod row;
mod shop;
mod summary;
pub mod validate;
pub mod value;

pub use classify::{classify_row, KnownEmployees, NoiseReason, RowClass};
pub use compare::{compare_datasets, DatasetComparison, EmployeeComparison, MetricDelta, MetricUnit};
pub use config::{ConfigError, PipelineConfig, Thresholds, DEFAULT_CURRENCY_SYMBOL};
pub use employee::{
    Employee, DEFAULT_CONFIG_VERSION, DEFAULT_DATA_ISSUES, DEFAULT_DESCRIPTION,
    DEFAULT_PAYMENT_TYPE,
};
pub use field::{Field, UnknownFieldError};
pub use header::{normalize_header_key, HeaderMap, DEFAULT_ALIASES};
pub use import::{CsvImportError, CsvOptions, CsvTextEncoding, IngestError};
pub use pipeline::{ingest_rows, Dataset, Pipeline};
pub use rating::{EfficiencyRating, RatingThresholds, ShopRating, ShopRatingThresholds};
pub use row::{CanonicalRow, RawRow};
pub use shop::{
    apply_shop_shares, resolve_shop_metrics, ShopMetrics, ShopMetricsSource,
    COMPUTED_SHOP_DESCRIPTION, DEFAULT_SHOP_DESCRIPTION, UNKNOWN_PERIOD,
};
pub use summary::EmployeeSummary;
pub use value::{parse_currency, parse_percent, SalesRate, SalesRateTag};
