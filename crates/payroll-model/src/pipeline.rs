use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::classify::{classify_row, RowClass};
use crate::inbox::PayloadInbox;
use crate::import::{
    rows_from_csv_reader, rows_from_json_str, rows_from_json_value, rows_from_url_param,
    CsvOptions, IngestError,
};
use crate::shop::{apply_shop_shares, resolve_shop_metrics, ShopMetricsSource};
use crate::validate::{validate_employees, DataIssue};
use crate::{Employee, PipelineConfig, RawRow, ShopMetrics};

/// Output of one ingestion: everything the presentation layer renders.
///
/// `shop_metrics` is `None` only when `employees` is empty too. A new
/// ingestion produces a fresh value; nothing is merged with earlier batches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub employees: Vec<Employee>,
    pub shop_metrics: Option<ShopMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DataIssue>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// First employee with this exact name.
    pub fn employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }
}

/// Normalize, classify, and derive metrics for a batch of rows.
///
/// Stateless apart from its configuration, so one pipeline can serve any
/// number of independent ingestions.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole pipeline over rows in input order.
    ///
    /// Accepts plain [`RawRow`]s or `Option<RawRow>` where `None` marks an
    /// element that was not a row.
    pub fn ingest<I>(&self, rows: I) -> Dataset
    where
        I: IntoIterator,
        I::Item: Into<Option<RawRow>>,
    {
        let known = self.config.known_employees.as_ref();
        let mut employees = Vec::new();
        let mut supplied = None;

        for (idx, raw) in rows.into_iter().enumerate() {
            let raw: Option<RawRow> = raw.into();
            let row = raw.map(|r| self.config.headers.normalize_row(&r));
            match classify_row(row.as_ref(), known) {
                RowClass::Noise(reason) => {
                    log::debug!("row {idx}: skipped ({})", reason.as_str());
                }
                RowClass::ShopAggregate(row) => {
                    log::debug!("row {idx}: shop aggregate");
                    supplied = Some(ShopMetrics::from_aggregate_row(row));
                }
                RowClass::Employee(row) => {
                    let emp = Employee::from_row(row);
                    log::debug!("row {idx}: employee {} ({})", emp.name, emp.period);
                    employees.push(emp);
                }
            }
        }

        let issues = validate_employees(&mut employees, self.config.validation);

        let shop_metrics = resolve_shop_metrics(supplied, &employees);
        if let Some(shop) = &shop_metrics {
            apply_shop_shares(shop, &mut employees);
        }

        log::info!(
            "ingested {} employees; shop metrics {}",
            employees.len(),
            match shop_metrics.as_ref().map(|s| s.source) {
                Some(ShopMetricsSource::Supplied) => "supplied",
                Some(ShopMetricsSource::Computed) => "computed",
                None => "absent",
            }
        );

        Dataset {
            employees,
            shop_metrics,
            issues,
        }
    }

    /// Single-row convenience; same as ingesting a one-element batch.
    pub fn ingest_one(&self, row: RawRow) -> Dataset {
        self.ingest([row])
    }

    pub fn ingest_json_value(&self, value: &serde_json::Value) -> Result<Dataset, IngestError> {
        Ok(self.ingest(rows_from_json_value(value)?))
    }

    /// Ingest whatever the inbox holds; `Ok(None)` while it is empty.
    pub fn ingest_latest(&self, inbox: &PayloadInbox) -> Result<Option<Dataset>, IngestError> {
        let Some(payload) = inbox.latest() else {
            return Ok(None);
        };
        log::debug!(
            "ingesting {} records received from {} at {}",
            payload.record_count(),
            payload.source,
            payload.received_at
        );
        self.ingest_json_value(&payload.data).map(Some)
    }

    pub fn ingest_json_str(&self, json: &str) -> Result<Dataset, IngestError> {
        Ok(self.ingest(rows_from_json_str(json)?))
    }

    pub fn ingest_url_param(&self, encoded: &str) -> Result<Dataset, IngestError> {
        Ok(self.ingest(rows_from_url_param(encoded)?))
    }

    pub fn ingest_csv_reader<R: Read>(
        &self,
        reader: R,
        options: &CsvOptions,
    ) -> Result<Dataset, IngestError> {
        Ok(self.ingest(rows_from_csv_reader(reader, options)?))
    }
}

/// [`Pipeline::ingest`] with the default configuration.
pub fn ingest_rows<I>(rows: I) -> Dataset
where
    I: IntoIterator,
    I::Item: Into<Option<RawRow>>,
{
    Pipeline::default().ingest(rows)
}
