#![no_main]

use libfuzzer_sys::fuzz_target;
use payroll_model::{CsvOptions, Pipeline};

/// Cells are copied into rows; keep the batch bounded.
const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_BYTES {
        return;
    }

    let pipeline = Pipeline::default();
    // First byte picks the adapter so one corpus covers all of them.
    let (selector, payload) = (data[0], &data[1..]);
    let dataset = match selector % 3 {
        0 => pipeline.ingest_csv_reader(payload, &CsvOptions::default()).ok(),
        1 => std::str::from_utf8(payload)
            .ok()
            .and_then(|text| pipeline.ingest_json_str(text).ok()),
        _ => std::str::from_utf8(payload)
            .ok()
            .and_then(|text| pipeline.ingest_url_param(text).ok()),
    };

    let Some(dataset) = dataset else {
        return;
    };
    if dataset.shop_metrics.is_none() {
        assert!(dataset.employees.is_empty());
    }
    for emp in &dataset.employees {
        assert!(emp.sales_share_of_shop.is_finite());
        assert!(emp.salary_share_of_shop.is_finite());
        assert_ne!(emp.name, "SHOP_METRICS");
    }
    if let Some(shop) = &dataset.shop_metrics {
        assert!(shop.shop_efficiency.is_finite());
    }
});
