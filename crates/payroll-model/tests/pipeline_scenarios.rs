use payroll_model::{
    ingest_rows, CsvOptions, EfficiencyRating, Field, Pipeline, PipelineConfig, RawRow, SalesRate,
    SalesRateTag, ShopMetricsSource, COMPUTED_SHOP_DESCRIPTION,
};
use pretty_assertions::assert_eq;

fn header_row() -> RawRow {
    RawRow::new()
        .with("Employee", "Employee")
        .with("Period", "Period")
        .with("WorkedDays", "Worked Days")
        .with("WorkedHours", "Worked Hours")
        .with("HourlyRate", "Hourly Rate")
        .with("AdjustedSales", "Adjusted Sales")
        .with("FinalTotal", "Final Total")
}

fn aisha() -> RawRow {
    RawRow::new()
        .with("Employee", "Aisha")
        .with("Period", "2025-07")
        .with("WorkedDays", "14")
        .with("WorkedHours", "79.82")
        .with("HourlyRate", "£12.21")
        .with("AdjustedSales", "£2369.98")
        .with("FinalTotal", "£974.62")
}

fn shop_metrics_row(sales: &str, salaries: &str) -> RawRow {
    RawRow::new()
        .with("Employee", "SHOP_METRICS")
        .with("Period", "2025-07")
        .with("WorkedDays", "318")
        .with("WorkedHours", "1587.45")
        .with("AdjustedSales", sales)
        .with("FinalTotal", salaries)
        .with("SalaryToSalesPct", "27.42%")
}

#[test]
fn header_row_is_dropped_and_shop_totals_are_computed() {
    let dataset = ingest_rows([header_row(), aisha()]);

    assert_eq!(dataset.employees.len(), 1);
    let emp = &dataset.employees[0];
    assert_eq!(emp.name, "Aisha");
    assert_eq!(emp.hourly_rate, 12.21);
    assert_eq!(emp.final_total, 974.62);
    assert_eq!(emp.worked_hours, 79.82);

    let shop = dataset.shop_metrics.expect("shop metrics");
    assert_eq!(shop.source, ShopMetricsSource::Computed);
    assert_eq!(shop.description, COMPUTED_SHOP_DESCRIPTION);
    assert_eq!(shop.period, "2025-07");
    assert_eq!(shop.total_sales, 2369.98);
    assert_eq!(shop.total_salaries, 974.62);
    assert_eq!(shop.shop_efficiency, (974.62 / 2369.98) * 100.0);
    assert!((shop.shop_efficiency - 41.13).abs() < 0.01);
}

#[test]
fn supplied_aggregate_row_wins_over_employee_sums() {
    let dataset = ingest_rows([aisha(), shop_metrics_row("£31,245.87", "£8,567.42")]);

    assert_eq!(dataset.employees.len(), 1);
    let shop = dataset.shop_metrics.expect("shop metrics");
    assert_eq!(shop.source, ShopMetricsSource::Supplied);
    assert_eq!(shop.total_sales, 31245.87);
    assert_eq!(shop.total_salaries, 8567.42);
    assert_eq!(shop.shop_efficiency, 27.42);
    assert_eq!(shop.total_days, 318.0);

    // Shares are taken against the supplied totals.
    let emp = &dataset.employees[0];
    assert_eq!(emp.sales_share_of_shop, 2369.98 / 31245.87 * 100.0);
    assert_eq!(emp.salary_share_of_shop, 974.62 / 8567.42 * 100.0);
}

#[test]
fn implausible_aggregate_is_replaced_by_computed_totals() {
    let dataset = ingest_rows([aisha(), shop_metrics_row("£0.00", "£0.00")]);
    let shop = dataset.shop_metrics.expect("shop metrics");
    assert_eq!(shop.source, ShopMetricsSource::Computed);
    assert_eq!(shop.total_sales, 2369.98);
}

#[test]
fn aggregate_without_employees_is_kept() {
    let dataset = ingest_rows([shop_metrics_row("£0.00", "£0.00")]);
    assert!(dataset.employees.is_empty());
    let shop = dataset.shop_metrics.expect("shop metrics");
    assert_eq!(shop.source, ShopMetricsSource::Supplied);
}

#[test]
fn shop_metrics_row_never_becomes_an_employee() {
    // Satisfies every employee-row shape check.
    let row = shop_metrics_row("£100", "£50");
    let dataset = ingest_rows([row]);
    assert!(dataset.employees.iter().all(|e| e.name != "SHOP_METRICS"));
    assert!(dataset.employees.is_empty());
}

#[test]
fn later_alias_overrides_earlier_one_within_a_row() {
    let first_alias = aisha().with("Sales%", "10%").with("SalesPercentage", "20%");
    let second_alias = aisha().with("SalesPercentage", "20%").with("Sales %", "10%");

    let dataset = ingest_rows([first_alias, second_alias]);
    assert_eq!(dataset.employees.len(), 2);
    assert_eq!(dataset.employees[0].sales_percentage, SalesRate::Fraction(0.2));
    assert_eq!(dataset.employees[1].sales_percentage, SalesRate::Fraction(0.1));
}

#[test]
fn sales_rate_tags_pass_through() {
    let tiered = aisha().with("Sales Percentage", "Tiered");
    let na = aisha().with("Sales Percxentage", "N/A");
    let dataset = ingest_rows([tiered, na]);
    assert_eq!(
        dataset.employees[0].sales_percentage,
        SalesRate::Tag(SalesRateTag::Tiered)
    );
    assert_eq!(
        dataset.employees[1].sales_percentage,
        SalesRate::Tag(SalesRateTag::NotApplicable)
    );
}

#[test]
fn zero_sales_never_produces_non_finite_shares() {
    let row = RawRow::new()
        .with("Employee", "Bea")
        .with("Period", "2025-07")
        .with("WorkedDays", "3")
        .with("AdjustedSales", "£0.00")
        .with("FinalTotal", "£0.00");
    let dataset = ingest_rows([row]);

    let shop = dataset.shop_metrics.expect("shop metrics");
    assert_eq!(shop.total_sales, 0.0);
    assert_eq!(shop.shop_efficiency, 0.0);

    let emp = &dataset.employees[0];
    assert_eq!(emp.sales_share_of_shop, 0.0);
    assert_eq!(emp.salary_share_of_shop, 0.0);
    assert_eq!(
        emp.efficiency_rating(&Default::default()),
        EfficiencyRating::NoSalesData
    );
}

#[test]
fn noise_rows_are_dropped_and_order_is_preserved() {
    let names = ["Zed", "Aisha", "Mo"];
    let mut rows: Vec<Option<RawRow>> = Vec::new();
    rows.push(None);
    for name in names {
        rows.push(Some(aisha().with("Employee", name)));
        rows.push(Some(
            aisha().with("Employee", format!("{name} - Daily Breakdown")),
        ));
    }
    rows.push(Some(aisha().with("Employee", "TOTAL_SUMMARY")));
    rows.push(Some(aisha().with("Employee", "")));
    rows.push(Some(aisha().with("Employee", "Mo - 2025-07-01")));
    rows.push(Some(RawRow::new().with("Employee", "Ghost").with("Period", "2025-07")));

    let dataset = ingest_rows(rows);
    let got: Vec<&str> = dataset.employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(got, names);
}

#[test]
fn allow_list_restricts_employee_rows() {
    let pipeline = Pipeline::new(PipelineConfig::default().with_known_employees(["Aisha"]));
    let dataset = pipeline.ingest([aisha(), aisha().with("Employee", "Stranger")]);
    assert_eq!(dataset.employees.len(), 1);
    assert_eq!(dataset.employees[0].name, "Aisha");
}

#[test]
fn allow_list_matches_padded_spreadsheet_names() {
    let csv = "Employee,Period,Worked Days,Final Total,Adjusted Sales\nAisha ,2025-07,14,£974.62,£2369.98\n";
    let pipeline = Pipeline::new(PipelineConfig::default().with_known_employees(["Aisha"]));
    let dataset = pipeline
        .ingest_csv_reader(csv.as_bytes(), &CsvOptions::default())
        .unwrap();
    assert_eq!(dataset.employees.len(), 1);
    assert_eq!(dataset.employees[0].final_total, 974.62);
}

#[test]
fn single_row_is_a_one_element_batch() {
    let pipeline = Pipeline::default();
    assert_eq!(pipeline.ingest_one(aisha()), pipeline.ingest([aisha()]));
}

#[test]
fn empty_input_has_no_shop_metrics() {
    let dataset = ingest_rows(Vec::<RawRow>::new());
    assert!(dataset.is_empty());
    assert!(dataset.shop_metrics.is_none());
}

#[test]
fn missing_fields_take_defaults() {
    let dataset = ingest_rows([aisha()]);
    let emp = &dataset.employees[0];
    assert_eq!(emp.payment_type, "HYBRID");
    assert_eq!(emp.description, "Standard configuration");
    assert_eq!(emp.config_version, "N/A");
    assert_eq!(emp.data_issues, "None");
    assert_eq!(emp.bonus_payment, 0.0);
    assert_eq!(emp.sales_percentage, SalesRate::Fraction(0.0));
}

#[test]
fn unknown_headers_survive_normalization() {
    let pipeline = Pipeline::default();
    let row = aisha().with("Store Code", "LDN-1");
    let canonical = pipeline.config().headers.normalize_row(&row);
    assert_eq!(canonical.get_key("Store Code"), Some("LDN-1"));
    assert_eq!(canonical.get(Field::HourlyRate), Some("£12.21"));
}
