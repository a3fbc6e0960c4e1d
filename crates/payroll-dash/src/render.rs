//! Text and JSON renderings of a dataset and of a period comparison.

use std::io::{self, Write};

use payroll_model::compare::{DatasetComparison, MetricDelta, MetricUnit};
use payroll_model::validate::DataIssue;
use payroll_model::{
    Dataset, EfficiencyRating, Employee, EmployeeSummary, PipelineConfig, ShopMetrics,
    ShopMetricsSource, ShopRating,
};
use serde::Serialize;

/// `£1,234.56`
pub fn money(symbol: char, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac}")
}

fn metric_value(symbol: char, unit: MetricUnit, value: f64) -> String {
    match unit {
        MetricUnit::Currency => money(symbol, value),
        MetricUnit::Percent => format!("{value:.2}%"),
        MetricUnit::Hours => format!("{value:.2}"),
    }
}

fn signed(symbol: char, unit: MetricUnit, value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}", metric_value(symbol, unit, value))
}

fn write_employee(
    out: &mut impl Write,
    emp: &Employee,
    config: &PipelineConfig,
) -> io::Result<()> {
    let symbol = config.currency_symbol;
    writeln!(out, "{} ({}) [{}]", emp.name, emp.period, emp.payment_type)?;
    writeln!(
        out,
        "  Hours worked:     {:.2} over {} days",
        emp.worked_hours, emp.worked_days
    )?;
    writeln!(out, "  Adjusted sales:   {}", money(symbol, emp.adjusted_sales))?;
    writeln!(
        out,
        "  Final total:      {} (base {}, commission {}, bonus {})",
        money(symbol, emp.final_total),
        money(symbol, emp.base_payment),
        money(symbol, emp.sales_commission),
        money(symbol, emp.bonus_payment)
    )?;
    writeln!(out, "  Sales rate:       {}", emp.sales_percentage)?;
    writeln!(out, "  Cost ratio:       {:.2}%", emp.cost_ratio())?;
    writeln!(
        out,
        "  Share of shop:    {:.2}% of sales, {:.2}% of payroll",
        emp.sales_share_of_shop, emp.salary_share_of_shop
    )?;
    writeln!(
        out,
        "  Per day:          {}",
        money(symbol, emp.earnings_per_day())
    )?;
    writeln!(
        out,
        "  Rating:           {}",
        emp.efficiency_rating(&config.thresholds.employee)
    )
}

fn write_shop(out: &mut impl Write, shop: &ShopMetrics, config: &PipelineConfig) -> io::Result<()> {
    let symbol = config.currency_symbol;
    let source = match shop.source {
        ShopMetricsSource::Supplied => "supplied",
        ShopMetricsSource::Computed => "computed",
    };
    writeln!(out, "Shop summary, {} ({source})", shop.period)?;
    writeln!(out, "  Total sales:      {}", money(symbol, shop.total_sales))?;
    writeln!(out, "  Total payroll:    {}", money(symbol, shop.total_salaries))?;
    writeln!(
        out,
        "  Shop efficiency:  {:.2}% ({})",
        shop.shop_efficiency,
        config.thresholds.shop.rate(shop.shop_efficiency)
    )?;
    writeln!(
        out,
        "  Sales per hour:   {}",
        money(symbol, shop.avg_sales_per_hour())
    )?;
    writeln!(out, "  Est. margin:      {:.2}%", shop.estimated_margin())?;
    writeln!(
        out,
        "  Hours / days:     {:.2} / {}",
        shop.total_hours, shop.total_days
    )
}

fn write_team_summary(
    out: &mut impl Write,
    summary: &EmployeeSummary,
    symbol: char,
) -> io::Result<()> {
    writeln!(out, "Team summary")?;
    writeln!(out, "  Employees:        {}", summary.count)?;
    writeln!(
        out,
        "  Hours:            {:.2} total, {:.2} avg",
        summary.total_hours,
        summary.avg_hours()
    )?;
    writeln!(
        out,
        "  Sales:            {} total, {} avg",
        money(symbol, summary.total_sales),
        money(symbol, summary.avg_sales())
    )?;
    writeln!(
        out,
        "  Commission:       {} total, {} avg",
        money(symbol, summary.total_commission),
        money(symbol, summary.avg_commission())
    )?;
    writeln!(
        out,
        "  Payments:         {} total, {} avg",
        money(symbol, summary.total_payments),
        money(symbol, summary.avg_payment())
    )
}

pub fn write_text_report(
    out: &mut impl Write,
    dataset: &Dataset,
    config: &PipelineConfig,
) -> io::Result<()> {
    if dataset.is_empty() {
        writeln!(out, "No employee rows found.")?;
    }

    for emp in &dataset.employees {
        write_employee(out, emp, config)?;
        writeln!(out)?;
    }

    if let Some(shop) = &dataset.shop_metrics {
        write_shop(out, shop, config)?;
        writeln!(out)?;
    }

    // A single employee's summary would just repeat their own figures.
    if dataset.employees.len() > 1 {
        let summary = EmployeeSummary::from_employees(&dataset.employees);
        write_team_summary(out, &summary, config.currency_symbol)?;
        writeln!(out)?;
    }

    if !dataset.issues.is_empty() {
        writeln!(out, "Data issues")?;
        for issue in &dataset.issues {
            writeln!(out, "  - {issue}")?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEmployee<'a> {
    #[serde(flatten)]
    employee: &'a Employee,
    cost_ratio: f64,
    earnings_per_day: f64,
    efficiency_rating: EfficiencyRating,
    efficiency_label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonShop<'a> {
    #[serde(flatten)]
    metrics: &'a ShopMetrics,
    rating: ShopRating,
    rating_label: &'static str,
    avg_sales_per_hour: f64,
    estimated_margin: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    employees: Vec<JsonEmployee<'a>>,
    shop_metrics: Option<JsonShop<'a>>,
    summary: EmployeeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<&'a [DataIssue]>,
}

pub fn write_json_report(
    out: &mut impl Write,
    dataset: &Dataset,
    config: &PipelineConfig,
) -> io::Result<()> {
    let employees = dataset
        .employees
        .iter()
        .map(|employee| {
            let rating = employee.efficiency_rating(&config.thresholds.employee);
            JsonEmployee {
                employee,
                cost_ratio: employee.cost_ratio(),
                earnings_per_day: employee.earnings_per_day(),
                efficiency_rating: rating,
                efficiency_label: rating.label(),
            }
        })
        .collect();

    let shop_metrics = dataset.shop_metrics.as_ref().map(|metrics| {
        let rating = config.thresholds.shop.rate(metrics.shop_efficiency);
        JsonShop {
            metrics,
            rating,
            rating_label: rating.label(),
            avg_sales_per_hour: metrics.avg_sales_per_hour(),
            estimated_margin: metrics.estimated_margin(),
        }
    });

    let report = JsonReport {
        employees,
        shop_metrics,
        summary: EmployeeSummary::from_employees(&dataset.employees),
        issues: (!dataset.issues.is_empty()).then_some(dataset.issues.as_slice()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

fn write_delta(out: &mut impl Write, delta: &MetricDelta, symbol: char) -> io::Result<()> {
    let side = |value: Option<f64>| match value {
        Some(v) => metric_value(symbol, delta.unit, v),
        None => "-".to_string(),
    };
    let change = match (delta.difference, delta.change_pct) {
        (Some(diff), Some(pct)) => format!("{} ({pct:+.1}%)", signed(symbol, delta.unit, diff)),
        _ => "n/a".to_string(),
    };
    writeln!(
        out,
        "  {:<16} {:>14} {:>14}   {}",
        delta.label,
        side(delta.left),
        side(delta.right),
        change
    )
}

pub fn write_text_comparison(
    out: &mut impl Write,
    comparison: &DatasetComparison,
    left: &str,
    right: &str,
    symbol: char,
) -> io::Result<()> {
    writeln!(out, "Comparison: {left} vs {right}")?;
    writeln!(out)?;

    if !comparison.shop.is_empty() {
        writeln!(out, "Shop")?;
        for delta in &comparison.shop {
            write_delta(out, delta, symbol)?;
        }
        writeln!(out)?;
    }

    for emp in &comparison.employees {
        writeln!(out, "{}", emp.name)?;
        for delta in &emp.metrics {
            write_delta(out, delta, symbol)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonComparison<'a> {
    left: &'a str,
    right: &'a str,
    #[serde(flatten)]
    comparison: &'a DatasetComparison,
}

pub fn write_json_comparison(
    out: &mut impl Write,
    comparison: &DatasetComparison,
    left: &str,
    right: &str,
) -> io::Result<()> {
    let report = JsonComparison {
        left,
        right,
        comparison,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
