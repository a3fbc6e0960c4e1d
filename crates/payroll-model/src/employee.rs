use serde::{Deserialize, Serialize};

use crate::rating::{EfficiencyRating, RatingThresholds};
use crate::value::{currency_or_zero, percent_of, percent_or_zero, SalesRate};
use crate::{CanonicalRow, Field};

pub const DEFAULT_PAYMENT_TYPE: &str = "HYBRID";
pub const DEFAULT_DESCRIPTION: &str = "Standard configuration";
pub const DEFAULT_CONFIG_VERSION: &str = "N/A";
pub const DEFAULT_DATA_ISSUES: &str = "None";

/// One employee's pay and sales figures for a period.
///
/// Amounts are in the shop's single currency; `*_pct` / `*_share_of_shop`
/// fields are percent points (`41.13`, not `0.4113`). The two share fields are
/// recomputed by [`apply_shop_shares`](crate::apply_shop_shares) once the shop
/// totals are known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub period: String,
    pub payment_type: String,
    pub worked_days: f64,
    pub worked_hours: f64,
    pub hourly_rate: f64,
    pub sales_percentage: SalesRate,
    pub base_payment: f64,
    pub total_sales: f64,
    pub addl_sales: f64,
    pub adjusted_sales: f64,
    pub sales_commission: f64,
    pub bonus_payment: f64,
    pub total_before_bonus: f64,
    pub final_total: f64,
    pub avg_sales_per_day: f64,
    pub avg_sales_per_hour: f64,
    pub description: String,
    pub config_version: String,
    pub data_issues: String,
    pub salary_to_sales_pct: f64,
    pub sales_share_of_shop: f64,
    pub salary_share_of_shop: f64,
}

impl Employee {
    /// Build a record from a row already classified as an employee row.
    ///
    /// Amounts are taken as given; nothing is re-derived from other columns.
    /// Missing cells fall back to the field defaults.
    pub fn from_row(row: &CanonicalRow) -> Employee {
        let amount = |field: Field| currency_or_zero(row.get(field));
        let percent = |field: Field| percent_or_zero(row.get(field));
        let text = |field: Field, default: &str| {
            row.non_empty(field).unwrap_or(default).to_string()
        };

        Employee {
            name: row.get(Field::Employee).unwrap_or_default().to_string(),
            period: row.get(Field::Period).unwrap_or_default().to_string(),
            payment_type: text(Field::PaymentType, DEFAULT_PAYMENT_TYPE),
            worked_days: amount(Field::WorkedDays),
            worked_hours: amount(Field::WorkedHours),
            hourly_rate: amount(Field::HourlyRate),
            sales_percentage: SalesRate::parse(row.get(Field::SalesPercentage)),
            base_payment: amount(Field::BasePayment),
            total_sales: amount(Field::TotalSales),
            addl_sales: amount(Field::AddlSales),
            adjusted_sales: amount(Field::AdjustedSales),
            sales_commission: amount(Field::SalesCommission),
            bonus_payment: amount(Field::BonusPayment),
            total_before_bonus: amount(Field::TotalBeforeBonus),
            final_total: amount(Field::FinalTotal),
            avg_sales_per_day: amount(Field::AvgSalesPerDay),
            avg_sales_per_hour: amount(Field::AvgSalesPerHour),
            description: text(Field::Description, DEFAULT_DESCRIPTION),
            config_version: text(Field::ConfigVersion, DEFAULT_CONFIG_VERSION),
            data_issues: text(Field::DataIssues, DEFAULT_DATA_ISSUES),
            salary_to_sales_pct: percent(Field::SalaryToSalesPct),
            sales_share_of_shop: percent(Field::SalesShareOfShop),
            salary_share_of_shop: percent(Field::SalaryShareOfShop),
        }
    }

    /// Labour cost per unit of revenue: `finalTotal / adjustedSales * 100`.
    pub fn cost_ratio(&self) -> f64 {
        percent_of(self.final_total, self.adjusted_sales)
    }

    /// `finalTotal / workedDays`, `0.0` with no worked days.
    pub fn earnings_per_day(&self) -> f64 {
        if self.worked_days == 0.0 {
            return 0.0;
        }
        self.final_total / self.worked_days
    }

    /// `basePayment + salesCommission + bonusPayment`.
    pub fn expected_final_total(&self) -> f64 {
        self.base_payment + self.sales_commission + self.bonus_payment
    }

    pub fn efficiency_rating(&self, thresholds: &RatingThresholds) -> EfficiencyRating {
        thresholds.rate(self.cost_ratio(), self.sales_share_of_shop)
    }
}
