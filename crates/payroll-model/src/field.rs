use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical column names every known upstream header spelling maps to.
///
/// The serialized form is the canonical name itself (`"AdjustedSales"`), which
/// is also the key used in a [`CanonicalRow`](crate::CanonicalRow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Employee,
    Period,
    PaymentType,
    WorkedDays,
    WorkedHours,
    HourlyRate,
    SalesPercentage,
    BasePayment,
    TotalSales,
    AddlSales,
    AdjustedSales,
    SalesCommission,
    BonusPayment,
    TotalBeforeBonus,
    FinalTotal,
    AvgSalesPerDay,
    AvgSalesPerHour,
    Description,
    ConfigVersion,
    DataIssues,
    SalaryToSalesPct,
    SalesShareOfShop,
    SalaryShareOfShop,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::Employee,
        Field::Period,
        Field::PaymentType,
        Field::WorkedDays,
        Field::WorkedHours,
        Field::HourlyRate,
        Field::SalesPercentage,
        Field::BasePayment,
        Field::TotalSales,
        Field::AddlSales,
        Field::AdjustedSales,
        Field::SalesCommission,
        Field::BonusPayment,
        Field::TotalBeforeBonus,
        Field::FinalTotal,
        Field::AvgSalesPerDay,
        Field::AvgSalesPerHour,
        Field::Description,
        Field::ConfigVersion,
        Field::DataIssues,
        Field::SalaryToSalesPct,
        Field::SalesShareOfShop,
        Field::SalaryShareOfShop,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Employee => "Employee",
            Field::Period => "Period",
            Field::PaymentType => "PaymentType",
            Field::WorkedDays => "WorkedDays",
            Field::WorkedHours => "WorkedHours",
            Field::HourlyRate => "HourlyRate",
            Field::SalesPercentage => "SalesPercentage",
            Field::BasePayment => "BasePayment",
            Field::TotalSales => "TotalSales",
            Field::AddlSales => "AddlSales",
            Field::AdjustedSales => "AdjustedSales",
            Field::SalesCommission => "SalesCommission",
            Field::BonusPayment => "BonusPayment",
            Field::TotalBeforeBonus => "TotalBeforeBonus",
            Field::FinalTotal => "FinalTotal",
            Field::AvgSalesPerDay => "AvgSalesPerDay",
            Field::AvgSalesPerHour => "AvgSalesPerHour",
            Field::Description => "Description",
            Field::ConfigVersion => "ConfigVersion",
            Field::DataIssues => "DataIssues",
            Field::SalaryToSalesPct => "SalaryToSalesPct",
            Field::SalesShareOfShop => "SalesShareOfShop",
            Field::SalaryShareOfShop => "SalaryShareOfShop",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown canonical field: {}", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
