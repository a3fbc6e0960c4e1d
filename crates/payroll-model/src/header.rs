//! Header aliasing.
//!
//! Upstream sources (spreadsheet exports, webhook JSON, URL payloads) spell the
//! same column many different ways: `"Sales %"`, `"SalesPercentage"`, and a
//! long-lived `"Sales Percxentage"` typo all mean [`Field::SalesPercentage`].
//! Lookups go through [`normalize_header_key`] so casing, spacing and
//! punctuation never matter.

use std::collections::HashMap;

use crate::{CanonicalRow, Field, RawRow};

/// Built-in alias table, keyed by normalized header.
pub const DEFAULT_ALIASES: &[(&str, Field)] = &[
    ("employee", Field::Employee),
    ("period", Field::Period),
    ("paymenttype", Field::PaymentType),
    ("paymenttypehourlyonly", Field::PaymentType),
    ("paymenttypealltypes", Field::PaymentType),
    ("workeddays", Field::WorkedDays),
    ("workedhours", Field::WorkedHours),
    ("hourlyrate", Field::HourlyRate),
    ("salespercentage", Field::SalesPercentage),
    ("salespercxentage", Field::SalesPercentage),
    // `Sales %` loses its `%` during normalization.
    ("sales", Field::SalesPercentage),
    ("basepayment", Field::BasePayment),
    ("totalsales", Field::TotalSales),
    ("addlsales", Field::AddlSales),
    ("additionalsales", Field::AddlSales),
    ("adjustedsales", Field::AdjustedSales),
    ("salescommission", Field::SalesCommission),
    ("bonuspayment", Field::BonusPayment),
    ("totalbeforebonus", Field::TotalBeforeBonus),
    ("finaltotal", Field::FinalTotal),
    ("finaltotalpayment", Field::FinalTotal),
    ("avgsalesperday", Field::AvgSalesPerDay),
    ("avgsalesday", Field::AvgSalesPerDay),
    ("avgsalesperhour", Field::AvgSalesPerHour),
    ("avgsaleshour", Field::AvgSalesPerHour),
    ("description", Field::Description),
    ("paystructuredescription", Field::Description),
    ("configversion", Field::ConfigVersion),
    ("dataissues", Field::DataIssues),
    ("salaryvsownsales", Field::SalaryToSalesPct),
    ("salarytosalespct", Field::SalaryToSalesPct),
    ("salesshareofshop", Field::SalesShareOfShop),
    ("salaryshareofshop", Field::SalaryShareOfShop),
];

/// Lower-case, then drop whitespace and everything outside `[a-z0-9]`.
///
/// Non-ASCII letters are dropped too, so `"Café"` normalizes to `"caf"`.
pub fn normalize_header_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Maps arbitrary header spellings to canonical [`Field`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderMap {
    aliases: HashMap<String, Field>,
}

impl Default for HeaderMap {
    fn default() -> Self {
        Self::from_aliases(DEFAULT_ALIASES.iter().copied())
    }
}

impl HeaderMap {
    /// An empty table: every key passes through unchanged.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Build a table from `(header, field)` pairs. Headers are normalized on insert.
    pub fn from_aliases<'a>(aliases: impl IntoIterator<Item = (&'a str, Field)>) -> Self {
        let mut map = Self::empty();
        for (header, field) in aliases {
            map.insert(header, field);
        }
        map
    }

    /// Add or replace one alias.
    pub fn insert(&mut self, header: &str, field: Field) {
        self.aliases.insert(normalize_header_key(header), field);
    }

    pub fn with_alias(mut self, header: &str, field: Field) -> Self {
        self.insert(header, field);
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical field for a raw header, if the table knows it.
    pub fn resolve(&self, raw: &str) -> Option<Field> {
        self.aliases.get(&normalize_header_key(raw)).copied()
    }

    /// Rewrite every key of `row` to its canonical name.
    ///
    /// Unknown keys are kept verbatim. When several raw keys land on the same
    /// canonical name the one seen last wins.
    pub fn normalize_row(&self, row: &RawRow) -> CanonicalRow {
        let mut out = CanonicalRow::new();
        for (key, value) in row.iter() {
            let mapped = match self.resolve(key) {
                Some(field) => field.as_str(),
                None => key,
            };
            out.insert(mapped, value.map(str::to_string));
        }
        out
    }
}
