//! Efficiency tiers.
//!
//! The cut-off values are business tuning, not invariants. Each one is a named
//! constant and a field of a serde struct so deployments can override them in
//! their pipeline configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum sales share (percent of shop sales) for [`EfficiencyRating::Excellent`].
pub const EXCELLENT_MIN_SALES_SHARE: f64 = 15.0;
/// Cost ratio (percent) that [`EfficiencyRating::Excellent`] must stay under.
pub const EXCELLENT_MAX_COST_RATIO: f64 = 25.0;
pub const GOOD_MIN_SALES_SHARE: f64 = 10.0;
pub const GOOD_MAX_COST_RATIO: f64 = 35.0;
pub const FAIR_MIN_SALES_SHARE: f64 = 5.0;
pub const FAIR_MAX_COST_RATIO: f64 = 50.0;

/// Shop efficiency (payroll as percent of sales) bands, checked lowest first.
pub const SHOP_EXCELLENT_BELOW: f64 = 15.0;
pub const SHOP_VERY_GOOD_BELOW: f64 = 20.0;
pub const SHOP_GOOD_BELOW: f64 = 25.0;
pub const SHOP_ACCEPTABLE_BELOW: f64 = 30.0;

/// Per-employee tier, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    NoSalesData,
}

impl EfficiencyRating {
    pub fn label(self) -> &'static str {
        match self {
            EfficiencyRating::Excellent => "Excellent",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::Fair => "Fair",
            EfficiencyRating::NeedsImprovement => "Needs Improvement",
            EfficiencyRating::NoSalesData => "No Sales Data",
        }
    }
}

impl fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatingThresholds {
    pub excellent_min_sales_share: f64,
    pub excellent_max_cost_ratio: f64,
    pub good_min_sales_share: f64,
    pub good_max_cost_ratio: f64,
    pub fair_min_sales_share: f64,
    pub fair_max_cost_ratio: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            excellent_min_sales_share: EXCELLENT_MIN_SALES_SHARE,
            excellent_max_cost_ratio: EXCELLENT_MAX_COST_RATIO,
            good_min_sales_share: GOOD_MIN_SALES_SHARE,
            good_max_cost_ratio: GOOD_MAX_COST_RATIO,
            fair_min_sales_share: FAIR_MIN_SALES_SHARE,
            fair_max_cost_ratio: FAIR_MAX_COST_RATIO,
        }
    }
}

impl RatingThresholds {
    /// Tier for a cost ratio and sales share, both in percent points.
    ///
    /// A cost ratio of exactly zero (or NaN) means there was nothing to rate.
    pub fn rate(&self, cost_ratio: f64, sales_share: f64) -> EfficiencyRating {
        if sales_share > self.excellent_min_sales_share
            && cost_ratio < self.excellent_max_cost_ratio
        {
            return EfficiencyRating::Excellent;
        }
        if sales_share > self.good_min_sales_share && cost_ratio < self.good_max_cost_ratio {
            return EfficiencyRating::Good;
        }
        if sales_share > self.fair_min_sales_share && cost_ratio < self.fair_max_cost_ratio {
            return EfficiencyRating::Fair;
        }
        if cost_ratio > 0.0 {
            return EfficiencyRating::NeedsImprovement;
        }
        EfficiencyRating::NoSalesData
    }
}

/// Shop-wide tier, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopRating {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    NeedsOptimization,
}

impl ShopRating {
    pub fn label(self) -> &'static str {
        match self {
            ShopRating::Excellent => "Excellent Efficiency",
            ShopRating::VeryGood => "Very Good",
            ShopRating::Good => "Good",
            ShopRating::Acceptable => "Acceptable",
            ShopRating::NeedsOptimization => "Needs Optimization",
        }
    }
}

impl fmt::Display for ShopRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShopRatingThresholds {
    pub excellent_below: f64,
    pub very_good_below: f64,
    pub good_below: f64,
    pub acceptable_below: f64,
}

impl Default for ShopRatingThresholds {
    fn default() -> Self {
        Self {
            excellent_below: SHOP_EXCELLENT_BELOW,
            very_good_below: SHOP_VERY_GOOD_BELOW,
            good_below: SHOP_GOOD_BELOW,
            acceptable_below: SHOP_ACCEPTABLE_BELOW,
        }
    }
}

impl ShopRatingThresholds {
    pub fn rate(&self, shop_efficiency: f64) -> ShopRating {
        if shop_efficiency < self.excellent_below {
            ShopRating::Excellent
        } else if shop_efficiency < self.very_good_below {
            ShopRating::VeryGood
        } else if shop_efficiency < self.good_below {
            ShopRating::Good
        } else if shop_efficiency < self.acceptable_below {
            ShopRating::Acceptable
        } else {
            ShopRating::NeedsOptimization
        }
    }
}
