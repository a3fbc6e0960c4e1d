use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rating::{RatingThresholds, ShopRatingThresholds};
use crate::validate::ValidationMode;
use crate::{Field, HeaderMap, KnownEmployees};

pub const DEFAULT_CURRENCY_SYMBOL: char = '£';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid pipeline config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("alias `{header}` targets unknown field `{field}`")]
    UnknownField { header: String, field: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    pub employee: RatingThresholds,
    pub shop: ShopRatingThresholds,
}

/// On-disk shape of [`PipelineConfig`]. Every key is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct PipelineConfigFile {
    aliases: BTreeMap<String, String>,
    known_employees: Option<Vec<String>>,
    thresholds: Thresholds,
    validation: ValidationMode,
    currency_symbol: Option<char>,
}

/// Deployment-specific knobs for one pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub headers: HeaderMap,
    /// `None` accepts any employee name that passes the shape checks.
    pub known_employees: Option<KnownEmployees>,
    pub thresholds: Thresholds,
    pub validation: ValidationMode,
    pub currency_symbol: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            headers: HeaderMap::default(),
            known_employees: None,
            thresholds: Thresholds::default(),
            validation: ValidationMode::Off,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL,
        }
    }
}

impl PipelineConfig {
    pub fn with_known_employees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_employees = Some(KnownEmployees::new(names));
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Parse a JSON config; aliases are merged over the built-in table.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: PipelineConfigFile = serde_json::from_str(json)?;

        let mut headers = HeaderMap::default();
        for (header, field) in &file.aliases {
            let target: Field = field.parse().map_err(|_| ConfigError::UnknownField {
                header: header.clone(),
                field: field.clone(),
            })?;
            headers.insert(header, target);
        }

        Ok(Self {
            headers,
            known_employees: file.known_employees.map(KnownEmployees::new),
            thresholds: file.thresholds,
            validation: file.validation,
            currency_symbol: file.currency_symbol.unwrap_or(DEFAULT_CURRENCY_SYMBOL),
        })
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
