use crate::model::ConfigError;
use crate::utils::{parse_datetime, parse_end_datetime};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;

fn default_ranking_limit() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub input_html: String,
    pub output_json: String,
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Length of the best/worst ROI slices.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,
}

impl AppConfig {
    /// Resolves the optional date range used to pre-filter the ledger.
    pub fn date_range(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ConfigError> {
        let start = Self::resolve_date("start_date", self.start_date.as_deref(), parse_datetime)?;
        // a bare end date includes that whole day
        let end = Self::resolve_date("end_date", self.end_date.as_deref(), parse_end_datetime)?;
        Ok((start, end))
    }

    fn resolve_date(
        field: &str,
        value: Option<&str>,
        parse: fn(&str) -> Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ConfigError> {
        match value {
            None => Ok(None),
            Some(raw) => parse(raw)
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidValue(field.to_string(), raw.to_string())),
        }
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
