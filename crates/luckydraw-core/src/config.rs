//! Client configuration
//!
//! Every field has a default matching the stock page, so an empty object
//! (or no config at all) mounts against `index.html` as shipped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::celebration::DEFAULT_CELEBRATION_MS;
use crate::error::ConfigError;
use crate::receipt::DEFAULT_RECEIPT_PREFIX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin prefix for the endpoints, empty for same-origin
    pub api_base: String,
    pub analyze_path: String,
    pub draw_path: String,
    /// File name prefix of exported receipts
    pub receipt_prefix: String,
    /// Length of the confetti sequence
    pub celebration_ms: u32,
    /// `tracing` level name (`error` .. `trace`)
    pub log_level: String,
    pub elements: ElementIds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            analyze_path: "/api/analyze".to_string(),
            draw_path: "/api/draw".to_string(),
            receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
            celebration_ms: DEFAULT_CELEBRATION_MS,
            log_level: "info".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate configuration from a JSON string
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [("analyze_path", &self.analyze_path), ("draw_path", &self.draw_path)]
        {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with '/', got {:?}",
                    name, path
                )));
            }
        }
        if self.receipt_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "receipt_prefix must not be empty".to_string(),
            ));
        }
        if self.celebration_ms == 0 {
            return Err(ConfigError::Invalid(
                "celebration_ms must be greater than 0".to_string(),
            ));
        }
        self.level()?;
        self.elements.validate()
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level {:?}", self.log_level)))
    }

    pub fn analyze_url(&self) -> String {
        self.url(&self.analyze_path)
    }

    pub fn draw_url(&self) -> String {
        self.url(&self.draw_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// DOM ids of the page elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub dropzone: String,
    pub file_input: String,
    pub file_name: String,
    pub analyze_progress: String,
    pub analyze_error: String,
    pub analyze_result: String,
    pub column_select: String,
    pub k_input: String,
    pub dedupe_toggle: String,
    pub row_count: String,
    pub preview_table: String,
    pub draw_button: String,
    pub draw_progress: String,
    pub draw_error: String,
    pub results_section: String,
    pub winners_list: String,
    pub receipt_json: String,
    pub download_receipt_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            dropzone: "dropzone".to_string(),
            file_input: "file-input".to_string(),
            file_name: "file-name".to_string(),
            analyze_progress: "analyze-progress".to_string(),
            analyze_error: "analyze-error".to_string(),
            analyze_result: "analyze-result".to_string(),
            column_select: "column-select".to_string(),
            k_input: "k-input".to_string(),
            dedupe_toggle: "dedupe-toggle".to_string(),
            row_count: "row-count".to_string(),
            preview_table: "preview-table".to_string(),
            draw_button: "draw-btn".to_string(),
            draw_progress: "draw-progress".to_string(),
            draw_error: "draw-error".to_string(),
            results_section: "results-section".to_string(),
            winners_list: "winners-list".to_string(),
            receipt_json: "receipt-json".to_string(),
            download_receipt_button: "download-receipt-btn".to_string(),
        }
    }
}

impl ElementIds {
    /// All ids paired with their field names
    pub fn entries(&self) -> [(&'static str, &str); 18] {
        [
            ("dropzone", self.dropzone.as_str()),
            ("file_input", self.file_input.as_str()),
            ("file_name", self.file_name.as_str()),
            ("analyze_progress", self.analyze_progress.as_str()),
            ("analyze_error", self.analyze_error.as_str()),
            ("analyze_result", self.analyze_result.as_str()),
            ("column_select", self.column_select.as_str()),
            ("k_input", self.k_input.as_str()),
            ("dedupe_toggle", self.dedupe_toggle.as_str()),
            ("row_count", self.row_count.as_str()),
            ("preview_table", self.preview_table.as_str()),
            ("draw_button", self.draw_button.as_str()),
            ("draw_progress", self.draw_progress.as_str()),
            ("draw_error", self.draw_error.as_str()),
            ("results_section", self.results_section.as_str()),
            ("winners_list", self.winners_list.as_str()),
            ("receipt_json", self.receipt_json.as_str()),
            ("download_receipt_button", self.download_receipt_button.as_str()),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.entries().iter().find(|(_, id)| id.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::Invalid(format!(
                "element id {} must not be empty",
                name
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.analyze_url(), "/api/analyze");
        assert_eq!(config.draw_url(), "/api/draw");
    }

    #[test]
    fn test_api_base_prefix() {
        let config =
            ClientConfig::from_json(r#"{"api_base": "https://draw.example.com/"}"#).unwrap();
        assert_eq!(config.analyze_url(), "https://draw.example.com/api/analyze");
    }

    #[test]
    fn test_partial_element_override() {
        let config =
            ClientConfig::from_json(r#"{"elements": {"draw_button": "go"}}"#).unwrap();
        assert_eq!(config.elements.draw_button, "go");
        assert_eq!(config.elements.dropzone, "dropzone");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ClientConfig::from_json(r#"{"analyse_path": "/x"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for body in [
            r#"{"draw_path": "api/draw"}"#,
            r#"{"analyze_path": ""}"#,
            r#"{"receipt_prefix": "  "}"#,
            r#"{"celebration_ms": 0}"#,
            r#"{"log_level": "loud"}"#,
            r#"{"elements": {"k_input": ""}}"#,
        ] {
            let err = ClientConfig::from_json(body).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}", body);
        }
    }

    #[test]
    fn test_level() {
        let config = ClientConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(config.level().unwrap(), Level::DEBUG);
    }
}
