use crate::utils::error::{GalleryError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub feed: FeedSection,
    #[serde(default)]
    pub gallery: GallerySection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSection {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Dates are quoted `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GallerySection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub open: Option<NaiveDate>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GalleryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GalleryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${APOD_FEED_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GalleryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[feed]
url = "https://example.com/apod.json"
timeout_seconds = 30

[gallery]
start = "2024-01-01"
end = "2024-01-09"
open = "2024-01-05"
title = "My Sky"

[output]
path = "./site"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.feed.url.as_deref(), Some("https://example.com/apod.json"));
        assert_eq!(config.feed.timeout_seconds, Some(30));
        assert_eq!(config.gallery.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.gallery.open, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(config.output.path.as_deref(), Some("./site"));
    }

    #[test]
    fn test_all_sections_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.feed.url.is_none());
        assert!(config.gallery.start.is_none());
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SPACE_EXPLORER_TEST_FEED", "https://test.feed.com/data.json");

        let toml_content = r#"
[feed]
url = "${SPACE_EXPLORER_TEST_FEED}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.feed.url.as_deref(),
            Some("https://test.feed.com/data.json")
        );

        std::env::remove_var("SPACE_EXPLORER_TEST_FEED");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[feed\nurl = ");
        assert!(matches!(
            result,
            Err(GalleryError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.path.as_deref(), Some("./from-file"));
    }
}
