pub mod cli;
pub mod toml_config;

use crate::core::feed::DEFAULT_FEED_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./gallery";
pub const DEFAULT_TITLE: &str = "NASA Space Explorer";

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "space-explorer")]
#[command(about = "Builds a gallery page from the Astronomy Picture of the Day feed")]
pub struct CliConfig {
    #[arg(long, help = "Feed URL (JSON array or {\"results\": [...]})")]
    pub feed_url: Option<String>,

    #[arg(long, help = "First day of the range (YYYY-MM-DD); the end follows it")]
    pub start: Option<NaiveDate>,

    #[arg(long, help = "Last day of the range (YYYY-MM-DD)")]
    pub end: Option<NaiveDate>,

    #[arg(long, help = "Open the detail view for the entry of this day")]
    pub open: Option<NaiveDate>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Request timeout; unset waits indefinitely")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Layers the command line over the optional TOML file over the defaults.
    pub fn resolve(&self) -> Result<GalleryConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        Ok(GalleryConfig::from_toml(file).with_overrides(self))
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub feed_url: String,
    pub output_path: String,
    pub timeout_seconds: Option<u64>,
    pub title: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub open: Option<NaiveDate>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            timeout_seconds: None,
            title: DEFAULT_TITLE.to_string(),
            start: None,
            end: None,
            open: None,
        }
    }
}

impl GalleryConfig {
    pub fn from_toml(file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            feed_url: file.feed.url.unwrap_or(defaults.feed_url),
            output_path: file.output.path.unwrap_or(defaults.output_path),
            timeout_seconds: file.feed.timeout_seconds,
            title: file.gallery.title.unwrap_or(defaults.title),
            start: file.gallery.start,
            end: file.gallery.end,
            open: file.gallery.open,
        }
    }

    #[cfg(feature = "cli")]
    pub fn with_overrides(mut self, cli: &CliConfig) -> Self {
        if let Some(url) = &cli.feed_url {
            self.feed_url = url.clone();
        }
        if let Some(path) = &cli.output_path {
            self.output_path = path.clone();
        }
        if cli.timeout_seconds.is_some() {
            self.timeout_seconds = cli.timeout_seconds;
        }
        // a start given on the command line re-derives the end unless --end is also given
        if cli.start.is_some() {
            self.start = cli.start;
            self.end = cli.end;
        } else if cli.end.is_some() {
            self.end = cli.end;
        }
        if cli.open.is_some() {
            self.open = cli.open;
        }
        self
    }
}

impl ConfigProvider for GalleryConfig {
    fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for GalleryConfig {
    fn validate(&self) -> Result<()> {
        validate_url("feed_url", &self.feed_url)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(seconds) = self.timeout_seconds {
            validate_range("timeout_seconds", seconds, 1, 3600)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GalleryError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = GalleryConfig::default();
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_feed_url_fails_validation() {
        let config = GalleryConfig {
            feed_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GalleryError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let config = GalleryConfig {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[feed]
url = "https://file.example.com/feed.json"

[gallery]
start = "2024-01-01"
end = "2024-01-03"

[output]
path = "./file-output"
"#,
        )
        .unwrap();

        let cli = CliConfig {
            feed_url: Some("https://cli.example.com/feed.json".to_string()),
            start: Some(date(2024, 2, 1)),
            ..Default::default()
        };

        let config = GalleryConfig::from_toml(file).with_overrides(&cli);

        assert_eq!(config.feed_url, "https://cli.example.com/feed.json");
        assert_eq!(config.output_path, "./file-output");
        assert_eq!(config.start, Some(date(2024, 2, 1)));
        // the file's end belonged to the file's start
        assert_eq!(config.end, None);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parses_dates() {
        let cli = CliConfig::parse_from([
            "space-explorer",
            "--start",
            "2024-01-02",
            "--open",
            "2024-01-05",
            "--verbose",
        ]);

        assert_eq!(cli.start, Some(date(2024, 1, 2)));
        assert_eq!(cli.open, Some(date(2024, 1, 5)));
        assert!(cli.verbose);
        assert!(cli.end.is_none());
    }
}
