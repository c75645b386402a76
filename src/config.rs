//! Configuration management for the resume matcher client

use crate::error::{Result, ResumeMatcherError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `server.base_url`
pub const SERVER_URL_ENV: &str = "RESUME_MATCHER_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub downloads: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Send multipart form data even when both fields are plain text
    pub prefer_multipart: bool,
    /// Extract text from attached files before sending (JSON body)
    pub extract_locally: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub animate_score: bool,
    pub default_tab: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    pub dir: PathBuf,
    pub timestamp_filenames: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let downloads_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            server: ServerConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                endpoint: "/api/analyze".to_string(),
                timeout_secs: 120,
            },
            input: InputConfig {
                prefer_multipart: false,
                extract_locally: false,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                animate_score: true,
                default_tab: "all".to_string(),
            },
            downloads: DownloadConfig {
                dir: downloads_dir,
                timestamp_filenames: false,
            },
        }
    }
}

impl Config {
    /// Load from `config_path` and apply the environment override
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Server URL overridden by {}: {}", SERVER_URL_ENV, url);
                config.server.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Load exactly what is on disk, creating the file with defaults when absent
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)
                .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// Full URL of the analysis endpoint
    pub fn analyze_url(&self) -> String {
        format!(
            "{}/{}",
            self.server.base_url.trim_end_matches('/'),
            self.server.endpoint.trim_start_matches('/')
        )
    }

    /// Change one key in the file at `config_path`. The environment
    /// override is never written back.
    pub fn update_file(config_path: &Path, key: &str, value: &str) -> Result<Self> {
        let mut stored = Self::load_file(config_path)?;
        stored.set(key, value)?;
        stored.save_to(config_path)?;
        Ok(stored)
    }

    /// Set a single value addressed by a dotted key, e.g. `server.base_url`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.base_url" => self.server.base_url = value.to_string(),
            "server.endpoint" => self.server.endpoint = value.to_string(),
            "server.timeout_secs" => self.server.timeout_secs = parse_value(key, value)?,
            "input.prefer_multipart" => self.input.prefer_multipart = parse_value(key, value)?,
            "input.extract_locally" => self.input.extract_locally = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeMatcherError::Configuration)?
            }
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.animate_score" => self.output.animate_score = parse_value(key, value)?,
            "output.default_tab" => {
                crate::output::view::TabSelection::parse(value)
                    .map_err(ResumeMatcherError::Configuration)?;
                self.output.default_tab = value.to_string();
            }
            "downloads.dir" => self.downloads.dir = PathBuf::from(value),
            "downloads.timestamp_filenames" => {
                self.downloads.timestamp_filenames = parse_value(key, value)?
            }
            _ => {
                return Err(ResumeMatcherError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ResumeMatcherError::Configuration(format!("Invalid value for {}: {}", key, value))
    })
}
