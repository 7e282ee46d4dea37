use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use log::LevelFilter;
use sampler_engine::GatewaySettings;
use sampler_logging::{sampler_info, LogDestination};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

const DEFAULT_CONFIG_FILE: &str = "sampler.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogOutput {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogOutput> for LogDestination {
    fn from(output: LogOutput) -> Self {
        match output {
            LogOutput::File => LogDestination::File,
            LogOutput::Terminal => LogDestination::Terminal,
            LogOutput::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub log_destination: LogOutput,
    pub log_level: String,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_ms: 1000,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            log_destination: LogOutput::Terminal,
            log_level: "info".to_string(),
        }
    }
}

impl SamplerConfig {
    /// Loads `path`, or `./sampler.ron` when no path is given and the file exists.
    /// Missing optional fields keep their defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("in {}", path.display()))?;
        sampler_info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: SamplerConfig = ron::from_str(text).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("unknown log_level {:?}", self.log_level))?;
        Ok(())
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        self
    }

    pub fn level_filter(&self, verbose: bool) -> LevelFilter {
        if verbose {
            return LevelFilter::Debug;
        }
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}
