//! Command-line flags and their layering over file and environment config.

use clap::{Parser, ValueEnum};
use iasme_core::{AppConfig, ConfigResult, OutputFormat};
use std::path::PathBuf;

/// Discover IASME-certified organisations and enrich them with contact data.
#[derive(Debug, Parser)]
#[command(name = "iasme-research")]
#[command(about = "IASME certification directory research pipeline")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory index URL
    #[arg(long)]
    pub index: Option<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Limit the number of companies processed
    #[arg(long)]
    pub max_companies: Option<usize>,

    /// Maximum concurrent company processors
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Delay between requests per company, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Number of HTTP retries
    #[arg(long)]
    pub retries: Option<u32>,

    /// HTTP request timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON file mapping record keys to output keys
    #[arg(long)]
    pub map_file: Option<PathBuf>,

    /// Run the browser headless (pass `--headless false` to watch it)
    #[arg(long)]
    pub headless: Option<bool>,

    /// Skip writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Print records to stdout
    #[arg(long)]
    pub preview: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

/// Output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

impl Cli {
    /// Load file and environment configuration, then apply flags on top.
    pub fn into_config(self) -> ConfigResult<AppConfig> {
        let mut config = AppConfig::load_with_env(self.config.as_deref())?;
        self.apply_to(&mut config);
        Ok(config)
    }

    /// Override `config` with every flag that was given.
    pub fn apply_to(self, config: &mut AppConfig) {
        if let Some(index) = self.index {
            tracing::debug!("Override directory.index from flag: {}", index);
            config.directory.index = index;
        }
        if let Some(max) = self.max_companies {
            config.scanning.max_companies = Some(max);
        }
        if let Some(concurrency) = self.concurrency {
            config.scanning.concurrency = concurrency;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.scanning.delay_ms = delay_ms;
        }
        if let Some(retries) = self.retries {
            config.scanning.retries = retries;
        }
        if let Some(timeout) = self.timeout {
            config.scanning.timeout_ms = timeout;
        }
        if let Some(headless) = self.headless {
            config.browser.headless = headless;
        }

        if self.output.is_some() {
            config.output.path = self.output;
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if self.map_file.is_some() {
            config.output.map_file = self.map_file;
        }
        config.output.dry_run |= self.dry_run;
        config.output.preview |= self.preview;
    }
}
