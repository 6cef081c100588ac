//! Logging setup for applications embedding participant-core

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::{ParticipantError, Result};

/// Target of the events this crate emits
pub const CRATE_TARGET: &str = "rvoip_participant_core";

/// How an application wants participant-core (and everything else) logged
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Floor for every target not named elsewhere
    pub level: Level,
    /// Level for this crate's own device and dispatch events
    pub device_level: Level,
    /// Extra `EnvFilter` directives, e.g. `"tokio=warn"`
    pub directives: Vec<String>,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
    pub file_info: bool,
    /// Report span enter/exit
    pub log_spans: bool,
    /// Name logged once at startup
    pub app_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            device_level: Level::DEBUG,
            directives: Vec::new(),
            json: false,
            file_info: false,
            log_spans: false,
            app_name: "rvoip-participant".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn new(level: Level, app_name: impl Into<String>) -> Self {
        LoggingConfig {
            level,
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn with_device_level(mut self, level: Level) -> Self {
        self.device_level = level;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }

    pub fn with_spans(mut self) -> Self {
        self.log_spans = true;
        self
    }

    /// Build the filter: `RUST_LOG`, then the global floor, this crate's
    /// level and any extra directives.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::from_default_env()
            .add_directive(self.level.into())
            .add_directive(parse_directive(&format!(
                "{}={}",
                CRATE_TARGET, self.device_level
            ))?);
        for directive in &self.directives {
            filter = filter.add_directive(parse_directive(directive)?);
        }
        Ok(filter)
    }
}

fn parse_directive(directive: &str) -> Result<Directive> {
    directive
        .parse()
        .map_err(|e| ParticipantError::logging(format!("Invalid directive {}: {}", directive, e)))
}

/// Install a global subscriber. Fails if one is already installed.
pub fn setup_logging(config: LoggingConfig) -> Result<()> {
    let filter = config.env_filter()?;

    let span_events = if config.log_spans {
        FmtSpan::ACTIVE
    } else {
        FmtSpan::NONE
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_file(config.file_info)
        .with_line_number(config.file_info);

    let installed = if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    installed.map_err(|e| ParticipantError::logging(e.to_string()))?;
    tracing::info!("Logging initialized for {}", config.app_name);
    Ok(())
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level).map_err(|_| ParticipantError::logging(format!("Invalid log level: {}", level)))
}
