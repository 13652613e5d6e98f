use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Tick,
    Second,
    Minute,
    Hour,
    Daily,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Daily => "daily",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConsolidatorError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tick" => Ok(Self::Tick),
            "second" | "1s" => Ok(Self::Second),
            "minute" | "1m" => Ok(Self::Minute),
            "hour" | "1h" => Ok(Self::Hour),
            "daily" | "1d" => Ok(Self::Daily),
            _ => Err(ConsolidatorError::InvalidResolution(value.to_string())),
        }
    }

    /// Tick 分辨率没有隐含周期，只能按 count 聚合。
    pub fn period(self) -> Option<Duration> {
        match self {
            Self::Tick => None,
            Self::Second => Some(Duration::seconds(1)),
            Self::Minute => Some(Duration::minutes(1)),
            Self::Hour => Some(Duration::hours(1)),
            Self::Daily => Some(Duration::days(1)),
        }
    }
}

#[derive(Debug)]
pub enum ConsolidatorError {
    Configuration(String),
    OutOfOrderData {
        bar_start: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    InvalidResolution(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl Display for ConsolidatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(v) => write!(f, "invalid window configuration: {v}"),
            Self::OutOfOrderData {
                bar_start,
                timestamp,
            } => write!(
                f,
                "out of order data: observation at {timestamp} precedes bar start {bar_start}"
            ),
            Self::InvalidResolution(v) => write!(f, "invalid resolution: {v}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
        }
    }
}

impl std::error::Error for ConsolidatorError {}

impl From<std::io::Error> for ConsolidatorError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConsolidatorError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for ConsolidatorError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}
