use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::constant::{ConsolidatorError, Resolution};
use crate::window::WindowSpec;

/// 从配置文件反序列化得到的窗口设置，转换为 `WindowSpec` 时统一校验。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowSettings {
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub period_secs: Option<i64>,
    #[serde(default)]
    pub max_count: Option<usize>,
}

impl WindowSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConsolidatorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let settings: WindowSettings = match path.extension().and_then(|x| x.to_str()) {
            Some("json") => {
                let value: JsonValue = serde_json::from_str(&text)?;
                serde_json::from_value(value)?
            }
            Some("yaml") | Some("yml") => {
                let value: YamlValue = serde_yaml::from_str(&text)?;
                serde_yaml::from_value(value)?
            }
            _ => {
                return Err(ConsolidatorError::Configuration(
                    "unsupported settings file format".to_string(),
                ));
            }
        };
        Ok(settings)
    }

    /// `resolution` 优先；tick 分辨率必须搭配 `max_count`。
    pub fn into_window_spec(self) -> Result<WindowSpec, ConsolidatorError> {
        if let Some(value) = self.resolution {
            let resolution = Resolution::parse(&value)?;
            return match resolution.period() {
                Some(_) => WindowSpec::from_resolution(resolution),
                None => match self.max_count {
                    Some(count) => WindowSpec::from_count(count),
                    None => Err(ConsolidatorError::Configuration(
                        "tick resolution requires max_count".to_string(),
                    )),
                },
            };
        }

        match (self.period_secs, self.max_count) {
            (Some(secs), Some(count)) => {
                WindowSpec::from_count_and_period(count, Duration::seconds(secs))
            }
            (Some(secs), None) => WindowSpec::from_period(Duration::seconds(secs)),
            (None, Some(count)) => WindowSpec::from_count(count),
            (None, None) => Err(ConsolidatorError::Configuration(
                "either a period or a max count must be set".to_string(),
            )),
        }
    }
}
