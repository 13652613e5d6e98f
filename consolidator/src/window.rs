//! 窗口配置（WindowSpec）。
//!
//! 负责：
//! - 校验时间周期 / 最大观测数两类边界（至少设置其一）；
//! - Resolution 到周期窗口的映射；
//! - 对齐策略：按 Resolution 构造时窗口起点对齐到周期边界，
//!   其余构造方式以首个观测的时间戳作为窗口起点。

use chrono::{DateTime, Duration, Utc};

use crate::constant::{ConsolidatorError, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    period: Option<Duration>,
    max_count: Option<usize>,
    align_to_period: bool,
}

impl WindowSpec {
    pub fn from_period(period: Duration) -> Result<Self, ConsolidatorError> {
        Self::validated(Some(period), None, false)
    }

    pub fn from_count(max_count: usize) -> Result<Self, ConsolidatorError> {
        Self::validated(None, Some(max_count), false)
    }

    pub fn from_count_and_period(
        max_count: usize,
        period: Duration,
    ) -> Result<Self, ConsolidatorError> {
        Self::validated(Some(period), Some(max_count), false)
    }

    pub fn from_resolution(resolution: Resolution) -> Result<Self, ConsolidatorError> {
        let Some(period) = resolution.period() else {
            return Err(ConsolidatorError::Configuration(
                "tick resolution has no implicit period, use a max count instead".to_string(),
            ));
        };
        Self::validated(Some(period), None, true)
    }

    fn validated(
        period: Option<Duration>,
        max_count: Option<usize>,
        align_to_period: bool,
    ) -> Result<Self, ConsolidatorError> {
        if period.is_none() && max_count.is_none() {
            return Err(ConsolidatorError::Configuration(
                "either a period or a max count must be set".to_string(),
            ));
        }
        if let Some(period) = period {
            if period <= Duration::zero() {
                return Err(ConsolidatorError::Configuration(format!(
                    "period must be strictly positive, got {period}"
                )));
            }
        }
        if max_count == Some(0) {
            return Err(ConsolidatorError::Configuration(
                "max count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            period,
            max_count,
            align_to_period,
        })
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    pub fn aligns_to_period(&self) -> bool {
        self.align_to_period
    }

    /// 给定首个观测的时间戳，返回窗口起点（bar 记录的 start）。
    ///
    /// 按 Resolution 构造时对齐到周期边界，否则为首个观测的时间戳。
    pub(crate) fn window_start(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        match self.period {
            Some(period) if self.align_to_period => align_down(timestamp, period),
            _ => timestamp,
        }
    }

    /// 给定首个观测的时间戳，返回窗口的右开边界。
    ///
    /// 边界总是对齐到周期的日历边界：09:30:00.500 开出的 1 分钟窗口
    /// 在 09:31:00 结束，到达边界的观测属于下一个窗口。
    pub(crate) fn window_end(&self, timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.period
            .map(|period| align_down(timestamp, period) + period)
    }
}

fn align_down(timestamp: DateTime<Utc>, period: Duration) -> DateTime<Utc> {
    let period_ms = period.num_milliseconds();
    if period_ms <= 0 {
        return timestamp;
    }
    let ms = timestamp.timestamp_millis();
    let aligned = ms - ms.rem_euclid(period_ms);
    DateTime::from_timestamp_millis(aligned).unwrap_or(timestamp)
}
