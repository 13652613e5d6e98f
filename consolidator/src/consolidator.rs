//! 聚合驱动器（窗口状态机）。
//!
//! 负责：
//! - 维护 Empty / Accumulating 两态与当前 working bar;
//! - 按时间 / count 边界（或两者先到先关）关闭窗口并同步发布;
//! - 乱序观测拒绝与流结束时的 flush。

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace, warn};

use crate::aggregator::{BarAggregator, BarMergeAggregator, TickBarAggregator};
use crate::bar::TradeBar;
use crate::constant::{ConsolidatorError, Resolution};
use crate::events::{BarSubscriber, Emitter};
use crate::window::WindowSpec;

/// 单 symbol、单逻辑流的聚合器。
///
/// 一次最多持有一根 working bar；调用方需按时间戳单调递增地喂入观测，
/// 并在流结束时调用 `flush` 以免丢失最后一段不完整窗口。
pub struct Consolidator<A: BarAggregator> {
    window: WindowSpec,
    aggregator: A,
    working: Option<TradeBar>,
    window_end: Option<DateTime<Utc>>,
    observations_in_window: usize,
    emitter: Emitter,
    last_emitted: Option<TradeBar>,
}

impl<A: BarAggregator> Consolidator<A> {
    pub fn new(window: WindowSpec, aggregator: A) -> Self {
        Self {
            window,
            aggregator,
            working: None,
            window_end: None,
            observations_in_window: 0,
            emitter: Emitter::default(),
            last_emitted: None,
        }
    }

    pub fn subscribe(&mut self, subscriber: BarSubscriber) {
        self.emitter.subscribe(subscriber);
    }

    /// 喂入一个观测。
    ///
    /// 被过滤的观测（如 tick 策略下的 quote）不改变任何状态；
    /// 时间戳早于当前 working bar 起点的观测被整体拒绝，状态不变。
    pub fn update(&mut self, input: &A::Input) -> Result<(), ConsolidatorError> {
        if !self.aggregator.is_accepted(input) {
            trace!("observation filtered");
            return Ok(());
        }

        let timestamp = self.aggregator.observation_time(input);

        if let Some(bar) = &self.working {
            if timestamp < bar.start {
                warn!(
                    bar_start = %bar.start,
                    observation = %timestamp,
                    "rejecting out of order observation"
                );
                return Err(ConsolidatorError::OutOfOrderData {
                    bar_start: bar.start,
                    timestamp,
                });
            }
        }

        // 左闭右开窗口：到达边界的观测属于下一个窗口，先关当前 bar 再重新处理。
        if let Some(end) = self.window_end {
            if timestamp >= end {
                self.close_and_emit();
            }
        }

        match self.working.as_mut() {
            None => {
                let mut bar = self.aggregator.create(input);
                bar.start = self.window.window_start(bar.start);
                self.window_end = self.window.window_end(timestamp);
                self.working = Some(bar);
                self.observations_in_window = 1;
            }
            Some(bar) => {
                self.aggregator.update(bar, input);
                self.observations_in_window += 1;
            }
        }

        if let Some(max_count) = self.window.max_count() {
            if self.observations_in_window >= max_count {
                self.close_and_emit();
            }
        }

        Ok(())
    }

    /// 时间扫描：即使没有新观测到达，窗口周期已过也会关闭并发布当前 bar。
    pub fn scan(&mut self, now: DateTime<Utc>) {
        if let (Some(end), Some(_)) = (self.window_end, &self.working) {
            if now >= end {
                self.close_and_emit();
            }
        }
    }

    /// 强制发布当前（可能不完整的）working bar；Empty 态下为 no-op。
    pub fn flush(&mut self) {
        self.close_and_emit();
    }

    pub fn working_bar(&self) -> Option<&TradeBar> {
        self.working.as_ref()
    }

    pub fn last_consolidated(&self) -> Option<&TradeBar> {
        self.last_emitted.as_ref()
    }

    /// 已并入当前 working bar 的观测数。
    pub fn observation_count(&self) -> usize {
        self.observations_in_window
    }

    pub fn window(&self) -> &WindowSpec {
        &self.window
    }

    fn close_and_emit(&mut self) {
        let Some(bar) = self.working.take() else {
            return;
        };
        self.window_end = None;
        debug!(
            symbol = %bar.symbol,
            start = %bar.start,
            end = %bar.end,
            volume = bar.volume,
            "bar consolidated"
        );
        self.emitter.notify(&bar);
        self.observations_in_window = 0;
        self.last_emitted = Some(bar);
    }
}

/// 逐笔成交流 -> bar。
pub type TickConsolidator = Consolidator<TickBarAggregator>;

/// 细粒度 bar 流 -> 粗粒度 bar。
pub type BarConsolidator = Consolidator<BarMergeAggregator>;

impl Consolidator<TickBarAggregator> {
    pub fn from_period(period: Duration) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(WindowSpec::from_period(period)?, TickBarAggregator))
    }

    pub fn from_count(max_count: usize) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(WindowSpec::from_count(max_count)?, TickBarAggregator))
    }

    pub fn from_count_and_period(
        max_count: usize,
        period: Duration,
    ) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(
            WindowSpec::from_count_and_period(max_count, period)?,
            TickBarAggregator,
        ))
    }

    pub fn from_resolution(resolution: Resolution) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(
            WindowSpec::from_resolution(resolution)?,
            TickBarAggregator,
        ))
    }
}

impl Consolidator<BarMergeAggregator> {
    pub fn from_period(period: Duration) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(WindowSpec::from_period(period)?, BarMergeAggregator))
    }

    pub fn from_count(max_count: usize) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(WindowSpec::from_count(max_count)?, BarMergeAggregator))
    }

    pub fn from_count_and_period(
        max_count: usize,
        period: Duration,
    ) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(
            WindowSpec::from_count_and_period(max_count, period)?,
            BarMergeAggregator,
        ))
    }

    pub fn from_resolution(resolution: Resolution) -> Result<Self, ConsolidatorError> {
        Ok(Self::new(
            WindowSpec::from_resolution(resolution)?,
            BarMergeAggregator,
        ))
    }
}
