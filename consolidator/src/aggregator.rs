//! Bar 构建策略。
//!
//! 策略只负责"如何开一根 bar、如何把后续观测并入"，
//! 窗口何时关闭由 `Consolidator` 决定。

use chrono::{DateTime, Utc};

use crate::bar::TradeBar;
use crate::tick::TradePrint;

pub trait BarAggregator {
    type Input;

    fn observation_time(&self, input: &Self::Input) -> DateTime<Utc>;

    /// 该观测是否参与构建；被过滤的观测不触碰任何状态。
    fn is_accepted(&self, _input: &Self::Input) -> bool {
        true
    }

    /// 用首个观测开一根新的 working bar。
    fn create(&self, input: &Self::Input) -> TradeBar;

    /// 把一个后续观测并入当前 working bar。
    fn update(&self, bar: &mut TradeBar, input: &Self::Input);
}

/// 逐笔成交聚合：只有 trade 参与构建，quote 被过滤。
#[derive(Debug, Default, Clone, Copy)]
pub struct TickBarAggregator;

impl BarAggregator for TickBarAggregator {
    type Input = TradePrint;

    fn observation_time(&self, input: &TradePrint) -> DateTime<Utc> {
        input.datetime
    }

    fn is_accepted(&self, input: &TradePrint) -> bool {
        input.is_trade()
    }

    fn create(&self, input: &TradePrint) -> TradeBar {
        TradeBar {
            symbol: input.symbol.clone(),
            exchange: input.exchange.clone(),
            start: input.datetime,
            end: input.datetime,
            open_price: input.price,
            high_price: input.price,
            low_price: input.price,
            close_price: input.price,
            volume: input.quantity,
        }
    }

    fn update(&self, bar: &mut TradeBar, input: &TradePrint) {
        bar.high_price = bar.high_price.max(input.price);
        bar.low_price = bar.low_price.min(input.price);
        bar.close_price = input.price;
        bar.volume += input.quantity;
        bar.end = input.datetime;
    }
}

/// 已聚合 bar 的合并：用于把细粒度 bar 合成更粗粒度 bar。
#[derive(Debug, Default, Clone, Copy)]
pub struct BarMergeAggregator;

impl BarAggregator for BarMergeAggregator {
    type Input = TradeBar;

    fn observation_time(&self, input: &TradeBar) -> DateTime<Utc> {
        input.start
    }

    fn create(&self, input: &TradeBar) -> TradeBar {
        input.clone()
    }

    fn update(&self, bar: &mut TradeBar, input: &TradeBar) {
        bar.high_price = bar.high_price.max(input.high_price);
        bar.low_price = bar.low_price.min(input.low_price);
        bar.close_price = input.close_price;
        bar.volume += input.volume;
        bar.end = input.end;
    }
}
