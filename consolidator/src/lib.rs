//! `consolidator` crate 入口。
//!
//! 职责：把细粒度行情观测（逐笔成交或已聚合 bar）按时间窗口 / 观测数
//! 聚合为更粗粒度的 OHLCV bar，并同步推送给已注册订阅者。
//! 该文件只做模块装配与统一导出，具体实现位于各子模块。
//!
//! 模块分工：
//! - `bar` / `tick`：`TradeBar` / `TradePrint` 数据结构。
//! - `window`：窗口配置校验与 Resolution 映射。
//! - `aggregator`：tick 构建与 bar 合并两种策略。
//! - `consolidator`：窗口状态机与发布驱动。
//! - `events`：订阅者列表与同步通知。
//! - `settings`：json/yaml 窗口配置加载。
//!
//! 快速示例：
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use chrono::Utc;
//! use consolidator::{TickConsolidator, TickKind, TradeBar, TradePrint};
//!
//! let mut consolidator = TickConsolidator::from_count(2).unwrap();
//! let emitted = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&emitted);
//! consolidator.subscribe(Arc::new(move |bar: &TradeBar| {
//!     sink.lock().unwrap().push(bar.clone());
//! }));
//!
//! let print = TradePrint {
//!     symbol: "I2601".to_string(),
//!     exchange: "DCE".to_string(),
//!     datetime: Utc::now(),
//!     price: 100.0,
//!     quantity: 5.0,
//!     kind: TickKind::Trade,
//! };
//! consolidator.update(&print).unwrap();
//! consolidator.update(&print).unwrap();
//!
//! assert_eq!(emitted.lock().unwrap().len(), 1);
//! ```

pub mod aggregator;
pub mod bar;
pub mod constant;
mod consolidator;
pub mod events;
pub mod logging;
pub mod settings;
pub mod tick;
pub mod window;

pub use aggregator::{BarAggregator, BarMergeAggregator, TickBarAggregator};
pub use bar::TradeBar;
pub use constant::{ConsolidatorError, Resolution};
pub use consolidator::{BarConsolidator, Consolidator, TickConsolidator};
pub use events::{BarSubscriber, Emitter};
pub use logging::init_logging;
pub use settings::WindowSettings;
pub use tick::{TickKind, TradePrint};
pub use window::WindowSpec;
