use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use consolidator::{
    BarAggregator, BarConsolidator, Consolidator, Resolution, TickConsolidator, TickKind,
    TradeBar, TradePrint,
};

fn trade_at(datetime: DateTime<Utc>, price: f64, quantity: f64) -> TradePrint {
    TradePrint {
        symbol: "I2601".to_string(),
        exchange: "DCE".to_string(),
        datetime,
        price,
        quantity,
        kind: TickKind::Trade,
    }
}

fn bar_5m(start: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> TradeBar {
    TradeBar {
        symbol: "I2601".to_string(),
        exchange: "DCE".to_string(),
        start,
        end: start + Duration::minutes(5),
        open_price: open,
        high_price: high,
        low_price: low,
        close_price: close,
        volume,
    }
}

fn capture<A: BarAggregator>(consolidator: &mut Consolidator<A>) -> Arc<Mutex<Vec<TradeBar>>> {
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&emitted);
    consolidator.subscribe(Arc::new(move |bar: &TradeBar| {
        sink.lock().expect("lock").push(bar.clone());
    }));
    emitted
}

/// 三笔成交（10/5, 12/3, 9/2），count=3 聚合成一根 bar。
#[test]
fn three_trades_consolidate_into_one_count_bar() {
    let mut consolidator = TickConsolidator::from_count(3).unwrap();
    let emitted = capture(&mut consolidator);

    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    consolidator.update(&trade_at(t0, 10.0, 5.0)).unwrap();
    consolidator
        .update(&trade_at(t0 + Duration::seconds(1), 12.0, 3.0))
        .unwrap();
    consolidator
        .update(&trade_at(t0 + Duration::seconds(2), 9.0, 2.0))
        .unwrap();

    let bars = emitted.lock().unwrap();
    assert_eq!(bars.len(), 1);
    let bar = &bars[0];
    assert_eq!(bar.open_price, 10.0);
    assert_eq!(bar.high_price, 12.0);
    assert_eq!(bar.low_price, 9.0);
    assert_eq!(bar.close_price, 9.0);
    assert_eq!(bar.volume, 10.0);
}

/// 三根 5 分钟 bar 合并为一根 15 分钟 bar，第四根开启新窗口。
#[test]
fn five_minute_bars_merge_into_fifteen_minute_bar() {
    let mut consolidator = BarConsolidator::from_period(Duration::minutes(15)).unwrap();
    let emitted = capture(&mut consolidator);

    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    consolidator
        .update(&bar_5m(t0, 1.0, 3.0, 1.0, 2.0, 100.0))
        .unwrap();
    consolidator
        .update(&bar_5m(t0 + Duration::minutes(5), 2.0, 4.0, 2.0, 3.0, 150.0))
        .unwrap();
    consolidator
        .update(&bar_5m(t0 + Duration::minutes(10), 3.0, 5.0, 1.0, 4.0, 120.0))
        .unwrap();
    assert!(emitted.lock().unwrap().is_empty());

    // 第四根 bar 的 start 到达 15 分钟边界，触发合并发布
    consolidator
        .update(&bar_5m(t0 + Duration::minutes(15), 4.0, 6.0, 4.0, 5.0, 80.0))
        .unwrap();

    let bars = emitted.lock().unwrap();
    assert_eq!(bars.len(), 1);
    let merged = &bars[0];
    assert_eq!(merged.open_price, 1.0);
    assert_eq!(merged.high_price, 5.0);
    assert_eq!(merged.low_price, 1.0);
    assert_eq!(merged.close_price, 4.0);
    assert_eq!(merged.volume, 370.0);
    assert_eq!(merged.start, t0);
    assert_eq!(merged.end, t0 + Duration::minutes(15));

    let working = consolidator.working_bar().unwrap();
    assert_eq!(working.open_price, 4.0);
    assert_eq!(working.start, t0 + Duration::minutes(15));
}

/// 按显式 1 分钟周期构造：bar 的 start 记录首笔成交时间，
/// 但窗口右边界对齐到整分钟。
#[test]
fn minute_window_closes_at_calendar_boundary() {
    let mut consolidator = TickConsolidator::from_period(Duration::minutes(1)).unwrap();
    let emitted = capture(&mut consolidator);

    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let open_trade = trade_at(t0 + Duration::milliseconds(500), 100.0, 1.0);
    let inside_trade = trade_at(t0 + Duration::milliseconds(59_900), 101.0, 2.0);
    let next_window_trade = trade_at(t0 + Duration::milliseconds(60_100), 102.0, 3.0);

    consolidator.update(&open_trade).unwrap();
    assert_eq!(
        consolidator.working_bar().unwrap().start,
        t0 + Duration::milliseconds(500)
    );

    consolidator.update(&inside_trade).unwrap();
    consolidator.update(&next_window_trade).unwrap();

    let bars = emitted.lock().unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].start, t0 + Duration::milliseconds(500));
    assert_eq!(bars[0].end, t0 + Duration::milliseconds(59_900));
    assert_eq!(bars[0].close_price, 101.0);

    let working = consolidator.working_bar().unwrap();
    assert_eq!(working.start, t0 + Duration::milliseconds(60_100));
    assert_eq!(working.open_price, 102.0);
}

/// 按 Resolution 构造时，bar 的 start 对齐到周期边界。
#[test]
fn resolution_window_aligns_bar_start() {
    let mut consolidator = TickConsolidator::from_resolution(Resolution::Minute).unwrap();
    let _emitted = capture(&mut consolidator);

    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    consolidator
        .update(&trade_at(t0 + Duration::milliseconds(500), 100.0, 1.0))
        .unwrap();

    let working = consolidator.working_bar().unwrap();
    assert_eq!(working.start, t0);
    assert_eq!(working.end, t0 + Duration::milliseconds(500));
}

/// 级联：逐笔 -> 细 bar -> 粗 bar。
#[test]
fn chained_consolidators_produce_coarser_bars() {
    let mut outer = BarConsolidator::from_count(2).unwrap();
    let emitted = capture(&mut outer);
    let outer = Arc::new(Mutex::new(outer));

    let mut inner = TickConsolidator::from_count(2).unwrap();
    let chained = Arc::clone(&outer);
    inner.subscribe(Arc::new(move |bar: &TradeBar| {
        chained.lock().expect("lock").update(bar).expect("chained update");
    }));

    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    for i in 0..4 {
        inner
            .update(&trade_at(t0 + Duration::seconds(i), 100.0 + i as f64, 1.0))
            .unwrap();
    }

    let bars = emitted.lock().unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].open_price, 100.0);
    assert_eq!(bars[0].close_price, 103.0);
    assert_eq!(bars[0].volume, 4.0);
}
