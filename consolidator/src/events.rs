use std::sync::Arc;

use crate::bar::TradeBar;

pub type BarSubscriber = Arc<dyn Fn(&TradeBar) + Send + Sync>;

#[derive(Default)]
pub struct Emitter {
    subscribers: Vec<BarSubscriber>,
}

impl Emitter {
    pub fn subscribe(&mut self, subscriber: BarSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// 按注册顺序同步通知所有订阅者。
    pub fn notify(&self, bar: &TradeBar) {
        for subscriber in &self.subscribers {
            subscriber(bar);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
