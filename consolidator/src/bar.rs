use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeBar {
    pub symbol: String,
    pub exchange: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl TradeBar {
    pub fn body(&self) -> f64 {
        (self.close_price - self.open_price).abs()
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high_price - self.close_price.max(self.open_price)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.close_price.min(self.open_price) - self.low_price
    }

    pub fn total_range(&self) -> f64 {
        self.high_price - self.low_price
    }
}
