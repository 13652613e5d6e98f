use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    Trade,
    Quote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePrint {
    pub symbol: String,
    pub exchange: String,
    pub datetime: DateTime<Utc>,
    pub price: f64,
    pub quantity: f64,
    pub kind: TickKind,
}

impl TradePrint {
    pub fn is_trade(&self) -> bool {
        self.kind == TickKind::Trade
    }
}
