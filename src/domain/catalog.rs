use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Live mapping of service names to prices.
///
/// Explicitly owned and shared via `Arc`, with an interior `RwLock` so admin
/// price edits are safe against concurrent lookups. No edit history is kept.
#[derive(Clone)]
pub struct Catalog {
    services: Arc<RwLock<BTreeMap<String, Decimal>>>,
}

impl Catalog {
    pub fn new(seed: BTreeMap<String, Decimal>) -> Self {
        Self {
            services: Arc::new(RwLock::new(seed)),
        }
    }

    /// Looks up the current price. Returns `None` on a catalog miss; the
    /// engine decides whether that is an `UnknownService` error.
    pub async fn price(&self, service: &str) -> Option<Decimal> {
        self.services.read().await.get(service).copied()
    }

    pub async fn contains(&self, service: &str) -> bool {
        self.services.read().await.contains_key(service)
    }

    /// Overwrites the price for a service. Allow-listing and authorization
    /// are the engine's responsibility.
    pub async fn set_price(&self, service: &str, price: Decimal) {
        self.services
            .write()
            .await
            .insert(service.to_string(), price);
    }

    /// Snapshot of the full price list, in name order.
    pub async fn prices(&self) -> Vec<(String, Decimal)> {
        self.services
            .read()
            .await
            .iter()
            .map(|(name, price)| (name.clone(), *price))
            .collect()
    }
}
