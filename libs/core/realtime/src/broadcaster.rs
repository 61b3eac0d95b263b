use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use uuid::Uuid;

pub const ADMIN_DASHBOARD_ROOM: &str = "admin_dashboard";
pub const STOCK_UPDATE_EVENT: &str = "stockUpdate";
pub const ADMIN_ANALYTICS_EVENT: &str = "adminAnalytics";

/// Channel capacity; receivers further behind than this skip ahead.
pub const DEFAULT_CAPACITY: usize = 256;

pub fn product_room(product_id: Uuid) -> String {
    format!("product_{product_id}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub product_id: Uuid,
    pub stock: i32,
}

/// One event addressed to one room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomEvent {
    pub room: String,
    pub event: &'static str,
    pub data: Value,
}

impl RoomEvent {
    /// Text frame sent to subscribed sockets.
    pub fn to_frame(&self) -> String {
        json!({ "event": self.event, "room": self.room, "data": self.data }).to_string()
    }
}

/// Fan-out of room events to every connected socket.
///
/// Cheap to clone; all clones share one channel. Publishing never fails from
/// the caller's point of view.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<RoomEvent>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.tx.subscribe()
    }

    pub fn publish_stock(&self, product_id: Uuid, stock: i32) {
        let update = StockUpdate { product_id, stock };
        match serde_json::to_value(&update) {
            Ok(data) => self.publish(RoomEvent {
                room: product_room(product_id),
                event: STOCK_UPDATE_EVENT,
                data,
            }),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize stock update"),
        }
    }

    pub fn publish_admin_analytics<T: Serialize + ?Sized>(&self, analytics: &T) {
        match serde_json::to_value(analytics) {
            Ok(data) => self.publish(RoomEvent {
                room: ADMIN_DASHBOARD_ROOM.to_string(),
                event: ADMIN_ANALYTICS_EVENT,
                data,
            }),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize admin analytics"),
        }
    }

    fn publish(&self, event: RoomEvent) {
        let room = event.room.clone();
        match self.tx.send(event) {
            Ok(receivers) => tracing::debug!(%room, receivers, "Event published"),
            Err(_) => tracing::debug!(%room, "Event dropped, no connected sockets"),
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
