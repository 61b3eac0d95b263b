//! Room-based push events for shop clients.
//!
//! Services publish through a [`Broadcaster`]; WebSocket clients connected to
//! `/ws` join rooms and receive the events addressed to them.
//!
//! | Event            | Room                | Payload                   |
//! |------------------|---------------------|---------------------------|
//! | `stockUpdate`    | `product_<id>`      | `{productId, stock}`      |
//! | `adminAnalytics` | `admin_dashboard`   | sales analytics rows      |

pub mod broadcaster;
pub mod ws;

pub use broadcaster::{
    ADMIN_ANALYTICS_EVENT, ADMIN_DASHBOARD_ROOM, Broadcaster, DEFAULT_CAPACITY, RoomEvent,
    STOCK_UPDATE_EVENT, StockUpdate, product_room,
};
pub use ws::{ClientMessage, MAX_ROOMS_PER_SOCKET, Subscriptions, router};
