//! Real-time crash alerting: wire types and the connection hub that fans
//! `new_crash` events out to every open WebSocket subscriber.

pub mod events;
pub mod hub;

// Re-export commonly used items
pub use events::{AlertMessage, CrashRecord, CrashReport};
pub use hub::AlertHub;
