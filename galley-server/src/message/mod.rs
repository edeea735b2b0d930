//! Real-time messaging
//!
//! - [`bus`] - in-process broadcast bus with role-/user-scoped topics
//! - [`broadcaster`] - kitchen lifecycle event fan-out
//! - [`handler`] - inbound ordering-collaborator signal worker

pub mod broadcaster;
pub mod bus;
pub mod handler;

pub use broadcaster::KitchenBroadcaster;
pub use bus::{MessageBus, Publisher, TopicSubscription, TopicVersions};
pub use handler::SignalWorker;
pub use shared::message::{BusMessage, KitchenEvent, OrderSignal, Topic};
