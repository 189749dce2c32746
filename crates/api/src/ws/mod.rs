//! WebSocket infrastructure: the notification socket registry, heartbeat,
//! and the chat relay.

mod chat;
mod handler;
mod heartbeat;
pub mod manager;

pub use chat::chat_ws_handler;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
