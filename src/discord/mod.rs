//! Discord adapter: gateway events in, REST commands out.

pub mod gateway;
pub mod handler;

pub use gateway::DiscordGateway;
pub use handler::BridgeHandler;
