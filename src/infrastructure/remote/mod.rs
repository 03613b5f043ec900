pub mod http_gateway;
mod payloads;

pub use http_gateway::HttpRemoteGateway;
