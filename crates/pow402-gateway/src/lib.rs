pub mod config;
pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod response;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use coordinator::HttpCoordinator;
pub use error::GatewayError;
pub use state::AppState;
