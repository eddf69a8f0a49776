pub mod config;
pub mod error;
pub mod proxy_service;
pub mod routes;

pub use config::ProxyConfig;
pub use error::{ProxyError, ProxyErrorBody};
pub use proxy_service::ProxyState;
pub use routes::build_router;
