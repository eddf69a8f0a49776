use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::options,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
};

use crate::proxy_service::{forward, preflight, ProxyState};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

fn static_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// `/v1/*` goes upstream, everything else is looked up in `static_dir`.
pub fn build_router(state: Arc<ProxyState>, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/v1", options(preflight).fallback(forward))
        .route("/v1/", options(preflight).fallback(forward))
        .route("/v1/*path", options(preflight).fallback(forward))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static(ALLOW_ORIGIN),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOW_METHODS),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOW_HEADERS),
                )),
        )
        .with_state(state);

    let static_files = ServiceBuilder::new()
        .layer(static_cors())
        .service(ServeDir::new(static_dir));

    api.fallback_service(static_files)
}
