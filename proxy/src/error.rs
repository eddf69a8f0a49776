use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body returned when a request cannot be relayed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    #[error("invalid upstream target {target:?}: {message}")]
    InvalidTarget { target: String, message: String },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        log::error!("Proxy Error: {self:?}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ProxyErrorBody {
                error: "Proxy Error".to_string(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
