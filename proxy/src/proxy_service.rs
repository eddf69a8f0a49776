use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::Response,
};
use reqwest::{redirect, Client, Url};

use crate::error::ProxyError;

/// Headers that describe a single connection and must not be relayed.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    HeaderName::from_static("keep-alive"),
];

/// Shared by every request; holds nothing that changes after startup.
pub struct ProxyState {
    client: Client,
    upstream: Url,
}

impl ProxyState {
    pub fn new(upstream: Url) -> Result<Self, ProxyError> {
        let client = Client::builder().redirect(redirect::Policy::none()).build()?;
        Ok(Self { client, upstream })
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Appends the inbound path and query to the upstream origin, keeping `/v1`.
    pub fn target_url(&self, path_and_query: &str) -> Result<Url, ProxyError> {
        let target = format!(
            "{}{}",
            self.upstream.as_str().trim_end_matches('/'),
            path_and_query
        );
        Url::parse(&target).map_err(|e| ProxyError::InvalidTarget {
            message: e.to_string(),
            target,
        })
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}

fn request_log_line(method: &Method, path_and_query: &str, headers: &HeaderMap) -> String {
    format!("Proxying request: method={method} path={path_and_query} headers={headers:?}")
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn forward(
    State(state): State<Arc<ProxyState>>,
    request: Request,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    let target = state.target_url(path_and_query)?;

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    // The upstream sees its own origin as Host; reqwest fills it from the URL.
    headers.remove(header::HOST);

    log::info!("{}", request_log_line(&parts.method, path_and_query, &headers));

    // Content-Length is relayed as-is so the upstream still sees a sized body.
    let body = reqwest::Body::wrap_stream(body.into_data_stream());

    let upstream_response = state
        .client
        .request(parts.method, target)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream_response.status();
    let mut response_headers = upstream_response.headers().clone();
    strip_hop_by_hop(&mut response_headers);

    log::info!(
        "Received response: status={} headers={:?}",
        status,
        response_headers
    );

    let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
