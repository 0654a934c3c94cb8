use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Client description stored with a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: String,
    pub ip_address: String,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientInfo {
            user_agent: header_str(&parts.headers, USER_AGENT.as_str())
                .unwrap_or_default()
                .to_string(),
            ip_address: client_ip(&parts.headers, peer),
        })
    }
}

/// `X-Real-Ip`, then `X-Forwarded-For`, then the socket peer address.
fn client_ip(headers: &HeaderMap, peer: Option<String>) -> String {
    header_str(headers, "x-real-ip")
        .or_else(|| header_str(headers, "x-forwarded-for"))
        .map(str::to_string)
        .or(peer)
        .unwrap_or_default()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
