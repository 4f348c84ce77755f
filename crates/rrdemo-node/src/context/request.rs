use std::convert::Infallible;
use std::net::SocketAddr;

use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

use rrdemo_core::record::RequestMeta;

/// Client address, path, and method of the current request.
///
/// The peer address is only known when the server was started with connect
/// info; otherwise `client_ip` is `None`.
#[derive(Debug, Clone)]
pub struct RequestInfo(pub RequestMeta);

#[async_trait]
impl<S> FromRequestParts<S> for RequestInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let client_ip = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(RequestInfo(RequestMeta {
            client_ip,
            path: parts.uri.path().to_string(),
            method: parts.method.as_str().to_string(),
        }))
    }
}
