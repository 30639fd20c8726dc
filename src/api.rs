//! HTTP transport for the content API.
//!
//! This module performs the single GET behind every load. It uses a
//! trait-based design so the pipeline can be driven by a stub in tests:
//! - [`FetchAsync`]: Core trait returning the body of a successful response
//! - [`HttpFetcher`]: reqwest-backed implementation with connect/read timeouts
//!
//! # Request Policy
//!
//! - Connect timeout 15 seconds, read timeout 10 seconds
//! - Only `200 OK` counts as success; redirects are not followed
//! - No retries: one request, on its own connection, per call

use crate::error::FetchError;
use reqwest::{Client, StatusCode, redirect};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Limit on establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Limit on each read from the socket, including waiting for headers.
    pub read_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Trait for fetching a response body.
///
/// Implementors issue one GET for `url` and return the whole body as text,
/// or a [`FetchError`] describing why there is none.
pub trait FetchAsync {
    fn get_text(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`FetchAsync`] over a reqwest [`Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose client enforces `config`'s timeouts.
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .redirect(redirect::Policy::none())
            // No idle pool: each connection closes once its response is dropped.
            .pool_max_idle_per_host(0)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(host = url.host_str().unwrap_or_default()))]
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let t0 = Instant::now();

        // The response owns the connection; it is closed when dropped on any
        // return below.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Error response code"
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(e)
            } else {
                FetchError::Body(e)
            }
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched news JSON"
        );
        Ok(body)
    }
}

/// Whether the network looks usable, independent of any load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Probe connectivity by opening a TCP connection to `url`'s host.
///
/// The connection is closed immediately. Any failure, including a missing
/// host or `limit` elapsing, reports [`Connectivity::Offline`].
#[instrument(level = "debug", skip_all, fields(host = url.host_str().unwrap_or_default()))]
pub async fn probe_connectivity(url: &Url, limit: Duration) -> Connectivity {
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return Connectivity::Offline;
    };

    match timeout(limit, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => Connectivity::Online,
        Ok(Err(e)) => {
            debug!(error = %e, "Connectivity probe failed");
            Connectivity::Offline
        }
        Err(_) => {
            debug!(?limit, "Connectivity probe timed out");
            Connectivity::Offline
        }
    }
}
