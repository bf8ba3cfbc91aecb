//! ClubLog DXCC API client
//!
//! Resolves a callsign to its DXCC entity (number, display name, optional
//! coordinates) via the ClubLog `dxcc` endpoint. Lookups are synchronous
//! per spot with a bounded timeout; nothing is cached — the alerting domain
//! is small enough that repeated lookups are acceptable.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const CLUBLOG_DXCC_URL: &str = "https://secure.clublog.org/dxcc";
const USER_AGENT: &str = concat!("dxwatch/", env!("CARGO_PKG_VERSION"));

/// Entity lookup errors, carrying the callsign that was being resolved.
///
/// Recoverable per spot: the classifier skips the spot (or substitutes a
/// placeholder for the spotter's name) and the stream continues.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Connection, DNS or timeout failure
    #[error("network error looking up {0}: {1}")]
    Network(String, String),

    /// ClubLog answered with a non-success status
    #[error("ClubLog returned status {1} looking up {0}")]
    ApiStatus(String, u16),

    /// Response body was not the expected JSON shape
    #[error("unparseable ClubLog response for {0}: {1}")]
    Parse(String, String),

    /// Response parsed but carries no DXCC entity number
    #[error("ClubLog response for {0} has no DXCC entity")]
    MissingEntity(String),
}

impl LookupError {
    /// The callsign whose lookup failed.
    pub fn callsign(&self) -> &str {
        match self {
            LookupError::Network(c, _)
            | LookupError::ApiStatus(c, _)
            | LookupError::Parse(c, _)
            | LookupError::MissingEntity(c) => c,
        }
    }
}

/// Resolved DXCC entity for one callsign.
///
/// Ephemeral: fetched per spot and owned by the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    /// DXCC entity number
    pub dxcc: u32,
    /// Entity display name (e.g. "Japan")
    pub name: String,
    /// Entity coordinates when ClubLog provides them
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// ClubLog `dxcc` endpoint response
#[derive(Debug, Deserialize)]
struct DxccResponse {
    #[serde(rename = "DXCC")]
    dxcc: Option<u32>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Lat")]
    latitude: Option<f64>,
    #[serde(rename = "Lon")]
    longitude: Option<f64>,
}

impl EntityInfo {
    /// A response without a DXCC number is useless to the classifier; a
    /// missing name only degrades the alert text.
    fn from_response(callsign: &str, response: DxccResponse) -> std::result::Result<Self, LookupError> {
        let dxcc = response
            .dxcc
            .ok_or_else(|| LookupError::MissingEntity(callsign.to_string()))?;
        Ok(EntityInfo {
            dxcc,
            name: response.name.unwrap_or_else(|| "unknown".to_string()),
            latitude: response.latitude,
            longitude: response.longitude,
        })
    }
}

/// The lookup seam the classifier depends on.
///
/// Production uses [`ClubLogClient`]; tests substitute a stub resolver.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Resolve a callsign to its DXCC entity.
    async fn lookup(&self, callsign: &str) -> std::result::Result<EntityInfo, LookupError>;
}

/// ClubLog API client
pub struct ClubLogClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl ClubLogClient {
    /// Build a client with the given API key and per-request timeout.
    ///
    /// An elapsed timeout surfaces as [`LookupError::Network`]; a lookup is
    /// never left pending.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build ClubLog HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }
}

#[async_trait]
impl EntityLookup for ClubLogClient {
    async fn lookup(&self, callsign: &str) -> std::result::Result<EntityInfo, LookupError> {
        tracing::debug!(callsign = %callsign, "querying ClubLog DXCC API");

        let response = self
            .http_client
            .get(CLUBLOG_DXCC_URL)
            .query(&[("call", callsign), ("api", &self.api_key), ("full", "1")])
            .send()
            .await
            .map_err(|e| LookupError::Network(callsign.to_string(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ApiStatus(callsign.to_string(), status.as_u16()));
        }

        let body: DxccResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(callsign.to_string(), e.to_string()))?;

        EntityInfo::from_response(callsign, body)
    }
}
