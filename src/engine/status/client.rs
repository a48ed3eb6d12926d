use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::engine::errors::StatusError;
use crate::engine::types::{TableRef, TableRegions};

use super::response::{RegionDetailResponse, TableRegionsResponse};

/// Source of the live region layout for a table.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// Regions covering the table's keyspace, in whatever order the
    /// cluster reports them.
    async fn table_regions(&self, table: &TableRef) -> Result<TableRegions, StatusError>;
}

/// Reads region layout from a TiDB server's HTTP status port.
pub struct HttpStatusClient {
    base_url: String,
    http: Client<HttpConnector, Empty<Bytes>>,
}

impl HttpStatusClient {
    /// `addr` is `host:port` of the status listener.
    pub fn new(addr: &str) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self {
            base_url: format!("http://{addr}"),
            http,
        }
    }

    async fn get(&self, path: &str) -> Result<Bytes, StatusError> {
        let uri = format!("{}{}", self.base_url, path)
            .parse::<Uri>()
            .map_err(|e| StatusError::Unreachable(format!("invalid URI: {e}")))?;
        debug!(target: "presplit::status", %uri, "GET");

        let req = Request::builder()
            .method(Method::GET)
            .uri(uri.clone())
            .body(Empty::<Bytes>::new())
            .map_err(|e| StatusError::Unreachable(format!("failed to build request: {e}")))?;

        let res = self
            .http
            .request(req)
            .await
            .map_err(|e| StatusError::Unreachable(e.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            return Err(StatusError::Http {
                status: status.as_u16(),
                uri: uri.to_string(),
            });
        }
        let body = res
            .collect()
            .await
            .map_err(|e| StatusError::Unreachable(format!("body read failed: {e}")))?;
        Ok(body.to_bytes())
    }
}

#[async_trait]
impl RegionSource for HttpStatusClient {
    async fn table_regions(&self, table: &TableRef) -> Result<TableRegions, StatusError> {
        let body = self
            .get(&format!(
                "/tables/{}/{}/regions",
                encode_segment(&table.schema),
                encode_segment(&table.name)
            ))
            .await?;
        let listing = TableRegionsResponse::parse(&body)?;
        let ids = listing.region_ids();
        if ids.is_empty() {
            return Err(StatusError::Malformed(format!("no regions listed for {table}")));
        }

        let mut regions = Vec::with_capacity(ids.len());
        for id in ids {
            let body = self.get(&format!("/regions/{id}")).await?;
            let detail = RegionDetailResponse::parse(&body)?;
            if detail.region_id != id {
                return Err(StatusError::Malformed(format!(
                    "asked for region {id}, got region {}",
                    detail.region_id
                )));
            }
            regions.push(detail.into_descriptor()?);
        }
        Ok(TableRegions::new(Some(listing.id), regions))
    }
}

/// Percent-encodes a path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
