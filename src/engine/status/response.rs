//! JSON bodies served by the TiDB status port.

use std::collections::HashSet;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::Deserialize;

use crate::engine::errors::StatusError;
use crate::engine::types::RegionDescriptor;

/// `GET /tables/{db}/{table}/regions`
#[derive(Debug, Deserialize)]
pub struct TableRegionsResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub record_regions: Vec<RegionMeta>,
    #[serde(default)]
    pub indices: Vec<IndexRegions>,
}

#[derive(Debug, Deserialize)]
pub struct IndexRegions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub regions: Vec<RegionMeta>,
}

#[derive(Debug, Deserialize)]
pub struct RegionMeta {
    pub region_id: u64,
}

/// `GET /regions/{id}`; keys are base64 as Go encodes `[]byte`.
#[derive(Debug, Deserialize)]
pub struct RegionDetailResponse {
    pub region_id: u64,
    #[serde(default)]
    pub start_key: Option<String>,
    #[serde(default)]
    pub end_key: Option<String>,
}

impl TableRegionsResponse {
    pub fn parse(body: &[u8]) -> Result<Self, StatusError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Region ids covering the record and index keyspaces, first-seen order,
    /// without repeats.
    pub fn region_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let all = self
            .record_regions
            .iter()
            .chain(self.indices.iter().flat_map(|idx| idx.regions.iter()));
        for region in all {
            if seen.insert(region.region_id) {
                ids.push(region.region_id);
            }
        }
        ids
    }
}

impl RegionDetailResponse {
    pub fn parse(body: &[u8]) -> Result<Self, StatusError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn into_descriptor(self) -> Result<RegionDescriptor, StatusError> {
        Ok(RegionDescriptor::new(
            self.region_id,
            decode_key(self.start_key)?,
            decode_key(self.end_key)?,
        ))
    }
}

fn decode_key(key: Option<String>) -> Result<Vec<u8>, StatusError> {
    match key {
        None => Ok(Vec::new()),
        Some(k) if k.is_empty() => Ok(Vec::new()),
        Some(k) => Ok(BASE64_STANDARD.decode(k.as_bytes())?),
    }
}
