use log::debug;
use serde::{Deserialize, Serialize};

use crate::clients::errors::Result;

/// One track entry from the iTunes search results.
///
/// Every field is optional: the catalog omits whatever it does not know, and a
/// missing field never fails the decode.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MusicRecord {
    #[serde(rename = "trackName")]
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    #[serde(rename = "collectionName")]
    pub album_name: Option<String>,
    pub preview_url: Option<String>,
    #[serde(rename = "artworkUrl100")]
    pub image_url: Option<String>,
    pub release_date: Option<String>,
}

/// Decoded search envelope.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Informational only, never checked against `results.len()`.
    pub result_count: i64,
    pub results: Vec<MusicRecord>,
}

/// Parse raw response bytes into a [`SearchResponse`].
///
/// Fails only when the payload is not JSON or the envelope shape is wrong.
pub fn decode_response(bytes: &[u8]) -> Result<SearchResponse> {
    let response: SearchResponse = serde_json::from_slice(bytes)?;
    if usize::try_from(response.result_count).ok() != Some(response.results.len()) {
        debug!(
            "resultCount {} differs from {} decoded results",
            response.result_count,
            response.results.len()
        );
    }
    Ok(response)
}
