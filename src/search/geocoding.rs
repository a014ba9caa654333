//! Mapbox forward-geocoding client.
//!
//! `GET {base}/geocoding/v5/mapbox.places/{query}.json` constrained to
//! place/locality/region results, a fixed result cap and a fixed response
//! language.
//!
//! See <https://docs.mapbox.com/api/search/geocoding-v5/>

use crate::core::{
    config::{GeocodingConfig, SearchConfig},
    geo::Coordinate,
};
use crate::traits::Geocoder;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shared async client; one connection pool for every search on the screen
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("incident-map/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// One place returned by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    /// Full label shown in the result list
    pub place_name: String,
    /// Short label written back into the query field on selection
    pub text: String,
    pub coordinate: Coordinate,
}

impl SearchResult {
    pub fn new(
        id: impl Into<String>,
        place_name: impl Into<String>,
        text: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            place_name: place_name.into(),
            text: text.into(),
            coordinate,
        }
    }
}

/// reqwest-backed [`Geocoder`]
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    client: reqwest::Client,
    config: GeocodingConfig,
    search: SearchConfig,
}

impl MapboxGeocoder {
    pub fn new(config: GeocodingConfig, search: SearchConfig) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), config, search)
    }

    pub fn with_client(client: reqwest::Client, config: GeocodingConfig, search: SearchConfig) -> Self {
        Self {
            client,
            config,
            search,
        }
    }

    /// Builds the request URL; the query is percent-encoded as one path segment
    pub fn request_url(&self, query: &str) -> Result<Url> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or_else(|| MapError::Geocoding("no access token configured".to_string()))?;

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| MapError::InvalidConfig(format!("geocoding base url: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| {
                MapError::InvalidConfig(format!(
                    "geocoding base url cannot take a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places"])
            .push(&format!("{query}.json"));

        url.query_pairs_mut()
            .append_pair("access_token", token)
            .append_pair("types", &self.search.result_types.join(","))
            .append_pair("limit", &self.search.result_limit.to_string())
            .append_pair("language", &self.search.language);

        Ok(url)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn forward(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = self.request_url(query.trim())?;
        log::debug!("Geocoding request for {:?}", query.trim());

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MapError::Geocoding(format!(
                "geocoding endpoint returned {status}"
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body, self.search.result_limit)
    }
}

/// Parses a geocoding response body, keeping backend order.
///
/// Features missing a field are skipped; a body without a `features` array
/// is an error.
pub fn parse_response(body: &serde_json::Value, limit: usize) -> Result<Vec<SearchResult>> {
    let features = body["features"].as_array().ok_or_else(|| {
        MapError::Geocoding("geocoding response has no features array".to_string())
    })?;

    let results: Vec<SearchResult> = features
        .iter()
        .filter_map(|feature| {
            let parsed = parse_feature(feature);
            if parsed.is_none() {
                log::debug!("Skipping malformed feature {}", feature["id"]);
            }
            parsed
        })
        .take(limit)
        .collect();

    Ok(results)
}

fn parse_feature(feature: &serde_json::Value) -> Option<SearchResult> {
    let id = feature["id"].as_str()?;
    let place_name = feature["place_name"].as_str()?;
    let text = feature["text"].as_str()?;
    let center = feature["center"].as_array()?;
    let (longitude, latitude) = match center.as_slice() {
        [lon, lat] => (lon.as_f64()?, lat.as_f64()?),
        _ => return None,
    };

    let coordinate = Coordinate::new(longitude, latitude);
    coordinate
        .is_valid()
        .then(|| SearchResult::new(id, place_name, text, coordinate))
}
