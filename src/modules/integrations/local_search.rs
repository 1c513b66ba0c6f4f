//! Yahoo! Local Search integration
//!
//! Builds the upstream query, performs the call through the shared
//! `HttpClient` and turns the `Feature` list of a response into landmarks.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::domain::Landmark;
use crate::infrastructure::http_client::HttpClient;

pub const DEFAULT_ENDPOINT: &str = "https://map.yahooapis.jp/search/local/V1/localSearch";
pub const DEFAULT_DIST: &str = "1000";
pub const DEFAULT_RESULTS: &str = "5";
pub const DEFAULT_GENRE_CODES: &str = "0105,0107";

/// Raw query parameters as received from the map UI
#[derive(Debug, Default, Deserialize)]
pub struct LocalSearchParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub dist: Option<String>,
    pub results: Option<String>,
    pub gc: Option<String>,
}

/// Validated query with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchQuery {
    pub lat: String,
    pub lon: String,
    pub dist: String,
    pub results: String,
    pub gc: String,
}

#[derive(Debug)]
pub enum LocalSearchError {
    /// Upstream answered with a non-2xx status
    Status(u16),
    /// Network failure or undecodable body
    Transport(String),
}

impl std::fmt::Display for LocalSearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearchError::Status(code) => {
                write!(f, "Yahoo API responded with status: {}", code)
            }
            LocalSearchError::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for LocalSearchError {}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl LocalSearchParams {
    /// `None` when `lat` or `lon` is missing or empty.
    pub fn into_query(self) -> Option<LocalSearchQuery> {
        let lat = present(self.lat)?;
        let lon = present(self.lon)?;

        Some(LocalSearchQuery {
            lat,
            lon,
            dist: present(self.dist).unwrap_or_else(|| DEFAULT_DIST.to_string()),
            results: present(self.results).unwrap_or_else(|| DEFAULT_RESULTS.to_string()),
            gc: present(self.gc).unwrap_or_else(|| DEFAULT_GENRE_CODES.to_string()),
        })
    }
}

pub fn build_upstream_url(
    endpoint: &str,
    api_key: &str,
    query: &LocalSearchQuery,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("appid", api_key)
        .append_pair("lat", &query.lat)
        .append_pair("lon", &query.lon)
        .append_pair("dist", &query.dist)
        .append_pair("results", &query.results)
        .append_pair("sort", "dist")
        .append_pair("output", "json")
        .append_pair("gc", &query.gc);
    Ok(url)
}

/// Call the upstream API and return its JSON body untouched.
pub async fn search(
    http: &HttpClient,
    endpoint: &str,
    api_key: &str,
    query: &LocalSearchQuery,
) -> Result<Value, LocalSearchError> {
    let url = build_upstream_url(endpoint, api_key, query)
        .map_err(|e| LocalSearchError::Transport(format!("Invalid endpoint: {}", e)))?;

    let res = http
        .send(|client| client.get(url.clone()))
        .await
        .map_err(|e| LocalSearchError::Transport(e.to_string()))?;

    if !res.status().is_success() {
        return Err(LocalSearchError::Status(res.status().as_u16()));
    }

    res.json::<Value>()
        .await
        .map_err(|e| LocalSearchError::Transport(e.to_string()))
}

// --- Response normalization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Feature {
    id: Option<Value>,
    #[serde(default)]
    name: String,
    geometry: Option<Geometry>,
    description: Option<String>,
    property: Option<Property>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Geometry {
    coordinates: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Property {
    address: Option<String>,
    #[serde(default)]
    genre: Vec<Genre>,
    tel1: Option<String>,
    catch_copy: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Genre {
    code: Option<String>,
    name: Option<String>,
}

// "lon,lat" as sent in Geometry.Coordinates
fn parse_coordinates(raw: &str) -> Option<(f64, f64)> {
    let (lon, lat) = raw.split_once(',')?;
    let lon = lon.trim().parse::<f64>().ok()?;
    let lat = lat.trim().parse::<f64>().ok()?;
    Some((lat, lon))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Landmarks from the `Feature` array of a local search response.
///
/// Features without usable coordinates are skipped.
pub fn landmarks_from_response(body: &Value) -> Vec<Landmark> {
    let Some(features) = body.get("Feature").and_then(Value::as_array) else {
        return Vec::new();
    };

    features
        .iter()
        .filter_map(|raw| {
            let feature: Feature = match serde_json::from_value(raw.clone()) {
                Ok(f) => f,
                Err(e) => {
                    tracing::debug!("Skipping malformed feature: {}", e);
                    return None;
                }
            };
            let (latitude, longitude) = feature
                .geometry
                .as_ref()
                .and_then(|g| g.coordinates.as_deref())
                .and_then(parse_coordinates)?;

            let property = feature.property;
            let (address, genre, tel, catch_copy) = match property {
                Some(p) => (p.address, p.genre.into_iter().next(), p.tel1, p.catch_copy),
                None => (None, None, None, None),
            };
            let (genre_code, genre_name) = match genre {
                Some(g) => (g.code, g.name),
                None => (None, None),
            };

            Some(Landmark {
                id: feature.id.and_then(|id| match id {
                    Value::String(s) => non_empty(Some(s)),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }),
                name: feature.name,
                address: non_empty(address),
                latitude,
                longitude,
                genre_code: non_empty(genre_code),
                genre_name: non_empty(genre_name),
                tel: non_empty(tel),
                detail: non_empty(catch_copy).or_else(|| non_empty(feature.description)),
            })
        })
        .collect()
}
