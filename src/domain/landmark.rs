//! Landmark identity, genre colors and info-window rendering

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COLOR: &str = "#FF9900";
/// Shops and facilities
pub const SHOP_COLOR: &str = "#FF6347";
/// Transport and lodging
pub const TRANSPORT_COLOR: &str = "#4682B4";
/// Sightseeing, culture and sports
pub const SIGHTSEEING_COLOR: &str = "#2E8B57";
/// Events and leisure
pub const LEISURE_COLOR: &str = "#9370DB";

/// A point of interest as returned by the local-search source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "coordinate")]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Visited landmark record kept alongside the bare id set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLandmark {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StoredLandmark {
    pub fn from_landmark(landmark: &Landmark) -> Self {
        Self {
            id: landmark_id(landmark),
            name: landmark.name.clone(),
            latitude: landmark.latitude,
            longitude: landmark.longitude,
            genre_code: landmark.genre_code.clone(),
            color: Some(landmark_color(landmark.genre_code.as_deref()).to_string()),
        }
    }
}

// Upstream sources send coordinates either as numbers or as numeric strings.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate: {:?}", s))),
    }
}

/// Stable identifier: the explicit id, else the coordinates at 6 decimals.
pub fn landmark_id(landmark: &Landmark) -> String {
    match landmark.id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!(
            "{:.6},{:.6}",
            // adding 0.0 folds -0.0 into 0.0
            landmark.latitude + 0.0,
            landmark.longitude + 0.0
        ),
    }
}

/// Marker color for a genre code, keyed on its two-character prefix.
pub fn landmark_color(genre_code: Option<&str>) -> &'static str {
    let Some(code) = genre_code else {
        return DEFAULT_COLOR;
    };

    if code.starts_with("01") {
        SHOP_COLOR
    } else if code.starts_with("02") {
        TRANSPORT_COLOR
    } else if code.starts_with("03") {
        SIGHTSEEING_COLOR
    } else if code.starts_with("04") {
        LEISURE_COLOR
    } else {
        DEFAULT_COLOR
    }
}

/// How much of an unvisited landmark the info window reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoWindowPolicy {
    /// Always show every known field
    #[default]
    Reveal,
    /// Hide name and details until the landmark has been visited
    FogOfWar,
}

impl FromStr for InfoWindowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reveal" => Ok(InfoWindowPolicy::Reveal),
            "fog" | "fog_of_war" | "fog-of-war" => Ok(InfoWindowPolicy::FogOfWar),
            other => Err(format!("unknown info window policy: {}", other)),
        }
    }
}

impl fmt::Display for InfoWindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoWindowPolicy::Reveal => write!(f, "reveal"),
            InfoWindowPolicy::FogOfWar => write!(f, "fog"),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// HTML fragment for the map info window of `landmark`.
pub fn render_info_content(landmark: &Landmark, visited: bool, policy: InfoWindowPolicy) -> String {
    if policy == InfoWindowPolicy::FogOfWar && !visited {
        return "<div>\n  <h3>???</h3>\n  <p>Visit this place to reveal its details.</p>\n</div>\n"
            .to_string();
    }

    let name = if landmark.name.is_empty() {
        "Unknown landmark"
    } else {
        landmark.name.as_str()
    };
    let address = non_empty(&landmark.address).unwrap_or("No address available");

    let mut html = String::from("<div>\n");
    html.push_str(&format!("  <h3>{}</h3>\n", escape_html(name)));
    html.push_str(&format!("  <p>{}</p>\n", escape_html(address)));
    if let Some(genre) = non_empty(&landmark.genre_name) {
        html.push_str(&format!("  <p>Genre: {}</p>\n", escape_html(genre)));
    }
    if let Some(tel) = non_empty(&landmark.tel) {
        html.push_str(&format!("  <p>Tel: {}</p>\n", escape_html(tel)));
    }
    if let Some(detail) = non_empty(&landmark.detail) {
        html.push_str(&format!("  <p>{}</p>\n", escape_html(detail)));
    }
    if visited {
        html.push_str("  <p><strong>✓ Visited</strong></p>\n");
    }
    html.push_str("</div>\n");
    html
}
