//! Per-document map settings
//!
//! Settings live in a `%%map ...%%` tag near the top of the document and
//! control heading handling, content cross-linking and the study scheduler
//! parameters.

use serde::{Deserialize, Serialize};

use crate::error::{BraidmapError, Result};
use crate::tag::{MAP_TAG_OPEN, TAG_CLOSE};

/// Default scheduler weight vector
pub const DEFAULT_WEIGHTS: [f64; 19] = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

/// Study scheduler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyParameters {
    pub enable_fuzz: bool,
    pub enable_short_term: bool,
    pub maximum_interval: f64,
    pub request_retention: f64,
    pub w: Vec<f64>,
}

impl Default for StudyParameters {
    fn default() -> Self {
        StudyParameters {
            enable_fuzz: false,
            enable_short_term: true,
            maximum_interval: 36500.0,
            request_retention: 0.9,
            w: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

/// Settings for a single mind-map document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Treat each top-level heading as its own map instead of attaching
    /// everything to a single center node
    pub separate_headings: bool,
    /// Group notes with identical content into implicit link groups
    pub crosslink: bool,
    pub study: StudyParameters,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            separate_headings: false,
            crosslink: true,
            study: StudyParameters::default(),
        }
    }
}

/// Decode a map tag body into settings
pub fn decode_map_tag(body: &str) -> Result<MapSettings> {
    let fields: Vec<&str> = body.split(';').collect();
    if fields.len() != 7 {
        return Err(BraidmapError::InvalidMapSettings {
            reason: format!("expected 7 fields, got {}", fields.len()),
        });
    }

    let separate_headings = parse_flag(fields[0], "separate headings")?;
    let crosslink = parse_flag(fields[1], "crosslink")?;
    let enable_fuzz = parse_flag(fields[2], "enable fuzz")?;
    let enable_short_term = parse_flag(fields[3], "enable short term")?;
    let maximum_interval = parse_number(fields[4], "maximum interval")?;
    let request_retention = parse_number(fields[5], "request retention")?;
    let w = fields[6]
        .split(',')
        .map(|raw| parse_number(raw, "weight"))
        .collect::<Result<Vec<f64>>>()?;

    Ok(MapSettings {
        separate_headings,
        crosslink,
        study: StudyParameters {
            enable_fuzz,
            enable_short_term,
            maximum_interval,
            request_retention,
            w,
        },
    })
}

/// Encode settings as a map tag body
pub fn encode_map_tag(settings: &MapSettings) -> String {
    let weights: Vec<String> = settings.study.w.iter().map(f64::to_string).collect();
    format!(
        "{};{};{};{};{};{};{}",
        settings.separate_headings,
        settings.crosslink,
        settings.study.enable_fuzz,
        settings.study.enable_short_term,
        settings.study.maximum_interval,
        settings.study.request_retention,
        weights.join(","),
    )
}

/// Render settings as a complete map tag line
pub fn render_map_tag(settings: &MapSettings) -> String {
    format!("{}{}{}", MAP_TAG_OPEN, encode_map_tag(settings), TAG_CLOSE)
}

fn parse_flag(raw: &str, field: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(BraidmapError::InvalidMapSettings {
            reason: format!("bad {}: {:?}", field, other),
        }),
    }
}

fn parse_number(raw: &str, field: &str) -> Result<f64> {
    raw.parse().map_err(|_| BraidmapError::InvalidMapSettings {
        reason: format!("bad {}: {:?}", field, raw),
    })
}
