use serde::Deserialize;

use crate::provider::TravelMode;

/// One row of `nodes.csv`.
#[derive(Debug, Deserialize)]
pub(super) struct RawNode {
    pub id: u64,
    pub lon: f64,
    pub lat: f64,
}

/// One row of `edges.csv`. The mode columns mark which physical networks
/// may traverse the segment; a missing column means the segment is open
/// to that mode.
#[derive(Debug, Deserialize)]
pub(super) struct RawEdge {
    pub from: u64,
    pub to: u64,
    /// Segment length in meters.
    pub length: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub oneway: bool,
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub car: bool,
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub bike: bool,
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub foot: bool,
}

impl RawEdge {
    pub(super) fn allows(&self, mode: TravelMode) -> bool {
        match mode {
            TravelMode::Drive => self.car,
            TravelMode::Bike => self.bike,
            TravelMode::Walk => self.foot,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Accepts 1/0, yes/no and true/false spellings; an empty cell is false.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "no" | "false" => Ok(false),
        "1" | "yes" | "true" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "unrecognized flag value '{other}'"
        ))),
    }
}
