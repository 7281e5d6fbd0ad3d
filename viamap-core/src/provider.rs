//! Seam to the external road network source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, extent::Region, model::RoadNetwork};

/// Which physical network the provider should return edges for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Drive,
    Bike,
    Walk,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Drive => write!(f, "drive"),
            TravelMode::Bike => write!(f, "bike"),
            TravelMode::Walk => write!(f, "walk"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" => Ok(TravelMode::Drive),
            "bike" => Ok(TravelMode::Bike),
            "walk" => Ok(TravelMode::Walk),
            other => Err(Error::InvalidInput(format!(
                "unknown travel mode '{other}', expected drive, bike or walk"
            ))),
        }
    }
}

/// Supplies a weighted road graph covering a query region.
///
/// Implementations own any network or disk access, including timeouts and
/// cancellation; the core treats a fetch as a single fallible call and
/// never retries. Edges are used exactly as supplied, directed and
/// weighted by the implementation.
pub trait NetworkProvider {
    /// # Errors
    ///
    /// The underlying source failed or returned unusable data.
    fn fetch_graph(&self, region: &Region, mode: TravelMode) -> Result<RoadNetwork, Error>;
}
