//! Alert types emitted by the spot classifier
//!
//! Alerts are ephemeral: the classifier produces them and the presentation
//! side prints them immediately. `Display` renders the operator-facing
//! line for each kind.

use crate::spot::Spot;
use std::fmt;

/// An alert produced for a single classified spot.
///
/// One spot can yield both kinds: a watched callsign operating from an
/// unworked entity is surfaced twice.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The spotted station's entity has not been confirmed on this band.
    NewEntity {
        spot: Spot,
        /// Display name of the spotted station's entity
        entity_name: String,
        /// Display name of the spotter's entity ("unknown" when that
        /// lookup failed; the spotter is informational only)
        spotter_name: String,
    },
    /// The spotted callsign matched the configured watch list.
    Watched { spot: Spot },
}

impl Alert {
    pub fn new_entity(spot: Spot, entity_name: String, spotter_name: String) -> Self {
        Alert::NewEntity {
            spot,
            entity_name,
            spotter_name,
        }
    }

    pub fn watched(spot: Spot) -> Self {
        Alert::Watched { spot }
    }

    /// The spot that triggered this alert.
    pub fn spot(&self) -> &Spot {
        match self {
            Alert::NewEntity { spot, .. } => spot,
            Alert::Watched { spot } => spot,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::NewEntity {
                spot,
                entity_name,
                spotter_name,
            } => write!(
                f,
                "New DXCC! {} ({}) at {:.1} by {} ({} - {}) {}",
                spot.spotted,
                entity_name,
                spot.freq_khz,
                spot.spotter,
                spotter_name,
                spot.comment,
                spot.time
            ),
            Alert::Watched { spot } => write!(
                f,
                "{} at {:.1} by {} ({}) {}",
                spot.spotted, spot.freq_khz, spot.spotter, spot.comment, spot.time
            ),
        }
    }
}
