//! Spot classification pipeline
//!
//! Turns one raw feed line into zero, one or two alerts:
//!
//! 1. Parse the line; anything that is not a spot is dropped quietly.
//! 2. Map the frequency to a band and resolve both callsigns through the
//!    entity lookup, spotter and spotted in parallel.
//! 3. Novelty: the band mapped, the cooldown gate passed and the work
//!    matrix does not list the (entity, band) pair as confirmed.
//! 4. Watch list: the spotted callsign matches a configured entry. Checked
//!    on every spot, whatever the novelty outcome.
//!
//! No failure escapes a single spot: a failed spotted-callsign lookup skips
//! that spot (leaving the suppression state untouched) and the stream
//! continues with the next line.

use crate::matrix::WorkMatrix;
use crate::novelty::NoveltyTracker;
use crate::services::EntityLookup;
use crate::watchlist::WatchList;
use dxwatch_common::bands::frequency_to_band;
use dxwatch_common::events::Alert;
use dxwatch_common::spot::{parse_spot_line, Spot};
use tracing::{debug, trace, warn};

/// The classification pipeline, owning all per-process alerting state.
pub struct SpotClassifier<L: EntityLookup> {
    resolver: L,
    tracker: NoveltyTracker,
    matrix: WorkMatrix,
    watchlist: WatchList,
}

impl<L: EntityLookup> SpotClassifier<L> {
    pub fn new(
        resolver: L,
        tracker: NoveltyTracker,
        matrix: WorkMatrix,
        watchlist: WatchList,
    ) -> Self {
        Self {
            resolver,
            tracker,
            matrix,
            watchlist,
        }
    }

    /// Drop suppression state, e.g. after a session reconnect.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Classify one raw feed line.
    pub async fn classify_line(&mut self, line: &str) -> Vec<Alert> {
        match parse_spot_line(line) {
            Some(spot) => self.classify(spot).await,
            None => {
                trace!(line = %line, "not a spot line");
                Vec::new()
            }
        }
    }

    async fn classify(&mut self, spot: Spot) -> Vec<Alert> {
        let band = frequency_to_band(spot.freq_khz);

        // The two lookups are the slow part of a spot; run them together.
        let (spotted_info, spotter_info) = tokio::join!(
            self.resolver.lookup(&spot.spotted),
            self.resolver.lookup(&spot.spotter),
        );

        // Without the spotted station's entity there is nothing to classify.
        let spotted_info = match spotted_info {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "entity lookup failed, skipping spot");
                return Vec::new();
            }
        };

        // The spotter's entity only decorates the alert text.
        let spotter_name = match spotter_info {
            Ok(info) => info.name,
            Err(e) => {
                debug!(error = %e, "spotter lookup failed, using placeholder");
                "unknown".to_string()
            }
        };

        let mut alerts = Vec::new();

        if let Some(band) = band {
            // Cooldown first: cheap map check before touching the matrix
            // file. The cooldown stamp updates whenever its gate passes,
            // even if the matrix then suppresses the alert.
            if self.tracker.exceeds_threshold(spotted_info.dxcc, band)
                && !self.matrix.confirmed(spotted_info.dxcc, band)
            {
                debug!(
                    spotted = %spot.spotted,
                    dxcc = spotted_info.dxcc,
                    band = %band,
                    "new entity on band"
                );
                alerts.push(Alert::new_entity(
                    spot.clone(),
                    spotted_info.name.clone(),
                    spotter_name,
                ));
            }
        }

        if self.watchlist.matches(&spot.spotted) {
            debug!(spotted = %spot.spotted, "watched callsign spotted");
            alerts.push(Alert::watched(spot));
        }

        alerts
    }
}
