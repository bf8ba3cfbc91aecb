//! # DXWatch Spotter Library (dxwatch-spotter)
//!
//! Watches a DX cluster feed and surfaces spots worth an operator's
//! attention: stations from DXCC entities not yet confirmed on the spotted
//! band, and callsigns on a configured watch list.
//!
//! The pipeline is: cluster session → line parser → band mapper + ClubLog
//! entity lookup → novelty tracker / watch list → alert lines on stdout.

pub mod classifier;
pub mod cluster;
pub mod error;
pub mod matrix;
pub mod novelty;
pub mod services;
pub mod watchlist;

pub use classifier::SpotClassifier;
pub use error::{Error, Result};
