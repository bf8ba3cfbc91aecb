//! Clients for external services

pub mod clublog_client;

pub use clublog_client::{ClubLogClient, EntityInfo, EntityLookup, LookupError};
