//! Paquetexpress tracking library entry points.
//!
//! This crate talks to the upstream tracking history endpoint, unwraps its
//! `Resultado(...)` envelope, and reshapes the raw records into normalized
//! summary and event types. HTTP services should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod envelope;
pub mod error;
pub mod lookup;
pub mod mapper;
pub mod models;
pub mod upstream;

pub use envelope::unwrap_envelope;
pub use error::{Error, Result};
pub use lookup::{resolve, track};
pub use mapper::{build_summary, map_event, RawEvent};
pub use models::{DetailLevel, TrackingEvent, TrackingFull, TrackingSummary, TrackingView};
pub use upstream::{UpstreamClient, DEFAULT_UPSTREAM_TIMEOUT, DEFAULT_UPSTREAM_URL};
