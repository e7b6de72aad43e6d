//! Lapidarium — selection and aggregation engine for epigraphic map data.
//!
//! This library is the backend-agnostic core of a map-based explorer for
//! Roman-era places and inscriptions. A rendering shell (2D tile map or 3D
//! globe) supplies pointer positions converted to geographic coordinates and
//! layer toggle events; this crate owns everything in between:
//!
//! - [`index::PlaceIndex`] — layered store of place records with visibility
//!   flags and snapshot isolation,
//! - [`selection::RegionSelector`] — the press/drag/release rectangle
//!   gesture state machine,
//! - [`selection::places_within`] — visibility-aware spatial containment,
//! - [`aggregate::InscriptionAggregator`] — one batched inscription-count
//!   lookup per selection against the remote SPARQL store,
//! - [`service::SelectionService`] — the wiring, with collaborators passed
//!   in explicitly.
//!
//! # Usage
//!
//! ```ignore
//! use lapidarium::config::Settings;
//! use lapidarium::service::SelectionService;
//! use lapidarium::sparql::{AsyncReqwestClient, SparqlClient};
//!
//! let settings = Settings::default();
//! let http = AsyncReqwestClient::with_timeout(settings.endpoint.timeout_secs)?;
//! let provider = SparqlClient::new(http, &settings.endpoint.url);
//! let mut service = SelectionService::new(index, provider, sink);
//!
//! service.arm_selection()?;
//! service.begin_drag(press);
//! let result = service.complete_selection(release).await?;
//! ```

pub mod aggregate;
pub mod config;
pub mod coord;
pub mod index;
pub mod logging;
pub mod place;
pub mod selection;
pub mod service;
pub mod sparql;

/// Version of the lapidarium library and CLI.
///
/// Synchronized across the workspace; injected from `Cargo.toml` at compile
/// time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
