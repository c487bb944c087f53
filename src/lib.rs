//! Data and geometry core of the polyscatter viewer.
//!
//! Raw CSV text becomes a typed [`data::model::Dataset`]; a regular polygon
//! and an axis-aligned square region are derived from interactive parameters;
//! [`state::AppState`] keeps all of it consistent and hands the presentation
//! layer an immutable [`state::Snapshot`].

pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod state;
pub mod upload;

pub use error::{CoreError, Result};
