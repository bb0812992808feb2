//! Geospatial scene engine for live 3D air-surveillance visualization.
//!
//! The engine turns geodetic aircraft positions into a local
//! East-North-Up scene around a chosen origin, keeps a set of track
//! actors reconciled against the incoming entity list, shapes and
//! orients a sensor coverage cone, builds procedural or DEM-loaded
//! terrain, and sizes text billboards against camera distance.
//!
//! The host application owns the renderer, the camera, and all UI; it
//! feeds a [`engine::FrameInput`] once per render tick and draws the
//! resulting scene.

pub mod config;
pub mod coverage;
pub mod engine;
pub mod geo;
pub mod ground;
pub mod labels;
pub mod scene;
pub mod terrain;
pub mod track;
pub mod view;

pub use config::EngineConfig;
pub use engine::{FrameInput, SceneEngine};
