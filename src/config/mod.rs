// src/config/mod.rs

//! Configuration loading and validation for monrun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and layer CLI flags on top (`loader.rs`).
//! - Validate startup invariants before anything is watched (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, resolve, resolve_checked};
pub use model::{RawConfig, RunConfig};
