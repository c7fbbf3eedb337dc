//! Stitchgrid - PNG artwork to cross-stitch charts
//!
//! Command-line front end for the `stitch-pattern` pipeline.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
