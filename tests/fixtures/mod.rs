//! Test fixtures for collection-planner.
//!
//! Provides realistic test data: real Nilüfer (Bursa) neighborhood
//! coordinates for container fields and depot-scale scenarios.

pub mod nilufer_locations;

pub use nilufer_locations::*;
