//! Polyline representation for route geometries.
//!
//! Stores the visiting-order coordinates of a route as decoded (lat, lng)
//! points, ready for map rendering. Encoding to a compact wire format
//! (GeoJSON, encoded polyline) belongs at API boundaries, not in the
//! planner core.

use serde::{Deserialize, Serialize};

/// A route geometry as an ordered sequence of (latitude, longitude)
/// points.
///
/// Only located stops contribute points; containers without valid
/// coordinates are absent from the geometry even when they are part of
/// the route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new polyline from (latitude, longitude) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Number of points in the geometry.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(f64, f64)> for Polyline {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
