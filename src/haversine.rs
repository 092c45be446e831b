//! Haversine distance engine.
//!
//! Great-circle distances between container coordinates. Ignores the road
//! network, which is accurate enough for intra-city collection routing
//! and always available.

use rayon::prelude::*;

use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two (lat, lng) points in
/// kilometers.
///
/// Inputs are degrees; conversion to radians happens here. Coincident
/// points yield 0. Malformed coordinates (NaN, out of range) propagate as
/// NaN rather than being coerced to 0, so callers must filter them first.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Default)]
pub struct HaversineMatrix;

impl DistanceMatrixProvider for HaversineMatrix {
    /// Pairwise distances in kilometers, indexed by location order.
    ///
    /// Zero diagonal; symmetric because the same formula is applied in
    /// both directions. Rows are computed in parallel, output order is
    /// fixed by index.
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        locations
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                locations
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0.0 } else { haversine_km(*from, *to) })
                    .collect()
            })
            .collect()
    }
}
