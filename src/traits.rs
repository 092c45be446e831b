//! Core domain traits for the collection planner.
//!
//! These are intentionally minimal and domain-agnostic. Concrete apps
//! (data layers, HTTP handlers) should implement them for their own data
//! models; the planner never inspects untyped records.

use std::hash::Hash;

use serde::Serialize;

/// Unique identifier for planner entities.
///
/// `Ord` is required because identifiers break ties in priority ranking
/// and nearest-neighbor selection, which keeps every run deterministic.
pub trait Id: Clone + Eq + Ord + Hash {}

impl<T> Id for T where T: Clone + Eq + Ord + Hash {}

/// A waste container that is a candidate stop for one collection run.
pub trait Container {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng) in degrees.
    ///
    /// `None` means the record has no location on file. Coordinates that
    /// are present but malformed (NaN, out of range) are detected by the
    /// planner and flagged the same way.
    fn location(&self) -> Option<(f64, f64)>;

    /// Current fullness in [0, 1]. Values outside the range are clamped
    /// by the planner, not rejected.
    fn fill_fraction(&self) -> f64;

    /// Nominal container volume in liters.
    fn capacity_liters(&self) -> f64;

    /// Material/type tag (e.g. "organik", "plastik").
    fn category(&self) -> &str;

    /// Spatial grouping key, typically a neighborhood identifier.
    /// Containers sharing a key are kept together during assignment.
    fn group_key(&self) -> &str;

    /// Last collection time (unix seconds). `None` falls back to a
    /// configured default age when scoring recency.
    fn last_serviced(&self) -> Option<i64>;

    /// Population-density signal in [0, 1] from the demographics layer,
    /// if available. `None` falls back to a configured default.
    fn density_factor(&self) -> Option<f64>;
}

/// A collection vehicle available for the run.
///
/// Unavailable vehicles are excluded upstream by the data layer; every
/// vehicle handed to the planner is assignable.
pub trait Vehicle {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Vehicle size class, which determines the stop-count ceiling.
    fn class(&self) -> VehicleClass;

    /// Load ceiling in kilograms.
    fn capacity_kg(&self) -> f64;
}

/// Vehicle size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleClass {
    Small,
    Medium,
    Large,
}

/// Provides a pairwise distance matrix (kilometers) for a set of
/// locations. The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}

/// Why a container could not be placed on any route this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnassignedReason {
    /// The vehicle list was empty.
    NoVehicles,
    /// Estimated weight exceeds every vehicle's usable capacity, even
    /// when empty. No follow-up run will place it either.
    ExceedsFleetCapacity,
    /// Vehicles exist but none had remaining stop or load room.
    FleetSaturated,
}

/// A data problem detected on an input container.
///
/// Flagged containers still count toward assignment, but are excluded
/// from distance-based sequencing and from route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataIssue {
    /// No coordinates on file.
    MissingLocation,
    /// Coordinates present but NaN or outside [-90, 90] / [-180, 180].
    InvalidCoordinates,
}

/// Non-fatal condition about the inputs as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputCondition {
    /// No vehicles were supplied; every container is unassigned.
    NoVehicles,
    /// No containers were supplied; the result has no routes.
    NoContainers,
}
