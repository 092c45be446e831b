//! collection-planner core
//!
//! Assigns waste-collection vehicles to prioritized containers and
//! sequences each vehicle's stops into routes. Domain data enters through
//! the interfaces in [`traits`]; concrete apps implement them for their
//! own data models.

pub mod traits;
pub mod priority;
pub mod solver;
pub mod haversine;
pub mod polyline;
