//! Collection-priority scoring and ranking.
//!
//! Converts raw container records into a comparable urgency score and
//! produces a deterministic total ordering for the assigner.

use serde::{Deserialize, Serialize};

use crate::traits::Container;

/// Weights and fallbacks for the priority formula.
///
/// The defaults are empirical values carried over from the operational
/// system, not physical constants; hosts may tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Weight of the fill fraction component.
    pub fill: f64,
    /// Weight of the time-since-last-service component.
    pub recency: f64,
    /// Weight of the population-density component.
    pub density: f64,
    /// Days after which the recency component saturates at 1.0.
    pub recency_saturation_days: f64,
    /// Assumed age when a container has no last-service timestamp.
    pub default_days_since_service: f64,
    /// Density factor used when no demographic signal is supplied.
    pub default_density_factor: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            fill: 0.5,
            recency: 0.3,
            density: 0.2,
            recency_saturation_days: 10.0,
            default_days_since_service: 5.0,
            default_density_factor: 0.5,
        }
    }
}

/// Score a single container's collection urgency.
///
/// `score = fill_w × fill + recency_w × min(days_since / saturation, 1) +
/// density_w × density_factor`, roughly in [0, 1] with the default
/// weights. The fill fraction is clamped to [0, 1] first.
pub fn priority_score<C: Container>(container: &C, now: i64, weights: &PriorityWeights) -> f64 {
    let fill = container.fill_fraction().clamp(0.0, 1.0);

    let days_since = match container.last_serviced() {
        Some(ts) => (now - ts) as f64 / 86_400.0,
        None => weights.default_days_since_service,
    };
    let recency = (days_since / weights.recency_saturation_days).min(1.0);

    let density = container
        .density_factor()
        .unwrap_or(weights.default_density_factor);

    weights.fill * fill + weights.recency * recency + weights.density * density
}

/// Rank containers by priority score descending.
///
/// Ties break by container identifier ascending so that the ordering is
/// total and two runs over the same inputs agree byte for byte.
pub fn rank<'a, C: Container>(
    containers: &'a [C],
    now: i64,
    weights: &PriorityWeights,
) -> Vec<&'a C> {
    let mut scored: Vec<(&C, f64)> = containers
        .iter()
        .map(|c| (c, priority_score(c, now, weights)))
        .collect();

    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| a.id().cmp(b.id()))
    });

    scored.into_iter().map(|(c, _)| c).collect()
}
