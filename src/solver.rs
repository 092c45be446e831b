//! Collection route solver (greedy baseline).
//!
//! Pipeline: priority ranking → capacity-constrained assignment →
//! per-vehicle nearest-neighbor sequencing → route metrics and fleet
//! summary. One call is a pure function of its inputs; the planner holds
//! no state across calls.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::polyline::Polyline;
use crate::priority::{self, PriorityWeights};
use crate::traits::{
    Container, DataIssue, DistanceMatrixProvider, InputCondition, UnassignedReason, Vehicle,
    VehicleClass,
};

/// Stop-count ceilings per vehicle class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopCeilings {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

impl Default for StopCeilings {
    fn default() -> Self {
        Self {
            small: 20,
            medium: 25,
            large: 35,
        }
    }
}

impl StopCeilings {
    pub fn for_class(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::Small => self.small,
            VehicleClass::Medium => self.medium,
            VehicleClass::Large => self.large,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Fraction of nominal vehicle capacity allowed to be filled.
    pub utilization_threshold: f64,
    /// Assumed waste density for converting liters of fill to kilograms.
    pub waste_density_kg_per_liter: f64,
    /// Assumed driving speed for time estimates.
    pub average_speed_kmh: f64,
    /// Fixed service time per stop.
    pub dwell_minutes_per_stop: f64,
    pub stop_ceilings: StopCeilings,
    pub priority_weights: PriorityWeights,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            utilization_threshold: 0.90,
            waste_density_kg_per_liter: 0.30,
            average_speed_kmh: 30.0,
            dwell_minutes_per_stop: 5.0,
            stop_ceilings: StopCeilings::default(),
            priority_weights: PriorityWeights::default(),
        }
    }
}

/// One vehicle's planned route. `stops` is the visiting order, not the
/// priority order.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult<VehicleId, ContainerId> {
    pub vehicle_id: VehicleId,
    pub stops: Vec<ContainerId>,
    /// Located stops in visiting order, for map rendering.
    pub geometry: Polyline,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub total_load_kg: f64,
    /// Capped at 100.
    pub utilization_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnassignedContainer<ContainerId> {
    pub container_id: ContainerId,
    pub reason: UnassignedReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlaggedContainer<ContainerId> {
    pub container_id: ContainerId,
    pub issue: DataIssue,
}

/// Fleet-wide aggregates across all emitted routes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSummary {
    /// Routes with at least one stop.
    pub vehicles_used: usize,
    pub assigned_containers: usize,
    pub unassigned_containers: usize,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub average_utilization_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult<VehicleId, ContainerId> {
    pub routes: Vec<RouteResult<VehicleId, ContainerId>>,
    pub unassigned: Vec<UnassignedContainer<ContainerId>>,
    /// Containers with data problems; still assigned where possible.
    pub flagged: Vec<FlaggedContainer<ContainerId>>,
    pub conditions: Vec<InputCondition>,
    pub summary: FleetSummary,
}

#[derive(Debug)]
struct VehicleState<'a, C: Container, V: Vehicle> {
    vehicle: &'a V,
    stops: Vec<&'a C>,
    load_kg: f64,
    stop_ceiling: usize,
}

impl<'a, C: Container, V: Vehicle> VehicleState<'a, C, V> {
    fn usable_capacity_kg(&self, threshold: f64) -> f64 {
        self.vehicle.capacity_kg() * threshold
    }

    fn accepts(&self, weight_kg: f64, threshold: f64) -> bool {
        self.stops.len() < self.stop_ceiling
            && self.load_kg + weight_kg <= self.usable_capacity_kg(threshold)
    }
}

/// Plan collection routes for one run.
///
/// `now` (unix seconds) anchors the recency component of priority
/// scoring. The matrix provider supplies pairwise distances in km for
/// the located containers; [`crate::haversine::HaversineMatrix`] is the
/// standard choice.
///
/// No input condition is fatal: empty inputs, unroutable containers and
/// malformed coordinates all surface as flags on the result.
pub fn optimize<'a, C, V, M>(
    now: i64,
    containers: &'a [C],
    vehicles: &'a [V],
    matrix_provider: &M,
    config: OptimizationConfig,
) -> OptimizationResult<V::Id, C::Id>
where
    C: Container,
    V: Vehicle,
    M: DistanceMatrixProvider,
{
    let mut conditions = Vec::new();
    if vehicles.is_empty() {
        conditions.push(InputCondition::NoVehicles);
    }
    if containers.is_empty() {
        conditions.push(InputCondition::NoContainers);
    }

    let ranked = priority::rank(containers, now, &config.priority_weights);

    let flagged: Vec<FlaggedContainer<C::Id>> = ranked
        .iter()
        .filter_map(|c| {
            coordinate_issue(*c).map(|issue| FlaggedContainer {
                container_id: c.id().clone(),
                issue,
            })
        })
        .collect();
    let unlocated: HashSet<&C::Id> = flagged.iter().map(|f| &f.container_id).collect();

    if vehicles.is_empty() {
        let unassigned: Vec<UnassignedContainer<C::Id>> = ranked
            .iter()
            .map(|c| UnassignedContainer {
                container_id: c.id().clone(),
                reason: UnassignedReason::NoVehicles,
            })
            .collect();
        let summary = FleetSummary {
            unassigned_containers: unassigned.len(),
            ..FleetSummary::default()
        };
        return OptimizationResult {
            routes: Vec::new(),
            unassigned,
            flagged,
            conditions,
            summary,
        };
    }

    // ========================================================================
    // Assignment (round-robin bin packing over the priority stream)
    // ========================================================================

    let stream = group_by_key(ranked);

    let mut states: Vec<VehicleState<'a, C, V>> = vehicles
        .iter()
        .map(|v| VehicleState {
            vehicle: v,
            stops: Vec::new(),
            load_kg: 0.0,
            stop_ceiling: config.stop_ceilings.for_class(v.class()),
        })
        .collect();

    let fleet_max_usable_kg = states
        .iter()
        .map(|s| s.usable_capacity_kg(config.utilization_threshold))
        .fold(0.0, f64::max);

    let mut unassigned: Vec<UnassignedContainer<C::Id>> = Vec::new();
    let mut cursor = 0;

    for container in stream {
        let weight = estimated_weight_kg(container, config.waste_density_kg_per_liter);

        // One full sweep starting at the round-robin cursor.
        let mut placed = false;
        for offset in 0..states.len() {
            let idx = (cursor + offset) % states.len();
            if states[idx].accepts(weight, config.utilization_threshold) {
                states[idx].stops.push(container);
                states[idx].load_kg += weight;
                placed = true;
                break;
            }
        }

        // Second chance by lowest current load. The sweep above already
        // covers the whole fleet, so this only matters if the accept
        // rule is ever relaxed per-vehicle.
        if !placed {
            let fallback = states
                .iter()
                .enumerate()
                .filter(|(_, s)| s.accepts(weight, config.utilization_threshold))
                .min_by(|(_, a), (_, b)| a.load_kg.total_cmp(&b.load_kg))
                .map(|(idx, _)| idx);
            if let Some(idx) = fallback {
                states[idx].stops.push(container);
                states[idx].load_kg += weight;
                placed = true;
            }
        }

        if !placed {
            let reason = if weight > fleet_max_usable_kg {
                UnassignedReason::ExceedsFleetCapacity
            } else {
                UnassignedReason::FleetSaturated
            };
            unassigned.push(UnassignedContainer {
                container_id: container.id().clone(),
                reason,
            });
        }

        // Advance regardless of outcome to spread load across the fleet.
        cursor = (cursor + 1) % states.len();
    }

    debug!(
        containers = containers.len(),
        vehicles = vehicles.len(),
        unassigned = unassigned.len(),
        "assignment complete"
    );

    // ========================================================================
    // Sequencing (nearest neighbor per vehicle) and route metrics
    // ========================================================================

    let locations = collect_locations(&states, &unlocated);
    let index = location_index(&locations);
    let matrix = matrix_provider.matrix_for(&locations);

    let mut routes: Vec<RouteResult<V::Id, C::Id>> = Vec::new();
    for state in &states {
        if state.stops.is_empty() {
            continue;
        }

        let sequenced = sequence_stops(&state.stops, &unlocated, &matrix, &index);

        let points: Vec<(f64, f64)> = sequenced.iter().filter_map(|(_, location)| *location).collect();

        let mut total_distance_km = 0.0;
        for leg in points.windows(2) {
            total_distance_km += matrix[index[&location_key(leg[0])]][index[&location_key(leg[1])]];
        }

        let stop_count = sequenced.len();
        let total_duration_minutes = total_distance_km / config.average_speed_kmh * 60.0
            + stop_count as f64 * config.dwell_minutes_per_stop;
        let utilization_percent =
            (state.load_kg / state.vehicle.capacity_kg() * 100.0).min(100.0);

        routes.push(RouteResult {
            vehicle_id: state.vehicle.id().clone(),
            stops: sequenced.iter().map(|(c, _)| c.id().clone()).collect(),
            geometry: Polyline::new(points),
            total_distance_km,
            total_duration_minutes,
            total_load_kg: state.load_kg,
            utilization_percent,
        });
    }

    // ========================================================================
    // Fleet summary
    // ========================================================================

    let assigned_containers: usize = routes.iter().map(|r| r.stops.len()).sum();
    let total_distance_km: f64 = routes.iter().map(|r| r.total_distance_km).sum();
    let total_duration_minutes: f64 = routes.iter().map(|r| r.total_duration_minutes).sum();
    let average_utilization_percent = if routes.is_empty() {
        0.0
    } else {
        routes.iter().map(|r| r.utilization_percent).sum::<f64>() / routes.len() as f64
    };

    let summary = FleetSummary {
        vehicles_used: routes.len(),
        assigned_containers,
        unassigned_containers: unassigned.len(),
        total_distance_km,
        total_duration_minutes,
        average_utilization_percent,
    };

    info!(
        vehicles_used = summary.vehicles_used,
        assigned = summary.assigned_containers,
        unassigned = summary.unassigned_containers,
        total_distance_km = summary.total_distance_km,
        "route optimization complete"
    );

    OptimizationResult {
        routes,
        unassigned,
        flagged,
        conditions,
        summary,
    }
}

/// Estimated collected weight for one container.
fn estimated_weight_kg<C: Container>(container: &C, density_kg_per_liter: f64) -> f64 {
    container.capacity_liters() * container.fill_fraction().clamp(0.0, 1.0) * density_kg_per_liter
}

fn coordinate_issue<C: Container>(container: &C) -> Option<DataIssue> {
    match container.location() {
        None => Some(DataIssue::MissingLocation),
        Some((lat, lng)) => {
            // Range checks also reject NaN.
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                Some(DataIssue::InvalidCoordinates)
            } else {
                None
            }
        }
    }
}

/// Regroup the priority-ranked stream by grouping key.
///
/// Priority order is preserved within each group; groups are ordered by
/// size descending (stable, so equal-size groups keep first-appearance
/// order). Keeping spatially-correlated containers adjacent is a cheap
/// proxy for geographic clustering.
fn group_by_key<'a, C: Container>(ranked: Vec<&'a C>) -> Vec<&'a C> {
    let mut key_order: Vec<&'a str> = Vec::new();
    let mut groups: HashMap<&'a str, Vec<&'a C>> = HashMap::new();

    for container in ranked {
        let key = container.group_key();
        if !groups.contains_key(key) {
            key_order.push(key);
        }
        groups.entry(key).or_default().push(container);
    }

    let mut grouped: Vec<Vec<&'a C>> = key_order
        .iter()
        .filter_map(|key| groups.remove(key))
        .collect();
    grouped.sort_by(|a, b| b.len().cmp(&a.len()));

    grouped.into_iter().flatten().collect()
}

/// Order one vehicle's stops into a visiting sequence.
///
/// Nearest-neighbor construction over the located stops, starting from
/// the first (highest-priority) assigned container; distance ties break
/// by container id ascending. Unlocated stops are appended afterwards in
/// assignment order as zero-distance hops. The result is an open path
/// with no return-to-depot leg.
///
/// Returns each stop paired with its coordinates (`None` for unlocated).
fn sequence_stops<'a, C: Container>(
    stops: &[&'a C],
    unlocated: &HashSet<&C::Id>,
    matrix: &[Vec<f64>],
    index: &HashMap<String, usize>,
) -> Vec<(&'a C, Option<(f64, f64)>)> {
    let mut located: Vec<(&C, (f64, f64))> = Vec::new();
    let mut missing: Vec<&C> = Vec::new();
    for &stop in stops {
        if unlocated.contains(stop.id()) {
            missing.push(stop);
        } else if let Some(location) = stop.location() {
            located.push((stop, location));
        }
    }

    let mut ordered: Vec<(&C, Option<(f64, f64)>)> = Vec::with_capacity(stops.len());

    if !located.is_empty() {
        let mut remaining = located;
        let (first, first_location) = remaining.remove(0);
        let mut current_location = first_location;
        ordered.push((first, Some(first_location)));

        while !remaining.is_empty() {
            let from_idx = index[&location_key(current_location)];

            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (i, (candidate, location)) in remaining.iter().enumerate() {
                let dist = matrix[from_idx][index[&location_key(*location)]];
                let better = dist < best_dist
                    || (dist == best_dist && candidate.id() < remaining[best].0.id());
                if better {
                    best = i;
                    best_dist = dist;
                }
            }

            let (next, next_location) = remaining.remove(best);
            current_location = next_location;
            ordered.push((next, Some(next_location)));
        }
    }

    for stop in missing {
        ordered.push((stop, None));
    }

    ordered
}

fn collect_locations<'a, C, V>(
    states: &[VehicleState<'a, C, V>],
    unlocated: &HashSet<&C::Id>,
) -> Vec<(f64, f64)>
where
    C: Container,
    V: Vehicle,
{
    let mut locations = Vec::new();
    for state in states {
        for stop in &state.stops {
            if unlocated.contains(stop.id()) {
                continue;
            }
            if let Some(location) = stop.location() {
                locations.push(location);
            }
        }
    }

    dedupe_locations(locations)
}

fn dedupe_locations(locations: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for location in locations {
        if seen.insert(location_key(location)) {
            unique.push(location);
        }
    }
    unique
}

fn location_key(location: (f64, f64)) -> String {
    format!("{:.6},{:.6}", location.0, location.1)
}

fn location_index(locations: &[(f64, f64)]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, location) in locations.iter().enumerate() {
        index.insert(location_key(*location), i);
    }
    index
}
