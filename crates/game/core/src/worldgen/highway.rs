//! Highway path planning.
//!
//! Once per session, a biased random walk is traced from the start
//! coordinate to each objective coordinate. Every transition of the walk is
//! recorded as a canonical undirected edge; the union over all objectives is
//! the highway. Map generation treats highway edges as always open, which
//! guarantees the objectives stay reachable no matter how stingy the random
//! exit gating is.

use std::collections::HashSet;

use crate::rng::{SeededRng, local_seed};
use crate::state::Coordinate;

/// Walk step cap guarding against seed pathology.
const MAX_WALK_STEPS: usize = 500;

/// Set of canonical edge keys guaranteed open by the planner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighwaySet {
    edges: HashSet<String>,
}

impl HighwaySet {
    pub fn contains(&self, edge: &str) -> bool {
        self.edges.contains(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Canonical key for the undirected edge between two coordinates: the two
/// coordinate keys sorted lexicographically and joined with `:`.
pub fn edge_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

/// Plans the session highway from `start` to every objective.
pub fn plan_highway(start: Coordinate, objectives: &[Coordinate], root_seed: u32) -> HighwaySet {
    let mut edges = HashSet::new();
    for &objective in objectives {
        winding_path(start, objective, root_seed, &mut edges);
    }
    HighwaySet { edges }
}

/// Traces one biased random walk from `start` to `end`, recording every
/// transition as an edge.
///
/// Step policy: with both axes open, 70% of steps close the axis with the
/// larger remaining gap; with one axis left, 80% of steps close it and the
/// rest take a 1-tile perpendicular detour for texture.
fn winding_path(start: Coordinate, end: Coordinate, root_seed: u32, edges: &mut HashSet<String>) {
    let seed = local_seed(&format!("{}{}", start.key(), end.key()), root_seed);
    let mut rng = SeededRng::new(seed);

    let (mut x, mut y) = (start.x, start.y);
    let mut previous_key = start.key();

    for _ in 0..MAX_WALK_STEPS {
        if x == end.x && y == end.y {
            break;
        }
        let dx = (end.x - x).signum();
        let dy = (end.y - y).signum();
        let prefer_horizontal = (end.x - x).abs() > (end.y - y).abs();

        let roll = rng.next_f64();
        let (mut move_x, mut move_y) = (0, 0);
        if dx != 0 && dy != 0 {
            if prefer_horizontal {
                if roll < 0.7 {
                    move_x = dx;
                } else {
                    move_y = dy;
                }
            } else if roll < 0.7 {
                move_y = dy;
            } else {
                move_x = dx;
            }
        } else if dx != 0 {
            if roll < 0.8 {
                move_x = dx;
            } else {
                move_y = if rng.chance(0.5) { 1 } else { -1 };
            }
        } else if dy != 0 {
            if roll < 0.8 {
                move_y = dy;
            } else {
                move_x = if rng.chance(0.5) { 1 } else { -1 };
            }
        } else {
            break;
        }

        x += move_x;
        y += move_y;

        let current_key = Coordinate::new(x, y).key();
        edges.insert(edge_key(&previous_key, &current_key));
        previous_key = current_key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_is_symmetric() {
        assert_eq!(edge_key("0,0", "0,1"), edge_key("0,1", "0,0"));
        assert_eq!(edge_key("0,0", "0,1"), "0,0:0,1");
    }

    #[test]
    fn planning_is_deterministic() {
        let start = Coordinate::new(0, 0);
        let objectives = [Coordinate::new(5, 5), Coordinate::new(10, 10)];
        let a = plan_highway(start, &objectives, 1234);
        let b = plan_highway(start, &objectives, 1234);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn different_seeds_yield_different_highways() {
        let start = Coordinate::new(0, 0);
        let objectives = [Coordinate::new(10, 10)];
        let a = plan_highway(start, &objectives, 1);
        let b = plan_highway(start, &objectives, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn walk_reaches_objective_within_step_cap() {
        // A 20-step Manhattan gap with detours must fit comfortably in the
        // cap; the highway then contains at least one edge per net step.
        let start = Coordinate::new(0, 0);
        let highway = plan_highway(start, &[Coordinate::new(10, 10)], 99);
        assert!(highway.len() >= 20);
        assert!(highway.len() <= MAX_WALK_STEPS);
    }

    #[test]
    fn trivial_walk_records_no_edges() {
        let start = Coordinate::new(0, 0);
        let highway = plan_highway(start, &[start], 7);
        assert!(highway.is_empty());
    }
}
