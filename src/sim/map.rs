//! Fixed map layout: the enemy path and the pre-placed tower spots

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::TowerId;

/// Enemy path waypoints, entry first, base last
pub const PATH: [Vec2; 9] = [
    Vec2::new(-50.0, 300.0),
    Vec2::new(100.0, 300.0),
    Vec2::new(100.0, 150.0),
    Vec2::new(300.0, 150.0),
    Vec2::new(300.0, 450.0),
    Vec2::new(500.0, 450.0),
    Vec2::new(500.0, 250.0),
    Vec2::new(700.0, 250.0),
    Vec2::new(700.0, 300.0),
];

/// Tower spot positions (all off the path)
pub const SPOT_POSITIONS: [Vec2; 10] = [
    Vec2::new(200.0, 200.0),
    Vec2::new(200.0, 400.0),
    Vec2::new(400.0, 200.0),
    Vec2::new(400.0, 400.0),
    Vec2::new(600.0, 200.0),
    Vec2::new(600.0, 400.0),
    Vec2::new(250.0, 100.0),
    Vec2::new(250.0, 500.0),
    Vec2::new(450.0, 100.0),
    Vec2::new(450.0, 500.0),
];

/// Where enemies breach
pub const BASE_POSITION: Vec2 = Vec2::new(700.0, 300.0);

/// A fixed location where one tower can be built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerSpot {
    pub pos: Vec2,
    /// Tower standing on this spot; occupancy is derived from it
    pub tower: Option<TowerId>,
}

impl TowerSpot {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, tower: None }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.tower.is_some()
    }
}

/// Fresh, unoccupied spots for a new run
pub fn default_spots() -> Vec<TowerSpot> {
    SPOT_POSITIONS.iter().copied().map(TowerSpot::new).collect()
}

/// Index of the final waypoint
#[inline]
pub fn last_waypoint() -> usize {
    PATH.len() - 1
}
