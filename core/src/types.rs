//! Shared primitive types used across the entire dispatch core.

use serde::{Deserialize, Serialize};

/// A simulation tick. One tick = one `step()` of the dispatcher.
pub type Tick = u64;

/// A building floor. Floors may be negative (basements).
pub type Floor = i64;

/// A cabin identifier. Ids are dense and equal to the cabin's index
/// in the fleet.
pub type CabinId = usize;

/// Intended travel direction of a hall call, and the heading of a
/// moving cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction from `from` toward `to`, or `None` when they are the
    /// same floor. Call sites that must not see `None` guard on
    /// inequality first.
    pub fn toward(from: Floor, to: Floor) -> Option<Direction> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A hall call: a floor plus the rider's declared travel direction.
/// Two tasks are the same pickup when both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupTask {
    pub floor:     Floor,
    pub direction: Direction,
}

impl PickupTask {
    pub fn new(floor: Floor, direction: Direction) -> Self {
        Self { floor, direction }
    }
}

/// Legal floor range of the building, inclusive at both ends.
/// When no limits are configured, every integer floor is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLimits {
    pub bottom: Floor,
    pub top:    Floor,
}

impl FloorLimits {
    /// Panics if `bottom > top`. A reversed range is a programmer bug,
    /// not a runtime condition.
    pub fn new(bottom: Floor, top: Floor) -> Self {
        assert!(
            bottom <= top,
            "FloorLimits requires bottom <= top, got bottom={bottom} top={top}"
        );
        Self { bottom, top }
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.bottom <= floor && floor <= self.top
    }

    pub fn clamp(&self, floor: Floor) -> Floor {
        floor.clamp(self.bottom, self.top)
    }
}
