//! The per-cabin state machine.
//!
//! RULES:
//!   - A cabin moves at most one floor per tick.
//!   - A stop consumes the whole tick; the cabin never moves and stops
//!     in the same tick it resumed.
//!   - An idle cabin carries no direction, no drop-offs and no assigned
//!     pickup once a tick has observed it.
//!   - Only the dispatcher mutates a cabin, and only through the
//!     methods below.

use crate::{
    event::DispatchEvent,
    snapshot::CabinSnapshot,
    types::{CabinId, Direction, Floor, FloorLimits, PickupTask, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Work status of a cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinStatus {
    Idle,
    Moving,
    Stopped,
}

/// One elevator car.
///
/// `direction` is `None` while unassigned: an idle cabin, or a cabin
/// that stopped at its own floor before ever choosing a heading.
#[derive(Debug, Clone)]
pub struct Cabin {
    id:              CabinId,
    floor:           Floor,
    direction:       Option<Direction>,
    status:          CabinStatus,
    drop_offs:       BTreeSet<Floor>,
    assigned_pickup: Option<PickupTask>,
}

impl Cabin {
    pub fn new(id: CabinId, floor: Floor) -> Self {
        Self {
            id,
            floor,
            direction: None,
            status: CabinStatus::Idle,
            drop_offs: BTreeSet::new(),
            assigned_pickup: None,
        }
    }

    // ── Read access ──────────────────────────────────────────────

    pub fn id(&self) -> CabinId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn status(&self) -> CabinStatus {
        self.status
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn drop_offs(&self) -> &BTreeSet<Floor> {
        &self.drop_offs
    }

    pub fn assigned_pickup(&self) -> Option<PickupTask> {
        self.assigned_pickup
    }

    pub fn is_idle(&self) -> bool {
        self.status == CabinStatus::Idle
    }

    fn has_work(&self) -> bool {
        !self.drop_offs.is_empty() || self.assigned_pickup.is_some()
    }

    /// The floor this cabin is currently heading for.
    ///
    /// An assigned pickup always wins. Otherwise the farthest drop-off
    /// in the current heading, or the smallest pending drop-off when no
    /// heading has been chosen yet. Equals the current floor when there
    /// is nothing to do.
    pub fn current_destination(&self) -> Floor {
        if let Some(pickup) = self.assigned_pickup {
            return pickup.floor;
        }
        let candidate = match self.direction {
            Some(Direction::Up) => self.drop_offs.last(),
            Some(Direction::Down) | None => self.drop_offs.first(),
        };
        candidate.copied().unwrap_or(self.floor)
    }

    pub fn snapshot(&self) -> CabinSnapshot {
        CabinSnapshot {
            id:          self.id,
            floor:       self.floor,
            destination: self.current_destination(),
            status:      self.status,
            drop_offs:   self.drop_offs.iter().copied().collect(),
        }
    }

    // ── Tick advancement ─────────────────────────────────────────

    /// Advance one tick. Called exactly once per tick by the
    /// dispatcher, before pool absorption.
    pub(crate) fn advance(&mut self, tick: Tick) -> Vec<DispatchEvent> {
        let mut events = Vec::new();
        match self.status {
            CabinStatus::Idle => {
                if !self.has_work() {
                    return events;
                }
                if self.drop_offs.remove(&self.floor) {
                    // Stop on the spot. Direction stays unassigned; the
                    // next transition out of Stopped chooses one.
                    self.status = CabinStatus::Stopped;
                    events.push(DispatchEvent::DropOffServed {
                        tick,
                        cabin: self.id,
                        floor: self.floor,
                    });
                    return events;
                }
                let dest = self.current_destination();
                assert_ne!(dest, self.floor, "idle cabin with work has no destination");
                self.status = CabinStatus::Moving;
                self.direction = Direction::toward(self.floor, dest);
            }

            CabinStatus::Stopped => {
                if !self.has_work() {
                    self.status = CabinStatus::Idle;
                    self.direction = None;
                    return events;
                }
                // The stop consumed this tick; resume without moving.
                // Re-aim at the current destination. A destination equal
                // to the current floor (the current floor re-selected
                // while stopped) keeps the heading and resolves on the
                // next moving tick.
                self.status = CabinStatus::Moving;
                let dest = self.current_destination();
                if let Some(heading) = Direction::toward(self.floor, dest) {
                    self.direction = Some(heading);
                }
            }

            CabinStatus::Moving => {
                let dest = self.current_destination();
                self.floor += (dest - self.floor).signum();
                if self.drop_offs.remove(&self.floor) {
                    self.status = CabinStatus::Stopped;
                    events.push(DispatchEvent::DropOffServed {
                        tick,
                        cabin: self.id,
                        floor: self.floor,
                    });
                }
                if let Some(pickup) = self.assigned_pickup {
                    if pickup.floor == self.floor {
                        // The rider's declared direction becomes the
                        // cabin's heading, so matching drop-offs are
                        // preferred after the doors close.
                        self.assigned_pickup = None;
                        self.direction = Some(pickup.direction);
                        self.status = CabinStatus::Stopped;
                        events.push(DispatchEvent::PickupServed {
                            tick,
                            cabin: self.id,
                            floor: self.floor,
                            direction: pickup.direction,
                        });
                    }
                }
            }
        }
        events
    }

    // ── Dispatcher hooks ─────────────────────────────────────────

    /// Whether a passing cabin may consume `task` from the pool this
    /// tick. The dispatcher asks this about every pool task, in pool
    /// order, for every non-idle cabin.
    pub(crate) fn can_clear(
        &self,
        task: PickupTask,
        limits: Option<FloorLimits>,
        sole_mode: bool,
    ) -> bool {
        if task.floor != self.floor {
            return false;
        }
        if sole_mode {
            return true;
        }
        if self.direction != Some(task.direction) {
            return false;
        }
        let Some(assigned) = self.assigned_pickup else {
            return true;
        };
        // Terminal-floor relaxation: a cabin sent to a terminal floor
        // cannot pass that floor, so calls heading away from it are
        // safe to take regardless of the assigned pickup's direction.
        if let Some(limits) = limits {
            if assigned.floor == limits.top && task.direction == Direction::Up {
                return true;
            }
            if assigned.floor == limits.bottom && task.direction == Direction::Down {
                return true;
            }
        }
        assigned.direction == task.direction
    }

    /// Dedicate this idle cabin to `task`.
    pub(crate) fn assign(&mut self, task: PickupTask) {
        debug_assert!(self.is_idle(), "assignment requires an idle cabin");
        self.assigned_pickup = Some(task);
        self.status = CabinStatus::Moving;
        // None when the cabin already stands at the task's floor; the
        // next moving tick then fires the arrival without travelling.
        self.direction = Direction::toward(self.floor, task.floor);
    }

    /// Stop at the current floor to take an absorbed pool pickup.
    /// The heading is untouched: the cabin already reached a floor
    /// matching it.
    pub(crate) fn stop_for_absorption(&mut self) {
        self.status = CabinStatus::Stopped;
    }

    /// Register an in-cabin floor selection. Returns false when the
    /// floor was already pending.
    pub(crate) fn add_drop_off(&mut self, floor: Floor) -> bool {
        self.drop_offs.insert(floor)
    }
}
