//! The dispatcher — the heart of the dispatch core.
//!
//! TICK ORDER (fixed, documented, never reordered):
//!   1. Advance + absorption, one fused pass in cabin-id order.
//!      Each cabin advances one tick; a non-idle cabin then takes the
//!      first pool task it can clear at its new floor.
//!   2. Assignment. Pool heads go to the closest idle cabin, FIFO,
//!      until the pool or the idle cabins run out.
//!
//! RULES:
//!   - Moving cabins get first refusal at pool pickups they pass.
//!   - An assignment never preempts another cabin's assigned pickup.
//!   - The core never consults a clock; time advances only through
//!     step().
//!   - Every state change is appended to the event journal.

use crate::{
    cabin::Cabin,
    config::DispatchConfig,
    error::{DispatchError, DispatchResult},
    event::DispatchEvent,
    journal::EventJournal,
    snapshot::CabinSnapshot,
    types::{CabinId, Direction, Floor, FloorLimits, PickupTask, Tick},
};
use std::collections::VecDeque;

pub struct Dispatcher {
    cabins:    Vec<Cabin>,
    pool:      VecDeque<PickupTask>,
    limits:    Option<FloorLimits>,
    sole_mode: bool,
    tick:      Tick,
    journal:   EventJournal,
}

impl Dispatcher {
    /// A fleet of `cabins` idle cabins at floor 0, no floor limits.
    pub fn new(cabins: usize) -> Self {
        Self::from_config(&DispatchConfig {
            cabins,
            floor_limits: None,
            sole_mode: false,
        })
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        let spawn = config.floor_limits.map_or(0, |l| l.clamp(0));
        Self {
            cabins:    (0..config.cabins).map(|id| Cabin::new(id, spawn)).collect(),
            pool:      VecDeque::new(),
            limits:    config.floor_limits,
            sole_mode: config.sole_mode,
            tick:      0,
            journal:   EventJournal::new(),
        }
    }

    // ── Read access ──────────────────────────────────────────────

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn cabins(&self) -> &[Cabin] {
        &self.cabins
    }

    pub fn floor_limits(&self) -> Option<FloorLimits> {
        self.limits
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Per-cabin summaries, by value.
    pub fn status(&self) -> Vec<CabinSnapshot> {
        self.cabins.iter().map(Cabin::snapshot).collect()
    }

    /// Every outstanding pickup: the pool in FIFO order, then assigned
    /// pickups in cabin-id order. By value.
    pub fn tasks(&self) -> Vec<PickupTask> {
        self.pool
            .iter()
            .copied()
            .chain(self.cabins.iter().filter_map(Cabin::assigned_pickup))
            .collect()
    }

    // ── Calls ────────────────────────────────────────────────────

    /// Register a hall call. Deduplicated against the pool only: a task
    /// equal to some cabin's assigned pickup may be queued again and is
    /// absorbed or assigned as usual.
    pub fn pickup(&mut self, floor: Floor, direction: Direction) -> DispatchResult<()> {
        self.check_floor(floor)?;
        let task = PickupTask::new(floor, direction);
        if self.pool.contains(&task) {
            return Ok(());
        }
        self.pool.push_back(task);
        self.record(DispatchEvent::PickupQueued {
            tick: self.tick,
            floor,
            direction,
        })
    }

    /// Register an in-cabin floor selection. Idempotent.
    pub fn select_floor(&mut self, cabin_id: CabinId, floor: Floor) -> DispatchResult<()> {
        self.check_floor(floor)?;
        self.check_cabin(cabin_id)?;
        if self.cabins[cabin_id].add_drop_off(floor) {
            self.record(DispatchEvent::DropOffQueued {
                tick: self.tick,
                cabin: cabin_id,
                floor,
            })?;
        }
        Ok(())
    }

    // ── Time ─────────────────────────────────────────────────────

    /// Advance one tick. Returns the events of this tick, in emission
    /// order; the same events are appended to the journal.
    pub fn step(&mut self) -> DispatchResult<Vec<DispatchEvent>> {
        self.tick += 1;
        let tick = self.tick;
        let mut events = Vec::new();
        self.emit(&mut events, DispatchEvent::TickStarted { tick })?;

        // Phase 1: advance + absorption, in cabin-id order. An earlier
        // cabin may consume a pool task a later cabin would also have
        // matched; the order is part of the contract.
        for id in 0..self.cabins.len() {
            for event in self.cabins[id].advance(tick) {
                self.emit(&mut events, event)?;
            }
            let matched = {
                let cabin = &self.cabins[id];
                if cabin.is_idle() {
                    continue;
                }
                self.pool
                    .iter()
                    .position(|task| cabin.can_clear(*task, self.limits, self.sole_mode))
            };
            if let Some(pos) = matched {
                if let Some(task) = self.pool.remove(pos) {
                    self.cabins[id].stop_for_absorption();
                    log::debug!(
                        "cabin {id} absorbed pickup ({}, {:?}) in passing",
                        task.floor,
                        task.direction
                    );
                    self.emit(
                        &mut events,
                        DispatchEvent::PickupAbsorbed {
                            tick,
                            cabin: id,
                            floor: task.floor,
                            direction: task.direction,
                        },
                    )?;
                }
            }
        }

        // Phase 2: assignment. Uses post-advance floor positions.
        while let Some(&task) = self.pool.front() {
            let Some(cabin_id) = self.closest_idle_cabin(task.floor) else {
                break;
            };
            self.pool.pop_front();
            self.cabins[cabin_id].assign(task);
            log::debug!(
                "cabin {cabin_id} assigned pickup ({}, {:?})",
                task.floor,
                task.direction
            );
            self.emit(
                &mut events,
                DispatchEvent::PickupAssigned {
                    tick,
                    cabin: cabin_id,
                    floor: task.floor,
                    direction: task.direction,
                },
            )?;
        }

        self.emit(&mut events, DispatchEvent::TickCompleted { tick })?;
        Ok(events)
    }

    // ── Fleet configuration ──────────────────────────────────────

    /// Replace the cabin at `id` with a fresh idle cabin at `floor`.
    /// The old cabin's assigned pickup returns to the pool; its
    /// drop-offs are discarded.
    pub fn set_elevator(&mut self, id: CabinId, floor: Floor) -> DispatchResult<()> {
        self.check_cabin(id)?;
        self.check_floor(floor)?;
        let orphaned = self.cabins[id].assigned_pickup();
        self.cabins[id] = Cabin::new(id, floor);
        self.record(DispatchEvent::CabinReplaced {
            tick: self.tick,
            cabin: id,
            floor,
        })?;
        if let Some(task) = orphaned {
            if !self.pool.contains(&task) {
                self.pool.push_back(task);
                self.record(DispatchEvent::PickupRequeued {
                    tick: self.tick,
                    cabin: id,
                    floor: task.floor,
                    direction: task.direction,
                })?;
            }
        }
        Ok(())
    }

    /// Resize the fleet. Growth appends idle cabins at floor 0 (clamped
    /// into the configured limits); shrinking truncates the tail and
    /// discards the dropped cabins' assigned pickups, unlike
    /// set_elevator, which requeues.
    pub fn set_elevator_count(&mut self, count: usize) -> DispatchResult<()> {
        if count == self.cabins.len() {
            return Ok(());
        }
        let spawn = self.limits.map_or(0, |l| l.clamp(0));
        while self.cabins.len() < count {
            let id = self.cabins.len();
            self.cabins.push(Cabin::new(id, spawn));
        }
        self.cabins.truncate(count);
        self.record(DispatchEvent::FleetResized {
            tick: self.tick,
            cabins: count,
        })
    }

    /// Limits apply to calls made from now on; work accepted under the
    /// old limits drains naturally.
    pub fn set_floor_limits(&mut self, limits: Option<FloorLimits>) {
        self.limits = limits;
    }

    /// Takes effect from the next step().
    pub fn set_sole_elevator_mode(&mut self, sole_mode: bool) {
        self.sole_mode = sole_mode;
    }

    // ── Internals ────────────────────────────────────────────────

    fn closest_idle_cabin(&self, floor: Floor) -> Option<CabinId> {
        self.cabins
            .iter()
            .filter(|c| c.is_idle())
            .min_by_key(|c| ((c.floor() - floor).abs(), c.id()))
            .map(Cabin::id)
    }

    fn check_floor(&self, floor: Floor) -> DispatchResult<()> {
        match self.limits {
            Some(l) if !l.contains(floor) => Err(DispatchError::BadFloor {
                floor,
                bottom: l.bottom,
                top: l.top,
            }),
            _ => Ok(()),
        }
    }

    fn check_cabin(&self, id: CabinId) -> DispatchResult<()> {
        if id < self.cabins.len() {
            Ok(())
        } else {
            Err(DispatchError::BadCabinId {
                id,
                fleet_size: self.cabins.len(),
            })
        }
    }

    fn record(&mut self, event: DispatchEvent) -> DispatchResult<()> {
        self.journal.append(self.tick, &event)
    }

    fn emit(&mut self, out: &mut Vec<DispatchEvent>, event: DispatchEvent) -> DispatchResult<()> {
        self.journal.append(self.tick, &event)?;
        out.push(event);
        Ok(())
    }
}
