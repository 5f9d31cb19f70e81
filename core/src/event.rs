//! Observable state changes, one event per change.
//!
//! RULE: Everything the dispatcher does to its state during a tick or a
//! mutator call is visible here. Two runs fed the same call sequence
//! must produce byte-identical event journals.

use crate::types::{CabinId, Direction, Floor, Tick};
use serde::{Deserialize, Serialize};

/// Every event emitted by the dispatcher.
/// Variants are added over time, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchEvent {
    // ── Tick boundaries ────────────────────────────
    TickStarted   { tick: Tick },
    TickCompleted { tick: Tick },

    // ── Hall calls ─────────────────────────────────
    /// A hall call entered the shared pool.
    PickupQueued   { tick: Tick, floor: Floor, direction: Direction },
    /// An idle cabin was dedicated to a pool task.
    PickupAssigned { tick: Tick, cabin: CabinId, floor: Floor, direction: Direction },
    /// A passing cabin consumed a pool task at its current floor.
    PickupAbsorbed { tick: Tick, cabin: CabinId, floor: Floor, direction: Direction },
    /// A cabin arrived at its assigned pickup's floor.
    PickupServed   { tick: Tick, cabin: CabinId, floor: Floor, direction: Direction },
    /// A cabin reset returned its assigned pickup to the pool.
    PickupRequeued { tick: Tick, cabin: CabinId, floor: Floor, direction: Direction },

    // ── Cabin selections ───────────────────────────
    DropOffQueued { tick: Tick, cabin: CabinId, floor: Floor },
    DropOffServed { tick: Tick, cabin: CabinId, floor: Floor },

    // ── Fleet configuration ────────────────────────
    CabinReplaced { tick: Tick, cabin: CabinId, floor: Floor },
    FleetResized  { tick: Tick, cabins: usize },
}

/// Extract a stable string name from a DispatchEvent variant.
/// Used for the event_type column of the journal.
pub fn event_type_name(event: &DispatchEvent) -> &'static str {
    match event {
        DispatchEvent::TickStarted { .. }    => "tick_started",
        DispatchEvent::TickCompleted { .. }  => "tick_completed",
        DispatchEvent::PickupQueued { .. }   => "pickup_queued",
        DispatchEvent::PickupAssigned { .. } => "pickup_assigned",
        DispatchEvent::PickupAbsorbed { .. } => "pickup_absorbed",
        DispatchEvent::PickupServed { .. }   => "pickup_served",
        DispatchEvent::PickupRequeued { .. } => "pickup_requeued",
        DispatchEvent::DropOffQueued { .. }  => "drop_off_queued",
        DispatchEvent::DropOffServed { .. }  => "drop_off_served",
        DispatchEvent::CabinReplaced { .. }  => "cabin_replaced",
        DispatchEvent::FleetResized { .. }   => "fleet_resized",
    }
}
