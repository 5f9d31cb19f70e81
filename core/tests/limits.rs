//! Caller errors, floor limits, and fleet surgery.

use lift_core::{
    CabinStatus, DispatchError, Dispatcher, Direction, FloorLimits, PickupTask,
};

fn limited() -> Dispatcher {
    let mut dispatcher = Dispatcher::new(2);
    dispatcher.set_floor_limits(Some(FloorLimits::new(-1, 10)));
    dispatcher
}

#[test]
fn pickup_outside_limits_is_rejected() {
    let mut dispatcher = limited();
    let err = dispatcher.pickup(11, Direction::Down).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::BadFloor { floor: 11, bottom: -1, top: 10 }
    ));
    assert!(dispatcher.tasks().is_empty(), "rejected call left state");

    let err = dispatcher.pickup(-2, Direction::Up).unwrap_err();
    assert!(matches!(err, DispatchError::BadFloor { floor: -2, .. }));
}

#[test]
fn select_floor_validates_floor_and_cabin() {
    let mut dispatcher = limited();
    assert!(matches!(
        dispatcher.select_floor(0, 99),
        Err(DispatchError::BadFloor { floor: 99, .. })
    ));
    assert!(matches!(
        dispatcher.select_floor(7, 5),
        Err(DispatchError::BadCabinId { id: 7, fleet_size: 2 })
    ));
    assert!(dispatcher.cabins()[0].drop_offs().is_empty());
}

#[test]
fn rejected_calls_are_not_sticky() {
    // No persistent error state: a failed call changes nothing and the
    // next valid call behaves normally.
    let mut dispatcher = limited();
    dispatcher.pickup(42, Direction::Up).unwrap_err();
    dispatcher.pickup(5, Direction::Up).expect("valid pickup");
    dispatcher.step().expect("step");
    assert_eq!(
        dispatcher.cabins()[0].assigned_pickup(),
        Some(PickupTask::new(5, Direction::Up))
    );
}

#[test]
fn set_elevator_validates_and_requeues() {
    let mut dispatcher = limited();
    assert!(matches!(
        dispatcher.set_elevator(9, 0),
        Err(DispatchError::BadCabinId { id: 9, .. })
    ));
    assert!(matches!(
        dispatcher.set_elevator(0, 99),
        Err(DispatchError::BadFloor { floor: 99, .. })
    ));

    dispatcher.pickup(8, Direction::Down).expect("pickup");
    dispatcher.select_floor(0, 3).expect("select");
    dispatcher.step().expect("step");
    // Cabin 0 started walking its drop-off, so the pickup went to the
    // still-idle cabin 1.
    assert_eq!(
        dispatcher.cabins()[1].assigned_pickup(),
        Some(PickupTask::new(8, Direction::Down))
    );

    dispatcher.set_elevator(1, 2).expect("replace cabin 1");
    let cabin = &dispatcher.cabins()[1];
    assert_eq!(cabin.floor(), 2);
    assert_eq!(cabin.status(), CabinStatus::Idle);
    // The orphaned pickup is pooled again, not lost.
    assert_eq!(
        dispatcher.tasks(),
        vec![PickupTask::new(8, Direction::Down)]
    );

    dispatcher.set_elevator(0, 0).expect("replace cabin 0");
    assert!(
        dispatcher.cabins()[0].drop_offs().is_empty(),
        "drop-offs are discarded, not requeued"
    );

    dispatcher.step().expect("step");
    assert_eq!(
        dispatcher.cabins()[1].assigned_pickup(),
        Some(PickupTask::new(8, Direction::Down)),
        "requeued pickup is dispatched to the closest idle cabin"
    );
}

#[test]
fn growing_the_fleet_appends_idle_cabins() {
    let mut dispatcher = Dispatcher::new(1);
    dispatcher.set_elevator_count(3).expect("grow");
    let status = dispatcher.status();
    assert_eq!(status.len(), 3);
    for (i, cabin) in status.iter().enumerate() {
        assert_eq!(cabin.id, i);
        assert_eq!(cabin.floor, 0);
        assert_eq!(cabin.status, CabinStatus::Idle);
    }
}

#[test]
fn growth_respects_floor_limits() {
    let mut dispatcher = Dispatcher::new(1);
    dispatcher.set_floor_limits(Some(FloorLimits::new(2, 9)));
    dispatcher.set_elevator_count(2).expect("grow");
    assert_eq!(
        dispatcher.status()[1].floor,
        2,
        "new cabins spawn inside the limits"
    );
}

#[test]
fn shrinking_discards_the_tail_and_its_pickups() {
    let mut dispatcher = Dispatcher::new(2);
    dispatcher.set_elevator(1, 4).expect("place cabin 1");
    dispatcher.pickup(4, Direction::Up).expect("pickup");
    dispatcher.step().expect("step"); // cabin 1 is closer and takes it
    assert_eq!(
        dispatcher.cabins()[1].assigned_pickup(),
        Some(PickupTask::new(4, Direction::Up))
    );

    dispatcher.set_elevator_count(1).expect("shrink");
    assert_eq!(dispatcher.status().len(), 1);
    // Unlike set_elevator, truncation does not requeue.
    assert!(dispatcher.tasks().is_empty(), "dropped pickup is discarded");
}

#[test]
fn select_floor_is_idempotent() {
    let mut dispatcher = Dispatcher::new(1);
    dispatcher.select_floor(0, 5).expect("select");
    dispatcher.select_floor(0, 5).expect("select again");
    dispatcher.step().expect("step");
    assert_eq!(dispatcher.cabins()[0].drop_offs().len(), 1);
}

#[test]
fn limits_apply_to_new_calls_only() {
    let mut dispatcher = Dispatcher::new(1);
    dispatcher.pickup(20, Direction::Down).expect("no limits yet");
    dispatcher.step().expect("step");
    dispatcher.set_floor_limits(Some(FloorLimits::new(0, 10)));

    assert!(dispatcher.pickup(20, Direction::Down).is_err());
    // The already-accepted call is still driven to completion.
    for _ in 0..25 {
        dispatcher.step().expect("step");
    }
    assert!(dispatcher.tasks().is_empty());
    assert_eq!(dispatcher.cabins()[0].floor(), 20);
}

#[test]
fn sole_mode_toggles_at_the_next_step() {
    let mut dispatcher = Dispatcher::new(1);
    dispatcher.pickup(3, Direction::Up).expect("pickup");
    dispatcher.step().expect("step");
    dispatcher.pickup(1, Direction::Down).expect("pickup");

    // Direction mismatch: without sole mode this would be passed by,
    // but the flag flips before the cabin reaches floor 1.
    dispatcher.set_sole_elevator_mode(true);
    dispatcher.step().expect("step");
    assert_eq!(dispatcher.cabins()[0].floor(), 1);
    assert_eq!(dispatcher.cabins()[0].status(), CabinStatus::Stopped);
    assert!(
        !dispatcher.tasks().contains(&PickupTask::new(1, Direction::Down)),
        "sole mode absorbed the opposite-direction call"
    );
}
