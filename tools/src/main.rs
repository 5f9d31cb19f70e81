//! lift-runner: headless driver for the lift-core dispatcher.
//!
//! Usage:
//!   lift-runner --cabins 3 --ticks 50
//!   lift-runner --config building.json --scenario calls.json --ticks 120
//!
//! The scenario file is a JSON list of timed calls:
//!   { "calls": [
//!       { "tick": 0, "pickup":       { "floor": 5, "direction": "down" } },
//!       { "tick": 4, "select_floor": { "cabin": 0, "floor": -1 } }
//!   ] }
//!
//! Calls tagged with tick T are issued after T completed steps, before
//! step T+1. Prints a run summary at the end.

use anyhow::{Context, Result};
use lift_core::{CabinId, DispatchConfig, Dispatcher, Direction, Floor, Tick};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
struct Scenario {
    calls: Vec<TimedCall>,
}

#[derive(Debug, Deserialize)]
struct TimedCall {
    tick: Tick,
    #[serde(flatten)]
    call: Call,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Call {
    Pickup { floor: Floor, direction: Direction },
    SelectFloor { cabin: CabinId, floor: Floor },
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ticks = parse_arg(&args, "--ticks", 50u64);
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());
    let scenario_path = args
        .windows(2)
        .find(|w| w[0] == "--scenario")
        .map(|w| w[1].as_str());

    let mut config = match config_path {
        Some(path) => DispatchConfig::load(path)?,
        None => DispatchConfig::default(),
    };
    // --cabins overrides the config file.
    config.cabins = parse_arg(&args, "--cabins", config.cabins);

    let mut scenario = match scenario_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {path}"))?;
            serde_json::from_str::<Scenario>(&content)
                .with_context(|| format!("Cannot parse {path}"))?
        }
        None => Scenario { calls: Vec::new() },
    };
    scenario.calls.sort_by_key(|c| c.tick);

    println!("lift-runner");
    println!("  cabins:    {}", config.cabins);
    println!("  ticks:     {ticks}");
    println!("  limits:    {:?}", config.floor_limits);
    println!("  sole mode: {}", config.sole_mode);
    println!();

    let mut dispatcher = Dispatcher::from_config(&config);
    let mut next_call = 0usize;

    for _ in 0..ticks {
        while next_call < scenario.calls.len()
            && scenario.calls[next_call].tick <= dispatcher.current_tick()
        {
            issue(&mut dispatcher, &scenario.calls[next_call])?;
            next_call += 1;
        }
        dispatcher.step()?;
    }

    let served = |kind: &str| {
        dispatcher
            .journal()
            .entries()
            .iter()
            .filter(|e| e.event_type == kind)
            .count()
    };

    println!("=== RUN SUMMARY ===");
    println!("  final tick:       {}", dispatcher.current_tick());
    println!("  pickups served:   {}", served("pickup_served"));
    println!("  pickups absorbed: {}", served("pickup_absorbed"));
    println!("  drop-offs served: {}", served("drop_off_served"));
    println!("  outstanding:      {}", dispatcher.tasks().len());
    println!();
    println!("  id | floor | dest  | status  | drop-offs");
    for cabin in dispatcher.status() {
        println!(
            "  {:>2} | {:>5} | {:>5} | {:<7} | {:?}",
            cabin.id,
            cabin.floor,
            cabin.destination,
            format!("{:?}", cabin.status),
            cabin.drop_offs,
        );
    }

    Ok(())
}

fn issue(dispatcher: &mut Dispatcher, timed: &TimedCall) -> Result<()> {
    match timed.call {
        Call::Pickup { floor, direction } => dispatcher
            .pickup(floor, direction)
            .with_context(|| format!("pickup at tick {}", timed.tick))?,
        Call::SelectFloor { cabin, floor } => dispatcher
            .select_floor(cabin, floor)
            .with_context(|| format!("select_floor at tick {}", timed.tick))?,
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
