pub mod components;
pub mod config;
pub mod controls;
pub mod env;
pub mod map;
pub mod params;
pub mod race;
pub mod resources;
pub mod stats;
pub mod systems;
pub mod tracks;

pub use components::*;
pub use config::*;
pub use controls::*;
pub use env::*;
pub use map::*;
pub use params::*;
pub use race::*;
pub use resources::*;
pub use stats::*;
pub use systems::*;
pub use tracks::*;

use hecs::World;

/// Run one frame of the race simulation.
///
/// Variable timestep: `time.dt` is the measured delta since the previous
/// frame. Only negative deltas are rejected.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    map: &GameMap,
    config: &Config,
    controls: &ControlFlags,
    race: &mut RaceState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    time.dt = time.dt.max(0.0);

    // Clear events at start of frame
    events.clear();

    // 1. Player physics from the sampled controls
    drive_player(world, time, map, config, controls, race, events);

    // 2. Opponents react to where the player is now
    drive_opponents(world, time, map, config, events, rng);

    // 3. Contact penalty, then refresh the speed readout
    check_collisions(world, config, events);
    if events.player_collisions > 0 {
        if let Some(player) = player_kinematics(world) {
            race.speed = player.speed.round() as u32;
        }
    }

    // 4. Rank
    update_position(world, race);

    time.now += time.dt;
}

/// Helper to create the player's car
pub fn create_player(world: &mut World, car: &CarConfig, pos: glam::Vec2) -> hecs::Entity {
    world.spawn((Player::new(car.stats), Kinematics::new(pos, 0.0)))
}

/// Helper to create an AI car
pub fn create_opponent(world: &mut World, opponent: Opponent, kinematics: Kinematics) -> hecs::Entity {
    world.spawn((opponent, kinematics))
}

/// Current state of the player's car, if one exists
pub fn player_kinematics(world: &World) -> Option<Kinematics> {
    world
        .query::<(&Player, &Kinematics)>()
        .iter()
        .next()
        .map(|(_e, (_p, k))| *k)
}
