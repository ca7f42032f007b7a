use crate::{AiAction, Config, Events, GameMap, GameRng, Kinematics, Opponent, Player, Time};
use hecs::World;
use rand::Rng;

/// Advance every opponent one frame.
///
/// Memoryless: each decision looks only at the current distance to the
/// player. Close and aggressive drivers jitter their heading and push for a
/// higher cap; everyone else cruises toward the arena centre.
pub fn drive_opponents(
    world: &mut World,
    time: &Time,
    map: &GameMap,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let dt = time.dt;

    let player_pos = world
        .query::<(&Player, &Kinematics)>()
        .iter()
        .next()
        .map(|(_e, (_p, k))| k.pos);

    let Some(player_pos) = player_pos else {
        return;
    };

    // Deterministic order so a seeded rng replays identically
    let mut opponents: Vec<_> = world
        .query::<(&Opponent, &Kinematics)>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    opponents.sort_by_key(|e| e.id());

    for entity in opponents {
        let Ok((opponent, car)) = world.query_one_mut::<(&mut Opponent, &mut Kinematics)>(entity)
        else {
            continue;
        };

        let ai = &mut opponent.ai;
        let cap = config.ai_speed_cap(ai.skill);
        let distance = car.pos.distance(player_pos);

        if distance < config.ai_overtake_radius && ai.aggressiveness > config.ai_aggression_threshold
        {
            let jitter = (rng.0.gen::<f32>() - 0.5) * ai.skill * config.ai_jitter_rate * dt;
            car.heading += jitter;
            car.speed = (car.speed + config.ai_overtake_accel * dt).min(cap);
            ai.action = AiAction::Overtaking;
        } else {
            let cruise_cap = cap * config.ai_cruise_fraction;
            let accelerating = car.speed < cruise_cap;
            car.speed = (car.speed + config.ai_cruise_accel * dt).min(cruise_cap);

            let to_center = map.center - car.pos;
            let bearing = to_center.y.atan2(to_center.x).to_degrees();
            let diff = bearing - car.heading;
            let steer = diff.abs().min(config.ai_max_steer) * dt * config.ai_steer_damping;
            car.heading += diff.signum() * steer;

            ai.action = if accelerating || diff.abs() < 1.0 {
                AiAction::Accelerating
            } else {
                AiAction::Turning
            };
        }

        car.integrate(dt);
        car.pos = map.clamp_to_walls(car.pos);

        // Bounce: mirror across the wall normal and lose speed
        if map.walls.on_vertical_edge(car.pos) {
            car.heading = 180.0 - car.heading;
            car.speed *= config.wall_speed_keep;
            ai.action = AiAction::Braking;
            events.wall_bounces += 1;
        }
        if map.walls.on_horizontal_edge(car.pos) {
            car.heading = -car.heading;
            car.speed *= config.wall_speed_keep;
            ai.action = AiAction::Braking;
            events.wall_bounces += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_opponent, create_player, AiProfile, CarConfig};
    use glam::Vec2;

    fn setup(player_at: Vec2) -> (World, GameMap, Config, Events, GameRng) {
        let mut world = World::new();
        let map = GameMap::new();
        create_player(&mut world, &CarConfig::new("p"), player_at);
        (world, map, Config::new(), Events::new(), GameRng::new(42))
    }

    fn opponent_at(world: &mut World, pos: Vec2, aggressiveness: f32, skill: f32) -> hecs::Entity {
        create_opponent(
            world,
            Opponent::new("ai", "#ffffff", AiProfile::new(aggressiveness, skill)),
            Kinematics::new(pos, 0.0),
        )
    }

    fn step(world: &mut World, map: &GameMap, config: &Config, events: &mut Events, rng: &mut GameRng, dt: f32) {
        drive_opponents(world, &Time::new(dt, 0.0), map, config, events, rng);
    }

    #[test]
    fn test_aggressive_driver_overtakes_near_player() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(400.0, 300.0));
        let e = opponent_at(&mut world, Vec2::new(450.0, 300.0), 0.9, 0.5);

        step(&mut world, &map, &config, &mut events, &mut rng, 0.1);

        let opp = world.get::<&Opponent>(e).unwrap();
        assert_eq!(opp.ai.action, AiAction::Overtaking);
        let car = world.get::<&Kinematics>(e).unwrap();
        assert!((car.speed - 10.0).abs() < 1e-4);
        // jitter bounded by skill * 120 * dt / 2
        assert!(car.heading.abs() <= 0.5 * 0.5 * 120.0 * 0.1 + 1e-4);
    }

    #[test]
    fn test_timid_driver_cruises_near_player() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(400.0, 300.0));
        let e = opponent_at(&mut world, Vec2::new(450.0, 300.0), 0.5, 0.5);

        step(&mut world, &map, &config, &mut events, &mut rng, 0.1);

        let car = world.get::<&Kinematics>(e).unwrap();
        assert!((car.speed - 8.0).abs() < 1e-4, "cruise accel 80/s");
        assert_ne!(world.get::<&Opponent>(e).unwrap().ai.action, AiAction::Overtaking);
    }

    #[test]
    fn test_cruise_caps_at_ninety_percent() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(100.0, 100.0));
        let e = opponent_at(&mut world, Vec2::new(400.0, 450.0), 0.1, 1.0);

        for _ in 0..10 {
            step(&mut world, &map, &config, &mut events, &mut rng, 0.05);
        }
        let speed = world.get::<&Kinematics>(e).unwrap().speed;
        assert!(speed <= 180.0 * 0.9 + 1e-3);
    }

    #[test]
    fn test_cruise_steers_toward_center() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(100.0, 100.0));
        // Centre is straight "down" the screen from here: bearing +90 deg
        let e = opponent_at(&mut world, Vec2::new(400.0, 150.0), 0.0, 0.5);

        step(&mut world, &map, &config, &mut events, &mut rng, 0.1);

        // min(90, 45) * 0.1 * 0.5
        let heading = world.get::<&Kinematics>(e).unwrap().heading;
        assert!((heading - 2.25).abs() < 1e-4);
    }

    fn launch(world: &mut World, e: hecs::Entity, heading: f32, speed: f32) {
        let mut car = world.get::<&mut Kinematics>(e).unwrap();
        car.heading = heading;
        car.speed = speed;
    }

    #[test]
    fn test_vertical_wall_mirrors_heading() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(100.0, 500.0));
        let e = opponent_at(&mut world, Vec2::new(735.0, 300.0), 0.0, 0.5);
        launch(&mut world, e, 0.0, 100.0);

        step(&mut world, &map, &config, &mut events, &mut rng, 0.1);

        // Cruise first: centre bearing 180, steer min(180, 45) * 0.1 * 0.5,
        // speed 100 + 80 * 0.1 (cap 135)
        let heading_before = 2.25;
        let speed_before = 108.0;

        let car = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(car.pos.x, 740.0);
        assert!(car.pos.y > 60.0 && car.pos.y < 540.0);
        assert!((car.heading - (180.0 - heading_before)).abs() < 1e-3, "{}", car.heading);
        assert!((car.speed - speed_before * 0.7).abs() < 1e-3, "{}", car.speed);
        assert_eq!(events.wall_bounces, 1);
        assert_eq!(world.get::<&Opponent>(e).unwrap().ai.action, AiAction::Braking);
    }

    #[test]
    fn test_horizontal_wall_negates_heading() {
        let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(100.0, 100.0));
        let e = opponent_at(&mut world, Vec2::new(400.0, 535.0), 0.0, 0.5);
        launch(&mut world, e, 90.0, 100.0);

        step(&mut world, &map, &config, &mut events, &mut rng, 0.1);

        // Centre is straight up (bearing -90): steer back 2.25 degrees
        let heading_before = 87.75;
        let speed_before = 108.0;

        let car = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(car.pos.y, 540.0);
        assert!(car.pos.x > 60.0 && car.pos.x < 740.0);
        assert!((car.heading + heading_before).abs() < 1e-3, "{}", car.heading);
        assert!((car.speed - speed_before * 0.7).abs() < 1e-3, "{}", car.speed);
        assert_eq!(events.wall_bounces, 1);
        assert_eq!(world.get::<&Opponent>(e).unwrap().ai.action, AiAction::Braking);
    }

    #[test]
    fn test_same_seed_same_race() {
        let run = || {
            let (mut world, map, config, mut events, mut rng) = setup(Vec2::new(400.0, 300.0));
            let e = opponent_at(&mut world, Vec2::new(420.0, 310.0), 1.0, 1.0);
            for _ in 0..60 {
                step(&mut world, &map, &config, &mut events, &mut rng, 1.0 / 60.0);
            }
            let k = *world.get::<&Kinematics>(e).unwrap();
            k
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_no_player_no_movement() {
        let mut world = World::new();
        let map = GameMap::new();
        let e = opponent_at(&mut world, Vec2::new(300.0, 300.0), 1.0, 1.0);
        step(&mut world, &map, &Config::new(), &mut Events::new(), &mut GameRng::new(1), 0.5);
        assert_eq!(world.get::<&Kinematics>(e).unwrap().pos, Vec2::new(300.0, 300.0));
    }
}
