use crate::{Config, ControlFlags, Events, GameMap, Kinematics, Player, RaceState, Time};
use hecs::World;

/// Advance the player car one frame from the current control flags.
///
/// Order matters: throttle, then brake (so braking wins), then steering,
/// then nitro, then integration and the wall clamp.
pub fn drive_player(
    world: &mut World,
    time: &Time,
    map: &GameMap,
    config: &Config,
    controls: &ControlFlags,
    race: &mut RaceState,
    events: &mut Events,
) {
    let dt = time.dt;

    for (_entity, (player, car)) in world.query_mut::<(&Player, &mut Kinematics)>() {
        let max_speed = config.max_speed(player.stats.speed);
        let accel = config.acceleration(player.stats.acceleration);
        let turn_rate = player.stats.handling as f32 * config.turn_rate_per_stat;

        let mut speed = car.speed;

        // Throttle
        if controls.accelerate {
            speed = (speed + accel * dt).min(max_speed);
        } else {
            speed = (speed - accel * config.coast_factor * dt).max(0.0);
        }

        // Brake
        if controls.brake {
            speed = (speed - accel * config.brake_factor * dt).max(0.0);
        }

        // Steering scales with the fraction of top speed
        if speed > config.min_turn_speed && max_speed > 0.0 {
            let turn = turn_rate * (speed / max_speed) * dt;
            if controls.turn_left {
                car.heading -= turn;
            }
            if controls.turn_right {
                car.heading += turn;
            }
        }

        // Nitro
        if controls.nitro && race.nitro_level > 0.0 {
            speed = (speed * config.nitro_boost).min(max_speed * config.nitro_ceiling);
            race.nitro_level = (race.nitro_level - config.nitro_drain * dt).max(0.0);
            events.nitro_active = true;
        } else if race.nitro_level < config.nitro_max {
            race.nitro_level = (race.nitro_level + config.nitro_regen * dt).min(config.nitro_max);
        }

        car.speed = speed;
        car.integrate(dt);
        car.pos = map.clamp_to_walls(car.pos);

        race.speed = car.speed.round() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_player, CarConfig, Chip, Part};
    use glam::Vec2;

    struct Rig {
        world: World,
        map: GameMap,
        config: Config,
        race: RaceState,
        events: Events,
        player: hecs::Entity,
    }

    fn rig() -> Rig {
        let mut world = World::new();
        let map = GameMap::new();
        let car = CarConfig::new("test");
        let player = create_player(&mut world, &car, map.player_spawn);
        Rig {
            world,
            map,
            config: Config::new(),
            race: RaceState::default(),
            events: Events::new(),
            player,
        }
    }

    impl Rig {
        fn drive(&mut self, controls: ControlFlags, dt: f32) {
            drive_player(
                &mut self.world,
                &Time::new(dt, 0.0),
                &self.map,
                &self.config,
                &controls,
                &mut self.race,
                &mut self.events,
            );
        }

        fn car(&self) -> Kinematics {
            *self.world.get::<&Kinematics>(self.player).unwrap()
        }

        fn set_car(&mut self, k: Kinematics) {
            *self.world.get::<&mut Kinematics>(self.player).unwrap() = k;
        }
    }

    fn held(f: impl FnOnce(&mut ControlFlags)) -> ControlFlags {
        let mut c = ControlFlags::new();
        f(&mut c);
        c
    }

    #[test]
    fn test_throttle_caps_at_max_speed() {
        let mut rig = rig();
        rig.drive(held(|c| c.accelerate = true), 1.0);
        assert_eq!(rig.car().speed, 150.0, "speed stat 75 -> max 150");
        assert_eq!(rig.race.speed, 150);
    }

    #[test]
    fn test_coasting_decays_to_zero() {
        let mut rig = rig();
        let mut k = rig.car();
        k.speed = 100.0;
        rig.set_car(k);

        // accel 7000, coast 3500/s -> 0.01 s sheds 35
        rig.drive(ControlFlags::new(), 0.01);
        assert!((rig.car().speed - 65.0).abs() < 1e-3);

        rig.drive(ControlFlags::new(), 1.0);
        assert_eq!(rig.car().speed, 0.0);
    }

    #[test]
    fn test_brake_beats_throttle() {
        let mut rig = rig();
        let mut k = rig.car();
        k.speed = 100.0;
        rig.set_car(k);

        rig.drive(
            held(|c| {
                c.accelerate = true;
                c.brake = true;
            }),
            0.01,
        );
        // +70 (capped at 150 -> 150), then -140
        assert!((rig.car().speed - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_turning_below_threshold() {
        let mut rig = rig();
        let mut k = rig.car();
        k.speed = 4.0;
        rig.set_car(k);

        rig.drive(held(|c| c.turn_left = true), 0.0001);
        assert_eq!(rig.car().heading, 0.0);
    }

    #[test]
    fn test_turn_rate_scales_with_speed() {
        let mut rig = rig();
        let mut k = rig.car();
        k.speed = 150.0;
        rig.set_car(k);

        // brake off, throttle held so speed stays at max
        rig.drive(
            held(|c| {
                c.accelerate = true;
                c.turn_right = true;
            }),
            0.1,
        );
        // handling 80 * 2 = 160 deg/s at full speed
        assert!((rig.car().heading - 16.0).abs() < 1e-3);

        let mut k = rig.car();
        k.heading = 0.0;
        k.speed = 75.0;
        rig.set_car(k);
        rig.drive(
            held(|c| {
                c.turn_left = true;
                c.accelerate = true;
            }),
            0.001,
        );
        // speed after throttle: 75 + 7 = 82 -> 160 * 82/150 * 0.001
        let expected = -160.0 * (82.0 / 150.0) * 0.001;
        assert!((rig.car().heading - expected).abs() < 1e-4);
    }

    #[test]
    fn test_nitro_boost_and_drain() {
        let mut rig = rig();
        let mut k = rig.car();
        k.speed = 150.0;
        rig.set_car(k);

        rig.drive(
            held(|c| {
                c.accelerate = true;
                c.nitro = true;
            }),
            0.1,
        );
        assert_eq!(rig.car().speed, 225.0, "boost capped at 1.5x max");
        assert!((rig.race.nitro_level - 95.0).abs() < 1e-3);
        assert!(rig.events.nitro_active);
    }

    #[test]
    fn test_nitro_regenerates_when_released() {
        let mut rig = rig();
        rig.race.nitro_level = 50.0;
        rig.drive(ControlFlags::new(), 0.5);
        assert!((rig.race.nitro_level - 60.0).abs() < 1e-3);

        rig.drive(ControlFlags::new(), 10.0);
        assert_eq!(rig.race.nitro_level, 100.0);
    }

    #[test]
    fn test_empty_tank_gives_no_boost() {
        let mut rig = rig();
        rig.race.nitro_level = 0.0;
        let mut k = rig.car();
        k.speed = 100.0;
        rig.set_car(k);

        rig.drive(held(|c| c.nitro = true), 0.0);
        assert_eq!(rig.car().speed, 100.0);
        assert!(!rig.events.nitro_active);
    }

    #[test]
    fn test_position_clamped_to_walls() {
        let mut rig = rig();
        let mut k = rig.car();
        k.pos = Vec2::new(700.0, 300.0);
        k.speed = 150.0;
        rig.set_car(k);

        rig.drive(held(|c| c.accelerate = true), 2.0);
        assert_eq!(rig.car().pos, Vec2::new(740.0, 300.0));
    }

    #[test]
    fn test_speed_bounds_hold_for_every_control_combination() {
        let car = CarConfig::new("bounds").with(Part::Chips(Chip::Turbo));
        let ceiling = Config::new().speed_ceiling(car.stats.speed);

        for mask in 0u8..32 {
            let controls = ControlFlags {
                accelerate: mask & 1 != 0,
                brake: mask & 2 != 0,
                turn_left: mask & 4 != 0,
                turn_right: mask & 8 != 0,
                nitro: mask & 16 != 0,
            };
            for &dt in &[0.0, 0.001, 0.016, 0.5, 30.0] {
                let mut world = World::new();
                let map = GameMap::new();
                let player = create_player(&mut world, &car, map.player_spawn);
                let mut race = RaceState::default();
                let mut events = Events::new();
                for _ in 0..5 {
                    drive_player(
                        &mut world,
                        &Time::new(dt, 0.0),
                        &map,
                        &Config::new(),
                        &controls,
                        &mut race,
                        &mut events,
                    );
                    let speed = world.get::<&Kinematics>(player).unwrap().speed;
                    assert!(speed >= 0.0, "mask {mask} dt {dt}");
                    assert!(speed <= ceiling, "mask {mask} dt {dt}: {speed}");
                    assert!((0.0..=100.0).contains(&race.nitro_level));
                }
            }
        }
    }
}
