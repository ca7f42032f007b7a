use crate::{Config, Events, Kinematics, Opponent, Player};
use hecs::World;

/// Penalise the player for touching any opponent.
///
/// One-sided: only the player loses speed. Each overlapping opponent applies
/// its own cut, so two contacts in one frame compound. A full scan is fine
/// with a handful of cars.
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    let opponents: Vec<glam::Vec2> = world
        .query::<(&Opponent, &Kinematics)>()
        .iter()
        .map(|(_e, (_o, k))| k.pos)
        .collect();

    for (_entity, (_player, car)) in world.query_mut::<(&Player, &mut Kinematics)>() {
        for opponent_pos in &opponents {
            if car.pos.distance(*opponent_pos) < config.collision_radius {
                car.speed = (car.speed * config.collision_speed_keep).max(0.0);
                events.player_collisions += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_opponent, create_player, AiProfile, CarConfig};
    use glam::Vec2;

    fn setup(gap: f32) -> (World, hecs::Entity, hecs::Entity) {
        let mut world = World::new();
        let player = create_player(&mut world, &CarConfig::new("p"), Vec2::new(400.0, 300.0));
        let mut k = Kinematics::new(Vec2::new(400.0 + gap, 300.0), 0.0);
        k.speed = 80.0;
        let opponent = create_opponent(
            &mut world,
            Opponent::new("ai_1", "#ff4444", AiProfile::new(0.7, 0.8)),
            k,
        );
        world.get::<&mut Kinematics>(player).unwrap().speed = 100.0;
        (world, player, opponent)
    }

    #[test]
    fn test_contact_slows_only_the_player() {
        let (mut world, player, opponent) = setup(20.0);
        let mut events = Events::new();

        check_collisions(&mut world, &Config::new(), &mut events);

        let player_speed = world.get::<&Kinematics>(player).unwrap().speed;
        assert!((player_speed - 30.0).abs() < 1e-4);
        assert_eq!(world.get::<&Kinematics>(opponent).unwrap().speed, 80.0);
        assert_eq!(events.player_collisions, 1);
    }

    #[test]
    fn test_no_contact_outside_radius() {
        let (mut world, player, _) = setup(35.0);
        let mut events = Events::new();

        check_collisions(&mut world, &Config::new(), &mut events);

        assert_eq!(world.get::<&Kinematics>(player).unwrap().speed, 100.0);
        assert_eq!(events.player_collisions, 0);
    }

    #[test]
    fn test_multiple_contacts_compound() {
        let (mut world, player, _) = setup(10.0);
        create_opponent(
            &mut world,
            Opponent::new("ai_2", "#44ff44", AiProfile::new(0.5, 0.9)),
            Kinematics::new(Vec2::new(390.0, 300.0), 0.0),
        );
        let mut events = Events::new();

        check_collisions(&mut world, &Config::new(), &mut events);

        let speed = world.get::<&Kinematics>(player).unwrap().speed;
        assert!((speed - 9.0).abs() < 1e-4);
        assert_eq!(events.player_collisions, 2);
    }
}
