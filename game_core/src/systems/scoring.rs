use crate::{Kinematics, Opponent, Player, RaceState, Racer};
use hecs::World;

/// Full standings, leader first.
///
/// Progress is approximated by the Y coordinate alone (smaller is further
/// ahead). The player is listed first before the stable sort, so ties go to
/// the player.
pub fn standings(world: &World) -> Vec<Racer> {
    let mut cars: Vec<(Racer, f32)> = Vec::new();

    for (_e, (_p, k)) in world.query::<(&Player, &Kinematics)>().iter() {
        cars.push((Racer::Player, k.pos.y));
    }

    let mut opponents: Vec<_> = world
        .query::<(&Opponent, &Kinematics)>()
        .iter()
        .map(|(e, (o, k))| (e.id(), Racer::Opponent(o.id.clone()), k.pos.y))
        .collect();
    opponents.sort_by_key(|(id, _, _)| *id);
    cars.extend(opponents.into_iter().map(|(_, racer, y)| (racer, y)));

    cars.sort_by(|a, b| a.1.total_cmp(&b.1));
    cars.into_iter().map(|(racer, _)| racer).collect()
}

/// Recompute the player's 1-based position from scratch
pub fn update_position(world: &World, race: &mut RaceState) {
    if let Some(index) = standings(world).iter().position(|r| *r == Racer::Player) {
        race.position = (index + 1) as u8;
    }
}

/// Points awarded for a finishing position
pub fn score_for_position(position: u8) -> u32 {
    match position {
        1 => 1000,
        2 => 500,
        3 => 250,
        _ => 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_opponent, create_player, AiProfile, CarConfig};
    use glam::Vec2;

    fn world_with(player_y: f32, opponent_ys: &[f32]) -> World {
        let mut world = World::new();
        create_player(&mut world, &CarConfig::new("p"), Vec2::new(400.0, player_y));
        for (i, y) in opponent_ys.iter().enumerate() {
            create_opponent(
                &mut world,
                Opponent::new(format!("ai_{}", i + 1), "#ffffff", AiProfile::new(0.5, 0.5)),
                Kinematics::new(Vec2::new(300.0, *y), 0.0),
            );
        }
        world
    }

    #[test]
    fn test_smaller_y_is_ahead() {
        let world = world_with(300.0, &[100.0, 400.0, 200.0]);
        let mut race = RaceState::default();
        update_position(&world, &mut race);
        assert_eq!(race.position, 3);

        let order = standings(&world);
        assert_eq!(order[0], Racer::Opponent("ai_1".into()));
        assert_eq!(order[1], Racer::Opponent("ai_3".into()));
        assert_eq!(order[3], Racer::Opponent("ai_2".into()));
    }

    #[test]
    fn test_ties_favour_player() {
        let world = world_with(250.0, &[250.0, 250.0, 250.0]);
        let mut race = RaceState::default();
        race.position = 4;
        update_position(&world, &mut race);
        assert_eq!(race.position, 1);
    }

    #[test]
    fn test_standings_are_a_permutation() {
        let ys = [480.0, 460.0, 440.0, 500.0, 300.0, 60.0, 540.0];
        for &p in &ys {
            for &a in &ys {
                for &b in &ys {
                    let world = world_with(p, &[a, b, 300.5]);
                    let order = standings(&world);
                    assert_eq!(order.len(), 4);
                    assert_eq!(order.iter().filter(|r| **r == Racer::Player).count(), 1);
                    for id in ["ai_1", "ai_2", "ai_3"] {
                        assert_eq!(
                            order
                                .iter()
                                .filter(|r| **r == Racer::Opponent(id.into()))
                                .count(),
                            1
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_table() {
        assert_eq!(score_for_position(1), 1000);
        assert_eq!(score_for_position(2), 500);
        assert_eq!(score_for_position(3), 250);
        assert_eq!(score_for_position(4), 100);
    }
}
