use serde::{Deserialize, Serialize};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Seconds since the previous frame (variable)
    pub now: f32, // Total simulated time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 0.0, now: 0.0 }
    }
}

/// Random number generator for AI decisions
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub player_collisions: u8,
    pub wall_bounces: u8,
    pub nitro_active: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.player_collisions = 0;
        self.wall_bounces = 0;
        self.nitro_active = false;
    }
}

/// Race readout shown on the HUD and persisted at the finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceState {
    pub current_lap: u8,
    pub total_laps: u8,
    pub position: u8,
    pub speed: u32, // rounded for display
    pub nitro_level: f32,
    pub time_remaining: u32,
    pub score: u32,
}

impl RaceState {
    pub fn new(total_laps: u8, race_seconds: u32) -> Self {
        Self {
            current_lap: 1,
            total_laps,
            position: 1,
            speed: 0,
            nitro_level: 100.0,
            time_remaining: race_seconds,
            score: 0,
        }
    }

    /// Nitro gauge as a whole percentage
    pub fn nitro_percent(&self) -> u32 {
        self.nitro_level.round() as u32
    }
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new(crate::Params::TOTAL_LAPS, crate::Params::RACE_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_race_state() {
        let state = RaceState::default();
        assert_eq!(state.current_lap, 1);
        assert_eq!(state.total_laps, 3);
        assert_eq!(state.position, 1);
        assert_eq!(state.speed, 0);
        assert_eq!(state.nitro_level, 100.0);
        assert_eq!(state.time_remaining, 180);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_nitro_percent_rounds() {
        let mut state = RaceState::default();
        state.nitro_level = 41.6;
        assert_eq!(state.nitro_percent(), 42);
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.player_collisions = 2;
        events.wall_bounces = 1;
        events.nitro_active = true;

        events.clear();

        assert_eq!(events.player_collisions, 0);
        assert_eq!(events.wall_bounces, 0);
        assert!(!events.nitro_active);
    }

    #[test]
    fn test_rng_is_deterministic_per_seed() {
        use rand::Rng;
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        let xs: Vec<f32> = (0..4).map(|_| a.0.gen()).collect();
        let ys: Vec<f32> = (0..4).map(|_| b.0.gen()).collect();
        assert_eq!(xs, ys);
    }
}
