use crate::Params;

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub max_speed_per_stat: f32,
    pub accel_per_stat: f32,
    pub turn_rate_per_stat: f32,
    pub coast_factor: f32,
    pub brake_factor: f32,
    pub min_turn_speed: f32,
    pub nitro_boost: f32,
    pub nitro_ceiling: f32,
    pub nitro_drain: f32,
    pub nitro_regen: f32,
    pub nitro_max: f32,
    pub ai_base_cap: f32,
    pub ai_skill_cap: f32,
    pub ai_cruise_fraction: f32,
    pub ai_overtake_accel: f32,
    pub ai_cruise_accel: f32,
    pub ai_overtake_radius: f32,
    pub ai_aggression_threshold: f32,
    pub ai_jitter_rate: f32,
    pub ai_max_steer: f32,
    pub ai_steer_damping: f32,
    pub wall_speed_keep: f32,
    pub collision_radius: f32,
    pub collision_speed_keep: f32,
    pub countdown_seconds: u8,
    pub race_seconds: u32,
    pub total_laps: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_speed_per_stat: Params::MAX_SPEED_PER_STAT,
            accel_per_stat: Params::ACCEL_PER_STAT,
            turn_rate_per_stat: Params::TURN_RATE_PER_STAT,
            coast_factor: Params::COAST_FACTOR,
            brake_factor: Params::BRAKE_FACTOR,
            min_turn_speed: Params::MIN_TURN_SPEED,
            nitro_boost: Params::NITRO_BOOST,
            nitro_ceiling: Params::NITRO_CEILING,
            nitro_drain: Params::NITRO_DRAIN,
            nitro_regen: Params::NITRO_REGEN,
            nitro_max: Params::NITRO_MAX,
            ai_base_cap: Params::AI_BASE_CAP,
            ai_skill_cap: Params::AI_SKILL_CAP,
            ai_cruise_fraction: Params::AI_CRUISE_FRACTION,
            ai_overtake_accel: Params::AI_OVERTAKE_ACCEL,
            ai_cruise_accel: Params::AI_CRUISE_ACCEL,
            ai_overtake_radius: Params::AI_OVERTAKE_RADIUS,
            ai_aggression_threshold: Params::AI_AGGRESSION_THRESHOLD,
            ai_jitter_rate: Params::AI_JITTER_RATE,
            ai_max_steer: Params::AI_MAX_STEER,
            ai_steer_damping: Params::AI_STEER_DAMPING,
            wall_speed_keep: Params::WALL_SPEED_KEEP,
            collision_radius: Params::COLLISION_RADIUS,
            collision_speed_keep: Params::COLLISION_SPEED_KEEP,
            countdown_seconds: Params::COUNTDOWN_SECONDS,
            race_seconds: Params::RACE_SECONDS,
            total_laps: Params::TOTAL_LAPS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top speed for a car with the given speed stat (nitro excluded)
    pub fn max_speed(&self, speed_stat: i32) -> f32 {
        speed_stat as f32 * self.max_speed_per_stat
    }

    /// Absolute speed ceiling, reachable only under nitro
    pub fn speed_ceiling(&self, speed_stat: i32) -> f32 {
        self.max_speed(speed_stat) * self.nitro_ceiling
    }

    /// Acceleration rate in units/s^2 for the given acceleration stat
    pub fn acceleration(&self, acceleration_stat: i32) -> f32 {
        acceleration_stat as f32 * self.accel_per_stat
    }

    /// Top speed an AI driver of the given skill chases while overtaking
    pub fn ai_speed_cap(&self, skill: f32) -> f32 {
        self.ai_base_cap + skill * self.ai_skill_cap
    }
}
