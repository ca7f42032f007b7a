/// Game tuning parameters for the arcade race
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (canvas pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const WALL_MARGIN: f32 = 60.0;

    // Base stat vector before part deltas
    pub const BASE_SPEED: i32 = 75;
    pub const BASE_ACCELERATION: i32 = 70;
    pub const BASE_HANDLING: i32 = 80;
    pub const BASE_NITRO: i32 = 85;

    // Player physics
    pub const MAX_SPEED_PER_STAT: f32 = 2.0; // max speed = speed stat * 2
    pub const ACCEL_PER_STAT: f32 = 100.0; // units/s^2 per acceleration point
    pub const TURN_RATE_PER_STAT: f32 = 2.0; // deg/s per handling point at max speed
    pub const COAST_FACTOR: f32 = 0.5; // throttle released
    pub const BRAKE_FACTOR: f32 = 2.0; // 4x the coast decay
    pub const MIN_TURN_SPEED: f32 = 5.0;

    // Nitro
    pub const NITRO_BOOST: f32 = 1.8;
    pub const NITRO_CEILING: f32 = 1.5; // multiple of max speed
    pub const NITRO_DRAIN: f32 = 50.0; // per second
    pub const NITRO_REGEN: f32 = 20.0; // per second
    pub const NITRO_MAX: f32 = 100.0;

    // Opponent AI
    pub const AI_BASE_CAP: f32 = 120.0;
    pub const AI_SKILL_CAP: f32 = 60.0;
    pub const AI_CRUISE_FRACTION: f32 = 0.9;
    pub const AI_OVERTAKE_ACCEL: f32 = 100.0;
    pub const AI_CRUISE_ACCEL: f32 = 80.0;
    pub const AI_OVERTAKE_RADIUS: f32 = 100.0;
    pub const AI_AGGRESSION_THRESHOLD: f32 = 0.5;
    pub const AI_JITTER_RATE: f32 = 120.0; // deg/s at skill 1.0
    pub const AI_MAX_STEER: f32 = 45.0; // deg/s
    pub const AI_STEER_DAMPING: f32 = 0.5;
    pub const WALL_SPEED_KEEP: f32 = 0.7;

    // Contact
    pub const COLLISION_RADIUS: f32 = 35.0;
    pub const COLLISION_SPEED_KEEP: f32 = 0.3;

    // Race
    pub const COUNTDOWN_SECONDS: u8 = 3;
    pub const RACE_SECONDS: u32 = 180;
    pub const TOTAL_LAPS: u8 = 3;
}
