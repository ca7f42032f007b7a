use glam::Vec2;

use crate::Stats;

/// Position, heading and scalar speed of a car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub pos: Vec2,
    pub heading: f32, // degrees, 0 = +X, clockwise on screen (y grows down)
    pub speed: f32,
}

impl Kinematics {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading,
            speed: 0.0,
        }
    }

    /// Unit vector along the heading
    pub fn forward(&self) -> Vec2 {
        let radians = self.heading.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Advance along the heading for `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.forward() * self.speed * dt;
    }
}

/// The one car driven by the local player
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub stats: Stats,
}

impl Player {
    pub fn new(stats: Stats) -> Self {
        Self { stats }
    }
}

/// What an AI driver did last frame (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiAction {
    #[default]
    Accelerating,
    Braking,
    Turning,
    Overtaking,
}

impl AiAction {
    pub fn label(&self) -> &'static str {
        match self {
            AiAction::Accelerating => "accelerating",
            AiAction::Braking => "braking",
            AiAction::Turning => "turning",
            AiAction::Overtaking => "overtaking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    pub aggressiveness: f32, // 0..=1
    pub skill: f32,          // 0..=1
    pub action: AiAction,
}

impl AiProfile {
    pub fn new(aggressiveness: f32, skill: f32) -> Self {
        Self {
            aggressiveness,
            skill,
            action: AiAction::default(),
        }
    }
}

/// AI-driven opponent
#[derive(Debug, Clone)]
pub struct Opponent {
    pub id: String,
    pub color: String,
    pub ai: AiProfile,
}

impl Opponent {
    pub fn new(id: impl Into<String>, color: impl Into<String>, ai: AiProfile) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            ai,
        }
    }
}

/// Identity of a car in the standings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Racer {
    Player,
    Opponent(String),
}
