use glam::Vec2;

use crate::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Nearest point inside the box
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Point lies on (or beyond) the left or right edge
    pub fn on_vertical_edge(&self, point: Vec2) -> bool {
        point.x <= self.min.x || point.x >= self.max.x
    }

    /// Point lies on (or beyond) the top or bottom edge
    pub fn on_horizontal_edge(&self, point: Vec2) -> bool {
        point.y <= self.min.y || point.y >= self.max.y
    }
}

/// Starting slot for an AI car
#[derive(Debug, Clone, Copy)]
pub struct GridSlot {
    pub id: &'static str,
    pub pos: Vec2,
    pub color: &'static str,
    pub aggressiveness: f32,
    pub skill: f32,
}

/// Arena geometry: outer size, the inset wall every car is kept inside,
/// the point AI drivers steer toward, and the starting grid.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
    pub walls: Aabb,
    pub center: Vec2,
    pub player_spawn: Vec2,
    pub grid: Vec<GridSlot>,
}

impl GameMap {
    pub fn new() -> Self {
        let width = Params::ARENA_WIDTH;
        let height = Params::ARENA_HEIGHT;
        let margin = Params::WALL_MARGIN;

        Self {
            width,
            height,
            walls: Aabb::new(
                Vec2::new(margin, margin),
                Vec2::new(width - margin, height - margin),
            ),
            center: Vec2::new(width / 2.0, height / 2.0),
            player_spawn: Vec2::new(400.0, 500.0),
            grid: vec![
                GridSlot {
                    id: "ai_1",
                    pos: Vec2::new(350.0, 480.0),
                    color: "#ff4444",
                    aggressiveness: 0.7,
                    skill: 0.8,
                },
                GridSlot {
                    id: "ai_2",
                    pos: Vec2::new(450.0, 460.0),
                    color: "#44ff44",
                    aggressiveness: 0.5,
                    skill: 0.9,
                },
                GridSlot {
                    id: "ai_3",
                    pos: Vec2::new(380.0, 440.0),
                    color: "#4444ff",
                    aggressiveness: 0.9,
                    skill: 0.6,
                },
            ],
        }
    }

    /// Clamp a position to the arena walls
    pub fn clamp_to_walls(&self, pos: Vec2) -> Vec2 {
        self.walls.clamp(pos)
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::new()
    }
}
