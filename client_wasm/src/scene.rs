//! Scene building
//!
//! Turns a [`RaceView`] into a flat list of coloured, rotated quads in arena
//! pixels (origin top-left, Y down). The renderer uploads the list as one
//! instance buffer.

use game_core::{find_track, RaceView, Scenery, DEFAULT_TRACK_ID, TRACKS};
use glam::Vec2;

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// Upper bound on quads per frame
pub const MAX_INSTANCES: usize = 512;

/// Instance data for rendering (matches shader InstanceInput).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub transform: [f32; 4], // center x, center y, width, height
    pub rotation: [f32; 4],  // cos, sin, unused, unused
    pub tint: [f32; 4],      // rgba
}

/// Parse `#rrggbb` into linear-ish rgba. Anything else is rejected.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    rgba(r, g, b, 1.0)
}

fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const LANE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const PLAYER_BODY: [f32; 4] = [0.165, 0.165, 0.165, 1.0];
const OPPONENT_OUTLINE: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const WINDSHIELD: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
const WHEEL: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const HEADLIGHT: [f32; 4] = [1.0, 1.0, 0.8, 1.0];
const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
const PAUSE_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

/// Background colours for one scenery theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: [f32; 4],
    pub detail: [f32; 4],
}

impl Palette {
    pub fn for_scenery(scenery: Scenery) -> Self {
        match scenery {
            Scenery::City => Self {
                sky: rgb(0x1a, 0x1a, 0x2e),
                detail: rgb(0x16, 0x21, 0x3e),
            },
            Scenery::Mountain => Self {
                sky: rgb(0x0f, 0x20, 0x27),
                detail: rgb(0x20, 0x3a, 0x43),
            },
            Scenery::Neon => Self {
                sky: rgb(0x0d, 0x00, 0x15),
                detail: rgba(0xff, 0x00, 0xff, 0.3),
            },
        }
    }
}

#[derive(Default)]
pub struct Scene {
    instances: Vec<InstanceData>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Build the whole frame
    pub fn build(view: &RaceView) -> Self {
        let scenery = find_track(view.track_id)
            .or_else(|| find_track(DEFAULT_TRACK_ID))
            .map(|t| t.environment)
            .unwrap_or(TRACKS[0].environment);

        let mut scene = Scene::new();
        scene.backdrop(scenery);
        scene.circuit();

        for opponent in &view.opponents {
            let color = parse_hex_color(&opponent.color).unwrap_or(WHITE);
            scene.car(opponent.pos, opponent.heading, color, OPPONENT_OUTLINE, None);
        }

        if view.nitro_active {
            scene.flame(view.player_pos, view.player_heading);
        }
        let lights = parse_hex_color(&view.lights).unwrap_or(WHITE);
        scene.car(view.player_pos, view.player_heading, PLAYER_BODY, WHITE, Some(lights));

        if view.paused {
            scene.rect(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT, PAUSE_DIM);
        }

        scene.instances.truncate(MAX_INSTANCES);
        scene
    }

    /// Axis-aligned rect from its top-left corner
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, tint: [f32; 4]) {
        self.quad(Vec2::new(x + w * 0.5, y + h * 0.5), Vec2::new(w, h), Vec2::X, tint);
    }

    fn quad(&mut self, center: Vec2, size: Vec2, rotation: Vec2, tint: [f32; 4]) {
        self.instances.push(InstanceData {
            transform: [center.x, center.y, size.x, size.y],
            rotation: [rotation.x, rotation.y, 0.0, 0.0],
            tint,
        });
    }

    /// Rect in a car's local frame (X forward), given by its top-left corner
    #[allow(clippy::too_many_arguments)]
    fn local_rect(&mut self, pos: Vec2, heading: f32, x: f32, y: f32, w: f32, h: f32, tint: [f32; 4]) {
        let rotation = Vec2::from_angle(heading.to_radians());
        let local_center = Vec2::new(x + w * 0.5, y + h * 0.5);
        self.quad(pos + rotation.rotate(local_center), Vec2::new(w, h), rotation, tint);
    }

    fn backdrop(&mut self, scenery: Scenery) {
        let palette = Palette::for_scenery(scenery);
        self.rect(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT, palette.sky);

        match scenery {
            Scenery::City => {
                let column = ARENA_WIDTH / 10.0;
                for i in 0..10 {
                    let x = i as f32 * column;
                    let height = 50.0 + ((i * 37) % 100) as f32;
                    self.rect(x, 0.0, column - 10.0, height, palette.detail);
                    self.rect(x, ARENA_HEIGHT - height, column - 10.0, height, palette.detail);
                }
            }
            Scenery::Mountain => {
                let mut x = 0.0_f32;
                while x < ARENA_WIDTH {
                    let top = ARENA_HEIGHT * 0.6 - (x * 0.01).sin() * 80.0;
                    self.rect(x, top, 50.0, ARENA_HEIGHT - top, palette.detail);
                    x += 50.0;
                }
            }
            Scenery::Neon => {
                let mut x = 0.0_f32;
                while x < ARENA_WIDTH {
                    self.rect(x, 0.0, 1.0, ARENA_HEIGHT, palette.detail);
                    x += 50.0;
                }
                let mut y = 0.0_f32;
                while y < ARENA_HEIGHT {
                    self.rect(0.0, y, ARENA_WIDTH, 1.0, palette.detail);
                    y += 50.0;
                }
            }
        }
    }

    fn circuit(&mut self) {
        // Barrier outline
        let (bx, by) = (40.0, 40.0);
        let (bw, bh) = (ARENA_WIDTH - 80.0, ARENA_HEIGHT - 80.0);
        self.outline(bx, by, bw, bh, 4.0, WHITE);

        // Dashed lanes and centre line
        let (lw, lh) = (ARENA_WIDTH * 0.6, ARENA_HEIGHT * 0.6);
        let (lx, ly) = ((ARENA_WIDTH - lw) * 0.5, (ARENA_HEIGHT - lh) * 0.5);
        self.dashed_h(lx, lx + lw, ly);
        self.dashed_h(lx, lx + lw, ly + lh);
        self.dashed_v(lx, ly, ly + lh);
        self.dashed_v(lx + lw, ly, ly + lh);
        self.dashed_v(ARENA_WIDTH * 0.5, ly, ly + lh);

        // Checkered start/finish
        let finish_y = ARENA_HEIGHT * 0.8;
        self.rect(lx, finish_y - 2.0, lw, 4.0, WHITE);
        for i in (0..10).step_by(2) {
            self.rect(lx + i as f32 * lw / 10.0, finish_y - 2.0, lw / 10.0, 4.0, WHITE);
        }
    }

    fn outline(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, tint: [f32; 4]) {
        let half = thickness * 0.5;
        self.rect(x - half, y - half, w + thickness, thickness, tint);
        self.rect(x - half, y + h - half, w + thickness, thickness, tint);
        self.rect(x - half, y - half, thickness, h + thickness, tint);
        self.rect(x + w - half, y - half, thickness, h + thickness, tint);
    }

    fn dashed_h(&mut self, x0: f32, x1: f32, y: f32) {
        let mut x = x0;
        while x < x1 {
            self.rect(x, y - 1.0, 20.0_f32.min(x1 - x), 2.0, LANE);
            x += 40.0;
        }
    }

    fn dashed_v(&mut self, x: f32, y0: f32, y1: f32) {
        let mut y = y0;
        while y < y1 {
            self.rect(x - 1.0, y, 2.0, 20.0_f32.min(y1 - y), LANE);
            y += 40.0;
        }
    }

    fn car(
        &mut self,
        pos: Vec2,
        heading: f32,
        body: [f32; 4],
        outline: [f32; 4],
        glow: Option<[f32; 4]>,
    ) {
        self.local_rect(pos, heading, -13.0, -6.0, 26.0, 12.0, SHADOW);
        if let Some(glow) = glow {
            self.local_rect(pos, heading, -19.0, -12.0, 38.0, 24.0, with_alpha(glow, 0.35));
        }
        self.local_rect(pos, heading, -16.0, -9.0, 32.0, 18.0, outline);
        self.local_rect(pos, heading, -15.0, -8.0, 30.0, 16.0, body);
        self.local_rect(pos, heading, -10.0, -6.0, 8.0, 12.0, WINDSHIELD);
        for (x, y) in [(-12.0, -12.0), (-12.0, 6.0), (8.0, -12.0), (8.0, 6.0)] {
            self.local_rect(pos, heading, x, y, 4.0, 6.0, WHEEL);
        }
        let headlight = glow.unwrap_or(HEADLIGHT);
        self.local_rect(pos, heading, 13.0, -6.0, 3.0, 3.0, headlight);
        self.local_rect(pos, heading, 13.0, 3.0, 3.0, 3.0, headlight);
    }

    fn flame(&mut self, pos: Vec2, heading: f32) {
        self.local_rect(pos, heading, -45.0, -6.0, 15.0, 12.0, rgb(0xff, 0x44, 0x00));
        self.local_rect(pos, heading, -35.0, -4.0, 10.0, 8.0, rgb(0xff, 0xaa, 0x00));
        self.local_rect(pos, heading, -28.0, -2.0, 8.0, 4.0, rgb(0xff, 0xff, 0x00));
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
