//! HUD text
//!
//! Formatting only; the page owns the elements these strings land in.

use crate::scene::{ARENA_HEIGHT, ARENA_WIDTH};
use game_core::{RacePhase, RaceState, RaceView};

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Caption under the big countdown number
pub fn countdown_caption(remaining: u8) -> &'static str {
    match remaining {
        3 => "GET READY!",
        2 => "SET!",
        _ => "GO!",
    }
}

/// One text field per HUD element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub position: String,
    pub lap: String,
    pub score: String,
    pub time: String,
    pub speed: String,
    pub nitro: String,
    pub countdown: Option<(String, &'static str)>,
    pub paused: bool,
}

impl HudText {
    pub fn new(state: &RaceState, phase: RacePhase) -> Self {
        let countdown = match phase {
            RacePhase::Countdown(n) | RacePhase::Paused { countdown: Some(n) } if n > 0 => {
                Some((n.to_string(), countdown_caption(n)))
            }
            _ => None,
        };

        Self {
            position: format!("#{}", state.position),
            lap: format!("{}/{}", state.current_lap, state.total_laps),
            score: state.score.to_string(),
            time: format_time(state.time_remaining),
            speed: state.speed.to_string(),
            nitro: format!("{}%", state.nitro_percent()),
            countdown,
            paused: matches!(phase, RacePhase::Paused { countdown: None }),
        }
    }

    /// `(element id, text)` pairs for the page
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("hud-position", self.position.as_str()),
            ("hud-lap", self.lap.as_str()),
            ("hud-score", self.score.as_str()),
            ("hud-time", self.time.as_str()),
            ("hud-speed", self.speed.as_str()),
            ("hud-nitro", self.nitro.as_str()),
        ]
    }
}

/// Speed at which the gauge arc is full
pub const GAUGE_FULL_SPEED: f32 = 200.0;

/// Length of the gauge arc stroke (a circle of radius 45)
pub const GAUGE_ARC: f32 = 282.7;

/// `stroke-dashoffset` for the speedometer arc: the whole arc hidden at rest,
/// none of it at or past full speed
pub fn gauge_dash_offset(speed: u32) -> f32 {
    let fraction = (speed as f32 / GAUGE_FULL_SPEED).min(1.0);
    GAUGE_ARC - fraction * GAUGE_ARC
}

const MAP_PLAYER: &str = "#22d3ee";

/// One dot on the track map, placed in percent of the map box
#[derive(Debug, Clone, PartialEq)]
pub struct MapDot {
    pub left: f32,
    pub top: f32,
    pub color: String,
}

impl MapDot {
    fn at(pos: glam::Vec2, color: &str) -> Self {
        Self {
            left: (pos.x / ARENA_WIDTH * 100.0).clamp(0.0, 100.0),
            top: (pos.y / ARENA_HEIGHT * 100.0).clamp(0.0, 100.0),
            color: color.to_string(),
        }
    }

    /// Inline style for the dot element
    pub fn style(&self) -> String {
        format!(
            "left: {:.1}%; top: {:.1}%; background: {};",
            self.left, self.top, self.color
        )
    }
}

/// Track map dots: the player first, then each opponent in its own colour
pub fn map_dots(view: &RaceView) -> Vec<MapDot> {
    std::iter::once(MapDot::at(view.player_pos, MAP_PLAYER))
        .chain(view.opponents.iter().map(|o| MapDot::at(o.pos, &o.color)))
        .collect()
}
