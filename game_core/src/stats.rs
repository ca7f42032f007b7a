//! Car parts and the derived stat vector
//!
//! Stats are always re-derived from the full part selection, so the result
//! never depends on the order parts were picked in.

use serde::{Deserialize, Serialize};

use crate::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tyre {
    #[default]
    Sport,
    Racing,
    Drift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Lightweight,
    #[default]
    Balanced,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chip {
    #[default]
    Nitro,
    Turbo,
    Handling,
}

/// One part choice from the garage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Tyres(Tyre),
    Body(Body),
    Chips(Chip),
}

impl Part {
    /// Parse a `(slot, variant)` pair such as `("tyres", "drift")`
    pub fn parse(slot: &str, variant: &str) -> Option<Self> {
        match (slot, variant) {
            ("tyres", "sport") => Some(Part::Tyres(Tyre::Sport)),
            ("tyres", "racing") => Some(Part::Tyres(Tyre::Racing)),
            ("tyres", "drift") => Some(Part::Tyres(Tyre::Drift)),
            ("body", "lightweight") => Some(Part::Body(Body::Lightweight)),
            ("body", "balanced") => Some(Part::Body(Body::Balanced)),
            ("body", "heavy") => Some(Part::Body(Body::Heavy)),
            ("chips", "nitro") => Some(Part::Chips(Chip::Nitro)),
            ("chips", "turbo") => Some(Part::Chips(Chip::Turbo)),
            ("chips", "handling") => Some(Part::Chips(Chip::Handling)),
            _ => None,
        }
    }
}

/// Performance stats. Not clamped: part deltas may push a value past 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: i32,
    pub acceleration: i32,
    pub handling: i32,
    pub nitro: i32,
}

impl Stats {
    pub const BASE: Stats = Stats {
        speed: Params::BASE_SPEED,
        acceleration: Params::BASE_ACCELERATION,
        handling: Params::BASE_HANDLING,
        nitro: Params::BASE_NITRO,
    };

    fn add(self, speed: i32, acceleration: i32, handling: i32, nitro: i32) -> Self {
        Self {
            speed: self.speed + speed,
            acceleration: self.acceleration + acceleration,
            handling: self.handling + handling,
            nitro: self.nitro + nitro,
        }
    }
}

/// Derive the stat vector for a full part selection
pub fn derive_stats(tyres: Tyre, body: Body, chips: Chip) -> Stats {
    let stats = match tyres {
        Tyre::Sport => Stats::BASE,
        Tyre::Racing => Stats::BASE.add(15, 10, -5, 0),
        Tyre::Drift => Stats::BASE.add(-5, 5, 15, 0),
    };

    let stats = match body {
        Body::Lightweight => stats.add(10, 15, 10, 0),
        Body::Balanced => stats,
        Body::Heavy => stats.add(5, -10, -5, 0),
    };

    match chips {
        Chip::Nitro => stats.add(0, 0, 0, 15),
        Chip::Turbo => stats.add(20, 15, 0, 0),
        Chip::Handling => stats.add(-5, 0, 20, 0),
    }
}

/// A customised car as built in the garage and persisted after a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarConfig {
    pub id: String,
    pub tyres: Tyre,
    pub body: Body,
    pub lights: String,
    pub chips: Chip,
    #[serde(flatten)]
    pub stats: Stats,
}

impl CarConfig {
    pub const DEFAULT_LIGHTS: &'static str = "#00ffff";

    /// Default build: sport tyres, balanced body, nitro chip, cyan lights
    pub fn new(id: impl Into<String>) -> Self {
        let (tyres, body, chips) = (Tyre::default(), Body::default(), Chip::default());
        Self {
            id: id.into(),
            tyres,
            body,
            lights: Self::DEFAULT_LIGHTS.to_string(),
            chips,
            stats: derive_stats(tyres, body, chips),
        }
    }

    /// Swap one part and re-derive every stat from the resulting selection
    pub fn apply(&mut self, part: Part) {
        match part {
            Part::Tyres(tyres) => self.tyres = tyres,
            Part::Body(body) => self.body = body,
            Part::Chips(chips) => self.chips = chips,
        }
        self.stats = derive_stats(self.tyres, self.body, self.chips);
    }

    pub fn with(mut self, part: Part) -> Self {
        self.apply(part);
        self
    }

    pub fn set_lights(&mut self, color: impl Into<String>) {
        self.lights = color.into();
    }
}
