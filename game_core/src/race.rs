//! Race lifecycle
//!
//! `countdown -> running <-> paused -> finished`. Two clocks drive a race:
//! the host's display refresh calls [`Race::advance`] with the measured frame
//! delta, and a one-second timer calls [`Race::tick_second`]. Both are no-ops
//! outside the phases they belong to, so pausing freezes everything.

use glam::Vec2;
use hecs::{Entity, World};

use crate::{
    create_opponent, create_player, find_track, score_for_position, step, update_position,
    AiAction, AiProfile, CarConfig, Config, Control, ControlFlags, Environment, Events, GameMap,
    GameRng, Kinematics, Opponent, RaceState, Time, Track, DEFAULT_TRACK_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    /// Seconds left before the start
    Countdown(u8),
    Running,
    /// Frozen; remembers the countdown if paused before the start
    Paused { countdown: Option<u8> },
    Finished,
}

/// What a one-second tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    Countdown(u8),
    Started,
    Running(u32),
    Finished { position: u8, score: u32 },
    Idle,
}

/// Snapshot of an opponent for rendering
#[derive(Debug, Clone)]
pub struct OpponentView {
    pub id: String,
    pub pos: Vec2,
    pub heading: f32,
    pub color: String,
    pub action: AiAction,
}

/// Everything the renderer consumes for one frame
#[derive(Debug, Clone)]
pub struct RaceView {
    pub player_pos: Vec2,
    pub player_heading: f32,
    pub lights: String,
    pub opponents: Vec<OpponentView>,
    pub track_id: u32,
    pub paused: bool,
    pub nitro_active: bool,
}

pub struct Race {
    env: Box<dyn Environment>,
    world: World,
    time: Time,
    map: GameMap,
    config: Config,
    rng: GameRng,
    events: Events,
    car: CarConfig,
    track: &'static Track,
    player: Entity,
    phase: RacePhase,
    state: RaceState,
    controls: ControlFlags,
}

impl Race {
    pub fn new(car: CarConfig, track_id: u32, env: Box<dyn Environment>, seed: u64) -> Self {
        Self::with_config(car, track_id, Config::new(), env, seed)
    }

    pub fn with_config(
        car: CarConfig,
        track_id: u32,
        config: Config,
        env: Box<dyn Environment>,
        seed: u64,
    ) -> Self {
        let track = find_track(track_id).unwrap_or_else(|| {
            env.log(format!("Unknown track {track_id}, using track {DEFAULT_TRACK_ID}"));
            &crate::TRACKS[0]
        });

        let map = GameMap::new();
        let mut world = World::new();
        let player = create_player(&mut world, &car, map.player_spawn);
        for slot in &map.grid {
            create_opponent(
                &mut world,
                Opponent::new(slot.id, slot.color, AiProfile::new(slot.aggressiveness, slot.skill)),
                Kinematics::new(slot.pos, 0.0),
            );
        }

        env.log(format!(
            "Race created: car {} on {} ({} opponents)",
            car.id,
            track.name,
            map.grid.len()
        ));

        Self {
            state: RaceState::new(config.total_laps, config.race_seconds),
            phase: RacePhase::Countdown(config.countdown_seconds),
            env,
            world,
            time: Time::default(),
            map,
            config,
            rng: GameRng::new(seed),
            events: Events::new(),
            car,
            track,
            player,
            controls: ControlFlags::new(),
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn car(&self) -> &CarConfig {
        &self.car
    }

    pub fn track(&self) -> &'static Track {
        self.track
    }

    pub fn controls(&self) -> &ControlFlags {
        &self.controls
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_running(&self) -> bool {
        self.phase == RacePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, RacePhase::Paused { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RacePhase::Finished
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f32 {
        self.time.now
    }

    /// Press a control. Ignored unless racing; nitro needs fuel in the tank.
    pub fn press(&mut self, control: Control) -> bool {
        if !self.is_running() {
            return false;
        }
        if control == Control::Nitro && self.state.nitro_level <= 0.0 {
            return false;
        }
        self.controls.set(control, true);
        true
    }

    /// Release a control. Always applies so nothing stays stuck down.
    pub fn release(&mut self, control: Control) {
        self.controls.set(control, false);
    }

    /// Run one frame step with the measured delta. Returns false when gated.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.map,
            &self.config,
            &self.controls,
            &mut self.state,
            &mut self.events,
            &mut self.rng,
        );
        true
    }

    /// One tick of the one-second wall clock
    pub fn tick_second(&mut self) -> ClockTick {
        match self.phase {
            RacePhase::Countdown(remaining) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.phase = RacePhase::Running;
                    self.env.log("GO!".to_string());
                    ClockTick::Started
                } else {
                    self.phase = RacePhase::Countdown(remaining);
                    ClockTick::Countdown(remaining)
                }
            }
            RacePhase::Running => {
                self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
                if self.state.time_remaining == 0 {
                    self.finish()
                } else {
                    ClockTick::Running(self.state.time_remaining)
                }
            }
            RacePhase::Paused { .. } | RacePhase::Finished => ClockTick::Idle,
        }
    }

    pub fn pause(&mut self) -> bool {
        let countdown = match self.phase {
            RacePhase::Countdown(remaining) => Some(remaining),
            RacePhase::Running => None,
            RacePhase::Paused { .. } | RacePhase::Finished => return false,
        };
        self.phase = RacePhase::Paused { countdown };
        self.env.log(format!(
            "Race paused with {}s remaining",
            self.state.time_remaining
        ));
        true
    }

    pub fn resume(&mut self) -> bool {
        let RacePhase::Paused { countdown } = self.phase else {
            return false;
        };
        self.phase = match countdown {
            Some(remaining) => RacePhase::Countdown(remaining),
            None => RacePhase::Running,
        };
        self.env.log("Race resumed".to_string());
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    fn finish(&mut self) -> ClockTick {
        // Rank is already current from the last frame, but a race can end
        // before any frame ran.
        update_position(&self.world, &mut self.state);
        let position = self.state.position;
        let score = score_for_position(position);

        self.state.score = score;
        self.phase = RacePhase::Finished;
        self.controls.clear();
        self.env.log(format!(
            "Race finished: position {position}, score {score}, {:.1}s simulated",
            self.time.now
        ));

        ClockTick::Finished { position, score }
    }

    /// Car and final readout, once the race is over
    pub fn result(&self) -> Option<(&CarConfig, &RaceState)> {
        self.is_finished().then_some((&self.car, &self.state))
    }

    pub fn player(&self) -> Kinematics {
        self.world
            .get::<&Kinematics>(self.player)
            .map(|k| *k)
            .unwrap_or_else(|_| Kinematics::new(self.map.player_spawn, 0.0))
    }

    pub fn view(&self) -> RaceView {
        let player = self.player();
        let mut opponents: Vec<(u32, OpponentView)> = self
            .world
            .query::<(&Opponent, &Kinematics)>()
            .iter()
            .map(|(e, (o, k))| {
                (
                    e.id(),
                    OpponentView {
                        id: o.id.clone(),
                        pos: k.pos,
                        heading: k.heading,
                        color: o.color.clone(),
                        action: o.ai.action,
                    },
                )
            })
            .collect();
        opponents.sort_by_key(|(id, _)| *id);

        RaceView {
            player_pos: player.pos,
            player_heading: player.heading,
            lights: self.car.lights.clone(),
            opponents: opponents.into_iter().map(|(_, v)| v).collect(),
            track_id: self.track.id,
            paused: self.is_paused(),
            nitro_active: self.events.nitro_active,
        }
    }
}
