//! Client state and the exported entry points
//!
//! The page only forwards clicks, key events and pointer events here. Screen
//! changes, the race clocks, the HUD and saving are all driven from Rust.

use std::cell::RefCell;

use game_core::{CarConfig, ClockTick, Environment, Part, Race, TRACKS};
use persist::SaveManager;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::dom::{set_attribute, set_style, set_text, set_visible};
use crate::env::WasmEnv;
use crate::frame_loop::{AnimationLoop, Interval, RaceLoops};
use crate::fsm::{NavAction, Screen, ScreenFsm, TransitionResult};
use crate::hud::{gauge_dash_offset, map_dots, HudText};
use crate::input::{key_command, pause_key_allowed, pointer_control, KeyCommand};
use crate::preview::CarPreview;
use crate::renderer::Renderer;
use crate::storage::BrowserStore;

const CLOCK_MILLIS: i32 = 1000;

fn screen_id(screen: Screen) -> &'static str {
    match screen {
        Screen::Menu => "screen-menu",
        Screen::Garage => "screen-garage",
        Screen::TrackSelect => "screen-tracks",
        Screen::Racing => "screen-racing",
        Screen::Results => "screen-results",
    }
}

const SCREENS: [Screen; 5] = [
    Screen::Menu,
    Screen::Garage,
    Screen::TrackSelect,
    Screen::Racing,
    Screen::Results,
];

/// Main client state
pub struct Client {
    env: WasmEnv,
    renderer: Renderer,
    fsm: ScreenFsm,
    saves: SaveManager<BrowserStore>,
    /// Car on the garage ramp
    garage: CarConfig,
    /// Car confirmed for the next race
    selected_car: Option<CarConfig>,
    track_id: u32,
    race: Option<Race>,
    loops: Option<RaceLoops>,
}

impl Client {
    pub async fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let env = WasmEnv;
        let renderer = Renderer::new(canvas).await?;
        let saves = SaveManager::new(BrowserStore::open(&env), Box::new(WasmEnv));

        let client = Self {
            garage: CarConfig::new(new_car_id(&env)),
            env,
            renderer,
            fsm: ScreenFsm::new(),
            saves,
            selected_car: None,
            track_id: game_core::DEFAULT_TRACK_ID,
            race: None,
            loops: None,
        };
        client.show_screen()?;
        client.show_last_result()?;
        client.env.log("Client initialized".to_string());
        Ok(client)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn navigate(&mut self, action: NavAction) -> Result<TransitionResult, String> {
        let result = self.fsm.transition(action);
        if !result.success() {
            self.env.log(format!(
                "Ignored {:?} on {:?}",
                action,
                result.from_screen()
            ));
            return Ok(result);
        }

        match result.to_screen() {
            // Back out of a race, or home from the results panel
            Screen::Menu => {
                self.stop_race();
                self.show_last_result()?;
            }
            Screen::Garage => {
                self.garage = CarConfig::new(new_car_id(&self.env));
                self.show_garage()?;
            }
            _ => {}
        }
        self.show_screen()?;
        Ok(result)
    }

    fn save_car(&mut self) -> Result<TransitionResult, String> {
        if self.fsm.can_transition(NavAction::SaveCar) {
            self.selected_car = Some(self.garage.clone());
        }
        self.navigate(NavAction::SaveCar)
    }

    fn select_track(&mut self, track_id: u32) -> Result<TransitionResult, String> {
        if !self.fsm.can_transition(NavAction::SelectTrack) {
            return self.navigate(NavAction::SelectTrack);
        }
        self.track_id = track_id;
        self.start_race()?;
        self.navigate(NavAction::SelectTrack)
    }

    fn play_again(&mut self) -> Result<TransitionResult, String> {
        if !self.fsm.can_transition(NavAction::PlayAgain) {
            return self.navigate(NavAction::PlayAgain);
        }
        self.start_race()?;
        self.navigate(NavAction::PlayAgain)
    }

    fn show_screen(&self) -> Result<(), String> {
        let current = self.fsm.screen();
        for screen in SCREENS {
            set_visible(screen_id(screen), screen == current)?;
        }
        Ok(())
    }

    fn show_garage(&self) -> Result<(), String> {
        let stats = self.garage.stats;
        set_text("stat-speed", &stats.speed.to_string())?;
        set_text("stat-acceleration", &stats.acceleration.to_string())?;
        set_text("stat-handling", &stats.handling.to_string())?;
        set_text("stat-nitro", &stats.nitro.to_string())?;

        for (id, style) in CarPreview::for_car(&self.garage).styles() {
            set_style(id, &style)?;
        }
        Ok(())
    }

    fn show_last_result(&self) -> Result<(), String> {
        let text = match self.saves.load_game().state {
            Some(state) => format!("Last race: #{} for {} points", state.position, state.score),
            None => String::new(),
        };
        set_text("menu-last-result", &text)
    }

    // ------------------------------------------------------------------
    // Race lifecycle
    // ------------------------------------------------------------------

    fn start_race(&mut self) -> Result<(), String> {
        // The previous race's clocks must be gone before new ones start
        self.stop_race();

        let car = match self.selected_car.clone() {
            Some(car) => car,
            None => self
                .saves
                .load_game()
                .car
                .unwrap_or_else(|| CarConfig::new(new_car_id(&self.env))),
        };
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        self.race = Some(Race::new(car, self.track_id, Box::new(WasmEnv), seed));

        let frames = AnimationLoop::start(|dt| {
            if let Err(e) = with_client(|client| client.on_frame(dt)) {
                web_sys::console::error_1(&e);
            }
        })?;
        let clock = Interval::start(CLOCK_MILLIS, || {
            if let Err(e) = with_client(|client| client.on_second()) {
                web_sys::console::error_1(&e);
            }
        })?;
        self.loops = Some(RaceLoops::new(frames, clock));

        self.update_hud()
    }

    fn stop_race(&mut self) {
        if self.loops.take().is_some() {
            self.env.log("Race loops stopped".to_string());
        }
        self.race = None;
    }

    fn on_frame(&mut self, dt: f32) -> Result<(), String> {
        let Some(race) = self.race.as_mut() else {
            return Ok(());
        };
        race.advance(dt);
        self.renderer.draw(&race.view())?;
        self.update_hud()
    }

    fn on_second(&mut self) -> Result<(), String> {
        let Some(race) = self.race.as_mut() else {
            return Ok(());
        };
        if let ClockTick::Finished { position, score } = race.tick_second() {
            self.finish_race(position, score)?;
        }
        self.update_hud()
    }

    fn finish_race(&mut self, position: u8, score: u32) -> Result<(), String> {
        if let Some((car, state)) = self.race.as_ref().and_then(|r| r.result()) {
            if let Err(e) = self.saves.save_game(car, state) {
                self.env.log(format!("Failed to save race: {e}"));
            }
        }

        // Running inside the clock callback: tear the loops down once it returns
        wasm_bindgen_futures::spawn_local(async {
            let _ = with_client(|client| {
                client.loops = None;
                Ok(())
            });
        });

        set_text("result-position", &format!("#{position}"))?;
        set_text("result-score", &score.to_string())?;
        self.navigate(NavAction::RaceFinished).map(|_| ())
    }

    fn update_hud(&self) -> Result<(), String> {
        let Some(race) = self.race.as_ref() else {
            return Ok(());
        };
        let hud = HudText::new(race.state(), race.phase());
        for (id, text) in hud.fields() {
            set_text(id, text)?;
        }
        match &hud.countdown {
            Some((number, caption)) => {
                set_text("countdown-number", number)?;
                set_text("countdown-caption", caption)?;
                set_visible("countdown", true)?;
            }
            None => set_visible("countdown", false)?,
        }
        set_visible("paused-overlay", hud.paused)?;

        set_text("hud-gauge-speed", &hud.speed)?;
        let offset = gauge_dash_offset(race.state().speed);
        set_attribute("speed-arc", "stroke-dashoffset", &format!("{offset:.1}"))?;
        for (i, dot) in map_dots(&race.view()).iter().enumerate() {
            set_style(&format!("map-dot-{i}"), &dot.style())?;
        }

        set_text("pause-button", if race.is_paused() { "Resume" } else { "Pause" })
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    fn key_down(&mut self, key: &str) -> Result<(), String> {
        if !self.fsm.is_racing() {
            return Ok(());
        }
        match key_command(key) {
            Some(KeyCommand::Control(control)) => {
                if let Some(race) = self.race.as_mut() {
                    race.press(control);
                }
            }
            Some(KeyCommand::TogglePause) => {
                if self.race.as_ref().is_some_and(|r| pause_key_allowed(r.phase())) {
                    self.toggle_pause()?;
                }
            }
            None => {}
        }
        Ok(())
    }

    fn key_up(&mut self, key: &str) {
        if let (Some(KeyCommand::Control(control)), Some(race)) = (key_command(key), self.race.as_mut()) {
            race.release(control);
        }
    }

    fn control_down(&mut self, name: &str) -> Result<(), String> {
        let control = pointer_control(name).ok_or_else(|| format!("Unknown control {name}"))?;
        if let Some(race) = self.race.as_mut() {
            race.press(control);
        }
        Ok(())
    }

    fn control_up(&mut self, name: &str) -> Result<(), String> {
        let control = pointer_control(name).ok_or_else(|| format!("Unknown control {name}"))?;
        if let Some(race) = self.race.as_mut() {
            race.release(control);
        }
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<bool, String> {
        let paused = match self.race.as_mut() {
            Some(race) => {
                race.toggle_pause();
                race.is_paused()
            }
            None => false,
        };
        self.update_hud()?;
        Ok(paused)
    }

    // ------------------------------------------------------------------
    // Garage
    // ------------------------------------------------------------------

    fn set_part(&mut self, slot: &str, variant: &str) -> Result<Vec<i32>, String> {
        let part = Part::parse(slot, variant)
            .ok_or_else(|| format!("Unknown part {slot}/{variant}"))?;
        self.garage.apply(part);
        self.show_garage()?;
        Ok(self.car_stats())
    }

    fn car_stats(&self) -> Vec<i32> {
        let s = self.garage.stats;
        vec![s.speed, s.acceleration, s.handling, s.nitro]
    }
}

fn new_car_id(env: &dyn Environment) -> String {
    format!("car_{}", env.now_ms() as u64)
}

// Global client storage for WASM bindings
thread_local! {
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<T>(f: impl FnOnce(&mut Client) -> Result<T, String>) -> Result<T, JsValue> {
    CLIENT.with(|cell| {
        let mut guard = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Client busy"))?;
        let client = guard
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Client not initialized"))?;
        f(client).map_err(|e| JsValue::from_str(&e))
    })
}

fn screen_name(result: TransitionResult) -> String {
    format!("{:?}", result.to_screen())
}

#[wasm_bindgen]
pub fn init_client(canvas: HtmlCanvasElement) -> js_sys::Promise {
    console_error_panic_hook::set_once();
    wasm_bindgen_futures::future_to_promise(async move {
        let client = Client::new(canvas).await.map_err(|e| JsValue::from_str(&e))?;
        CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
        Ok(JsValue::UNDEFINED)
    })
}

/// `OPEN_GARAGE`, `OPEN_TRACKS` or `BACK`; returns the screen now shown
#[wasm_bindgen]
pub fn navigate(action: &str) -> Result<String, JsValue> {
    let action = NavAction::from_name(action)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown action {action}")))?;
    with_client(|client| client.navigate(action).map(screen_name))
}

#[wasm_bindgen]
pub fn save_car() -> Result<String, JsValue> {
    with_client(|client| client.save_car().map(screen_name))
}

#[wasm_bindgen]
pub fn start_race(track_id: u32) -> Result<String, JsValue> {
    with_client(|client| client.select_track(track_id).map(screen_name))
}

#[wasm_bindgen]
pub fn play_again() -> Result<String, JsValue> {
    with_client(|client| client.play_again().map(screen_name))
}

/// Returns `[speed, acceleration, handling, nitro]` after the change
#[wasm_bindgen]
pub fn set_part(slot: &str, variant: &str) -> Result<Vec<i32>, JsValue> {
    with_client(|client| client.set_part(slot, variant))
}

#[wasm_bindgen]
pub fn set_lights(color: &str) -> Result<(), JsValue> {
    with_client(|client| {
        client.garage.set_lights(color);
        client.show_garage()
    })
}

#[wasm_bindgen]
pub fn car_stats() -> Result<Vec<i32>, JsValue> {
    with_client(|client| Ok(client.car_stats()))
}

#[wasm_bindgen]
pub fn tracks_json() -> Result<String, JsValue> {
    serde_json::to_string(&TRACKS)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize tracks: {:?}", e)))
}

#[wasm_bindgen]
pub fn toggle_pause() -> Result<bool, JsValue> {
    with_client(|client| client.toggle_pause())
}

#[wasm_bindgen]
pub fn key_down(key: &str) -> Result<(), JsValue> {
    with_client(|client| client.key_down(key))
}

#[wasm_bindgen]
pub fn key_up(key: &str) -> Result<(), JsValue> {
    with_client(|client| {
        client.key_up(key);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn control_down(name: &str) -> Result<(), JsValue> {
    with_client(|client| client.control_down(name))
}

#[wasm_bindgen]
pub fn control_up(name: &str) -> Result<(), JsValue> {
    with_client(|client| client.control_up(name))
}
