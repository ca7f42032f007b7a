//! Screen State Machine
//!
//! Menu, garage, track selection, the race itself, and the results panel.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Screens
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Garage,
    TrackSelect,
    Racing,
    Results,
}

/// Actions that trigger screen changes
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    OpenGarage,
    OpenTracks,
    SaveCar,
    SelectTrack,
    RaceFinished,
    PlayAgain,
    Back,
}

impl NavAction {
    /// Parse the action names used by the page
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OPEN_GARAGE" => Some(NavAction::OpenGarage),
            "OPEN_TRACKS" => Some(NavAction::OpenTracks),
            "SAVE_CAR" => Some(NavAction::SaveCar),
            "SELECT_TRACK" => Some(NavAction::SelectTrack),
            "RACE_FINISHED" => Some(NavAction::RaceFinished),
            "PLAY_AGAIN" => Some(NavAction::PlayAgain),
            "BACK" => Some(NavAction::Back),
            _ => None,
        }
    }
}

/// Result of a screen transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_screen: Screen,
    to_screen: Screen,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_screen(&self) -> Screen {
        self.from_screen
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_screen(&self) -> Screen {
        self.to_screen
    }
}

pub struct ScreenFsm {
    screen: Screen,
}

impl ScreenFsm {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current screen as a string (for JS interop)
    pub fn screen_string(&self) -> String {
        format!("{:?}", self.screen)
    }

    pub fn can_transition(&self, action: NavAction) -> bool {
        self.next_screen(action).is_some()
    }

    pub fn transition(&mut self, action: NavAction) -> TransitionResult {
        let from_screen = self.screen;
        let to_screen = self.next_screen(action);
        if let Some(next) = to_screen {
            self.screen = next;
        }
        TransitionResult {
            success: to_screen.is_some(),
            from_screen,
            to_screen: self.screen,
        }
    }

    /// Transition using an action name; unknown names fail without moving
    pub fn transition_str(&mut self, action: &str) -> TransitionResult {
        match NavAction::from_name(action) {
            Some(action) => self.transition(action),
            None => TransitionResult {
                success: false,
                from_screen: self.screen,
                to_screen: self.screen,
            },
        }
    }

    fn next_screen(&self, action: NavAction) -> Option<Screen> {
        match (self.screen, action) {
            (Screen::Menu, NavAction::OpenGarage) => Some(Screen::Garage),
            (Screen::Menu, NavAction::OpenTracks) => Some(Screen::TrackSelect),

            (Screen::Garage, NavAction::SaveCar) => Some(Screen::TrackSelect),

            (Screen::TrackSelect, NavAction::SelectTrack) => Some(Screen::Racing),

            (Screen::Racing, NavAction::RaceFinished) => Some(Screen::Results),

            (Screen::Results, NavAction::PlayAgain) => Some(Screen::Racing),

            // Every screen but the menu has a way home
            (Screen::Menu, NavAction::Back) => None,
            (_, NavAction::Back) => Some(Screen::Menu),

            _ => None,
        }
    }

    pub fn is_racing(&self) -> bool {
        self.screen == Screen::Racing
    }
}

impl Default for ScreenFsm {
    fn default() -> Self {
        Self::new()
    }
}
