//! Keyboard and pointer input mapping

use game_core::{Control, RacePhase};

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Control(Control),
    TogglePause,
}

/// Map a `KeyboardEvent.key` value, ignoring case
pub fn key_command(key: &str) -> Option<KeyCommand> {
    let command = match key.to_ascii_lowercase().as_str() {
        "w" | "arrowup" => KeyCommand::Control(Control::Accelerate),
        "s" | "arrowdown" => KeyCommand::Control(Control::Brake),
        "a" | "arrowleft" => KeyCommand::Control(Control::TurnLeft),
        "d" | "arrowright" => KeyCommand::Control(Control::TurnRight),
        " " | "spacebar" => KeyCommand::Control(Control::Nitro),
        "p" | "escape" => KeyCommand::TogglePause,
        _ => return None,
    };
    Some(command)
}

/// Keyboard pause works once the lights are green, and always to resume.
/// The on-screen button can still pause a countdown.
pub fn pause_key_allowed(phase: RacePhase) -> bool {
    matches!(phase, RacePhase::Running | RacePhase::Paused { .. })
}

/// Map an on-screen control name
pub fn pointer_control(name: &str) -> Option<Control> {
    Control::from_name(name)
}
