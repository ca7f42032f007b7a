/// One of the five driver intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Accelerate,
    Brake,
    TurnLeft,
    TurnRight,
    Nitro,
}

impl Control {
    /// Parse the name used by the on-screen controller
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "accelerate" => Some(Control::Accelerate),
            "brake" => Some(Control::Brake),
            "turnLeft" => Some(Control::TurnLeft),
            "turnRight" => Some(Control::TurnRight),
            "nitro" => Some(Control::Nitro),
            _ => None,
        }
    }
}

/// Control flags sampled once per frame. Every combination is valid;
/// the last write before a frame wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFlags {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub nitro: bool,
}

impl ControlFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Accelerate => self.accelerate = pressed,
            Control::Brake => self.brake = pressed,
            Control::TurnLeft => self.turn_left = pressed,
            Control::TurnRight => self.turn_right = pressed,
            Control::Nitro => self.nitro = pressed,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Accelerate => self.accelerate,
            Control::Brake => self.brake,
            Control::TurnLeft => self.turn_left,
            Control::TurnRight => self.turn_right,
            Control::Nitro => self.nitro,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let mut flags = ControlFlags::new();
        flags.set(Control::Accelerate, true);
        flags.set(Control::TurnLeft, true);
        assert!(flags.is_held(Control::Accelerate));
        assert!(flags.is_held(Control::TurnLeft));
        assert!(!flags.is_held(Control::Brake));

        flags.set(Control::Accelerate, false);
        assert!(!flags.accelerate);
        assert!(flags.turn_left);
    }

    #[test]
    fn test_clear() {
        let mut flags = ControlFlags {
            accelerate: true,
            brake: true,
            turn_left: true,
            turn_right: true,
            nitro: true,
        };
        flags.clear();
        assert_eq!(flags, ControlFlags::default());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Control::from_name("turnRight"), Some(Control::TurnRight));
        assert_eq!(Control::from_name("nitro"), Some(Control::Nitro));
        assert_eq!(Control::from_name("honk"), None);
    }
}
