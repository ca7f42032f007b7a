use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Scenery theme, picks the render palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenery {
    City,
    Mountain,
    Neon,
}

/// Read-only track metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u32,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub environment: Scenery,
    pub lap_time: u32,
}

pub static TRACKS: [Track; 3] = [
    Track {
        id: 1,
        name: "City Circuit",
        difficulty: Difficulty::Easy,
        description: "Navigate through the urban landscape with moderate turns and straightaways.",
        environment: Scenery::City,
        lap_time: 45,
    },
    Track {
        id: 2,
        name: "Mountain Pass",
        difficulty: Difficulty::Medium,
        description: "Challenging curves and elevation changes through scenic mountain roads.",
        environment: Scenery::Mountain,
        lap_time: 60,
    },
    Track {
        id: 3,
        name: "Neon Speedway",
        difficulty: Difficulty::Hard,
        description: "High-speed night circuit with tight corners and nitro zones.",
        environment: Scenery::Neon,
        lap_time: 35,
    },
];

pub const DEFAULT_TRACK_ID: u32 = 1;

pub fn find_track(id: u32) -> Option<&'static Track> {
    TRACKS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_track() {
        assert_eq!(find_track(2).map(|t| t.name), Some("Mountain Pass"));
        assert_eq!(find_track(3).map(|t| t.environment), Some(Scenery::Neon));
        assert!(find_track(0).is_none());
        assert!(find_track(4).is_none());
    }

    #[test]
    fn test_default_track_exists() {
        assert!(find_track(DEFAULT_TRACK_ID).is_some());
    }
}
