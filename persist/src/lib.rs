//! Save slots for the racing game
//!
//! Two independently keyed JSON records (the last car and the last race
//! result) in whatever key-value storage the host provides, plus an
//! in-memory garage of every car saved this session.

use game_core::{CarConfig, Environment, RaceState};
use serde::{de::DeserializeOwned, Serialize};

pub const CAR_KEY: &str = "racingGame_car";
pub const STATE_KEY: &str = "racingGame_state";

// ============================================================================
// Storage seam
// ============================================================================

/// String key-value storage (browser `localStorage`, or memory in tests)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Serialization Helpers
// ============================================================================

/// Serialize a record to its stored JSON form
pub fn to_json<T: Serialize>(record: &T) -> Result<String, String> {
    serde_json::to_string(record).map_err(|e| format!("Failed to serialize record: {:?}", e))
}

/// Deserialize a record from its stored JSON form
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to deserialize record: {:?}", e))
}

// ============================================================================
// Save manager
// ============================================================================

/// Result of a load. Each record is independently present or absent;
/// absent means "use defaults", never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedGame {
    pub car: Option<CarConfig>,
    pub state: Option<RaceState>,
}

pub struct SaveManager<S: KeyValueStore> {
    store: S,
    env: Box<dyn Environment>,
    saved_cars: Vec<CarConfig>,
}

impl<S: KeyValueStore> SaveManager<S> {
    pub fn new(store: S, env: Box<dyn Environment>) -> Self {
        Self {
            store,
            env,
            saved_cars: Vec::new(),
        }
    }

    /// Persist both records and remember the car (last write wins per id)
    pub fn save_game(&mut self, car: &CarConfig, state: &RaceState) -> Result<(), String> {
        self.remember(car);

        let car_json = to_json(car)?;
        let state_json = to_json(state)?;
        self.store.set(CAR_KEY, &car_json)?;
        self.store.set(STATE_KEY, &state_json)?;

        self.env.log(format!(
            "Saved car {} with score {} (position {})",
            car.id, state.score, state.position
        ));
        Ok(())
    }

    pub fn load_game(&self) -> LoadedGame {
        LoadedGame {
            car: self.load_record(CAR_KEY),
            state: self.load_record(STATE_KEY),
        }
    }

    /// Cars saved this session, in first-saved order
    pub fn saved_cars(&self) -> &[CarConfig] {
        &self.saved_cars
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn remember(&mut self, car: &CarConfig) {
        match self.saved_cars.iter_mut().find(|c| c.id == car.id) {
            Some(existing) => *existing = car.clone(),
            None => self.saved_cars.push(car.clone()),
        }
    }

    fn load_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = match self.store.get(key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                self.env.log(format!("Could not read {key}: {e}"));
                return None;
            }
        };

        match from_json(&json) {
            Ok(record) => Some(record),
            Err(e) => {
                self.env.log(format!("Ignoring corrupt {key}: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Body, Part, SilentEnv, Tyre};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> SaveManager<MemoryStore> {
        SaveManager::new(MemoryStore::new(), Box::new(SilentEnv))
    }

    #[test]
    fn test_load_without_save_is_absent() {
        let saves = manager();
        assert_eq!(saves.load_game(), LoadedGame::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut saves = manager();
        let car = CarConfig::new("car_1").with(Part::Tyres(Tyre::Drift));
        let mut state = RaceState::default();
        state.position = 2;
        state.score = 500;

        saves.save_game(&car, &state).expect("save should succeed");

        let loaded = saves.load_game();
        assert_eq!(loaded.car, Some(car));
        assert_eq!(loaded.state, Some(state));
    }

    #[test]
    fn test_records_load_independently() {
        let mut store = MemoryStore::new();
        store
            .set(STATE_KEY, &to_json(&RaceState::default()).unwrap())
            .unwrap();
        let saves = SaveManager::new(store, Box::new(SilentEnv));

        let loaded = saves.load_game();
        assert!(loaded.car.is_none());
        assert_eq!(loaded.state, Some(RaceState::default()));
    }

    #[test]
    fn test_garage_dedupes_by_id() {
        let mut saves = manager();
        let state = RaceState::default();
        let first = CarConfig::new("car_1");
        let other = CarConfig::new("car_2");
        let updated = CarConfig::new("car_1").with(Part::Body(Body::Heavy));

        saves.save_game(&first, &state).unwrap();
        saves.save_game(&other, &state).unwrap();
        saves.save_game(&updated, &state).unwrap();

        let cars = saves.saved_cars();
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0], updated, "replaced in place");
        assert_eq!(cars[1].id, "car_2");
    }

    #[test]
    fn test_stored_field_names() {
        let car = CarConfig::new("car_1");
        let json: serde_json::Value = serde_json::from_str(&to_json(&car).unwrap()).unwrap();
        assert_eq!(json["tyres"], "sport");
        assert_eq!(json["body"], "balanced");
        assert_eq!(json["chips"], "nitro");
        assert_eq!(json["lights"], "#00ffff");
        assert_eq!(json["speed"], 75);
        assert_eq!(json["nitro"], 100);

        let json: serde_json::Value =
            serde_json::from_str(&to_json(&RaceState::default()).unwrap()).unwrap();
        assert_eq!(json["currentLap"], 1);
        assert_eq!(json["totalLaps"], 3);
        assert_eq!(json["timeRemaining"], 180);
        assert_eq!(json["nitroLevel"], 100.0);
    }

    #[test]
    fn test_reads_records_written_by_older_builds() {
        let car: CarConfig = from_json(
            r##"{"id":"car_1700000000000","tyres":"racing","body":"lightweight","lights":"#ff00ff","chips":"turbo","speed":120,"acceleration":110,"handling":85,"nitro":85}"##,
        )
        .unwrap();
        assert_eq!(car.tyres, Tyre::Racing);
        assert_eq!(car.stats.speed, 120);

        let state: RaceState = from_json(
            r#"{"currentLap":1,"totalLaps":3,"position":4,"speed":0,"nitroLevel":87,"timeRemaining":0,"score":100}"#,
        )
        .unwrap();
        assert_eq!(state.position, 4);
        assert_eq!(state.nitro_level, 87.0);
    }

    #[derive(Clone, Default)]
    struct RecordingEnv {
        logs: Rc<RefCell<Vec<String>>>,
    }

    impl Environment for RecordingEnv {
        fn now_ms(&self) -> f64 {
            0.0
        }

        fn log(&self, msg: String) {
            self.logs.borrow_mut().push(msg);
        }
    }

    #[test]
    fn test_corrupt_record_is_absent_and_logged() {
        let env = RecordingEnv::default();
        let logs = env.logs.clone();
        let mut store = MemoryStore::new();
        store.set(CAR_KEY, "{not json").unwrap();
        let saves = SaveManager::new(store, Box::new(env));

        assert!(saves.load_game().car.is_none());
        assert!(logs.borrow().iter().any(|l| l.contains("Ignoring corrupt racingGame_car")));
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>, String> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), String> {
            Err("QuotaExceededError".to_string())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut saves = SaveManager::new(FullStore, Box::new(SilentEnv));
        let car = CarConfig::new("car_1");
        let err = saves.save_game(&car, &RaceState::default()).unwrap_err();
        assert!(err.contains("QuotaExceeded"));
        // The session garage still remembers the car
        assert_eq!(saves.saved_cars().len(), 1);
    }
}
