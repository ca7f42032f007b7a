/// Host services the race needs: wall clock and logging.
///
/// The browser build logs to the console; tests substitute a recorder.
pub trait Environment {
    fn now_ms(&self) -> f64;
    fn log(&self, msg: String);
}

/// Environment that discards logs and reports a frozen clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentEnv;

impl Environment for SilentEnv {
    fn now_ms(&self) -> f64 {
        0.0
    }

    fn log(&self, _msg: String) {}
}
