use game_core::Environment;

/// Browser clock and console
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmEnv;

impl Environment for WasmEnv {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn log(&self, msg: String) {
        web_sys::console::log_1(&msg.into());
    }
}
