//! WebGPU client for the racing game
//!
//! Engine-free rendering using wgpu 24 with the "webgpu" feature. Screen
//! flow, input mapping, HUD text and scene building are plain Rust and
//! build natively for tests; everything touching the browser is wasm32 only.

pub mod camera;
pub mod fsm;
pub mod hud;
pub mod input;
pub mod preview;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod env;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod mesh;
#[cfg(target_arch = "wasm32")]
mod renderer;
#[cfg(target_arch = "wasm32")]
mod storage;

#[cfg(target_arch = "wasm32")]
pub use app::*;
