//! GPU setup for the race canvas
//!
//! The canvas backing store is pinned to the arena size so one arena pixel is
//! one surface pixel; CSS may still scale the element.

use crate::scene::{ARENA_HEIGHT, ARENA_WIDTH};
use web_sys::HtmlCanvasElement;
use wgpu::*;

pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub config: SurfaceConfiguration,
}

pub async fn init_gpu(canvas: HtmlCanvasElement) -> Result<GpuContext, String> {
    canvas.set_width(ARENA_WIDTH as u32);
    canvas.set_height(ARENA_HEIGHT as u32);

    let instance = Instance::new(&InstanceDescriptor {
        backends: Backends::BROWSER_WEBGPU,
        ..Default::default()
    });
    let surface = instance
        .create_surface(SurfaceTarget::Canvas(canvas))
        .map_err(|e| format!("Failed to create race surface: {:?}", e))?;

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| "No WebGPU adapter for the race canvas".to_string())?;

    // Flat coloured quads: the smallest limits are plenty
    let (device, queue) = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some("Race Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: MemoryHints::MemoryUsage,
            },
            None,
        )
        .await
        .map_err(|e| format!("Failed to create race device: {:?}", e))?;

    let config = arena_surface_config(&surface.get_capabilities(&adapter))?;
    surface.configure(&device, &config);

    Ok(GpuContext {
        device,
        queue,
        surface,
        config,
    })
}

/// Surface configuration at arena resolution. Prefers an sRGB format so the
/// hex palette comes out as authored.
fn arena_surface_config(caps: &SurfaceCapabilities) -> Result<SurfaceConfiguration, String> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| "Race surface reports no formats".to_string())?;

    // The backdrop covers every pixel, so the page never shows through
    let alpha_mode = if caps.alpha_modes.contains(&CompositeAlphaMode::Opaque) {
        CompositeAlphaMode::Opaque
    } else {
        CompositeAlphaMode::Auto
    };

    Ok(SurfaceConfiguration {
        usage: TextureUsages::RENDER_ATTACHMENT,
        format,
        width: ARENA_WIDTH as u32,
        height: ARENA_HEIGHT as u32,
        present_mode: PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}
