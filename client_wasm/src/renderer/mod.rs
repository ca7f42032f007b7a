pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use crate::camera::Camera;
use crate::mesh::{create_quad, Mesh};
use crate::scene::{ARENA_HEIGHT, ARENA_WIDTH};
use game_core::RaceView;
use resources::GameBuffers;
use wgpu::*;

pub struct Renderer {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,

    pub main_pipeline: RenderPipeline,
    pub camera_bind_group: BindGroup,

    pub buffers: GameBuffers,
    pub quad: Mesh,
}

impl Renderer {
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self, String> {
        let ctx = init::init_gpu(canvas).await?;
        let camera = Camera::orthographic(ARENA_WIDTH, ARENA_HEIGHT);

        let buffers = resources::create_buffers(&ctx.device, &camera);
        let pipes = pipeline::create_pipelines(&ctx.device, ctx.config.format);

        let (vertices, indices) = create_quad();
        let quad = Mesh::new(&ctx.device, &ctx.queue, &vertices, &indices);

        let camera_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipes.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffers.camera.as_entire_binding(),
            }],
        });

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            main_pipeline: pipes.main_pipeline,
            camera_bind_group,
            buffers,
            quad,
        })
    }

    pub fn draw(&mut self, view: &RaceView) -> Result<(), String> {
        draw::draw_frame(self, view)
    }
}
