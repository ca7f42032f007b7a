use super::Renderer;
use crate::scene::Scene;
use game_core::RaceView;
use wgpu::*;

pub fn draw_frame(renderer: &mut Renderer, view: &RaceView) -> Result<(), String> {
    let output = match renderer.surface.get_current_texture() {
        Ok(output) => output,
        Err(SurfaceError::Lost | SurfaceError::Outdated) => {
            // Canvas was resized or the context lost; reconfigure and skip a frame
            renderer
                .surface
                .configure(&renderer.device, &renderer.surface_config);
            return Ok(());
        }
        Err(e) => return Err(format!("Failed to get current texture: {:?}", e)),
    };
    let target = output.texture.create_view(&TextureViewDescriptor::default());

    let scene = Scene::build(view);
    if !scene.is_empty() {
        renderer.queue.write_buffer(
            &renderer.buffers.instances,
            0,
            bytemuck::cast_slice(scene.instances()),
        );
    }

    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &target,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&renderer.main_pipeline);
        pass.set_bind_group(0, &renderer.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, renderer.quad.vertex_buffer.slice(..));
        pass.set_index_buffer(renderer.quad.index_buffer.slice(..), IndexFormat::Uint16);
        pass.set_vertex_buffer(1, renderer.buffers.instances.slice(..));
        pass.draw_indexed(0..renderer.quad.index_count, 0, 0..scene.len() as u32);
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}
