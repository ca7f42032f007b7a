use crate::camera::{Camera, CameraUniform};
use crate::scene::{InstanceData, MAX_INSTANCES};
use wgpu::util::DeviceExt;
use wgpu::*;

pub struct GameBuffers {
    pub camera: Buffer,
    pub instances: Buffer,
}

pub fn create_buffers(device: &Device, camera: &Camera) -> GameBuffers {
    // Camera buffer
    let camera_uniform = CameraUniform::from_camera(camera);
    let camera_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[camera_uniform]),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    // One shared instance buffer, rewritten every frame
    let instances = device.create_buffer(&BufferDescriptor {
        label: Some("Quad Instance Buffer"),
        size: (std::mem::size_of::<InstanceData>() * MAX_INSTANCES) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GameBuffers {
        camera: camera_buffer,
        instances,
    }
}
