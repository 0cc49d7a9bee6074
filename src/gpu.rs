//! GPU upload boundary
//!
//! The shader reads spheres from a storage buffer of fixed 44-byte records and
//! per-frame inputs from a uniform block. Dispatch and shading belong to the
//! host renderer.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::SPHERE_STRIDE;
use crate::error::SceneError;
use crate::scene::{GpuSphere, Scene};
use crate::settings::FrameParams;

/// Storage buffer holding one scene's sphere records
pub struct SphereBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl SphereBuffer {
    /// Upload `scene` into a new storage buffer
    pub fn new(device: &wgpu::Device, scene: &Scene) -> Result<Self, SceneError> {
        let count = record_count(scene.len())?;
        let records = scene.gpu_records();
        // Zero-sized bindings are invalid, keep room for one record
        let contents: Vec<u8> = if records.is_empty() {
            vec![0; SPHERE_STRIDE]
        } else {
            bytemuck::cast_slice(&records).to_vec()
        };

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Buffer"),
            contents: &contents,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        log::info!(
            "Uploaded {} spheres ({} bytes, stride {})",
            records.len(),
            contents.len(),
            SPHERE_STRIDE
        );

        Ok(Self { buffer, count })
    }

    /// Rewrite the records between frames (after picking faded a sphere).
    ///
    /// The sphere count cannot change; regenerate the buffer after a reset.
    /// Nothing is written when the counts differ.
    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene) -> Result<(), SceneError> {
        check_count(self.count, scene.len())?;
        if self.count == 0 {
            return Ok(());
        }
        let records = scene.gpu_records();
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&records));
        Ok(())
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of valid records (may be 0 while the buffer holds a placeholder)
    pub fn count(&self) -> u32 {
        self.count
    }

    pub const fn stride() -> wgpu::BufferAddress {
        std::mem::size_of::<GpuSphere>() as wgpu::BufferAddress
    }
}

/// Sphere count as stored in the shader's `u32` fields
fn record_count(len: usize) -> Result<u32, SceneError> {
    u32::try_from(len).map_err(|_| {
        SceneError::invalid("scene", format!("{len} spheres exceed the u32 record count"))
    })
}

/// A buffer sized for `expected` records cannot take a scene of `actual`
fn check_count(expected: u32, actual: usize) -> Result<(), SceneError> {
    if record_count(actual)? != expected {
        return Err(SceneError::invalid(
            "scene",
            format!("sphere count changed ({expected} -> {actual}), recreate the buffer"),
        ));
    }
    Ok(())
}

impl Drop for SphereBuffer {
    fn drop(&mut self) {
        self.buffer.destroy();
    }
}

/// Per-frame uniforms (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub camera_to_world: [[f32; 4]; 4],    // offset 0
    pub inverse_projection: [[f32; 4]; 4], // offset 64
    pub directional_light: [f32; 4],       // offset 128
    pub pixel_offset: [f32; 2],            // offset 144
    pub resolution: [f32; 2],              // offset 152
    pub time: f32,                         // offset 160
    pub sphere_count: u32,                 // offset 164
    pub sample_index: u32,                 // offset 168
    pub _pad: u32,                         // pad to 176 bytes
}

impl FrameUniforms {
    pub fn new(frame: &FrameParams, scene: &Scene) -> Result<Self, SceneError> {
        Ok(Self {
            camera_to_world: frame.camera_to_world.to_cols_array_2d(),
            inverse_projection: frame.inverse_projection.to_cols_array_2d(),
            directional_light: frame.directional_light.to_array(),
            pixel_offset: frame.pixel_offset.to_array(),
            resolution: frame.resolution.as_vec2().to_array(),
            time: frame.time,
            sphere_count: record_count(scene.len())?,
            sample_index: scene.sample_index(),
            _pad: 0,
        })
    }

    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::bytes_of(self),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn write(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(self));
    }
}
