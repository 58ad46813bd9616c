//! Named mat4 uniform buffers on wgpu.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use corelib::{Mat4, UniformTarget};
use wgpu::{
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, BufferDescriptor, BufferUsages,
    Device, Queue, ShaderStages,
};

/// Form-matrix UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FormUniform {
    pub matrix: [[f32; 4]; 4],
}

impl FormUniform {
    pub const SIZE: u64 = std::mem::size_of::<FormUniform>() as u64;

    pub fn from_cols(cols: &[f32; 16]) -> Self {
        Self {
            matrix: Mat4::from_cols_array(cols).to_cols_array_2d(),
        }
    }
}

impl Default for FormUniform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// Layout entry for one form uniform at `binding`, visible to the vertex stage.
pub fn form_uniform_layout_entry(binding: u32) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::VERTEX,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(FormUniform::SIZE),
        },
        count: None,
    }
}

struct Slot {
    name: String,
    buffer: Buffer,
}

/// Uniform buffers addressed by name, written through the queue.
pub struct UniformRegistry<'q> {
    queue: &'q Queue,
    slots: Vec<Slot>,
}

impl<'q> UniformRegistry<'q> {
    pub fn new(queue: &'q Queue) -> Self {
        Self {
            queue,
            slots: Vec::new(),
        }
    }

    /// Create (or return the existing) buffer for `name`, initialised to identity.
    pub fn register(&mut self, device: &Device, name: &str) -> &Buffer {
        let index = match self.slots.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                let buffer = device.create_buffer(&BufferDescriptor {
                    label: Some(name),
                    size: FormUniform::SIZE,
                    usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                self.queue
                    .write_buffer(&buffer, 0, bytemuck::bytes_of(&FormUniform::default()));
                log::debug!("Registered uniform buffer '{}'", name);
                self.slots.push(Slot {
                    name: name.to_string(),
                    buffer,
                });
                self.slots.len() - 1
            }
        };
        &self.slots[index].buffer
    }

    pub fn buffer(&self, name: &str) -> Option<&Buffer> {
        self.slots.iter().find(|s| s.name == name).map(|s| &s.buffer)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }
}

impl UniformTarget for UniformRegistry<'_> {
    type Location = usize;

    fn uniform_location(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.name == name)
    }

    fn upload_mat4(&mut self, location: &usize, cols: &[f32; 16]) {
        let uniform = FormUniform::from_cols(cols);
        self.queue
            .write_buffer(&self.slots[*location].buffer, 0, bytemuck::bytes_of(&uniform));
    }
}
