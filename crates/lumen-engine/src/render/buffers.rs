use lumen_shade::InstanceRaw;
use wgpu::util::DeviceExt;

use crate::layout::VertexLayout;

/// Indexed geometry in GPU memory.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
}

impl Mesh {
    pub fn new<V: VertexLayout>(
        device: &wgpu::Device,
        vertices: &[V],
        indices: &[u16],
        label: &str,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "created mesh {label} ({} vertices, {} indices)",
            vertices.len(),
            indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            vertex_layout: V::layout(),
        }
    }

    #[inline]
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    #[inline]
    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Layout of the vertex record the mesh was built from.
    #[inline]
    pub fn vertex_layout(&self) -> &wgpu::VertexBufferLayout<'static> {
        &self.vertex_layout
    }
}

/// Growable per-instance buffer of model matrices.
pub struct InstanceBuffer {
    label: String,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: usize,
}

impl InstanceBuffer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffer: None,
            capacity: 0,
            len: 0,
        }
    }

    /// Replaces the contents with `instances`, reallocating when they no
    /// longer fit.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceRaw]) {
        self.ensure_capacity(device, instances.len());
        self.len = instances.len();
        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slice covering the instances written last.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.is_empty() {
            return None;
        }
        let bytes = (self.len * size_of::<InstanceRaw>()) as wgpu::BufferAddress;
        self.buffer.as_ref().map(|b| b.slice(..bytes))
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, required: usize) {
        let Some(new_cap) = grown_capacity(self.capacity, required) else { return };

        self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&self.label),
            size: (new_cap * size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.capacity = new_cap;

        log::debug!("instance buffer {} grown to {new_cap} instances", self.label);
    }
}

/// Capacity to allocate for `required` instances, or `None` when `current`
/// already fits them.
fn grown_capacity(current: usize, required: usize) -> Option<usize> {
    if required <= current && current > 0 {
        return None;
    }
    Some(required.next_power_of_two().max(64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_instance_buffer_has_nothing_to_draw() {
        let instances = InstanceBuffer::new("empty");
        assert!(instances.is_empty());
        assert_eq!(instances.len(), 0);
        assert!(instances.slice().is_none());
    }

    #[test]
    fn first_allocation_has_minimum_capacity() {
        assert_eq!(grown_capacity(0, 0), Some(64));
        assert_eq!(grown_capacity(0, 5), Some(64));
    }

    #[test]
    fn grows_to_next_power_of_two() {
        assert_eq!(grown_capacity(64, 65), Some(128));
        assert_eq!(grown_capacity(128, 1000), Some(1024));
    }

    #[test]
    fn fitting_write_keeps_buffer() {
        assert_eq!(grown_capacity(64, 64), None);
        assert_eq!(grown_capacity(128, 3), None);
    }
}
