use bytemuck::Pod;
use wgpu::util::DeviceExt;

/// A uniform buffer holding one `Pod` record, with a CPU copy of the last
/// value written.
pub struct UniformBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    value: T,
}

impl<T: Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, value: T, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        log::debug!("created uniform buffer {label} ({} bytes)", size_of::<T>());
        Self { buffer, value }
    }

    /// Stores `value` and queues its upload; visible to the next submission.
    pub fn write(&mut self, queue: &wgpu::Queue, value: T) {
        self.value = value;
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.value));
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
