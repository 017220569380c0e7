//! Growable GPU vertex/instance buffers.
//!
//! Particle counts fluctuate every frame, so instance data lives in a
//! buffer that doubles its capacity when exceeded. GPU buffers cannot
//! be resized in place, and this buffer never shrinks.

/// A typed GPU buffer that grows to fit its data.
pub struct InstanceBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: usize,
    /// Items currently uploaded.
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> InstanceBuffer<T> {
    /// Buffer sized for `capacity` items up front.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (size_of::<T>() * capacity).max(64);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: bytes as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity: bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Upload `data`, reallocating with 2x growth if it does not fit.
    ///
    /// Returns `true` when the underlying buffer was reallocated, in
    /// which case bind groups referencing it must be recreated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = if needed > self.capacity {
            let new_capacity = (needed * 2).max(self.capacity + 1024);
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items uploaded by the last `write`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last `write` uploaded nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
