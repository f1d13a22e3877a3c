// gpu.rs
use anyhow::{Context, Result, ensure};
use wgpu::util::DeviceExt;

use crate::{buffer, vertex::Vertex};

/// Vertices uploaded to GPU memory, with the bookkeeping needed to bind and
/// draw them safely.
pub struct GpuVertexBuffer {
    buffer: wgpu::Buffer,
    label: String,
    vertex_count: u32,
}

impl GpuVertexBuffer {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        usage: wgpu::BufferUsages,
    ) -> Result<Self> {
        let vertex_count = checked_vertex_count(vertices)?;
        let buffer = Self::create(device, label, vertices, usage | wgpu::BufferUsages::VERTEX);
        log::debug!(
            "Created {label}: {vertex_count} vertices, {} bytes",
            buffer.size()
        );
        Ok(Self { buffer, label: label.to_string(), vertex_count })
    }

    fn create(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage,
        })
    }

    /// Replaces the uploaded vertices. Writes in place when the size is
    /// unchanged and the buffer accepts copies, otherwise reallocates.
    pub fn overwrite(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[Vertex],
    ) -> Result<()> {
        let vertex_count = checked_vertex_count(vertices)?;
        let contents: &[u8] = bytemuck::cast_slice(vertices);
        let usage = self.buffer.usage();

        if can_write_in_place(self.buffer.size(), usage, contents.len()) {
            queue.write_buffer(&self.buffer, 0, contents);
            log::debug!("Overwrote {} in place ({} bytes)", self.label, contents.len());
        } else {
            log::warn!(
                "Reallocating {}: {} -> {} bytes",
                self.label,
                self.buffer.size(),
                contents.len()
            );
            self.buffer = Self::create(device, &self.label, vertices, usage | wgpu::BufferUsages::COPY_DST);
        }
        self.vertex_count = vertex_count;
        Ok(())
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn stride(&self) -> wgpu::BufferAddress {
        Vertex::STRIDE as wgpu::BufferAddress
    }

    pub fn size_bytes(&self) -> wgpu::BufferAddress {
        self.buffer.size()
    }

    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, slot: u32) {
        render_pass.set_vertex_buffer(slot, self.buffer.slice(..));
    }

    /// Draws `count` vertices starting at `first`. The pipeline and this
    /// buffer must already be bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, first: u32, count: u32) -> Result<()> {
        let range = buffer::check_draw_range(self.vertex_count as usize, first, count)
            .with_context(|| format!("invalid draw from {}", self.label))?;
        render_pass.draw(range, 0..1);
        Ok(())
    }
}

/// A queue write can replace the contents only when the byte size is
/// unchanged and the buffer was created with `COPY_DST`.
fn can_write_in_place(current_size: wgpu::BufferAddress, usage: wgpu::BufferUsages, new_len: usize) -> bool {
    new_len as u64 == current_size && usage.contains(wgpu::BufferUsages::COPY_DST)
}

fn checked_vertex_count(vertices: &[Vertex]) -> Result<u32> {
    ensure!(!vertices.is_empty(), "vertex buffer must contain at least one vertex");
    u32::try_from(vertices.len()).context("too many vertices for one buffer")
}

/// Device without a surface, for uploads that never present.
pub async fn request_headless_device() -> Result<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("no suitable GPU adapter found")?;
    log::info!("Using adapter {}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await?;
    Ok((device, queue))
}
