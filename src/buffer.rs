// buffer.rs
use std::ops::{Deref, Range};
use std::sync::Arc;

use anyhow::{Result, bail, ensure};

use crate::vertex::Vertex;

/// Ordered list of vertices. Element order is draw order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { vertices: Vec::with_capacity(capacity) }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = ([f32; 3], [f32; 2])>,
    {
        pairs.into_iter().map(Vertex::from).collect()
    }

    /// Decodes a packed byte buffer. The input does not need to be aligned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() % Vertex::STRIDE == 0,
            "buffer of {} bytes is not a whole number of {}-byte records",
            bytes.len(),
            Vertex::STRIDE
        );
        Ok(bytes
            .chunks_exact(Vertex::STRIDE)
            .map(bytemuck::pod_read_unaligned::<Vertex>)
            .collect())
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Replaces the whole contents. Individual records are never edited.
    pub fn overwrite<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Vertex>,
    {
        self.vertices.clear();
        self.vertices.extend(vertices);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn byte_len(&self) -> usize {
        self.vertices.len() * Vertex::STRIDE
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn record_bytes(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(Vertex::STRIDE)?;
        self.as_bytes().get(start..start.checked_add(Vertex::STRIDE)?)
    }

    pub fn check_draw_range(&self, first: u32, count: u32) -> Result<Range<u32>> {
        check_draw_range(self.len(), first, count)
    }

    /// Freezes the buffer so it can be shared read-only between threads.
    pub fn publish(self) -> SharedVertexBuffer {
        SharedVertexBuffer(self.vertices.into())
    }
}

impl Extend<Vertex> for VertexBuffer {
    fn extend<I: IntoIterator<Item = Vertex>>(&mut self, iter: I) {
        self.vertices.extend(iter);
    }
}

impl FromIterator<Vertex> for VertexBuffer {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self { vertices: iter.into_iter().collect() }
    }
}

impl From<Vec<Vertex>> for VertexBuffer {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }
}

impl<'a> IntoIterator for &'a VertexBuffer {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

/// A finished buffer, published once and read by any number of consumers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SharedVertexBuffer(Arc<[Vertex]>);

impl SharedVertexBuffer {
    pub fn byte_len(&self) -> usize {
        self.0.len() * Vertex::STRIDE
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }
}

impl Deref for SharedVertexBuffer {
    type Target = [Vertex];

    fn deref(&self) -> &[Vertex] {
        &self.0
    }
}

/// Reads record `index` straight out of a packed byte buffer.
pub fn decode_record(bytes: &[u8], index: usize) -> Result<Vertex> {
    let record = index
        .checked_mul(Vertex::STRIDE)
        .and_then(|start| bytes.get(start..start.checked_add(Vertex::STRIDE)?));
    let Some(record) = record else {
        bail!(
            "record {index} is out of range for a buffer of {} bytes",
            bytes.len()
        );
    };
    Vertex::from_bytes(record)
}

/// Vertex range for drawing `count` vertices starting at `first` out of
/// `available`, or an error if the draw would read past the end.
pub fn check_draw_range(available: usize, first: u32, count: u32) -> Result<Range<u32>> {
    let end = first.checked_add(count);
    ensure!(
        end.is_some_and(|end| end as usize <= available),
        "drawing {count} vertices from {first} needs more than the {available} available"
    );
    Ok(first..first + count)
}
