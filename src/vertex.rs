// vertex.rs
use std::hash::{Hash, Hasher};
use std::mem::{offset_of, size_of};

use anyhow::{Result, ensure};
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

const POSITION_SIZE: usize = size_of::<[f32; 3]>();
const TEXCOORD_SIZE: usize = size_of::<[f32; 2]>();
const STRIDE: usize = size_of::<Vertex>();

/// One point of drawable geometry: a model-space position followed by a
/// texture coordinate. The layout is `repr(C)` with no padding, so a slice of
/// vertices can be handed to the GPU as is.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
}

// Attribute descriptors assume this exact packing.
const _: () = assert!(Vertex::POSITION_OFFSET == 0);
const _: () = assert!(Vertex::TEXCOORD_OFFSET == POSITION_SIZE);
const _: () = assert!(STRIDE == POSITION_SIZE + TEXCOORD_SIZE);
const _: () = assert!(STRIDE == 20);

impl Vertex {
    pub const POSITION_OFFSET: usize = offset_of!(Vertex, position);
    pub const TEXCOORD_OFFSET: usize = offset_of!(Vertex, texcoord);
    pub const POSITION_SIZE: usize = POSITION_SIZE;
    pub const TEXCOORD_SIZE: usize = TEXCOORD_SIZE;
    /// Byte distance between consecutive records in a packed buffer.
    pub const STRIDE: usize = STRIDE;

    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// No validation: NaN and infinite components are stored unchanged.
    pub const fn new(position: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self { position, texcoord }
    }

    pub fn from_vectors(position: Vec3, texcoord: Vec2) -> Self {
        Self::new(position.to_array(), texcoord.to_array())
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }

    /// Layout for the default shader locations (position at 0, texcoord at 1).
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Native-endian bytes, identical to what an upload of this vertex writes.
    pub fn to_bytes(&self) -> [u8; STRIDE] {
        bytemuck::cast(*self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == STRIDE,
            "vertex record must be {STRIDE} bytes, got {}",
            bytes.len()
        );
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

// Components compare by bit pattern: NaN equals an identical NaN, and 0.0
// differs from -0.0.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        bytemuck::bytes_of(self).hash(state);
    }
}

impl From<(Vec3, Vec2)> for Vertex {
    fn from((position, texcoord): (Vec3, Vec2)) -> Self {
        Self::from_vectors(position, texcoord)
    }
}

impl From<([f32; 3], [f32; 2])> for Vertex {
    fn from((position, texcoord): ([f32; 3], [f32; 2])) -> Self {
        Self::new(position, texcoord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bits<const N: usize>(values: [f32; N]) -> [u32; N] {
        values.map(f32::to_bits)
    }

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::POSITION_OFFSET, 0);
        assert_eq!(Vertex::TEXCOORD_OFFSET, 12);
        assert_eq!(Vertex::TEXCOORD_OFFSET, Vertex::POSITION_SIZE);
        assert_eq!(Vertex::STRIDE, Vertex::POSITION_SIZE + Vertex::TEXCOORD_SIZE);
        assert_eq!(std::mem::align_of::<Vertex>(), std::mem::align_of::<f32>());
    }

    #[test]
    fn wgpu_attributes_match_record_layout() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, Vertex::STRIDE as u64);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Vertex);

        let [position, texcoord] = Vertex::ATTRIBUTES;
        assert_eq!(position.offset, Vertex::POSITION_OFFSET as u64);
        assert_eq!(position.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(position.format.size(), Vertex::POSITION_SIZE as u64);
        assert_eq!(texcoord.offset, Vertex::TEXCOORD_OFFSET as u64);
        assert_eq!(texcoord.format, wgpu::VertexFormat::Float32x2);
        assert_eq!(texcoord.format.size(), Vertex::TEXCOORD_SIZE as u64);
    }

    #[test]
    fn equal_inputs_compare_equal() {
        let a = Vertex::new([1.0, 2.0, 3.0], [0.25, 0.75]);
        let b = Vertex::new([1.0, 2.0, 3.0], [0.25, 0.75]);
        assert_eq!(a, b);
        assert_ne!(a, Vertex::new([1.0, 2.0, 3.5], [0.25, 0.75]));
        assert_ne!(a, Vertex::new([1.0, 2.0, 3.0], [0.25, 0.8]));
    }

    #[test]
    fn equality_has_no_tolerance() {
        let a = Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0]);
        let b = Vertex::new([1.0 + f32::EPSILON, 0.0, 0.0], [0.0, 0.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn identical_nan_vertices_are_equal() {
        let a = Vertex::new([f32::NAN, 0.0, 0.0], [0.0, 0.0]);
        let b = Vertex::new([f32::NAN, 0.0, 0.0], [0.0, 0.0]);
        assert_eq!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn signed_zeros_are_distinct() {
        let positive = Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]);
        assert_ne!(positive, Vertex::new([-0.0, 0.0, 0.0], [0.0, 0.0]));
        assert_ne!(positive, Vertex::new([0.0, 0.0, 0.0], [0.0, -0.0]));
    }

    #[test]
    fn equal_vertices_hash_alike() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Vertex::new([f32::NAN, 1.0, 2.0], [0.5, 0.5]));
        set.insert(Vertex::new([f32::NAN, 1.0, 2.0], [0.5, 0.5]));
        set.insert(Vertex::new([-0.0, 1.0, 2.0], [0.5, 0.5]));
        set.insert(Vertex::new([0.0, 1.0, 2.0], [0.5, 0.5]));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn non_finite_values_are_kept() {
        let vertex = Vertex::new([f32::INFINITY, f32::NEG_INFINITY, f32::NAN], [f32::NAN, 2.0]);
        assert_eq!(vertex.position[0], f32::INFINITY);
        assert_eq!(vertex.position[1], f32::NEG_INFINITY);
        assert!(vertex.position[2].is_nan());
        assert!(vertex.texcoord[0].is_nan());
        assert_eq!(vertex.texcoord[1], 2.0);
    }

    #[test]
    fn texcoords_outside_unit_range_are_not_clamped() {
        let vertex = Vertex::new([0.0; 3], [4.0, -1.5]);
        assert_eq!(vertex.texcoord(), Vec2::new(4.0, -1.5));
    }

    #[test]
    fn glam_accessors_round_trip() {
        let vertex = Vertex::from_vectors(Vec3::new(-1.0, 0.67, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(vertex.position, [-1.0, 0.67, 0.0]);
        assert_eq!(vertex.texcoord, [0.0, 1.0]);
        assert_eq!(vertex.position(), Vec3::new(-1.0, 0.67, 0.0));
        assert_eq!(vertex.texcoord(), Vec2::new(0.0, 1.0));
        assert_eq!(Vertex::from((vertex.position(), vertex.texcoord())), vertex);
    }

    #[test]
    fn texcoord_bytes_start_after_position() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0]);
        let bytes = vertex.to_bytes();
        assert_eq!(&bytes[Vertex::TEXCOORD_OFFSET..Vertex::TEXCOORD_OFFSET + 4], &4.0f32.to_ne_bytes());
        assert_eq!(&bytes[Vertex::STRIDE - 4..], &5.0f32.to_ne_bytes());
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert!(Vertex::from_bytes(&[0u8; 19]).is_err());
        assert!(Vertex::from_bytes(&[0u8; 21]).is_err());
        assert_eq!(Vertex::from_bytes(&[0u8; 20]).unwrap(), Vertex::default());
    }

    #[test]
    fn from_bytes_accepts_unaligned_input() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0]);
        let mut storage = vec![0u8; Vertex::STRIDE + 1];
        storage[1..].copy_from_slice(&vertex.to_bytes());
        assert_eq!(Vertex::from_bytes(&storage[1..]).unwrap(), vertex);
    }

    proptest! {
        #[test]
        fn identical_inputs_compare_equal(
            position in any::<[f32; 3]>(),
            texcoord in any::<[f32; 2]>(),
        ) {
            prop_assert_eq!(Vertex::new(position, texcoord), Vertex::new(position, texcoord));
        }

        #[test]
        fn changing_any_component_breaks_equality(
            position in any::<[f32; 3]>(),
            texcoord in any::<[f32; 2]>(),
            component in 0usize..5,
            bit in 0u32..32,
        ) {
            let vertex = Vertex::new(position, texcoord);
            let mut components = [position[0], position[1], position[2], texcoord[0], texcoord[1]];
            components[component] = f32::from_bits(components[component].to_bits() ^ (1 << bit));
            let [x, y, z, u, v] = components;
            let changed = Vertex::new([x, y, z], [u, v]);
            prop_assert_ne!(vertex, changed);
        }

        #[test]
        fn fields_read_back_exactly(
            position in any::<[f32; 3]>(),
            texcoord in any::<[f32; 2]>(),
        ) {
            let vertex = Vertex::new(position, texcoord);
            prop_assert_eq!(bits(vertex.position), bits(position));
            prop_assert_eq!(bits(vertex.texcoord), bits(texcoord));
        }

        #[test]
        fn bytes_decode_to_same_bits(
            position in any::<[f32; 3]>(),
            texcoord in any::<[f32; 2]>(),
        ) {
            let decoded = Vertex::from_bytes(&Vertex::new(position, texcoord).to_bytes()).unwrap();
            prop_assert_eq!(bits(decoded.position), bits(position));
            prop_assert_eq!(bits(decoded.texcoord), bits(texcoord));
        }
    }
}
