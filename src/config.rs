// config.rs
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

// --- Attribute Defaults ---
pub const POSITION_LOCATION: u32 = 0;
pub const TEXCOORD_LOCATION: u32 = 1;
pub const POSITION_COMPONENTS: u32 = 3;
pub const TEXCOORD_COMPONENTS: u32 = 2;
pub const MAX_ATTRIBUTE_COMPONENTS: u32 = 4;

// --- Buffers ---
pub const VERTEX_BUFFER_LABEL: &str = "Vertex Buffer";

/// How the driver assembles consecutive vertices into primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    TriangleList,
    TriangleStrip,
    LineList,
    LineStrip,
    PointList,
}

impl Topology {
    /// Number of whole primitives `vertex_count` vertices form. Trailing
    /// vertices that do not complete a primitive are ignored.
    pub fn primitive_count(self, vertex_count: usize) -> usize {
        match self {
            Topology::TriangleList => vertex_count / 3,
            Topology::TriangleStrip => vertex_count.saturating_sub(2),
            Topology::LineList => vertex_count / 2,
            Topology::LineStrip => vertex_count.saturating_sub(1),
            Topology::PointList => vertex_count,
        }
    }
}

impl From<Topology> for wgpu::PrimitiveTopology {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Topology::PointList => wgpu::PrimitiveTopology::PointList,
        }
    }
}

/// Choices owned by the rendering driver rather than by the vertex record:
/// where each attribute is bound in the shader and how vertices are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub position_location: u32,
    pub texcoord_location: u32,
    pub topology: Topology,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            position_location: POSITION_LOCATION,
            texcoord_location: TEXCOORD_LOCATION,
            topology: Topology::default(),
        }
    }
}

impl DriverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid driver config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open driver config {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid driver config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.position_location != self.texcoord_location,
            "position and texcoord share shader location {}",
            self.position_location
        );
        Ok(())
    }
}
