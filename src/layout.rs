//! Attribute descriptors shared between the vertex record and the driver.
//!
//! [`VertexLayout`] is built from the [`Vertex`] offsets, never typed in by
//! hand. Drivers that keep their own attribute tables can check them against
//! it with [`VertexLayout::validate_declared`].

use anyhow::{Result, bail, ensure};
use serde::Serialize;

use crate::config::{self, DriverConfig};
use crate::vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSemantic {
    Position,
    TexCoord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Float32,
}

impl ComponentType {
    pub fn size_bytes(self) -> u64 {
        match self {
            ComponentType::Float32 => 4,
        }
    }
}

/// What a driver declares for one attribute: where the shader reads it, how
/// many components it has, and where it starts inside a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    pub semantic: AttributeSemantic,
    pub location: u32,
    pub components: u32,
    pub component_type: ComponentType,
    pub offset: u64,
}

impl AttributeDescriptor {
    pub fn size_bytes(&self) -> u64 {
        u64::from(self.components) * self.component_type.size_bytes()
    }

    pub fn format(&self) -> Result<wgpu::VertexFormat> {
        Ok(match (self.component_type, self.components) {
            (ComponentType::Float32, 1) => wgpu::VertexFormat::Float32,
            (ComponentType::Float32, 2) => wgpu::VertexFormat::Float32x2,
            (ComponentType::Float32, 3) => wgpu::VertexFormat::Float32x3,
            (ComponentType::Float32, 4) => wgpu::VertexFormat::Float32x4,
            (_, n) => bail!(
                "{:?} attribute has {n} components, expected 1..={}",
                self.semantic,
                config::MAX_ATTRIBUTE_COMPONENTS
            ),
        })
    }

    pub fn to_wgpu(&self) -> Result<wgpu::VertexAttribute> {
        Ok(wgpu::VertexAttribute {
            format: self.format()?,
            offset: self.offset,
            shader_location: self.location,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VertexLayout {
    stride: u64,
    attributes: [AttributeDescriptor; 2],
    #[serde(skip)]
    wgpu_attributes: [wgpu::VertexAttribute; 2],
}

impl VertexLayout {
    /// Builds the layout for the driver's shader locations.
    ///
    /// # Errors
    /// Returns an error if both attributes are bound to the same location.
    pub fn new(config: &DriverConfig) -> Result<Self> {
        config.validate()?;
        let position = AttributeDescriptor {
            semantic: AttributeSemantic::Position,
            location: config.position_location,
            components: config::POSITION_COMPONENTS,
            component_type: ComponentType::Float32,
            offset: Vertex::POSITION_OFFSET as u64,
        };
        let texcoord = AttributeDescriptor {
            semantic: AttributeSemantic::TexCoord,
            location: config.texcoord_location,
            components: config::TEXCOORD_COMPONENTS,
            component_type: ComponentType::Float32,
            offset: Vertex::TEXCOORD_OFFSET as u64,
        };
        Ok(Self {
            stride: Vertex::STRIDE as u64,
            wgpu_attributes: [position.to_wgpu()?, texcoord.to_wgpu()?],
            attributes: [position, texcoord],
        })
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn attribute(&self, semantic: AttributeSemantic) -> &AttributeDescriptor {
        match semantic {
            AttributeSemantic::Position => &self.attributes[0],
            AttributeSemantic::TexCoord => &self.attributes[1],
        }
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.wgpu_attributes,
        }
    }

    /// Checks a driver's own attribute table against the record layout.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The stride is zero or differs from [`Vertex::STRIDE`].
    /// - An attribute has an unsupported component count or overruns the stride.
    /// - Two attributes share a shader location or a semantic.
    /// - A semantic is missing, or its offset, component count or type differs
    ///   from the record.
    pub fn validate_declared(&self, stride: u64, declared: &[AttributeDescriptor]) -> Result<()> {
        ensure!(stride > 0, "declared stride is zero");
        ensure!(
            stride == self.stride,
            "declared stride {stride} does not match vertex stride {}",
            self.stride
        );

        for (i, attribute) in declared.iter().enumerate() {
            attribute.format()?;
            ensure!(
                attribute
                    .offset
                    .checked_add(attribute.size_bytes())
                    .is_some_and(|end| end <= stride),
                "{:?} attribute at offset {} overruns stride {stride}",
                attribute.semantic,
                attribute.offset
            );
            for other in &declared[..i] {
                ensure!(
                    other.location != attribute.location,
                    "{:?} and {:?} share shader location {}",
                    other.semantic,
                    attribute.semantic,
                    attribute.location
                );
                ensure!(
                    other.semantic != attribute.semantic,
                    "{:?} attribute declared twice",
                    attribute.semantic
                );
            }
        }

        for expected in &self.attributes {
            let Some(found) = declared.iter().find(|a| a.semantic == expected.semantic) else {
                bail!("{:?} attribute is not declared", expected.semantic);
            };
            ensure!(
                found.offset == expected.offset,
                "{:?} declared at offset {}, record stores it at {}",
                expected.semantic,
                found.offset,
                expected.offset
            );
            ensure!(
                found.components == expected.components,
                "{:?} declared with {} components, record has {}",
                expected.semantic,
                found.components,
                expected.components
            );
            ensure!(
                found.component_type == expected.component_type,
                "{:?} declared as {:?}, record has {:?}",
                expected.semantic,
                found.component_type,
                expected.component_type
            );
        }
        Ok(())
    }
}
