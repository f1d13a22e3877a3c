pub mod buffer;
pub mod config;
pub mod gpu;
pub mod layout;
pub mod scene;
pub mod vertex;

pub use buffer::{SharedVertexBuffer, VertexBuffer, check_draw_range, decode_record};
pub use config::{DriverConfig, Topology};
pub use gpu::GpuVertexBuffer;
pub use layout::{AttributeDescriptor, AttributeSemantic, ComponentType, VertexLayout};
pub use vertex::Vertex;
