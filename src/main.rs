use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use scene_vertex::{
    DriverConfig, GpuVertexBuffer, VertexBuffer, VertexLayout, config, decode_record, gpu, scene,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneKind {
    Triangle,
    Quad,
    Cube,
}

impl SceneKind {
    fn build(self) -> VertexBuffer {
        match self {
            SceneKind::Triangle => scene::triangle(),
            SceneKind::Quad => scene::textured_quad(),
            SceneKind::Cube => scene::textured_cube(),
        }
    }
}

/// Builds a reference mesh and reports how it is laid out for the GPU.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, value_enum, default_value = "quad")]
    scene: SceneKind,

    /// JSON file with shader locations and topology.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every record decoded back from the packed bytes.
    #[arg(long)]
    dump: bool,

    /// Upload the buffer to a headless GPU device.
    #[arg(long)]
    upload: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    vertex_count: usize,
    byte_len: usize,
    primitive_count: usize,
    config: &'a DriverConfig,
    layout: &'a VertexLayout,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let driver_config = match &args.config {
        Some(path) => DriverConfig::from_json_file(path)?,
        None => DriverConfig::default(),
    };
    let layout = VertexLayout::new(&driver_config)?;
    layout.validate_declared(layout.stride(), layout.attributes())?;

    let vertices = args.scene.build();
    log::info!(
        "Built {:?}: {} vertices, stride {} bytes",
        args.scene,
        vertices.len(),
        layout.stride()
    );

    let summary = Summary {
        vertex_count: vertices.len(),
        byte_len: vertices.byte_len(),
        primitive_count: driver_config.topology.primitive_count(vertices.len()),
        config: &driver_config,
        layout: &layout,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.dump {
        let bytes = vertices.as_bytes();
        for i in 0..vertices.len() {
            let vertex = decode_record(bytes, i)?;
            println!("{i:>4}: position {:?} texcoord {:?}", vertex.position, vertex.texcoord);
        }
    }

    if args.upload {
        let shared = vertices.publish();
        let (device, _queue) = pollster::block_on(gpu::request_headless_device())?;
        let uploaded = GpuVertexBuffer::new(
            &device,
            config::VERTEX_BUFFER_LABEL,
            &shared,
            wgpu::BufferUsages::VERTEX,
        )?;
        log::info!(
            "Uploaded {} vertices ({} bytes)",
            uploaded.vertex_count(),
            uploaded.size_bytes()
        );
    }

    Ok(())
}
