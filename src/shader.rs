use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;
use glam::Mat3;
use wgpu::util::DeviceExt;

use crate::error::{PipelineError, ShaderStage};
use crate::types::MatrixUniform;

pub const VERTEX_SHADER_ID: &str = "vertex-shader-2d";
pub const FRAGMENT_SHADER_ID: &str = "fragment-shader-2d";

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

/// Looks up an embedded WGSL source by its identifier.
pub fn embedded_source(id: &str) -> Result<&'static str, PipelineError> {
    match id {
        VERTEX_SHADER_ID => Ok(include_str!("shaders/vertex_2d.wgsl")),
        FRAGMENT_SHADER_ID => Ok(include_str!("shaders/fragment_2d.wgsl")),
        other => Err(PipelineError::UnknownShader(other.to_string())),
    }
}

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    pub fn embedded() -> Result<Self, PipelineError> {
        Ok(Self {
            vertex: Cow::Borrowed(embedded_source(VERTEX_SHADER_ID)?),
            fragment: Cow::Borrowed(embedded_source(FRAGMENT_SHADER_ID)?),
        })
    }

    /// Embedded sources, with either stage replaced by a WGSL file from disk.
    pub fn with_overrides(vertex: Option<&Path>, fragment: Option<&Path>) -> anyhow::Result<Self> {
        let mut sources = Self::embedded()?;
        if let Some(path) = vertex {
            sources.vertex = Cow::Owned(read_source(path)?);
        }
        if let Some(path) = fragment {
            sources.fragment = Cow::Owned(read_source(path)?);
        }
        Ok(sources)
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    log::info!("Loading shader source from {}", path.display());
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shader source {}", path.display()))
}

/// Compiled and linked render pipeline for the rectangle, plus the matrix
/// uniform it reads.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    matrix_buffer: wgpu::Buffer,
}

impl ShaderProgram {
    pub const POSITION_LOCATION: u32 = 0;
    pub const COLOR_LOCATION: u32 = 1;
    pub const MATRIX_BINDING: u32 = 0;

    const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: Self::POSITION_LOCATION,
    }];

    const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 0,
        shader_location: Self::COLOR_LOCATION,
    }];

    /// Compiles both stages and links them for `target_format`.
    ///
    /// Driver diagnostics are logged and returned in the error; the caller
    /// must not go on to render without a program.
    pub async fn build(
        device: &wgpu::Device,
        sources: &ShaderSources,
        target_format: wgpu::TextureFormat,
    ) -> Result<Self, PipelineError> {
        let vertex = compile(device, ShaderStage::Vertex, &sources.vertex).await?;
        let fragment = compile(device, ShaderStage::Fragment, &sources.fragment).await?;

        let matrix_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Matrix Buffer"),
            contents: bytemuck::cast_slice(&[MatrixUniform::new(&Mat3::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: Self::MATRIX_BINDING,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(MatrixUniform::size()),
                },
                count: None,
            }],
            label: Some("matrix_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: Self::MATRIX_BINDING,
                resource: matrix_buffer.as_entire_binding(),
            }],
            label: Some("matrix_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rectangle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Buffer order matches GeometryBuffers::POSITION_SLOT / COLOR_SLOT.
        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &Self::COLOR_ATTRIBUTES,
            },
        ];

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rectangle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });
        if let Some(err) = device.pop_error_scope().await {
            let log = err.to_string();
            log::error!("Program link failed:\n{}", log);
            return Err(PipelineError::ProgramLink { log });
        }

        log::info!("Shader program linked ({:?})", target_format);

        Ok(Self {
            pipeline,
            bind_group,
            matrix_buffer,
        })
    }

    /// Uploads the transform for the next draw.
    pub fn set_matrix(&self, queue: &wgpu::Queue, matrix: &Mat3) {
        queue.write_buffer(
            &self.matrix_buffer,
            0,
            bytemuck::cast_slice(&[MatrixUniform::new(matrix)]),
        );
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
    }
}

async fn compile(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, PipelineError> {
    let label = match stage {
        ShaderStage::Vertex => "Vertex Shader",
        ShaderStage::Fragment => "Fragment Shader",
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    });
    let scope_error = device.pop_error_scope().await;

    let info = module.get_compilation_info().await;
    let mut errors = Vec::new();
    for message in &info.messages {
        let location = message
            .location
            .as_ref()
            .map(|loc| (loc.line_number, loc.line_position));
        let line = format_diagnostic(location, &message.message);
        match message.message_type {
            wgpu::CompilationMessageType::Error => errors.push(line),
            wgpu::CompilationMessageType::Warning => log::warn!("{} shader: {}", stage, line),
            wgpu::CompilationMessageType::Info => log::debug!("{} shader: {}", stage, line),
        }
    }

    if errors.is_empty() {
        if let Some(err) = scope_error {
            errors.push(err.to_string());
        }
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        let log = errors.join("\n");
        log::error!("{} shader compilation failed:\n{}", stage, log);
        Err(PipelineError::ShaderCompilation { stage, log })
    }
}

/// `line:col message`, or just the message when the driver gave no location.
fn format_diagnostic(location: Option<(u32, u32)>, message: &str) -> String {
    match location {
        Some((line, col)) => format!("{}:{} {}", line, col, message),
        None => message.to_string(),
    }
}
