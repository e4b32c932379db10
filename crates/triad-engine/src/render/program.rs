use wgpu::util::DeviceExt;

use crate::device::{DebugChannel, DebugMessage, InitError};
use crate::paint::Color;

use super::geometry::GeometryBuffer;
use super::vertex::Vertex;

/// Pass-through vertex stage with a uniform fill color.
///
/// Entry points `vs_main`/`fs_main`; the color lives at group 0, binding 0.
pub const SOLID_COLOR_WGSL: &str = include_str!("shaders/solid.wgsl");

const COLOR_UNIFORM_SIZE: u64 = std::mem::size_of::<[f32; 4]>() as u64;

/// Inputs for building a `ShaderProgram`.
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    /// WGSL source exposing `vs_main` and `fs_main`.
    pub source: &'a str,
    pub target_format: wgpu::TextureFormat,
    /// Fill color written to the uniform once at creation.
    pub color: Color,
}

/// Compiled and linked render pipeline plus its uniform color binding.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    _color_ubo: wgpu::Buffer,
}

impl ShaderProgram {
    /// Compiles `desc.source`, links it into a pipeline and uploads the color.
    ///
    /// Module and pipeline creation each run inside a validation error scope,
    /// so failures come back as `InitError::ShaderCompile` and
    /// `InitError::ProgramLink` whether or not `debug` writes to the log.
    /// Errors already pending on `debug` are left alone.
    pub fn new(
        device: &wgpu::Device,
        debug: &DebugChannel,
        desc: &ProgramDesc<'_>,
    ) -> Result<Self, InitError> {
        let compile_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });
        let module_error = pollster::block_on(compile_scope.pop());

        let mut compile_errors = check_compilation(&shader, debug);
        if let Some(err) = module_error {
            let msg = DebugMessage::from_wgpu_error(debug.next_id(), &err);
            debug.emit(&msg);
            if compile_errors.is_empty() {
                compile_errors.push(msg.message);
            }
        }
        if !compile_errors.is_empty() {
            return Err(InitError::ShaderCompile {
                messages: compile_errors,
            });
        }

        let link_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("triad color bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(COLOR_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triad program layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(link_scope.pop()) {
            let msg = DebugMessage::from_wgpu_error(debug.next_id(), &err);
            debug.emit(&msg);
            return Err(InitError::ProgramLink {
                message: msg.message,
            });
        }

        let color_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triad color ubo"),
            contents: bytemuck::bytes_of(&desc.color.to_array()),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("triad color bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_ubo.as_entire_binding(),
            }],
        });

        log::debug!("{}: program linked", desc.label);

        Ok(Self {
            pipeline,
            bind_group,
            _color_ubo: color_ubo,
        })
    }

    /// Records one non-instanced draw of every vertex in `geometry`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, geometry: &GeometryBuffer) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, geometry.buffer().slice(..));
        rpass.draw(0..geometry.vertex_count(), 0..1);
    }
}

/// Logs compiler diagnostics through `debug`, returning the error messages.
fn check_compilation(shader: &wgpu::ShaderModule, debug: &DebugChannel) -> Vec<String> {
    let info = pollster::block_on(shader.get_compilation_info());

    let mut errors = Vec::new();
    for cm in &info.messages {
        let msg = DebugMessage::from_compilation(debug.next_id(), cm);
        debug.emit(&msg);
        if msg.is_error() {
            errors.push(msg.message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn headless() -> (wgpu::Device, wgpu::Queue) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
            .expect("adapter");
        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).expect("device")
    }

    fn desc(source: &str) -> ProgramDesc<'_> {
        ProgramDesc {
            label: "test program",
            source,
            target_format: TARGET,
            color: Color::WHITE,
        }
    }

    #[test]
    fn color_uniform_is_vec4() {
        assert_eq!(COLOR_UNIFORM_SIZE, 16);
        assert!(SOLID_COLOR_WGSL.contains("fn vs_main"));
        assert!(SOLID_COLOR_WGSL.contains("fn fs_main"));
    }

    /// Valid WGSL whose vertex input sits at a location the vertex layout
    /// does not provide.
    const MISMATCHED_INPUT_WGSL: &str = r#"
@vertex
fn vs_main(@location(1) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

    #[test]
    #[ignore = "requires GPU"]
    fn solid_program_links() {
        let (device, _queue) = headless();
        let debug = DebugChannel::new();
        debug.install(&device);

        let program = ShaderProgram::new(&device, &debug, &desc(SOLID_COLOR_WGSL));
        assert!(program.is_ok(), "{:?}", program.err());
        assert_eq!(debug.take_pending(), 0);
    }

    #[test]
    #[ignore = "requires GPU"]
    fn broken_source_reports_compile_error() {
        let (device, _queue) = headless();
        let debug = DebugChannel::new();
        debug.install(&device);

        let err = ShaderProgram::new(&device, &debug, &desc("@vertex fn vs_main( {"))
            .err()
            .expect("compile must fail");
        assert!(matches!(err, InitError::ShaderCompile { .. }));
        assert!(err.is_partial());
        assert_eq!(debug.take_pending(), 0);
    }

    #[test]
    #[ignore = "requires GPU"]
    fn compile_error_returned_without_installed_channel() {
        let (device, _queue) = headless();
        let debug = DebugChannel::with_output(false);

        let err = ShaderProgram::new(&device, &debug, &desc("@vertex fn vs_main( {"))
            .err()
            .expect("compile must fail");
        assert!(matches!(err, InitError::ShaderCompile { .. }));
    }

    #[test]
    #[ignore = "requires GPU"]
    fn mismatched_vertex_input_reports_link_error() {
        let (device, _queue) = headless();
        let debug = DebugChannel::new();
        debug.install(&device);

        let err = ShaderProgram::new(&device, &debug, &desc(MISMATCHED_INPUT_WGSL))
            .err()
            .expect("link must fail");
        assert!(matches!(err, InitError::ProgramLink { .. }), "{err:?}");
        assert!(err.is_partial());
    }

    #[test]
    #[ignore = "requires GPU"]
    fn missing_entry_point_reports_link_error() {
        let (device, _queue) = headless();
        let debug = DebugChannel::with_output(false);
        let source = SOLID_COLOR_WGSL.replace("fn fs_main", "fn fs_other");

        let err = ShaderProgram::new(&device, &debug, &desc(&source))
            .err()
            .expect("link must fail");
        assert!(matches!(err, InitError::ProgramLink { .. }), "{err:?}");
    }

    #[test]
    #[ignore = "requires GPU"]
    fn triangle_buffer_is_three_vertices() {
        let (device, _queue) = headless();
        let tri = [
            Vertex::new(0.0, 0.5, 0.0),
            Vertex::new(0.5, -0.5, 0.0),
            Vertex::new(-0.5, -0.5, 0.0),
        ];
        let geometry = GeometryBuffer::new(&device, "test triangle", &tri).expect("geometry");
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.byte_size(), 3 * std::mem::size_of::<Vertex>() as u64);
    }
}
