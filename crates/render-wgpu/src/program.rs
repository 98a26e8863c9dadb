use fractalspace_render::ShaderSources;

pub(crate) const VERTEX_ENTRY: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_main";

/// Build the quad pipeline from the two sources.
///
/// Each stage runs inside a validation error scope so compile and link
/// failures are reported with their stage; the returned pipeline may be
/// invalid, in which case draws with it produce undefined output.
pub(crate) fn build_pipeline(
    device: &wgpu::Device,
    sources: &ShaderSources,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let vertex = compile(device, "vertex_shader", &sources.vertex);
    let fragment = compile(device, "fragment_shader", &sources.fragment);

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quad_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(e) => tracing::error!(?format, "shader program linking error: {e}"),
        None => tracing::debug!(?format, "shader program linked"),
    }
    pipeline
}

fn compile(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(e) = pollster::block_on(device.pop_error_scope()) {
        tracing::error!(stage = label, "shader compilation error: {e}");
    }
    module
}
