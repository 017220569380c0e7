//! Fullscreen overlay pass.
//!
//! Renders the same overlay state the CPU path derives, so the two
//! presentation paths stay visually equivalent: the uniform carries the
//! evaluated opacity curve, not raw progress.

use wgpu::util::DeviceExt;

use super::context::GpuContext;
use crate::overlay::OverlayState;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayUniform {
    /// rgb tint, a = opacity.
    color: [f32; 4],
    /// progress, scale, rotation, x offset (percent).
    params: [f32; 4],
}

/// Blends a tinted fullscreen layer over the scene.
pub struct OverlayPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl OverlayPass {
    /// Build the fullscreen blend pipeline.
    #[must_use]
    pub fn new(context: &GpuContext) -> Self {
        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Overlay Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("overlay.wgsl").into(),
                ),
            },
        );

        let uniform = OverlayUniform {
            color: [1.0, 1.0, 1.0, 0.0],
            params: [0.0, 1.0, 0.0, 0.0],
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Overlay Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Overlay Bind Group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Overlay Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Overlay Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(
                            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
                        ),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    /// Upload this frame's evaluated overlay state.
    pub fn update(
        &self,
        context: &GpuContext,
        state: &OverlayState,
        tint: [f32; 3],
        progress: f32,
    ) {
        let uniform = OverlayUniform {
            color: [tint[0], tint[1], tint[2], state.opacity],
            params: [
                progress,
                state.scale,
                state.rotation,
                state.position[0],
            ],
        };
        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );
    }

    /// Record the fullscreen blend into an existing render pass.
    pub fn render<'pass>(
        &'pass self,
        render_pass: &mut wgpu::RenderPass<'pass>,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
