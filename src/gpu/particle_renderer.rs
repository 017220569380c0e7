//! Instanced particle rendering.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::context::GpuContext;
use super::instance_buffer::InstanceBuffer;
use crate::particles::Particle;

/// Per-particle GPU instance data.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// World-space position before the camera offset.
    pub position: [f32; 3],
    /// Billboard size in world units.
    pub size: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Fade alpha in `[0, 1]`.
    pub opacity: f32,
}

impl ParticleInstance {
    fn from_particle(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size,
            color: p.color,
            opacity: p.opacity,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ViewUniform {
    view_proj: [[f32; 4]; 4],
    camera_offset: [f32; 4],
}

/// Draws the live particle pool as screen-facing billboards.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    instances: InstanceBuffer<ParticleInstance>,
    view_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ParticleRenderer {
    /// Build the billboard pipeline against the context's target format.
    #[must_use]
    pub fn new(context: &GpuContext) -> Self {
        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Particle Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("particles.wgsl").into(),
                ),
            },
        );

        let view = ViewUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_offset: [0.0; 4],
        };
        let view_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Particle View Buffer"),
                contents: bytemuck::bytes_of(&view),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Particle Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
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
                label: Some("Particle Bind Group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: view_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            },
        );

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32,
                2 => Float32x3,
                3 => Float32,
            ],
        };

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Particle Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        // Additive glow over the scene.
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::One,
                                dst_factor: wgpu::BlendFactor::One,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent::OVER,
                        }),
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
            instances: InstanceBuffer::new(
                &context.device,
                "Particle Instances",
                // Room for the emission headroom of a 100-count effect.
                200,
                wgpu::BufferUsages::VERTEX,
            ),
            view_buffer,
            bind_group,
        }
    }

    /// Upload the live pool and camera state for this frame.
    pub fn upload(
        &mut self,
        context: &GpuContext,
        particles: &[Particle],
        camera_offset: Vec3,
        view_proj: Mat4,
    ) {
        let data: Vec<ParticleInstance> = particles
            .iter()
            .map(ParticleInstance::from_particle)
            .collect();
        // Instance data binds as a vertex buffer, so reallocation needs
        // no bind group rebuild.
        let _ = self.instances.write(
            &context.device,
            &context.queue,
            &data,
        );

        let view = ViewUniform {
            view_proj: view_proj.to_cols_array_2d(),
            camera_offset: [
                camera_offset.x,
                camera_offset.y,
                camera_offset.z,
                0.0,
            ],
        };
        context.queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::bytes_of(&view),
        );
    }

    /// Record the draw into an existing render pass. No-ops when the
    /// pool is empty.
    pub fn render<'pass>(
        &'pass self,
        render_pass: &mut wgpu::RenderPass<'pass>,
    ) {
        if self.instances.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instances.buffer().slice(..));
        render_pass.draw(0..6, 0..self.instances.count() as u32);
    }
}
