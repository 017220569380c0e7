//! GPU-accelerated effect rendering (optional `gpu` feature).
//!
//! The engine's effect state is computed on the CPU either way; this
//! module uploads that state and draws it with wgpu. Initialization
//! failure is not an error: an [`EffectRenderer`] without a context
//! simply no-ops, and the host falls back to its own presentation of
//! the CPU-side state.

mod context;
mod instance_buffer;
mod overlay_pass;
mod particle_renderer;

pub use context::{GpuContext, GpuContextError};
pub use instance_buffer::InstanceBuffer;
pub use overlay_pass::OverlayPass;
pub use particle_renderer::{ParticleInstance, ParticleRenderer};

use glam::{Mat4, Vec3};

use crate::overlay::OverlayState;
use crate::particles::Particle;

/// Everything needed to draw one frame of transition effects.
pub struct EffectFrame<'a> {
    /// Live particles from every active system.
    pub particles: &'a [Particle],
    /// Camera path offset applied to all particle positions.
    pub camera_offset: Vec3,
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Current overlay blend state.
    pub overlay: OverlayState,
    /// Overlay tint, usually the target system color.
    pub overlay_tint: [f32; 3],
    /// Overall transition progress in `[0, 1]`.
    pub progress: f32,
}

/// Owns the GPU context and both effect passes.
///
/// Construct with [`initialize`](Self::initialize) for a headless
/// context or [`with_context`](Self::with_context) when the host
/// already has one. A renderer without a context renders nothing.
pub struct EffectRenderer {
    context: Option<GpuContext>,
    particles: Option<ParticleRenderer>,
    overlay: Option<OverlayPass>,
}

impl EffectRenderer {
    /// Probe for a headless GPU context. Degrades to a no-op renderer
    /// when no adapter or device is available.
    #[must_use]
    pub fn initialize(width: u32, height: u32) -> Self {
        match pollster::block_on(GpuContext::headless(width, height)) {
            Ok(context) => Self::with_context(context),
            Err(err) => {
                log::warn!("GPU unavailable, effects stay CPU-side: {err}");
                Self {
                    context: None,
                    particles: None,
                    overlay: None,
                }
            }
        }
    }

    /// Build both effect passes against a host-provided context.
    #[must_use]
    pub fn with_context(context: GpuContext) -> Self {
        let particles = ParticleRenderer::new(&context);
        let overlay = OverlayPass::new(&context);
        Self {
            context: Some(context),
            particles: Some(particles),
            overlay: Some(overlay),
        }
    }

    /// Whether a GPU context was acquired.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// The underlying context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&GpuContext> {
        self.context.as_ref()
    }

    /// Draw one frame of effects into `target`, loading its existing
    /// contents. No-ops without a context.
    pub fn render(&mut self, target: &wgpu::TextureView, frame: &EffectFrame<'_>) {
        let (Some(context), Some(particles), Some(overlay)) = (
            self.context.as_ref(),
            self.particles.as_mut(),
            self.overlay.as_ref(),
        ) else {
            return;
        };

        particles.upload(
            context,
            frame.particles,
            frame.camera_offset,
            frame.view_proj,
        );
        overlay.update(context, &frame.overlay, frame.overlay_tint, frame.progress);

        let mut encoder = context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Transition Effects Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            particles.render(&mut pass);
            overlay.render(&mut pass);
        }
        context.submit(encoder);
    }
}
