use crate::transform::FramePlan;
use glam::Vec4;

/// Renderer-agnostic interface.
///
/// A renderer reads a finished [`FramePlan`] and produces output. It never
/// mutates the scene or the camera.
pub trait Renderer {
    type Output;

    fn render(&self, plan: &FramePlan<'_>) -> Self::Output;
}

/// Text listing of a frame: camera, then every instance with the clip-space
/// position of its origin.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, plan: &FramePlan<'_>) -> String {
        let scene = plan.scene;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene '{}' ({} instances, {} faces, {}) ===\n",
            scene.name,
            scene.instances.len(),
            scene.face_count(),
            if scene.is_lit() { "lit" } else { "unlit" }
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2})\n",
            plan.eye.x, plan.eye.y, plan.eye.z
        ));

        for (instance, transform) in scene.instances.iter().zip(&plan.transforms) {
            let clip = transform.mvp * Vec4::W;
            let visible = clip.w > 0.0
                && clip.x.abs() <= clip.w
                && clip.y.abs() <= clip.w
                && (0.0..=clip.w).contains(&clip.z);
            let ndc = if clip.w.abs() > f32::EPSILON {
                format!(
                    "ndc=({:+.3}, {:+.3}, {:.3})",
                    clip.x / clip.w,
                    clip.y / clip.w,
                    clip.z / clip.w
                )
            } else {
                "ndc=(degenerate)".to_string()
            };
            out.push_str(&format!(
                "  {:<14} faces={} {}{}\n",
                instance.name,
                instance.faces.len(),
                ndc,
                if visible { "" } else { " [off-screen]" }
            ));
        }

        out
    }
}
