use crate::scene::Scene;
use cubewalk_camera::CameraState;
use cubewalk_common::InstanceTransform;
use glam::{Mat4, Vec3};

/// Model matrix `T(translation) * S(scale) * R(axis, angle) * T(offset)`.
///
/// A missing or degenerate rotation axis contributes the identity.
pub fn model_matrix(t: &InstanceTransform) -> Mat4 {
    let mut model = Mat4::from_translation(t.translation) * Mat4::from_scale(t.scale);
    if let Some(rotation) = t.rotation {
        if let Some(axis) = rotation.unit_axis() {
            model *= Mat4::from_axis_angle(axis, rotation.degrees.to_radians());
        }
    }
    if t.offset != Vec3::ZERO {
        model *= Mat4::from_translation(t.offset);
    }
    model
}

/// Per-instance matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub model: Mat4,
    /// `projection * view * model`.
    pub mvp: Mat4,
}

/// Everything the renderer needs to draw one frame of a scene.
///
/// Rebuilt every frame; `transforms[i]` belongs to `scene.instances[i]`.
#[derive(Debug, Clone)]
pub struct FramePlan<'a> {
    pub scene: &'a Scene,
    pub eye: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    pub transforms: Vec<FrameTransform>,
}

impl<'a> FramePlan<'a> {
    pub fn build(scene: &'a Scene, camera: &CameraState, aspect: f32) -> Self {
        Self::from_matrices(
            scene,
            camera.position,
            camera.view_matrix(),
            camera.projection_matrix(aspect),
        )
    }

    pub fn from_matrices(scene: &'a Scene, eye: Vec3, view: Mat4, projection: Mat4) -> Self {
        let view_projection = projection * view;
        let transforms = scene
            .instances
            .iter()
            .map(|instance| {
                let model = model_matrix(&instance.transform);
                FrameTransform {
                    model,
                    mvp: view_projection * model,
                }
            })
            .collect();
        Self {
            scene,
            eye,
            view,
            projection,
            transforms,
        }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MeshInstance;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    fn single(transform: InstanceTransform) -> Scene {
        Scene::new("test", vec![MeshInstance::new("only", transform)])
    }

    #[test]
    fn identity_transform_gives_identity_model() {
        assert_eq!(model_matrix(&InstanceTransform::default()), Mat4::IDENTITY);
    }

    #[test]
    fn translate_is_applied_after_scale() {
        let t = InstanceTransform::at(Vec3::new(0.5, 0.0, -1.0)).with_uniform_scale(0.3);
        let p = model_matrix(&t).transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(0.8, 0.3, -0.7), EPS));
    }

    #[test]
    fn rotation_precedes_scale_and_offset_precedes_rotation() {
        let t = InstanceTransform::at(Vec3::new(10.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(Vec3::Z, 90.0)
            .with_offset(Vec3::new(0.0, 1.0, 0.0));
        // offset (0,1,0) -> rotated to (-1,0,0) -> scaled to (-2,0,0) -> translated.
        let p = model_matrix(&t).transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let a = InstanceTransform::default().with_rotation(Vec3::new(0.0, 2.0, 2.0), 30.0);
        let b = InstanceTransform::default().with_rotation(Vec3::new(0.0, 1.0, 1.0), 30.0);
        assert!(model_matrix(&a).abs_diff_eq(model_matrix(&b), EPS));
        let r = model_matrix(&a).transform_vector3(Vec3::X);
        assert!((r.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn degenerate_axis_is_ignored() {
        let t = InstanceTransform::default().with_rotation(Vec3::ZERO, 45.0);
        assert_eq!(model_matrix(&t), Mat4::IDENTITY);
    }

    #[test]
    fn identity_model_maps_to_expected_clip_space() {
        let scene = single(InstanceTransform::default());
        let camera = CameraState::new(Vec3::ZERO, -90.0, 0.0);
        let plan = FramePlan::build(&scene, &camera, 1.0);
        let mvp = plan.transforms[0].mvp;

        // Straight ahead lands in the middle of the screen.
        let clip = mvp * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!(clip.x.abs() < EPS && clip.y.abs() < EPS);
        assert!((clip.w - 1.0).abs() < EPS);
        let ndc_z = clip.z / clip.w;
        assert!(ndc_z > 0.0 && ndc_z < 1.0);

        // Near plane maps to depth 0, far plane to depth 1.
        let near = mvp * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        let far = mvp * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);

        // A point on the top edge of a 45 degree frustum hits y = 1 in NDC.
        let edge_y = (22.5_f32).to_radians().tan();
        let top = mvp * Vec4::new(0.0, edge_y, -1.0, 1.0);
        assert!((top.y / top.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mvp_is_projection_view_model() {
        let t = InstanceTransform::at(Vec3::new(3.0, -1.0, -3.0))
            .with_uniform_scale(0.6)
            .with_rotation(Vec3::new(1.0, 0.0, 1.0), 3.0);
        let scene = single(t);
        let camera = CameraState::default();
        let plan = FramePlan::build(&scene, &camera, 1.5);
        let expected =
            camera.projection_matrix(1.5) * camera.view_matrix() * model_matrix(&t);
        assert!(plan.transforms[0].mvp.abs_diff_eq(expected, EPS));
        assert_eq!(plan.transforms[0].model, model_matrix(&t));
        assert_eq!(plan.eye, camera.position);
    }

    #[test]
    fn plan_follows_table_order() {
        let scene = Scene::new(
            "two",
            vec![
                MeshInstance::new("a", InstanceTransform::at(Vec3::X)),
                MeshInstance::new("b", InstanceTransform::at(Vec3::Y)),
            ],
        );
        let plan = FramePlan::build(&scene, &CameraState::default(), 1.0);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.transforms[0].model.w_axis.truncate(), Vec3::X);
        assert_eq!(plan.transforms[1].model.w_axis.truncate(), Vec3::Y);
    }
}
