use glam::Vec3;

/// Single point light with a fixed ambient/diffuse/specular (Phong) model.
///
/// [`Lighting::shade`] is the CPU reference for the lit shader; the two must
/// agree term for term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 6.0, 0.0),
            color: Vec3::ONE,
            ambient: 0.2,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

impl Lighting {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Lit color of a surface point with albedo `base`.
    pub fn shade(&self, normal: Vec3, frag_pos: Vec3, view_pos: Vec3, base: Vec3) -> Vec3 {
        let n = normal.normalize();
        let to_light = (self.position - frag_pos).normalize();
        let ambient = self.ambient * self.color;

        let diff = n.dot(to_light).max(0.0);
        let diffuse = diff * self.color;

        // No highlight on faces turned away from the light.
        let specular = if diff > 0.0 {
            let to_view = (view_pos - frag_pos).normalize();
            let reflected = reflect(-to_light, n);
            to_view.dot(reflected).max(0.0).powf(self.shininess) * self.specular * self.color
        } else {
            Vec3::ZERO
        };

        (ambient + diffuse + specular) * base
    }
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn light_behind_surface_is_ambient_only() {
        let light = Lighting::at(Vec3::new(0.0, -5.0, 0.0));
        let c = light.shade(Vec3::Y, Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Vec3::ONE);
        assert!(c.abs_diff_eq(Vec3::splat(0.2), EPS));
    }

    #[test]
    fn head_on_light_and_view_is_full_intensity() {
        let light = Lighting::at(Vec3::new(0.0, 5.0, 0.0));
        let c = light.shade(Vec3::Y, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), Vec3::ONE);
        // ambient 0.2 + diffuse 1.0 + specular 0.5
        assert!(c.abs_diff_eq(Vec3::splat(1.7), EPS));
    }

    #[test]
    fn grazing_light_has_no_diffuse() {
        let light = Lighting {
            specular: 0.0,
            ..Lighting::at(Vec3::new(10.0, 0.0, 0.0))
        };
        let c = light.shade(Vec3::Y, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::ONE);
        assert!(c.abs_diff_eq(Vec3::splat(0.2), EPS));
    }

    #[test]
    fn base_color_modulates_result() {
        let light = Lighting::at(Vec3::new(0.0, 5.0, 0.0));
        let c = light.shade(
            Vec3::Y,
            Vec3::ZERO,
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
        );
        assert!(c.abs_diff_eq(Vec3::new(1.7, 0.85, 0.0), EPS));
    }

    #[test]
    fn unnormalized_normal_is_accepted() {
        let light = Lighting::at(Vec3::new(0.0, 5.0, 0.0));
        let a = light.shade(Vec3::Y * 7.0, Vec3::ZERO, Vec3::Y, Vec3::ONE);
        let b = light.shade(Vec3::Y, Vec3::ZERO, Vec3::Y, Vec3::ONE);
        assert!(a.abs_diff_eq(b, EPS));
    }
}
