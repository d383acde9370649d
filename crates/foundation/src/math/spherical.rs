use super::Vec3;

/// Direction seen from the center of a panorama sphere, in degrees.
///
/// Conventions:
/// - `yaw_deg = 0` looks down the forward (-Z) axis, yaw increases clockwise
///   when seen from above (towards +X).
/// - `pitch_deg` is elevation above the horizon (+Y is up).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Spherical {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
}

impl Spherical {
    pub fn new(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self { yaw_deg, pitch_deg }
    }
}

pub fn spherical_to_cartesian(dir: Spherical, radius: f64) -> Vec3 {
    let yaw = dir.yaw_deg.to_radians();
    let pitch = dir.pitch_deg.to_radians();

    let x = radius * pitch.cos() * yaw.sin();
    let y = radius * pitch.sin();
    let z = -radius * pitch.cos() * yaw.cos();

    Vec3::new(x, y, z)
}

/// Rotation about +Y (radians) that turns an object's +Z axis towards
/// `target` while keeping it upright.
///
/// Only the horizontal offset matters, so an object never flips when the
/// target passes above or behind it.
pub fn yaw_towards(from: Vec3, target: Vec3) -> f64 {
    let d = target - from;
    if d.x == 0.0 && d.z == 0.0 {
        return 0.0;
    }
    d.x.atan2(d.z)
}

#[cfg(test)]
mod tests {
    use super::{Spherical, spherical_to_cartesian, yaw_towards};
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn forward_is_negative_z() {
        let p = spherical_to_cartesian(Spherical::default(), 5.0);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, -5.0, 1e-12);
    }

    #[test]
    fn yaw_90_is_positive_x() {
        let p = spherical_to_cartesian(Spherical::new(90.0, 0.0), 5.0);
        assert_close(p.x, 5.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn pitch_up_is_positive_y() {
        let p = spherical_to_cartesian(Spherical::new(0.0, 90.0), 2.0);
        assert_close(p.y, 2.0, 1e-12);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn yaw_towards_origin_from_forward_marker() {
        // A marker straight ahead must turn around (+Z towards the viewer).
        let marker = Vec3::new(0.0, 0.0, -5.0);
        assert_close(yaw_towards(marker, Vec3::ZERO), 0.0, 1e-12);

        let marker = Vec3::new(5.0, 1.0, 0.0);
        assert_close(
            yaw_towards(marker, Vec3::ZERO),
            -std::f64::consts::FRAC_PI_2,
            1e-12,
        );
    }

    #[test]
    fn yaw_towards_ignores_height() {
        let a = yaw_towards(Vec3::new(1.0, -4.0, 2.0), Vec3::new(0.0, 3.0, 0.0));
        let b = yaw_towards(Vec3::new(1.0, 4.0, 2.0), Vec3::new(0.0, 0.0, 0.0));
        assert_close(a, b, 1e-12);
    }
}
