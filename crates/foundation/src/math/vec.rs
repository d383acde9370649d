#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps both components into `[lo, hi]`.
    pub fn clamp(self, lo: f64, hi: f64) -> Self {
        Self::new(self.x.clamp(lo, hi), self.y.clamp(lo, hi))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vec2, Vec3};

    #[test]
    fn vec2_clamp() {
        assert_eq!(Vec2::new(-3.0, 140.0).clamp(0.0, 100.0), Vec2::new(0.0, 100.0));
        assert_eq!(Vec2::new(25.5, 75.0).clamp(0.0, 100.0), Vec2::new(25.5, 75.0));
    }

    #[test]
    fn vec3_sub_and_array() {
        let a = Vec3::new(1.0, 2.0, -1.0);
        let b = Vec3::new(0.5, -2.0, 3.0);
        assert_eq!(a - b, Vec3::new(0.5, 4.0, -4.0));
        assert_eq!(a.as_array(), [1.0, 2.0, -1.0]);
    }
}
