use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if !len.is_finite() || len <= f32::EPSILON {
            return None;
        }
        Some(self / len)
    }

    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(self)
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    pub fn max_component(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    pub fn clamp01(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    pub fn powf(self, exponent: f32) -> Self {
        Self::new(
            self.x.max(0.0).powf(exponent),
            self.y.max(0.0).powf(exponent),
            self.z.max(0.0).powf(exponent),
        )
    }

    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        self + ((rhs - self) * t)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(self, t: f32) -> Vec3 {
        self.origin + (self.direction * t)
    }
}

pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - (normal * (2.0 * direction.dot(normal)))
}

pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    (a * (1.0 - t)) + (b * t)
}

// Same turn as GLSL `v *= mat2(c, -s, s, c)`.
pub fn rotate_pair(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    ((c * a) - (s * b), (s * a) + (c * b))
}

// Row-vector rotations: these match `p *= rotateY(angle)` and `p *= rotateX(angle)`.
pub fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new((c * p.x) + (s * p.z), p.y, (c * p.z) - (s * p.x))
}

pub fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, (c * p.y) - (s * p.z), (s * p.y) + (c * p.z))
}

pub fn hash_u32(mut value: u32) -> u32 {
    value ^= value >> 16;
    value = value.wrapping_mul(0x7feb_352d);
    value ^= value >> 15;
    value = value.wrapping_mul(0x846c_a68b);
    value ^= value >> 16;
    value
}

pub fn random01(seed: u32) -> f32 {
    hash_u32(seed) as f32 / u32::MAX as f32
}

pub fn sample_jitter(x: u32, y: u32, sample: u32, axis: u32) -> f32 {
    let seed = x
        .wrapping_mul(1973)
        .wrapping_add(y.wrapping_mul(9277))
        .wrapping_add(sample.wrapping_mul(26699))
        .wrapping_add(axis.wrapping_mul(104_729))
        ^ 0x68bc_21eb;
    random01(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn rotations_preserve_length() {
        let p = Vec3::new(0.3, -1.2, 2.5);
        for step in 0..16 {
            let angle = step as f32 * 0.41;
            assert!((rotate_y(p, angle).length() - p.length()).abs() < 1e-5);
            assert!((rotate_x(p, angle).length() - p.length()).abs() < 1e-5);
        }
    }

    #[test]
    fn rotate_y_quarter_turn_maps_x_to_minus_z() {
        let rotated = rotate_y(Vec3::new(1.0, 0.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(approx(rotated, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn rotate_x_quarter_turn_maps_y_to_z() {
        let rotated = rotate_x(Vec3::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(approx(rotated, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Vec3::ZERO.try_normalize().is_none());
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn random01_stays_in_unit_interval() {
        for seed in 0..256 {
            let value = random01(seed);
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
