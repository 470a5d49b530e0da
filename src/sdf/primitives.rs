use crate::math::Vec3;

pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

pub fn sd_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    let outside = q.max(Vec3::ZERO);
    outside.length() + q.max_component().min(0.0)
}

pub fn sd_torus(p: Vec3, major: f32, minor: f32) -> f32 {
    let ring = (p.x * p.x + p.z * p.z).sqrt() - major;
    (ring * ring + p.y * p.y).sqrt() - minor
}

// a == b collapses to a sphere around a.
pub fn sd_capsule(p: Vec3, a: Vec3, b: Vec3, radius: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let len_sq = ba.dot(ba);
    let h = if len_sq > 0.0 {
        (pa.dot(ba) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (pa - (ba * h)).length() - radius
}
