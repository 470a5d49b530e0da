use std::f32::consts::TAU;

use crate::domain::{AudioEnvelope, CameraState, SceneParameters};
use crate::domain::parameters::MAX_BOX_COUNT;
use crate::math::{rotate_pair, rotate_x, rotate_y, Vec3};
use crate::sdf::{sd_box, sd_capsule, sd_sphere, sd_torus, smooth_union, DistanceField};

const BOX_BASE_HALF_EXTENT: f32 = 0.4;
const BOX_SHRINK_PER_INDEX: f32 = 0.08;
const BOX_BASE_OFFSET: f32 = 2.0;
const BOX_OFFSET_PER_INDEX: f32 = 0.35;
const CAPSULE_BASE: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const CAPSULE_ORBIT_RADIUS: f32 = 2.0;

const BOX_BLEND_SCALE: f32 = 0.6;
const CAPSULE_BLEND_SCALE: f32 = 0.8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct OrbitingBox {
    half_extent: f32,
    offset: f32,
    spin_xy: f32,
    spin_xz: f32,
    placement: f32,
}

impl OrbitingBox {
    fn new(index: u32, time: f32, audio: AudioEnvelope) -> Self {
        let i = index as f32;
        Self {
            half_extent: BOX_BASE_HALF_EXTENT * (1.0 - (BOX_SHRINK_PER_INDEX * i)),
            offset: BOX_BASE_OFFSET + (BOX_OFFSET_PER_INDEX * i) + audio.bass,
            spin_xy: (time * (1.5 + (0.3 * i))) + (audio.high * 3.0),
            spin_xz: time * (0.7 + (0.2 * i)),
            placement: i * (TAU / MAX_BOX_COUNT as f32),
        }
    }

    fn distance(&self, p: Vec3) -> f32 {
        let mut q = rotate_y(p, self.placement);
        (q.x, q.y) = rotate_pair(q.x, q.y, self.spin_xy);
        (q.x, q.z) = rotate_pair(q.x, q.z, self.spin_xz);
        sd_box(
            q + Vec3::new(self.offset, 0.0, 0.0),
            Vec3::splat(self.half_extent),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneComponents {
    pub sphere: f32,
    pub torus: f32,
    pub boxes: f32,
    pub capsule: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    time: f32,
    yaw: f32,
    pitch: f32,
    sphere_radius: f32,
    deformation: f32,
    torus_major: f32,
    torus_minor: f32,
    torus_spin: f32,
    boxes: [OrbitingBox; MAX_BOX_COUNT as usize],
    box_count: usize,
    capsule_tip: Vec3,
    capsule_radius: f32,
    bandwidth: f32,
}

impl Scene {
    pub fn new(
        time: f32,
        camera: &CameraState,
        parameters: &SceneParameters,
        audio: AudioEnvelope,
    ) -> Self {
        let deformation = parameters.deformation;
        let complexity = parameters.complexity_level as f32;
        let box_count = parameters.box_count();

        let mut boxes = [OrbitingBox::default(); MAX_BOX_COUNT as usize];
        for (index, slot) in boxes.iter_mut().take(box_count as usize).enumerate() {
            *slot = OrbitingBox::new(index as u32, time, audio);
        }

        let orbit = (time * complexity * 0.3) + (audio.volume * 5.0);
        let capsule_tip = Vec3::new(
            orbit.sin() * CAPSULE_ORBIT_RADIUS,
            1.0,
            orbit.cos() * CAPSULE_ORBIT_RADIUS,
        );

        Self {
            time,
            yaw: (time * parameters.rotation_speed_auto) + (camera.rotation_y * 2.0),
            pitch: camera.rotation_x,
            sphere_radius: parameters.sphere_size * (1.0 + (audio.bass * 0.3)),
            deformation,
            torus_major: 0.5 + (0.3 * complexity),
            torus_minor: 0.3 + deformation,
            torus_spin: time + (audio.mid * 2.0),
            boxes,
            box_count: box_count as usize,
            capsule_tip,
            capsule_radius: 0.2 + (audio.volume * 0.1) + (deformation * 0.05),
            bandwidth: parameters.blend_bandwidth(),
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn deformation(&self) -> f32 {
        self.deformation
    }

    pub fn box_count(&self) -> usize {
        self.box_count
    }

    pub fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    pub fn to_local(&self, p: Vec3) -> Vec3 {
        rotate_x(rotate_y(p, self.yaw), self.pitch)
    }

    pub fn components(&self, p: Vec3) -> SceneComponents {
        let p = self.to_local(p);

        let wobble = (self.time + (p.x * 2.0)).sin() * self.deformation;
        let sphere = sd_sphere(p, self.sphere_radius + wobble);

        let mut torus_p = p;
        (torus_p.x, torus_p.y) = rotate_pair(p.x, p.y, self.torus_spin);
        let torus = sd_torus(torus_p, self.torus_major, self.torus_minor);

        let boxes = self.boxes[..self.box_count]
            .iter()
            .map(|orbiting| orbiting.distance(p))
            .fold(f32::INFINITY, f32::min);

        let capsule = sd_capsule(p, CAPSULE_BASE, self.capsule_tip, self.capsule_radius);

        SceneComponents {
            sphere,
            torus,
            boxes,
            capsule,
        }
    }

    pub fn distance(&self, p: Vec3) -> f32 {
        let parts = self.components(p);
        let k = self.bandwidth;
        let shape = smooth_union(parts.sphere, parts.torus, k);
        let shape = smooth_union(shape, parts.boxes, k * BOX_BLEND_SCALE);
        smooth_union(shape, parts.capsule, k * CAPSULE_BLEND_SCALE)
    }
}

impl DistanceField for Scene {
    fn distance(&self, p: Vec3) -> f32 {
        Scene::distance(self, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::camera::DEFAULT_ZOOM;
    use crate::domain::presets::build_preset;

    fn still_scene(complexity_level: u32) -> Scene {
        let params = SceneParameters {
            complexity_level,
            ..build_preset("still").unwrap()
        };
        Scene::new(
            0.0,
            &CameraState::default(),
            &params,
            AudioEnvelope::silent(),
        )
    }

    #[test]
    fn box_count_follows_complexity() {
        assert_eq!(still_scene(1).box_count(), 1);
        assert_eq!(still_scene(5).box_count(), 5);
        assert_eq!(still_scene(10).box_count(), 8);
    }

    #[test]
    fn sphere_component_matches_parameters_at_rest() {
        let scene = still_scene(1);
        let parts = scene.components(Vec3::new(0.0, 0.0, -1.5));
        assert!(parts.sphere.abs() < 1e-5);
    }

    #[test]
    fn bass_inflates_the_sphere() {
        let params = build_preset("still").unwrap();
        let loud = AudioEnvelope::new(1.0, 0.0, 0.0, 0.0);
        let scene = Scene::new(0.0, &CameraState::default(), &params, loud);
        // 1.5 * 1.3
        let parts = scene.components(Vec3::new(0.0, 0.0, -1.95));
        assert!(parts.sphere.abs() < 1e-5);
    }

    #[test]
    fn first_box_sits_on_the_negative_x_axis() {
        let scene = still_scene(1);
        let parts = scene.components(Vec3::new(-2.0, 0.0, 0.0));
        assert!((parts.boxes + 0.4).abs() < 1e-5);
    }

    #[test]
    fn more_boxes_never_increase_the_box_distance() {
        let point = Vec3::new(0.7, 1.9, -2.2);
        let mut previous = f32::INFINITY;
        for level in 1..=8 {
            let d = still_scene(level).components(point).boxes;
            assert!(d <= previous + 1e-6);
            previous = d;
        }
    }

    #[test]
    fn blended_distance_is_below_every_component() {
        let scene = still_scene(4);
        for i in 0..50 {
            let t = i as f32 * 0.13;
            let p = Vec3::new(t.sin() * 3.0, t.cos() * 2.0, (t * 0.7).sin() * 3.0);
            let parts = scene.components(p);
            let smallest = parts
                .sphere
                .min(parts.torus)
                .min(parts.boxes)
                .min(parts.capsule);
            assert!(scene.distance(p) <= smallest + 1e-5);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let params = build_preset("panel_defaults").unwrap();
        let camera = CameraState::at_rest(6.0, 0.4, -1.1);
        let audio = AudioEnvelope::new(0.3, 0.6, 0.2, 0.4);
        let a = Scene::new(2.75, &camera, &params, audio);
        let b = Scene::new(2.75, &camera, &params, audio);
        let p = Vec3::new(0.3, -0.8, 1.7);
        assert_eq!(a.distance(p), b.distance(p));
    }

    #[test]
    fn manual_yaw_rotates_the_scene() {
        let params = build_preset("still").unwrap();
        let turned = CameraState::at_rest(DEFAULT_ZOOM, 0.0, std::f32::consts::FRAC_PI_4);
        let scene = Scene::new(0.0, &turned, &params, AudioEnvelope::silent());
        // Manual yaw is doubled: a quarter turn carries the -X box onto -Z.
        let parts = scene.components(Vec3::new(0.0, 0.0, -2.0));
        assert!((parts.boxes + 0.4).abs() < 1e-4);
    }
}
