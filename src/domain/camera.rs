pub const ZOOM_MIN: f32 = 4.0;
pub const ZOOM_MAX: f32 = 15.0;
pub const DEFAULT_ZOOM: f32 = 8.0;
pub const PITCH_LIMIT: f32 = 1.5;

const BASE_EYE_DISTANCE: f32 = 8.0;
const EYE_DISTANCE_RANGE: f32 = 7.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub zoom: f32,
    pub target_zoom: f32,
    pub rotation_x: f32,
    pub target_rotation_x: f32,
    pub rotation_y: f32,
    pub target_rotation_y: f32,
    pub time: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            target_zoom: DEFAULT_ZOOM,
            rotation_x: 0.0,
            target_rotation_x: 0.0,
            rotation_y: 0.0,
            target_rotation_y: 0.0,
            time: 0.0,
        }
    }
}

impl CameraState {
    pub fn at_rest(zoom: f32, rotation_x: f32, rotation_y: f32) -> Self {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let rotation_x = rotation_x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            zoom,
            target_zoom: zoom,
            rotation_x,
            target_rotation_x: rotation_x,
            rotation_y,
            target_rotation_y: rotation_y,
            time: 0.0,
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.target_zoom = self.target_zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.rotation_x = self.rotation_x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.target_rotation_x = self.target_rotation_x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self
    }

    pub fn set_target_zoom(&mut self, zoom: f32) {
        self.target_zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn set_target_rotation_x(&mut self, pitch: f32) {
        self.target_rotation_x = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn ease(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        self.zoom = approach(self.zoom, self.target_zoom, alpha);
        self.rotation_x = approach(self.rotation_x, self.target_rotation_x, alpha);
        self.rotation_y = approach(self.rotation_y, self.target_rotation_y, alpha);
    }

    pub fn zoom_normalized(&self) -> f32 {
        (self.zoom - ZOOM_MIN) / (ZOOM_MAX - ZOOM_MIN)
    }

    pub fn eye_distance(&self) -> f32 {
        BASE_EYE_DISTANCE - (self.zoom_normalized() * EYE_DISTANCE_RANGE)
    }
}

pub fn approach(current: f32, target: f32, alpha: f32) -> f32 {
    current + ((target - current) * alpha)
}
