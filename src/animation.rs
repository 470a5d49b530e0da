use std::f32::consts::{PI, TAU};

use serde::Deserialize;

use crate::domain::CameraState;

const IDLE_SMOOTHING: f32 = 0.1;
const DRAG_SMOOTHING: f32 = 0.15;
const RESUME_DELAY_SECONDS: f32 = 3.0;
const WHEEL_ZOOM_SENSITIVITY: f32 = 0.001;
const AUTO_PITCH_AMPLITUDE: f32 = 0.5;
const AUTO_PITCH_RATE: f32 = 0.1;

// Drag deltas are fractions of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerInput {
    Press,
    Drag {
        dx: f32,
        dy: f32,
    },
    Release,
    Leave,
    Wheel {
        #[serde(rename = "deltaY")]
        delta_y: f32,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct Animator {
    camera: CameraState,
    pointer_down: bool,
    auto_rotation: bool,
    resume_at: Option<f32>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(CameraState::default())
    }
}

impl Animator {
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera: camera.sanitized(),
            pointer_down: false,
            auto_rotation: true,
            resume_at: None,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer_down
    }

    pub fn handle(&mut self, input: PointerInput, now: f32) {
        match input {
            PointerInput::Press => {
                self.pointer_down = true;
                self.auto_rotation = false;
                self.resume_at = None;
            }
            PointerInput::Drag { dx, dy } => {
                if !self.pointer_down {
                    return;
                }
                self.camera.target_rotation_y += dx * TAU;
                let pitch = self.camera.target_rotation_x + (dy * PI);
                self.camera.set_target_rotation_x(pitch);
            }
            PointerInput::Release => {
                if self.pointer_down {
                    self.pointer_down = false;
                    self.schedule_resume(now);
                }
            }
            // Ends the drag but leaves auto-rotation off until the next release or wheel.
            PointerInput::Leave => {
                self.pointer_down = false;
            }
            PointerInput::Wheel { delta_y } => {
                let zoom = self.camera.target_zoom - (delta_y * WHEEL_ZOOM_SENSITIVITY);
                self.camera.set_target_zoom(zoom);
                self.auto_rotation = false;
                self.schedule_resume(now);
            }
        }
    }

    pub fn tick(&mut self, time: f32, rotation_speed: f32) -> CameraState {
        self.camera.time = time;

        if let Some(resume_at) = self.resume_at {
            if !self.pointer_down && time >= resume_at {
                self.auto_rotation = true;
                self.resume_at = None;
            }
        }

        if self.auto_rotation {
            self.camera.target_rotation_y = time * rotation_speed;
            self.camera
                .set_target_rotation_x((time * AUTO_PITCH_RATE).sin() * AUTO_PITCH_AMPLITUDE);
        }

        let alpha = if self.pointer_down {
            DRAG_SMOOTHING
        } else {
            IDLE_SMOOTHING
        };
        self.camera.ease(alpha);
        self.camera
    }

    fn schedule_resume(&mut self, now: f32) {
        self.resume_at = Some(now + RESUME_DELAY_SECONDS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::camera::PITCH_LIMIT;
    use crate::math::random01;

    #[test]
    fn pitch_target_stays_clamped_under_any_drag() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Press, 0.0);
        for seed in 0..500u32 {
            let dx = (random01(seed * 2) - 0.5) * 4.0;
            let dy = (random01((seed * 2) + 1) - 0.5) * 4.0;
            animator.handle(PointerInput::Drag { dx, dy }, 0.0);
            let target = animator.camera().target_rotation_x;
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&target));
        }
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Drag { dx: 0.5, dy: 0.5 }, 0.0);
        assert_eq!(animator.camera().target_rotation_y, 0.0);
    }

    #[test]
    fn camera_converges_to_fixed_targets() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Press, 0.0);
        animator.handle(PointerInput::Drag { dx: 0.25, dy: 0.1 }, 0.0);
        let mut camera = *animator.camera();
        for frame in 0..400 {
            camera = animator.tick(frame as f32 / 60.0, 0.3);
        }
        assert!((camera.rotation_y - camera.target_rotation_y).abs() < 1e-4);
        assert!((camera.rotation_x - camera.target_rotation_x).abs() < 1e-4);
        assert!((camera.target_rotation_y - (0.25 * TAU)).abs() < 1e-5);
    }

    #[test]
    fn auto_rotation_resumes_after_delay() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Press, 1.0);
        animator.handle(PointerInput::Release, 2.0);
        animator.tick(4.9, 0.3);
        assert!(!animator.is_auto_rotating());
        let camera = animator.tick(5.0, 0.3);
        assert!(animator.is_auto_rotating());
        assert!((camera.target_rotation_y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn wheel_zooms_and_restarts_the_delay() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Wheel { delta_y: -1000.0 }, 0.0);
        assert_eq!(animator.camera().target_zoom, 9.0);
        animator.handle(PointerInput::Wheel { delta_y: 100_000.0 }, 2.0);
        assert_eq!(animator.camera().target_zoom, 4.0);
        animator.tick(4.5, 0.3);
        assert!(!animator.is_auto_rotating());
        animator.tick(5.0, 0.3);
        assert!(animator.is_auto_rotating());
    }

    #[test]
    fn leaving_mid_drag_ends_it_without_resuming() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Press, 0.0);
        animator.handle(PointerInput::Leave, 1.0);
        assert!(!animator.is_dragging());
        animator.tick(10.0, 0.3);
        assert!(!animator.is_auto_rotating());
        animator.handle(PointerInput::Drag { dx: 0.5, dy: 0.0 }, 10.0);
        assert_eq!(animator.camera().target_rotation_y, 0.0);
    }

    #[test]
    fn leave_while_idle_does_not_schedule_resume() {
        let mut animator = Animator::default();
        animator.handle(PointerInput::Leave, 0.0);
        assert!(animator.is_auto_rotating());
        assert!(!animator.is_dragging());
    }

    #[test]
    fn parses_tagged_events() {
        let drag: PointerInput =
            serde_json::from_str(r#"{"kind": "drag", "dx": 0.5, "dy": 0.0}"#).unwrap();
        assert_eq!(drag, PointerInput::Drag { dx: 0.5, dy: 0.0 });
        let wheel: PointerInput =
            serde_json::from_str(r#"{"kind": "wheel", "deltaY": 3.0}"#).unwrap();
        assert_eq!(wheel, PointerInput::Wheel { delta_y: 3.0 });
    }
}
