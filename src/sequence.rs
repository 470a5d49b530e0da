use std::iter::Peekable;
use std::vec::IntoIter;

use crate::animation::Animator;
use crate::config::{validate_sequence, SequenceConfig, TimedInput};
use crate::domain::{AudioEnvelope, CameraState, EnvelopeFollower, SceneParameters};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceFrame {
    pub index: u32,
    pub time: f32,
    pub camera: CameraState,
    pub audio: AudioEnvelope,
    pub fallback_audio: bool,
}

// Frames are produced one at a time; the camera and audio state carry over.
pub struct SequencePlayer<'a> {
    config: &'a SequenceConfig,
    parameters: SceneParameters,
    events: Peekable<IntoIter<TimedInput>>,
    animator: Animator,
    follower: EnvelopeFollower,
    next_index: u32,
}

impl<'a> SequencePlayer<'a> {
    pub fn new(config: &'a SequenceConfig) -> Result<Self> {
        validate_sequence(config)?;
        let parameters = config.look.scene_parameters()?;

        let mut events = config.events.clone();
        events.sort_by(|a, b| a.at.total_cmp(&b.at));

        Ok(Self {
            config,
            parameters,
            events: events.into_iter().peekable(),
            animator: Animator::new(config.camera.to_state()),
            follower: EnvelopeFollower::default(),
            next_index: 0,
        })
    }

    pub fn parameters(&self) -> SceneParameters {
        self.parameters
    }
}

impl Iterator for SequencePlayer<'_> {
    type Item = SequenceFrame;

    fn next(&mut self) -> Option<SequenceFrame> {
        if self.next_index >= self.config.frame_count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;

        let time = self.config.start_time + (index as f32 / self.config.fps);
        while let Some(event) = self.events.next_if(|event| event.at <= time) {
            self.animator.handle(event.input, event.at);
        }
        let camera = self
            .animator
            .tick(time, self.parameters.rotation_speed_auto);
        let (target, fallback_audio) = self.config.look.resolve_audio(time);
        let audio = self.follower.update(target);

        Some(SequenceFrame {
            index,
            time,
            camera,
            audio,
            fallback_audio,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.config.frame_count - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}
