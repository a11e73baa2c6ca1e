//! Per-frame animation of the fan.
//!
//! [`AnimationState`] holds the two angles that change every frame and the
//! currently selected speed. [`FrameLoop`] wraps it with an explicit running
//! flag so the loop can be started, stopped and stepped one frame at a time.
//!
//! Updates are per displayed frame, not per elapsed second: a faster display
//! spins the fan faster.

use crate::{config::AnimationConfig, controls::Speed, scene::Fan};

#[derive(Clone, Debug)]
pub struct AnimationState {
    /// Blade rotation about the wing axis. Decreases without bound.
    pub spin: f64,
    /// Head rotation about its local Z axis.
    pub sway: f64,
    /// Either `1.0` or `-1.0`.
    pub sway_direction: f64,
    pub speed: Speed,
    sway_limit: f64,
    sway_step: f64,
}

impl AnimationState {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            spin: 0.0,
            sway: 0.0,
            sway_direction: 1.0,
            speed: config.initial_speed,
            sway_limit: config.sway_limit,
            sway_step: config.sway_step,
        }
    }

    pub fn sway_limit(&self) -> f64 {
        self.sway_limit
    }

    pub fn sway_step(&self) -> f64 {
        self.sway_step
    }

    /// Advance both angles by one frame.
    ///
    /// The limit is checked before the increment is applied, so the sway can
    /// pass the limit by up to one step before it turns around.
    pub fn step(&mut self) {
        self.spin -= self.speed.value();

        if self.sway >= self.sway_limit || self.sway <= -self.sway_limit {
            self.sway_direction = -self.sway_direction;
        }
        self.sway += self.sway_step * self.sway_direction;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

/// The frame loop driving a [`Fan`].
///
/// Created stopped. Once started, every call to [`FrameLoop::advance`] steps
/// the animation and poses the fan; the event loop keeps requesting redraws as
/// long as [`FrameLoop::is_running`] holds.
#[derive(Debug)]
pub struct FrameLoop {
    state: AnimationState,
    running: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            state: AnimationState::new(config),
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("frame loop started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Takes effect on the next [`FrameLoop::advance`].
    pub fn set_speed(&mut self, speed: Speed) {
        log::debug!("speed {:?} -> {:?}", self.state.speed, speed);
        self.state.speed = speed;
    }

    /// Step one frame and pose `fan` accordingly. Returns `false` without
    /// touching anything if the loop is stopped.
    pub fn advance(&mut self, fan: &mut Fan) -> bool {
        if !self.running {
            return false;
        }
        self.state.step();
        fan.pose(&self.state);
        self.frames += 1;
        true
    }
}
