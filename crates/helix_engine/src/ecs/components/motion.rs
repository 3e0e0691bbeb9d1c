//! Motion component for entities that move in 2D space
//!
//! Provides velocity with optional speed limiting and damping; the
//! [`MotionSystem`](crate::ecs::systems::MotionSystem) integrates it
//! into the entity's transform each frame.

use std::any::Any;

use crate::ecs::component::Component;
use crate::foundation::math::{clamp_length, Vec2};

/// Component for entities that can move
#[derive(Debug, Clone, Copy)]
pub struct MotionComponent {
    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,

    /// Damping factor for velocity (0 = no damping, 1 = instant stop)
    pub damping: f32,

    /// Whether movement is enabled
    pub enabled: bool,
}

impl MotionComponent {
    /// Create a stationary motion component
    pub fn new() -> Self {
        Self {
            velocity: Vec2::zeros(),
            max_speed: 0.0,
            damping: 0.0,
            enabled: true,
        }
    }

    /// Create a motion component with initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Set maximum speed (clamped to non-negative)
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
    }

    /// Set damping (clamped to `[0, 1]`)
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    /// Apply one integration step to the velocity (limit + damping)
    pub fn integrate(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }
        self.velocity = clamp_length(self.velocity, self.max_speed);
        if self.damping > 0.0 {
            self.velocity *= (1.0 - self.damping * delta_time).max(0.0);
        }
    }

    /// Position delta for this frame
    pub fn position_delta(&self, delta_time: f32) -> Vec2 {
        if !self.enabled {
            return Vec2::zeros();
        }
        self.velocity * delta_time
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = Vec2::zeros();
    }
}

impl Default for MotionComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MotionComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
