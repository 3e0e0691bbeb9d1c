//! Per-session follow camera
//!
//! Converts a tracked target's world position into a screen offset
//! using exponential smoothing and provides the world↔screen mapping
//! the rest of the pipeline uses. One instance per game session,
//! injected into the systems that need it — there is no global camera.

use crate::ecs::entity::EntityId;
use crate::foundation::math::Vec2;

/// Smoothed follow camera with bidirectional coordinate mapping
#[derive(Debug, Clone)]
pub struct CameraFollow {
    viewport: Vec2,
    offset: Vec2,
    lerp_speed: f32,
    dead_zone: f32,
    target: Option<EntityId>,
}

impl CameraFollow {
    /// Create a camera for the given viewport size, centred on origin
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            offset: -viewport * 0.5,
            lerp_speed: 4.0,
            dead_zone: 0.0,
            target: None,
        }
    }

    /// Builder-style smoothing speed override
    pub fn with_lerp_speed(mut self, lerp_speed: f32) -> Self {
        self.lerp_speed = lerp_speed.max(0.0);
        self
    }

    /// Builder-style dead-zone radius override.
    ///
    /// While the target stays within this radius of screen centre the
    /// camera does not move. Zero disables the dead zone (policy
    /// default).
    pub fn with_dead_zone(mut self, radius: f32) -> Self {
        self.dead_zone = radius.max(0.0);
        self
    }

    /// Entity the camera follows, if any
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Set or clear the tracked entity
    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    /// Current screen offset
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Viewport size in screen units
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Jump instantly so `position` sits at screen centre
    pub fn snap_to(&mut self, position: Vec2) {
        self.offset = position - self.viewport * 0.5;
    }

    /// Re-centre on the world origin (session reset)
    pub fn recenter(&mut self) {
        self.offset = -self.viewport * 0.5;
        self.target = None;
    }

    /// Advance the smoothing toward the tracked position.
    ///
    /// `offset += (target_offset - offset) * lerp_speed * dt` — an
    /// exponential decay that approaches without overshoot for
    /// `lerp_speed * dt < 1`; the blend factor is clamped to 1 so a
    /// degenerate frame time can at worst land exactly on target.
    pub fn update(&mut self, target_position: Vec2, delta_time: f32) {
        let target_offset = target_position - self.viewport * 0.5;
        let error = target_offset - self.offset;
        if self.dead_zone > 0.0 && error.norm() <= self.dead_zone {
            return;
        }
        let factor = (self.lerp_speed * delta_time).min(1.0);
        self.offset += error * factor;
    }

    /// Map a world-space point to screen space
    #[inline]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.offset
    }

    /// Map a screen-space point to world space
    #[inline]
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        point + self.offset
    }
}
