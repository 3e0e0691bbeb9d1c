//! Game session: owns the world, scheduler, and per-session
//! collaborators and drives the two-pass frame.
//!
//! A session is an explicit object — construct as many independent ones
//! as needed (gameplay, tests, replays); nothing here is global.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraFollow;
use crate::ecs::scheduler::{Scheduler, SystemId};
use crate::ecs::system::{GameContext, RenderContext, System};
use crate::ecs::world::World;
use crate::events::EventBus;
use crate::foundation::math::vec2;
use crate::foundation::time::Timer;
use crate::input::InputSource;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Viewport width in screen units
    pub viewport_width: f32,

    /// Viewport height in screen units
    pub viewport_height: f32,

    /// Camera smoothing speed (per second)
    pub camera_lerp_speed: f32,

    /// Camera dead-zone radius; 0 disables it
    pub camera_dead_zone: f32,

    /// Soft cap used for diagnostics; exceeding it logs a warning but
    /// never fails
    pub max_entities: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            camera_lerp_speed: 4.0,
            camera_dead_zone: 0.0,
            max_entities: 10_000,
        }
    }
}

/// Errors raised while building a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configured viewport has a non-positive dimension
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Configured width
        width: f32,
        /// Configured height
        height: f32,
    },
}

/// One independent game session
pub struct GameSession {
    /// Entity store
    pub world: World,
    /// System scheduler
    pub scheduler: Scheduler,
    camera: CameraFollow,
    events: EventBus,
    timer: Timer,
    config: SessionConfig,
}

impl GameSession {
    /// Create a session from configuration
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.viewport_width <= 0.0 || config.viewport_height <= 0.0 {
            return Err(SessionError::InvalidViewport {
                width: config.viewport_width,
                height: config.viewport_height,
            });
        }
        let camera = CameraFollow::new(vec2(config.viewport_width, config.viewport_height))
            .with_lerp_speed(config.camera_lerp_speed)
            .with_dead_zone(config.camera_dead_zone);
        log::info!(
            "session created ({}x{} viewport)",
            config.viewport_width,
            config.viewport_height
        );
        Ok(Self {
            world: World::new(),
            scheduler: Scheduler::new(),
            camera,
            events: EventBus::new(),
            timer: Timer::new(),
            config,
        })
    }

    /// Register a system with the scheduler
    pub fn add_system(&mut self, system: Box<dyn System>) -> SystemId {
        self.scheduler.add_system(&mut self.world, system)
    }

    /// The session camera
    pub fn camera(&self) -> &CameraFollow {
        &self.camera
    }

    /// The session camera (mutable; e.g. to set the follow target)
    pub fn camera_mut(&mut self) -> &mut CameraFollow {
        &mut self.camera
    }

    /// The session event bus
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Pause or unpause gameplay updates
    pub fn set_paused(&mut self, paused: bool) {
        self.scheduler.set_paused(paused);
    }

    /// Current pause state
    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    /// Seconds of session time elapsed
    pub fn total_time(&self) -> f32 {
        self.timer.total_time()
    }

    /// Run one wall-clock frame: full update pass, then full render
    /// pass, then end-of-frame event delivery.
    pub fn frame(&mut self, input: &dyn InputSource, render_ctx: &mut dyn RenderContext) {
        self.timer.update();
        let delta_time = self.timer.delta_time();
        self.run_frame_inner(input, render_ctx, delta_time);
    }

    /// Run one fixed-step frame (headless runs and tests)
    pub fn fixed_frame(
        &mut self,
        delta_time: f32,
        input: &dyn InputSource,
        render_ctx: &mut dyn RenderContext,
    ) {
        self.timer.advance(delta_time);
        self.run_frame_inner(input, render_ctx, delta_time);
    }

    fn run_frame_inner(
        &mut self,
        input: &dyn InputSource,
        render_ctx: &mut dyn RenderContext,
        delta_time: f32,
    ) {
        let mut ctx = GameContext {
            camera: &mut self.camera,
            events: &mut self.events,
            input,
        };
        self.scheduler
            .run_frame(&mut self.world, &mut ctx, render_ctx, delta_time);
        self.events.dispatch_queued();

        if self.world.len() > self.config.max_entities {
            log::warn!(
                "entity count {} exceeds configured soft cap {}",
                self.world.len(),
                self.config.max_entities
            );
        }
    }

    /// Whole-game reset (main-menu return): tears down systems, drops
    /// every entity, restarts the entity id counter, clears queued
    /// events, and re-centres the camera.
    pub fn reset(&mut self) {
        self.scheduler.dispose_all();
        self.world.reset();
        self.events.clear();
        self.camera.recenter();
        log::info!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::system::NullRenderContext;
    use crate::ecs::systems::{MotionSystem, ProjectileSystem};
    use crate::input::NullInput;

    #[test]
    fn test_invalid_viewport_rejected() {
        let config = SessionConfig {
            viewport_width: 0.0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            GameSession::new(config),
            Err(SessionError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_frame_smoke() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        session.add_system(Box::new(MotionSystem::new()));
        session.add_system(Box::new(ProjectileSystem::new()));
        for _ in 0..5 {
            session.fixed_frame(1.0 / 60.0, &NullInput, &mut NullRenderContext);
        }
        assert_eq!(session.scheduler.len(), 2);
        assert!(session.total_time() > 0.0);
    }

    #[test]
    fn test_reset_restores_empty_session() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        session.add_system(Box::new(MotionSystem::new()));
        let id = session.world.create_entity();
        session.camera_mut().set_target(Some(id));

        session.reset();
        assert!(session.world.is_empty());
        assert!(session.scheduler.is_empty());
        assert!(session.camera().target().is_none());
        // Id counter restarted: first entity after reset is id 0.
        assert_eq!(session.world.create_entity().raw(), 0);
    }
}
