//! Motion integration system

use crate::ecs::components::{MotionComponent, TransformComponent};
use crate::ecs::system::{GameContext, System};
use crate::ecs::world::World;

/// Default execution priority for motion integration
pub const MOTION_PRIORITY: i32 = 20;

/// Integrates every entity's [`MotionComponent`] into its
/// [`TransformComponent`] once per frame.
///
/// Entities missing either component are skipped silently.
pub struct MotionSystem;

impl MotionSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl Default for MotionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MotionSystem {
    fn name(&self) -> &'static str {
        "motion"
    }

    fn priority(&self) -> i32 {
        MOTION_PRIORITY
    }

    fn update(&mut self, world: &mut World, _ctx: &mut GameContext<'_>, delta_time: f32) {
        for id in world.entities_with::<MotionComponent>() {
            let Some(motion) = world.get_component_mut::<MotionComponent>(id) else {
                continue;
            };
            motion.integrate(delta_time);
            let delta = motion.position_delta(delta_time);

            let Some(transform) = world.get_component_mut::<TransformComponent>(id) else {
                continue;
            };
            transform.position += delta;
        }
    }
}
