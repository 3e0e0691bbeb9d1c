//! Camera follow system

use crate::ecs::components::TransformComponent;
use crate::ecs::system::{GameContext, System};
use crate::ecs::world::World;

/// Default execution priority: after gameplay has moved everything
pub const CAMERA_PRIORITY: i32 = 80;

/// Drives the session camera toward its target entity each frame.
///
/// No target, an inactive target, or a target without a transform all
/// degrade to a no-op for that frame.
pub struct CameraSystem;

impl CameraSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CameraSystem {
    fn name(&self) -> &'static str {
        "camera_follow"
    }

    fn priority(&self) -> i32 {
        CAMERA_PRIORITY
    }

    fn update(&mut self, world: &mut World, ctx: &mut GameContext<'_>, delta_time: f32) {
        let Some(target) = ctx.camera.target() else {
            return;
        };
        let Some(entity) = world.entity(target) else {
            return;
        };
        if !entity.is_active() {
            return;
        }
        let Some(transform) = world.get_component::<TransformComponent>(target) else {
            return;
        };
        ctx.camera.update(transform.position, delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraFollow;
    use crate::events::EventBus;
    use crate::foundation::math::vec2;
    use crate::input::NullInput;

    fn update_once(world: &mut World, camera: &mut CameraFollow, dt: f32) {
        let mut events = EventBus::new();
        let input = NullInput;
        let mut ctx = GameContext {
            camera,
            events: &mut events,
            input: &input,
        };
        CameraSystem::new().update(world, &mut ctx, dt);
    }

    #[test]
    fn test_follows_target_transform() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, TransformComponent::new(vec2(2000.0, 0.0)));

        let mut camera = CameraFollow::new(vec2(800.0, 600.0));
        camera.set_target(Some(id));
        let before = camera.offset();
        update_once(&mut world, &mut camera, 0.1);
        assert_ne!(camera.offset(), before);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut world = World::new();
        let mut camera = CameraFollow::new(vec2(800.0, 600.0));
        let before = camera.offset();
        update_once(&mut world, &mut camera, 0.1);
        assert_eq!(camera.offset(), before);
    }

    #[test]
    fn test_inactive_target_is_noop() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, TransformComponent::new(vec2(2000.0, 0.0)));
        world.deactivate(id);

        let mut camera = CameraFollow::new(vec2(800.0, 600.0));
        camera.set_target(Some(id));
        let before = camera.offset();
        update_once(&mut world, &mut camera, 0.1);
        assert_eq!(camera.offset(), before);
    }
}
