//! Projectile lifecycle system
//!
//! The representative spawner: manages the high-churn projectile
//! category by recycling parked entities instead of destroying them,
//! and despawns strictly through a deferred queue so the entity store
//! is never mutated while a scan is iterating it.
//!
//! Lifecycle per pooled projectile entity:
//! Spawned (recycled + reset) → Active (lifetime ticks down; collision
//! may retire early) → Expired → Released (deactivated, back on the
//! free list; queries stop returning it the same frame).

use crate::ecs::components::{
    MotionComponent, ProjectileComponent, ProjectilePhase, TransformComponent,
};
use crate::ecs::deferred::DeferredQueue;
use crate::ecs::entity::EntityId;
use crate::ecs::system::{GameContext, System};
use crate::ecs::world::World;
use crate::events::GameEvent;
use crate::foundation::math::Vec2;

/// Default execution priority: after motion, before camera
pub const PROJECTILE_PRIORITY: i32 = 30;

/// Tag carried by every projectile entity
pub const PROJECTILE_TAG: &str = "projectile";

/// Per-spawn parameters for one projectile
#[derive(Debug, Clone, Copy)]
pub struct ProjectileParams {
    /// Spawn position in world space
    pub position: Vec2,
    /// Initial velocity in world units per second
    pub velocity: Vec2,
    /// Damage carried by the projectile
    pub damage: f32,
    /// Lifetime in seconds
    pub lifetime: f32,
    /// Firing entity, when known
    pub shooter: Option<EntityId>,
}

/// Spawner system owning the projectile entity pool
pub struct ProjectileSystem {
    /// Parked (deactivated) projectile entities available for reuse
    free: Vec<EntityId>,
    /// Despawn queue filled during the scan pass, drained afterwards
    despawn: DeferredQueue<EntityId>,
}

impl ProjectileSystem {
    /// Create the system with an empty pool
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            despawn: DeferredQueue::new(),
        }
    }

    /// Spawn a projectile, recycling a parked entity when possible.
    ///
    /// Recycling stamps a fresh logical identity (new id, same storage
    /// slot) and overwrites every component field, so no state leaks
    /// between lives.
    pub fn spawn(&mut self, world: &mut World, params: &ProjectileParams) -> EntityId {
        while let Some(parked) = self.free.pop() {
            // Parked ids can go stale if the world was reset underneath
            // us; skip those and fall through to a fresh spawn.
            if let Some(id) = world.reactivate(parked) {
                Self::stamp(world, id, params);
                return id;
            }
        }

        let id = world.create_entity();
        Self::stamp(world, id, params);
        id
    }

    /// Overwrite the full logical state of a projectile entity
    fn stamp(world: &mut World, id: EntityId, params: &ProjectileParams) {
        let rotation = params.velocity.y.atan2(params.velocity.x);

        match world.get_component_mut::<TransformComponent>(id) {
            Some(transform) => {
                *transform = TransformComponent::with_rotation(params.position, rotation);
            }
            None => {
                world.add_component(
                    id,
                    TransformComponent::with_rotation(params.position, rotation),
                );
            }
        }
        match world.get_component_mut::<MotionComponent>(id) {
            Some(motion) => *motion = MotionComponent::with_velocity(params.velocity),
            None => {
                world.add_component(id, MotionComponent::with_velocity(params.velocity));
            }
        }
        match world.get_component_mut::<ProjectileComponent>(id) {
            Some(projectile) => {
                projectile.respawn(params.damage, params.lifetime, params.shooter);
            }
            None => {
                let mut projectile = ProjectileComponent::new(params.damage, params.lifetime);
                projectile.shooter = params.shooter;
                world.add_component(id, projectile);
            }
        }
        if let Some(entity) = world.entity_mut(id) {
            entity.add_tag(PROJECTILE_TAG);
        }
    }

    /// Force a projectile to despawn on the current (or next) scan.
    ///
    /// Flows through the despawn queue like natural expiry; external
    /// collision logic must never release entities directly.
    pub fn retire(world: &mut World, id: EntityId) {
        if let Some(projectile) = world.get_component_mut::<ProjectileComponent>(id) {
            projectile.retired = true;
        }
    }

    /// Number of parked entities available for reuse
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }

    /// Number of live projectiles in the world
    pub fn live_count(world: &World) -> usize {
        world.entities_with::<ProjectileComponent>().len()
    }

    /// Despawn every live projectile immediately (wave reset)
    pub fn release_all(&mut self, world: &mut World) {
        for id in world.entities_with::<ProjectileComponent>() {
            self.despawn.defer(id);
        }
        self.apply_despawns(world);
    }

    fn drain_requests(&mut self, world: &mut World, ctx: &mut GameContext<'_>) {
        let requests = ctx
            .events
            .take_matching(|event| matches!(event, GameEvent::ProjectileRequested { .. }));
        for request in requests {
            let GameEvent::ProjectileRequested {
                position,
                velocity,
                damage,
                lifetime,
                shooter,
            } = request
            else {
                continue;
            };
            self.spawn(
                world,
                &ProjectileParams {
                    position,
                    velocity,
                    damage,
                    lifetime,
                    shooter,
                },
            );
        }
    }

    /// Despawn pass: release every queued entity back to the pool.
    fn apply_despawns(&mut self, world: &mut World) {
        let Self { free, despawn, .. } = self;
        despawn.drain(|id| {
            world.deactivate(id);
            free.push(id);
        });
    }
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ProjectileSystem {
    fn name(&self) -> &'static str {
        "projectile"
    }

    fn priority(&self) -> i32 {
        PROJECTILE_PRIORITY
    }

    fn update(&mut self, world: &mut World, ctx: &mut GameContext<'_>, delta_time: f32) {
        self.drain_requests(world, ctx);

        // Scan pass: tick lifetimes, collect expiries. The entity store
        // is not mutated until the scan completes.
        for id in world.entities_with::<ProjectileComponent>() {
            let Some(projectile) = world.get_component_mut::<ProjectileComponent>(id) else {
                continue;
            };
            if projectile.tick(delta_time) == ProjectilePhase::Expired {
                self.despawn.defer(id);
            }
        }

        self.apply_despawns(world);
    }

    fn dispose(&mut self) {
        self.free.clear();
        self.despawn.clear();
    }
}
