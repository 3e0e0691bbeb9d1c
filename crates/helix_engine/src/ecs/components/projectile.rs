//! Projectile component
//!
//! Per-projectile state for the pooled projectile lifecycle: damage,
//! remaining lifetime, the owning entity (shooter), and a retirement
//! flag external collision logic can set for early despawn.

use std::any::Any;

use crate::ecs::component::{Component, DebugEntry};
use crate::ecs::entity::EntityId;

/// State machine position of a pooled projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectilePhase {
    /// Ticking down its lifetime
    Active,
    /// Lifetime reached zero (or retirement was forced); awaiting the
    /// despawn pass
    Expired,
}

/// Component carried by every live projectile entity
#[derive(Debug, Clone, Copy)]
pub struct ProjectileComponent {
    /// Damage applied on hit (interpreted by collision collaborators)
    pub damage: f32,
    /// Seconds of life remaining
    pub remaining: f32,
    /// Entity that fired this projectile, when known
    pub shooter: Option<EntityId>,
    /// Set by external logic (e.g. collision) to force despawn this
    /// frame; honored during the scan pass, never applied directly
    pub retired: bool,
}

impl ProjectileComponent {
    /// Create projectile state with a full lifetime
    pub fn new(damage: f32, lifetime: f32) -> Self {
        Self {
            damage,
            remaining: lifetime,
            shooter: None,
            retired: false,
        }
    }

    /// Overwrite every field for a fresh logical spawn.
    ///
    /// Pooled reuse must not leak state between lives, so this resets
    /// the retirement flag and shooter as well.
    pub fn respawn(&mut self, damage: f32, lifetime: f32, shooter: Option<EntityId>) {
        self.damage = damage;
        self.remaining = lifetime;
        self.shooter = shooter;
        self.retired = false;
    }

    /// Tick the lifetime down and report the resulting phase
    pub fn tick(&mut self, delta_time: f32) -> ProjectilePhase {
        self.remaining -= delta_time;
        if self.retired || self.remaining <= 0.0 {
            ProjectilePhase::Expired
        } else {
            ProjectilePhase::Active
        }
    }
}

impl Component for ProjectileComponent {
    fn debug_entries(&self) -> Vec<DebugEntry> {
        vec![
            DebugEntry::new("dmg", self.damage),
            DebugEntry::new("ttl", format!("{:.2}", self.remaining)),
        ]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
