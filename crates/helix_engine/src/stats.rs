//! Upgrade-effect registry
//!
//! Maps stat identifiers to pure effect-application functions,
//! registered once at startup. Replaces an ever-growing conditional on
//! stat names and keeps the set of supported stats independently
//! testable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier for an upgradeable stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatId {
    /// Projectile damage multiplier
    Damage,
    /// Weapon cooldown multiplier (lower is faster)
    Cooldown,
    /// Projectile travel speed multiplier
    ProjectileSpeed,
    /// Effect area multiplier
    Area,
    /// Player movement speed multiplier
    MoveSpeed,
}

/// Multiplier block a weapon or actor carries; all factors start at 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBlock {
    /// Damage multiplier
    pub damage: f32,
    /// Cooldown multiplier
    pub cooldown: f32,
    /// Projectile speed multiplier
    pub projectile_speed: f32,
    /// Area multiplier
    pub area: f32,
    /// Movement speed multiplier
    pub move_speed: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            damage: 1.0,
            cooldown: 1.0,
            projectile_speed: 1.0,
            area: 1.0,
            move_speed: 1.0,
        }
    }
}

/// Pure effect-application function: mutates a stat block by `amount`
pub type EffectFn = fn(&mut StatBlock, f32);

/// Lookup table from stat identifier to effect application
pub struct UpgradeRegistry {
    effects: HashMap<StatId, EffectFn>,
}

impl UpgradeRegistry {
    /// Create an empty registry (no stats supported)
    pub fn new() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    /// Registry pre-populated with the standard multiplicative effects.
    ///
    /// `amount` is a fraction: 0.25 means +25% (or -25% cooldown).
    /// Cooldown is floored so stacked upgrades cannot reach zero.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(StatId::Damage, |block, amount| {
            block.damage *= 1.0 + amount;
        });
        registry.register(StatId::Cooldown, |block, amount| {
            block.cooldown = (block.cooldown * (1.0 - amount)).max(0.05);
        });
        registry.register(StatId::ProjectileSpeed, |block, amount| {
            block.projectile_speed *= 1.0 + amount;
        });
        registry.register(StatId::Area, |block, amount| {
            block.area *= 1.0 + amount;
        });
        registry.register(StatId::MoveSpeed, |block, amount| {
            block.move_speed *= 1.0 + amount;
        });
        registry
    }

    /// Register (or replace) the effect for a stat
    pub fn register(&mut self, stat: StatId, effect: EffectFn) {
        self.effects.insert(stat, effect);
    }

    /// Apply the effect registered for `stat`.
    ///
    /// Unknown stats are logged and ignored; returns whether an effect
    /// ran.
    pub fn apply(&self, block: &mut StatBlock, stat: StatId, amount: f32) -> bool {
        match self.effects.get(&stat) {
            Some(effect) => {
                effect(block, amount);
                true
            }
            None => {
                log::warn!("no upgrade effect registered for {stat:?}");
                false
            }
        }
    }

    /// Number of registered effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True when no effect is registered
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for UpgradeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
