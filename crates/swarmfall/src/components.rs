//! Game-specific components

use std::any::Any;

use helix_engine::prelude::*;

use crate::config::WeaponSpec;

/// Player avatar component
#[derive(Debug, Clone)]
pub struct Player {
    /// Base movement speed in world units per second
    pub move_speed: f32,
    /// Current aim direction (unit-ish vector)
    pub aim: Vec2,
}

impl Player {
    /// Create a player with the given base speed, aiming right
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            aim: vec2(1.0, 0.0),
        }
    }
}

impl Component for Player {
    fn debug_entries(&self) -> Vec<DebugEntry> {
        vec![DebugEntry::new("speed", self.move_speed)]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A weapon an entity carries; fires on a cooldown timer
#[derive(Debug, Clone)]
pub struct Weapon {
    /// Static content record this weapon was built from
    pub spec: WeaponSpec,
    /// Seconds until the next shot
    pub cooldown_remaining: f32,
    /// Upgrade multipliers applied on top of the spec
    pub stats: StatBlock,
    /// Back-reference to the carrying entity, kept by the component
    /// lifecycle hooks
    pub owner: Option<EntityId>,
}

impl Weapon {
    /// Create a weapon from its content record, ready to fire
    pub fn new(spec: WeaponSpec) -> Self {
        Self {
            spec,
            cooldown_remaining: 0.0,
            stats: StatBlock::default(),
            owner: None,
        }
    }

    /// Effective damage after upgrades
    pub fn damage(&self) -> f32 {
        self.spec.damage * self.stats.damage
    }

    /// Effective cooldown after upgrades
    pub fn cooldown(&self) -> f32 {
        self.spec.cooldown * self.stats.cooldown
    }

    /// Effective projectile speed after upgrades
    pub fn projectile_speed(&self) -> f32 {
        self.spec.projectile_speed * self.stats.projectile_speed
    }
}

impl Component for Weapon {
    fn attached(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }
    fn detached(&mut self) {
        self.owner = None;
    }
    fn debug_entries(&self) -> Vec<DebugEntry> {
        vec![
            DebugEntry::new("weapon", self.spec.name.clone()),
            DebugEntry::new("cd", format!("{:.2}", self.cooldown_remaining)),
        ]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> WeaponSpec {
        WeaponSpec {
            name: "Test".to_string(),
            damage: 10.0,
            cooldown: 1.0,
            projectile_speed: 100.0,
            lifetime: 1.0,
            spread: 0.0,
        }
    }

    #[test]
    fn test_upgrades_scale_effective_values() {
        let mut weapon = Weapon::new(spec());
        let registry = UpgradeRegistry::with_defaults();
        registry.apply(&mut weapon.stats, StatId::Damage, 0.5);
        registry.apply(&mut weapon.stats, StatId::Cooldown, 0.25);
        assert!((weapon.damage() - 15.0).abs() < 1e-5);
        assert!((weapon.cooldown() - 0.75).abs() < 1e-5);
        assert!((weapon.projectile_speed() - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_weapon_owner_lifecycle() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, Weapon::new(spec()));
        assert_eq!(world.get_component::<Weapon>(id).unwrap().owner, Some(id));

        world.remove_component::<Weapon>(id);
        assert!(world.get_component::<Weapon>(id).is_none());
    }
}
