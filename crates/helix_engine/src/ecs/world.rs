//! ECS World implementation
//!
//! The world owns every live entity, hands out monotonically increasing
//! entity ids, and answers the component/tag queries systems run each
//! frame. Storage slots are recycled through an internal free list so
//! high-churn categories never allocate per spawn; ids are never
//! recycled (only [`World::reset`] restarts the counter).

use std::collections::HashMap;

use super::component::{Component, ComponentRegistry, ComponentTypeId};
use super::entity::{Entity, EntityId};

/// ECS World containing all entities and components
pub struct World {
    registry: ComponentRegistry,
    slots: Vec<Entity>,
    free_slots: Vec<usize>,
    index: HashMap<EntityId, usize>,
    next_id: u64,
}

impl World {
    /// Create a new, empty world
    pub fn new() -> Self {
        Self {
            registry: ComponentRegistry::new(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a new entity, reusing a free storage slot when one exists.
    ///
    /// The id is always freshly assigned, whether or not the slot is
    /// recycled.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.fresh_id();
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot].reassign(id);
                slot
            }
            None => {
                self.slots.push(Entity::new(id));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        id
    }

    /// Borrow an entity by id (including inactive pooled entities)
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.slots[slot])
    }

    /// Mutably borrow an entity by id
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index.get(&id).map(|&slot| &mut self.slots[slot])
    }

    /// The registry-assigned type id for `T`, registering it on first use
    pub fn component_type_id<T: Component>(&mut self) -> ComponentTypeId {
        self.registry.register::<T>()
    }

    /// Attach a component to an entity, chainable.
    ///
    /// Overwrites any existing component of the same type; the previous
    /// instance is dropped *without* its `dispose` hook running. Callers
    /// that need the hook should [`World::remove_component`] first.
    /// Unknown ids are ignored.
    pub fn add_component<T: Component>(&mut self, id: EntityId, component: T) -> &mut Self {
        let type_id = self.registry.register::<T>();
        match self.index.get(&id) {
            Some(&slot) => {
                self.slots[slot].insert(type_id, Box::new(component));
            }
            None => {
                log::warn!("add_component on unknown entity {id}");
            }
        }
        self
    }

    /// Borrow entity `id`'s component of type `T`.
    ///
    /// Never panics: a missing entity or missing component is `None`.
    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let type_id = self.registry.lookup::<T>()?;
        self.entity(id)?.get::<T>(type_id)
    }

    /// Mutably borrow entity `id`'s component of type `T`
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let type_id = self.registry.lookup::<T>()?;
        let slot = *self.index.get(&id)?;
        self.slots[slot].get_mut::<T>(type_id)
    }

    /// Whether entity `id` carries a component of type `T`
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.get_component::<T>(id).is_some()
    }

    /// Remove and dispose entity `id`'s component of type `T`.
    ///
    /// The owner back-reference is cleared in the same operation. No-op
    /// when the entity or component is absent.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) {
        if let Some(type_id) = self.registry.lookup::<T>() {
            if let Some(&slot) = self.index.get(&id) {
                self.slots[slot].remove(type_id);
            }
        }
    }

    /// Mark an entity inactive while keeping its components in place.
    ///
    /// Queries stop returning it immediately; spawner systems use this
    /// to park pooled entities between uses.
    pub fn deactivate(&mut self, id: EntityId) {
        if let Some(&slot) = self.index.get(&id) {
            self.slots[slot].set_active(false);
        }
    }

    /// Reactivate a parked entity under a fresh logical identity.
    ///
    /// The storage slot and component allocations are retained; the
    /// returned id is freshly assigned (ids stay strictly increasing)
    /// and the old id stops resolving. Returns `None` for unknown ids.
    pub fn reactivate(&mut self, id: EntityId) -> Option<EntityId> {
        let slot = self.index.remove(&id)?;
        let new_id = self.fresh_id();
        self.slots[slot].reassign(new_id);
        self.index.insert(new_id, slot);
        Some(new_id)
    }

    /// Destroy an entity: full dispose, slot returned to the free list.
    ///
    /// Idempotent — destroying an unknown or already-destroyed id is a
    /// no-op.
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(slot) = self.index.remove(&id) {
            self.slots[slot].dispose();
            self.free_slots.push(slot);
        }
    }

    /// Ids of all active entities carrying a component of type `T`
    pub fn entities_with<T: Component>(&self) -> Vec<EntityId> {
        let Some(type_id) = self.registry.lookup::<T>() else {
            return Vec::new();
        };
        self.slots
            .iter()
            .filter(|entity| entity.is_active() && entity.has(type_id))
            .map(Entity::id)
            .collect()
    }

    /// Ids of all active entities carrying the given tag
    pub fn entities_with_tag(&self, tag: &str) -> Vec<EntityId> {
        self.slots
            .iter()
            .filter(|entity| entity.is_active() && entity.has_tag(tag))
            .map(Entity::id)
            .collect()
    }

    /// Number of entities the world currently tracks (active or parked)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the world tracks no entities
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of active entities
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|entity| entity.is_active()).count()
    }

    /// Whole-game reset: drops every entity and restarts the id counter.
    ///
    /// This is the *only* operation that resets ids; per-wave or
    /// per-level cleanup should destroy entities instead.
    pub fn reset(&mut self) {
        for entity in &mut self.slots {
            entity.dispose();
        }
        self.slots.clear();
        self.free_slots.clear();
        self.index.clear();
        self.next_id = 0;
        log::debug!("world reset: entity id counter restarted");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Health(f32);
    impl Component for Health {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let mut world = World::new();
        let mut previous = None;
        for _ in 0..100 {
            let id = world.create_entity();
            if let Some(last) = previous {
                assert!(id > last);
            }
            previous = Some(id);
        }
        assert_eq!(world.len(), 100);
    }

    #[test]
    fn test_component_overwrite_replaces_instance() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, Health(10.0));
        world.add_component(id, Health(99.0));
        assert_eq!(world.get_component::<Health>(id).unwrap().0, 99.0);
    }

    #[test]
    fn test_missing_lookups_are_none() {
        let mut world = World::new();
        let id = world.create_entity();
        assert!(world.get_component::<Health>(id).is_none());
        assert!(!world.has_component::<Health>(id));
        world.remove_component::<Health>(id); // no-op, must not panic
    }

    #[test]
    fn test_chainable_add() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, Health(1.0)).add_component(id, Health(2.0));
        assert_eq!(world.get_component::<Health>(id).unwrap().0, 2.0);
    }

    #[test]
    fn test_query_skips_inactive() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Health(1.0));
        world.add_component(b, Health(1.0));
        world.deactivate(a);
        assert_eq!(world.entities_with::<Health>(), vec![b]);
    }

    #[test]
    fn test_reactivate_assigns_fresh_id_same_components() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, Health(5.0));
        world.deactivate(id);

        let new_id = world.reactivate(id).unwrap();
        assert!(new_id > id);
        // Old identity stops resolving; components survive in the slot.
        assert!(world.entity(id).is_none());
        assert_eq!(world.get_component::<Health>(new_id).unwrap().0, 5.0);
        assert!(world.entity(new_id).unwrap().is_active());
    }

    #[test]
    fn test_destroy_recycles_slot_not_id() {
        let mut world = World::new();
        let a = world.create_entity();
        world.destroy(a);
        world.destroy(a); // idempotent
        let b = world.create_entity();
        assert!(b > a);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_tag_query() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.entity_mut(a).unwrap().add_tag("enemy");
        world.entity_mut(b).unwrap().add_tag("player");
        assert_eq!(world.entities_with_tag("enemy"), vec![a]);
        assert!(world.entities_with_tag("boss").is_empty());
    }

    #[test]
    fn test_reset_restarts_id_counter() {
        let mut world = World::new();
        for _ in 0..10 {
            world.create_entity();
        }
        world.reset();
        assert!(world.is_empty());
        let id = world.create_entity();
        assert_eq!(id.raw(), 0);
    }
}
