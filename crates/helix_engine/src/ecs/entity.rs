//! Entity implementation
//!
//! An entity is a container: a typed collection of components (indexed
//! by [`ComponentTypeId`]), a set of classification tags, and an active
//! flag. Identity is a process-unique, monotonically increasing id
//! assigned by the [`World`](super::World) at creation.

use std::collections::HashSet;

use super::component::{Component, ComponentTypeId, DebugEntry};

/// Entity identifier
///
/// Ids are never reused during a session; the counter resets only on an
/// explicit whole-game reset ([`World::reset`](super::World::reset)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an entity id from its raw value
    pub(super) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live game object: component slots, tags, and an active flag
pub struct Entity {
    id: EntityId,
    components: Vec<Option<Box<dyn Component>>>,
    tags: HashSet<String>,
    active: bool,
}

impl Entity {
    /// Create an empty, active entity with the given id
    pub(super) fn new(id: EntityId) -> Self {
        Self {
            id,
            components: Vec::new(),
            tags: HashSet::new(),
            active: true,
        }
    }

    /// This entity's current logical identity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether this entity is live; disposed or recycled entities are
    /// inactive and must not be processed
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(super) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Stamp a fresh logical identity onto a recycled entity.
    ///
    /// The storage slot and component allocations are retained; the
    /// caller is responsible for resetting component state.
    pub(super) fn reassign(&mut self, id: EntityId) {
        self.id = id;
        self.active = true;
    }

    /// Store a component, overwriting any existing component of the
    /// same type. The previous component is returned *undisposed* —
    /// disposing it is the caller's responsibility.
    pub(super) fn insert(
        &mut self,
        type_id: ComponentTypeId,
        mut component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        let index = type_id.index();
        if index >= self.components.len() {
            self.components.resize_with(index + 1, || None);
        }
        component.attached(self.id);
        self.components[index].replace(component)
    }

    /// Borrow the component of type `T` stored under `type_id`
    pub fn get<T: Component>(&self, type_id: ComponentTypeId) -> Option<&T> {
        self.components
            .get(type_id.index())
            .and_then(|slot| slot.as_ref())
            .and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Mutably borrow the component of type `T` stored under `type_id`
    pub fn get_mut<T: Component>(&mut self, type_id: ComponentTypeId) -> Option<&mut T> {
        self.components
            .get_mut(type_id.index())
            .and_then(|slot| slot.as_mut())
            .and_then(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Presence check for a component slot
    pub fn has(&self, type_id: ComponentTypeId) -> bool {
        self.components
            .get(type_id.index())
            .is_some_and(|slot| slot.is_some())
    }

    /// Remove and dispose the component in `type_id`'s slot.
    ///
    /// The owner back-reference is cleared before `dispose` runs.
    /// No-op when the slot is empty.
    pub(super) fn remove(&mut self, type_id: ComponentTypeId) {
        if let Some(slot) = self.components.get_mut(type_id.index()) {
            if let Some(mut component) = slot.take() {
                component.detached();
                component.dispose();
            }
        }
    }

    /// Add a classification tag (set semantics)
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Remove a classification tag; no-op when absent
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    /// Check for a classification tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate this entity's tags (order is not guaranteed)
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of components currently attached
    pub fn component_count(&self) -> usize {
        self.components.iter().filter(|slot| slot.is_some()).count()
    }

    /// Collect debug entries from every attached component
    pub fn debug_entries(&self) -> Vec<DebugEntry> {
        self.components
            .iter()
            .flatten()
            .flat_map(|component| component.debug_entries())
            .collect()
    }

    /// Dispose this entity: every component is detached then disposed,
    /// tags are cleared, and the entity becomes inactive.
    ///
    /// Idempotent — disposing twice leaves the same empty state.
    pub fn dispose(&mut self) {
        for slot in &mut self.components {
            if let Some(mut component) = slot.take() {
                component.detached();
                component.dispose();
            }
        }
        self.tags.clear();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Marker {
        owner: Option<EntityId>,
        disposed: bool,
    }

    impl Marker {
        fn new() -> Self {
            Self {
                owner: None,
                disposed: false,
            }
        }
    }

    impl Component for Marker {
        fn attached(&mut self, owner: EntityId) {
            self.owner = Some(owner);
        }
        fn detached(&mut self) {
            self.owner = None;
        }
        fn dispose(&mut self) {
            self.disposed = true;
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Bare;
    impl Component for Bare {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// Registry-assigned ids for (Marker, Bare), in that order
    fn type_ids() -> (ComponentTypeId, ComponentTypeId) {
        let mut registry = super::super::component::ComponentRegistry::new();
        (registry.register::<Marker>(), registry.register::<Bare>())
    }

    #[test]
    fn test_insert_sets_owner() {
        let mut entity = Entity::new(EntityId::new(7));
        let (tid, _) = type_ids();
        entity.insert(tid, Box::new(Marker::new()));
        let marker = entity.get::<Marker>(tid).unwrap();
        assert_eq!(marker.owner, Some(EntityId::new(7)));
    }

    #[test]
    fn test_insert_overwrite_returns_previous_undisposed() {
        let mut entity = Entity::new(EntityId::new(1));
        let (tid, _) = type_ids();
        entity.insert(tid, Box::new(Marker::new()));
        let previous = entity.insert(tid, Box::new(Marker::new())).unwrap();
        let previous = previous.as_any().downcast_ref::<Marker>().unwrap();
        assert!(!previous.disposed);
        assert!(entity.has(tid));
    }

    #[test]
    fn test_remove_detaches_and_disposes() {
        let mut entity = Entity::new(EntityId::new(1));
        let (tid, _) = type_ids();
        entity.insert(tid, Box::new(Marker::new()));
        entity.remove(tid);
        assert!(!entity.has(tid));
        // Removing again is a no-op.
        entity.remove(tid);
    }

    #[test]
    fn test_missing_component_is_none() {
        let entity = Entity::new(EntityId::new(1));
        let (marker_tid, bare_tid) = type_ids();
        assert!(entity.get::<Marker>(marker_tid).is_none());
        assert!(!entity.has(bare_tid));
    }

    #[test]
    fn test_tag_set_semantics() {
        let mut entity = Entity::new(EntityId::new(1));
        entity.add_tag("enemy");
        entity.add_tag("enemy");
        assert!(entity.has_tag("enemy"));
        assert_eq!(entity.tags().count(), 1);
        entity.remove_tag("enemy");
        assert!(!entity.has_tag("enemy"));
        entity.remove_tag("enemy"); // no-op
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut entity = Entity::new(EntityId::new(1));
        let (tid, _) = type_ids();
        entity.insert(tid, Box::new(Marker::new()));
        entity.add_tag("projectile");
        entity.dispose();
        assert!(!entity.is_active());
        assert_eq!(entity.component_count(), 0);
        assert_eq!(entity.tags().count(), 0);
        entity.dispose(); // must not panic, state stays consistent
        assert!(!entity.is_active());
    }
}
