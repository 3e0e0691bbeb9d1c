//! Component contract and component-type registry
//!
//! Components are data/behavior units attached to exactly one entity at
//! a time. Lookup is dispatched through small integer type ids handed
//! out by a per-world [`ComponentRegistry`], so the hot path is an
//! indexed slot access rather than a runtime-type map probe.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::EntityId;

/// A single (label, value) pair surfaced by debug introspection.
///
/// Produced best-effort by components and systems; consumers must
/// tolerate an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    /// Short human-readable label
    pub label: &'static str,
    /// Rendered value
    pub value: String,
}

impl DebugEntry {
    /// Create a debug entry from a label and anything displayable
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Contract for data/behavior units owned by an entity.
///
/// The entity owns the component; a component may keep a *back-reference*
/// to its owner (an [`EntityId`], never a pointer) for convenience. The
/// lifecycle hooks keep that back-reference from ever going stale: the
/// world calls [`Component::attached`] when the component is stored and
/// [`Component::detached`] in the same operation that removes or
/// disposes it.
pub trait Component: Any {
    /// Called when the component is stored on an entity.
    ///
    /// Components that track their owner record the id here.
    fn attached(&mut self, _owner: EntityId) {}

    /// Called when the component is removed from its entity or the
    /// entity is disposed. Must clear any owner back-reference.
    fn detached(&mut self) {}

    /// Release internally held resources. Default is a no-op; must be
    /// safe to call more than once.
    fn dispose(&mut self) {}

    /// Optional debug-introspection hook; default reports nothing.
    fn debug_entries(&self) -> Vec<DebugEntry> {
        Vec::new()
    }

    /// Typed downcast support
    fn as_any(&self) -> &dyn Any;

    /// Typed downcast support (mutable)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Stable small integer identifying a component kind within one world.
///
/// Assigned on first registration and never changes for the lifetime of
/// the registry, which makes it usable as a direct slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    /// Slot index form of this id
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-world mapping from Rust types to [`ComponentTypeId`]s.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentTypeId>,
    next: u32,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for `T`, assigning the next free one on first use
    pub fn register<T: Component>(&mut self) -> ComponentTypeId {
        let next = &mut self.next;
        *self.ids.entry(TypeId::of::<T>()).or_insert_with(|| {
            let id = ComponentTypeId(*next);
            *next += 1;
            id
        })
    }

    /// Get the id for `T` if it has been registered
    pub fn lookup<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered component kinds
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no component kind has been registered yet
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health(f32);
    impl Component for Health {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Armor(f32);
    impl Component for Armor {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_registration_is_stable() {
        let mut registry = ComponentRegistry::new();
        let health = registry.register::<Health>();
        let armor = registry.register::<Armor>();
        assert_ne!(health, armor);
        // Repeated registration returns the same id.
        assert_eq!(registry.register::<Health>(), health);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_unregistered() {
        let registry = ComponentRegistry::new();
        assert!(registry.lookup::<Health>().is_none());
    }

    #[test]
    fn test_ids_are_sequential_indices() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.register::<Health>().index(), 0);
        assert_eq!(registry.register::<Armor>().index(), 1);
    }

    #[test]
    fn test_debug_entry_formatting() {
        let entry = DebugEntry::new("hp", 42.5);
        assert_eq!(entry.label, "hp");
        assert_eq!(entry.value, "42.5");
    }
}
