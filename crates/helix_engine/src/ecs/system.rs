//! System trait and per-frame context
//!
//! A system is a processing unit invoked once per frame in a fixed
//! order. Systems hold no borrowed references between frames; the world
//! and session collaborators are passed into each hook instead, so the
//! borrow story stays simple and sessions remain independent.

use std::any::Any;

use crate::camera::CameraFollow;
use crate::events::EventBus;
use crate::input::InputSource;

use super::component::DebugEntry;
use super::world::World;

/// Opaque drawing surface handle.
///
/// The runtime guarantees render call order but defines no drawing
/// primitives; concrete backends downcast to their own type.
pub trait RenderContext: Any {
    /// Typed downcast support
    fn as_any(&self) -> &dyn Any;
    /// Typed downcast support (mutable)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Render context that draws nothing (headless runs and tests)
#[derive(Debug, Default)]
pub struct NullRenderContext;

impl RenderContext for NullRenderContext {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Session collaborators handed to every `update` call.
///
/// Borrowed for the duration of one frame pass; nothing here outlives
/// the frame.
pub struct GameContext<'a> {
    /// The session's follow camera
    pub camera: &'a mut CameraFollow,
    /// Cross-cutting notification bus
    pub events: &'a mut EventBus,
    /// Logical input polling collaborator
    pub input: &'a dyn InputSource,
}

/// Contract for per-frame processing units.
///
/// Lifecycle: constructed, `initialize` once at registration, then
/// repeated `update`/`render`, then `dispose` on teardown. A system
/// missing a required dependency (no target entity, absent component)
/// must degrade to a no-op for that frame rather than panic.
pub trait System {
    /// Name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Execution priority; lower runs earlier. Read once at
    /// registration and stable thereafter.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether `update` keeps firing while the game is paused.
    ///
    /// Pause-menu input and UI systems set this; `render` is never
    /// suppressed by pause either way.
    fn updates_during_pause(&self) -> bool {
        false
    }

    /// One-time setup, called when the system is registered
    fn initialize(&mut self, _world: &mut World) {}

    /// Per-frame update, called in ascending priority order
    fn update(&mut self, world: &mut World, ctx: &mut GameContext<'_>, delta_time: f32);

    /// Per-frame render, called after *all* updates complete, in the
    /// same priority order
    fn render(&mut self, _world: &World, _ctx: &mut dyn RenderContext) {}

    /// Teardown; clears internal state, owns none of the collaborators
    fn dispose(&mut self) {}

    /// Optional debug-introspection hook; default reports nothing
    fn debug_entries(&self) -> Vec<DebugEntry> {
        Vec::new()
    }
}
