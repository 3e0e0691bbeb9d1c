//! System scheduling
//!
//! Orders registered systems ascending by priority (ties keep
//! registration order) and drives the two-pass frame: every enabled
//! system's `update`, then every enabled system's `render` in the same
//! order. Honors the global pause flag and isolates per-system faults
//! so one panicking system cannot take down the frame.

use std::panic::{self, AssertUnwindSafe};

use super::system::{GameContext, RenderContext, System};
use super::world::World;

/// Unique identifier for a registered system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemId(u64);

struct SystemEntry {
    id: SystemId,
    name: &'static str,
    /// Cached at registration; the ordering contract requires priority
    /// to be stable once registered.
    priority: i32,
    enabled: bool,
    system: Box<dyn System>,
}

/// Priority-ordered, pause-aware system scheduler
pub struct Scheduler {
    entries: Vec<SystemEntry>,
    next_id: u64,
    paused: bool,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            paused: false,
        }
    }

    /// Register a system: `initialize` runs once, priority is cached,
    /// and the execution order is re-sorted (stable, so equal
    /// priorities keep registration order).
    pub fn add_system(&mut self, world: &mut World, mut system: Box<dyn System>) -> SystemId {
        let id = SystemId(self.next_id);
        self.next_id += 1;

        system.initialize(world);
        let entry = SystemEntry {
            id,
            name: system.name(),
            priority: system.priority(),
            enabled: true,
            system,
        };
        log::debug!(
            "registered system '{}' (priority {})",
            entry.name,
            entry.priority
        );
        self.entries.push(entry);
        // Vec::sort_by_key is stable; ties keep registration order.
        self.entries.sort_by_key(|entry| entry.priority);
        id
    }

    /// Enable or disable a system. Disabled systems receive neither
    /// `update` nor `render`. Returns false for unknown ids.
    pub fn set_enabled(&mut self, id: SystemId, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Set the global pause flag.
    ///
    /// While paused, `update` is suppressed for every system except
    /// those with [`System::updates_during_pause`]; `render` is never
    /// suppressed — the paused frame must still draw.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Current pause state
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no system is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run one frame: the full update pass, then the full render pass.
    pub fn run_frame(
        &mut self,
        world: &mut World,
        ctx: &mut GameContext<'_>,
        render_ctx: &mut dyn RenderContext,
        delta_time: f32,
    ) {
        self.update_pass(world, ctx, delta_time);
        self.render_pass(world, render_ctx);
    }

    /// Call `update` on every enabled (and not paused-out) system in
    /// priority order.
    pub fn update_pass(&mut self, world: &mut World, ctx: &mut GameContext<'_>, delta_time: f32) {
        let paused = self.paused;
        for entry in &mut self.entries {
            if !entry.enabled {
                continue;
            }
            if paused && !entry.system.updates_during_pause() {
                continue;
            }
            run_isolated(entry.name, "update", || {
                entry.system.update(world, ctx, delta_time);
            });
        }
    }

    /// Call `render` on every enabled system in priority order.
    pub fn render_pass(&mut self, world: &World, render_ctx: &mut dyn RenderContext) {
        for entry in &mut self.entries {
            if !entry.enabled {
                continue;
            }
            run_isolated(entry.name, "render", || {
                entry.system.render(world, render_ctx);
            });
        }
    }

    /// Tear down every system (`dispose` in priority order) and clear
    /// the registration list.
    pub fn dispose_all(&mut self) {
        for entry in &mut self.entries {
            entry.system.dispose();
        }
        self.entries.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one system hook behind a panic boundary.
///
/// A fault in one system is logged and swallowed so the remaining
/// systems still run this frame.
fn run_isolated(name: &str, hook: &str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        log::error!("system '{name}' panicked in {hook}: {message}");
    }
}
