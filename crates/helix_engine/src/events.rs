//! Cross-cutting notification bus
//!
//! Systems publish events synchronously during their update; consumers
//! either pull matching events out of the queue mid-frame
//! ([`EventBus::take_matching`]) or register a handler that receives
//! whatever is still queued at end of frame.
//!
//! Delivery ordering relative to the scheduler pass: an event published
//! during update is visible to *later-priority* systems the same frame
//! and to earlier-priority systems the next frame. To make the second
//! half hold, [`EventBus::dispatch_queued`] keeps an event no handler
//! consumed queued for exactly one more frame before dropping it; an
//! unconsumed event is therefore offered to the handlers at the end of
//! at most two frames. Registered handlers run after the render pass.

use crate::ecs::entity::EntityId;
use crate::foundation::math::Vec2;
use crate::stats::StatId;

/// Notification payloads the runtime knows about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A weapon asked the projectile spawner for a new projectile
    ProjectileRequested {
        /// Spawn position in world space
        position: Vec2,
        /// Initial velocity in world units per second
        velocity: Vec2,
        /// Damage carried by the projectile
        damage: f32,
        /// Lifetime in seconds
        lifetime: f32,
        /// Firing entity, when known
        shooter: Option<EntityId>,
    },
    /// An upgrade was applied to a weapon stat
    WeaponUpgraded {
        /// Which stat changed
        stat: StatId,
        /// Upgrade amount as a fraction (0.25 = +25%)
        amount: f32,
    },
    /// An entity was destroyed by gameplay (not pooling)
    EntityDestroyed {
        /// The destroyed entity
        entity: EntityId,
    },
    /// A new enemy wave began
    WaveStarted {
        /// 1-based wave number
        wave: u32,
    },
}

/// Handler invoked for events still queued at end of frame.
///
/// Returning `true` consumes the event and stops forwarding to later
/// handlers.
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &GameEvent) -> bool;
}

/// A queued event plus whether it already survived one end of frame
struct QueuedEvent {
    event: GameEvent,
    carried: bool,
}

/// Publish/consume bus for [`GameEvent`]s
#[derive(Default)]
pub struct EventBus {
    queue: Vec<QueuedEvent>,
    handlers: Vec<Box<dyn EventHandler>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event onto the frame queue
    pub fn publish(&mut self, event: GameEvent) {
        self.queue.push(QueuedEvent {
            event,
            carried: false,
        });
    }

    /// Register an end-of-frame handler (chain of responsibility)
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Pull every queued event matching the predicate, preserving the
    /// publish order of what remains.
    pub fn take_matching(&mut self, predicate: impl Fn(&GameEvent) -> bool) -> Vec<GameEvent> {
        let mut taken = Vec::new();
        let mut index = 0;
        while index < self.queue.len() {
            if predicate(&self.queue[index].event) {
                taken.push(self.queue.remove(index).event);
            } else {
                index += 1;
            }
        }
        taken
    }

    /// End-of-frame delivery: offer every queued event to the
    /// registered handlers, stopping at the first handler that consumes
    /// it.
    ///
    /// Consumed events are dropped. An unconsumed event published this
    /// frame stays queued for one more frame — that is what lets
    /// earlier-priority systems see it next frame — and is dropped at
    /// the end of that second frame.
    pub fn dispatch_queued(&mut self) {
        let queued = std::mem::take(&mut self.queue);
        for mut queued_event in queued {
            let consumed = self
                .handlers
                .iter_mut()
                .any(|handler| handler.on_event(&queued_event.event));
            if !consumed && !queued_event.carried {
                queued_event.carried = true;
                self.queue.push(queued_event);
            }
        }
    }

    /// Number of events currently queued
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Drop all queued events (state transitions)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
