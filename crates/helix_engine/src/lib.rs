//! # Helix Engine
//!
//! A single-threaded ECS game-loop runtime for high-churn 2D games.
//!
//! ## Features
//!
//! - **ECS core**: entities with integer-indexed component slots, tags,
//!   and monotonically increasing ids
//! - **Priority scheduler**: deterministic two-pass frames (all updates,
//!   then all renders) with pause semantics and per-system fault
//!   isolation
//! - **Object pooling**: generic [`ecs::Pool`] plus entity recycling for
//!   projectile-grade churn without per-spawn allocation
//! - **Per-session camera**: exponential-smoothing follow camera with
//!   exact world↔screen mapping
//!
//! ## Quick Start
//!
//! ```rust
//! use helix_engine::prelude::*;
//!
//! let mut session = GameSession::new(SessionConfig::default())?;
//! session.add_system(Box::new(MotionSystem::new()));
//! session.add_system(Box::new(ProjectileSystem::new()));
//!
//! // One fixed-step frame with no real input or drawing backend.
//! session.fixed_frame(1.0 / 60.0, &NullInput, &mut NullRenderContext);
//! # Ok::<(), helix_engine::session::SessionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod camera;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod input;
pub mod session;
pub mod stats;

pub use camera::CameraFollow;
pub use session::{GameSession, SessionConfig, SessionError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::CameraFollow,
        ecs::{
            components::{MotionComponent, ProjectileComponent, TransformComponent},
            systems::{CameraSystem, MotionSystem, ProjectileParams, ProjectileSystem},
            Component, DebugEntry, DeferredQueue, EntityId, GameContext, NullRenderContext, Pool,
            PoolKey, RenderContext, Scheduler, System, SystemId, World,
        },
        events::{EventBus, EventHandler, GameEvent},
        foundation::{
            math::{vec2, Vec2},
            time::Timer,
        },
        input::{Action, InputSource, NullInput},
        session::{GameSession, SessionConfig, SessionError},
        stats::{StatBlock, StatId, UpgradeRegistry},
    };
}
