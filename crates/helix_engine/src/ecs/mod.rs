//! Entity-Component-System runtime
//!
//! The core of the frame loop: entity/component storage, the priority
//! scheduler, the generic object pool, and the built-in spawner
//! systems.

pub mod component;
pub mod components;
pub mod deferred;
pub mod entity;
pub mod pool;
pub mod scheduler;
pub mod system;
pub mod systems;
pub mod world;

pub use component::{Component, ComponentRegistry, ComponentTypeId, DebugEntry};
pub use deferred::DeferredQueue;
pub use entity::{Entity, EntityId};
pub use pool::{Pool, PoolKey};
pub use scheduler::{Scheduler, SystemId};
pub use system::{GameContext, NullRenderContext, RenderContext, System};
pub use world::World;
